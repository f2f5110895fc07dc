use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{data, protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        // Public
        .route("/", get(public::index))
        .route("/health", get(public::health))
        .route("/api/login", post(public::login))
        .nest_service("/static", ServeDir::new(&config.api.static_dir))
        // Bearer-protected session routes
        .merge(session_routes(&state))
        // Generic model CRUD
        .merge(data_routes(&state))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if let Some(cors) = cors_layer(&config.security.cors_origins, config.security.enable_cors) {
        router = router.layer(cors);
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn session_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/me", get(protected::me))
        .route("/api/logout", post(protected::logout))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
}

fn data_routes(state: &AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/api/:model", get(data::schema_get).post(data::schema_post))
        .route(
            "/api/:model/:id",
            get(data::record_get).put(data::record_put).delete(data::record_delete),
        );

    if state.config.security.require_auth_for_data {
        router.route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
    } else {
        router
    }
}

fn cors_layer(origins: &[String], enabled: bool) -> Option<CorsLayer> {
    if !enabled {
        return None;
    }
    if origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect();
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
