// handlers/mod.rs - Handler tiers
//
// public    (no auth): index page, health, login
// protected (bearer):  /api/me, /api/logout
// data      (no auth unless SECURITY_REQUIRE_AUTH_FOR_DATA): /api/{model}[/{id}]
pub mod data;
pub mod protected;
pub mod public;
