use std::collections::HashMap;
use std::fmt;

use super::manager::DatabaseError;

/// Every record type reachable through `/api/{model}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Customer,
    User,
    Admin,
    Tech,
    Job,
    TimeCard,
    Expense,
}

impl ModelKind {
    pub const ALL: [ModelKind; 7] = [
        ModelKind::Customer,
        ModelKind::User,
        ModelKind::Admin,
        ModelKind::Tech,
        ModelKind::Job,
        ModelKind::TimeCard,
        ModelKind::Expense,
    ];

    /// Canonical path segment, also the table name
    pub fn table(self) -> &'static str {
        match self {
            ModelKind::Customer => "customer",
            ModelKind::User => "user",
            ModelKind::Admin => "admin",
            ModelKind::Tech => "tech",
            ModelKind::Job => "job",
            ModelKind::TimeCard => "timecard",
            ModelKind::Expense => "expense",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Immutable name → record type table, built once at startup
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    entries: HashMap<&'static str, ModelKind>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        let mut entries: HashMap<&'static str, ModelKind> =
            ModelKind::ALL.iter().map(|kind| (kind.table(), *kind)).collect();
        // Older clients still address users as employees
        entries.insert("employee", ModelKind::User);
        Self { entries }
    }

    /// Exact, case-sensitive lookup of a path segment
    pub fn resolve(&self, name: &str) -> Result<ModelKind, DatabaseError> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| DatabaseError::UnknownModel(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `$body` with `$model` bound as a type alias for the record type behind `$kind`.
///
/// ```ignore
/// let rows = with_model!(kind, M => to_json(gateway.list::<M>().await?))?;
/// ```
#[macro_export]
macro_rules! with_model {
    ($kind:expr, $model:ident => $body:expr) => {{
        use $crate::database::models as __models;
        use $crate::database::registry::ModelKind as __Kind;
        match $kind {
            __Kind::Customer => {
                type $model = __models::Customer;
                $body
            }
            __Kind::User => {
                type $model = __models::User;
                $body
            }
            __Kind::Admin => {
                type $model = __models::Admin;
                $body
            }
            __Kind::Tech => {
                type $model = __models::Tech;
                $body
            }
            __Kind::Job => {
                type $model = __models::Job;
                $body
            }
            __Kind::TimeCard => {
                type $model = __models::TimeCard;
                $body
            }
            __Kind::Expense => {
                type $model = __models::Expense;
                $body
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Model;

    #[test]
    fn resolves_every_registered_key() {
        let registry = ModelRegistry::new();
        for (name, kind) in [
            ("customer", ModelKind::Customer),
            ("user", ModelKind::User),
            ("employee", ModelKind::User),
            ("admin", ModelKind::Admin),
            ("tech", ModelKind::Tech),
            ("job", ModelKind::Job),
            ("timecard", ModelKind::TimeCard),
            ("expense", ModelKind::Expense),
        ] {
            assert_eq!(registry.resolve(name).unwrap(), kind, "key {}", name);
        }
        assert_eq!(registry.names().count(), 8);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = ModelRegistry::new();
        assert!(matches!(registry.resolve("Customer"), Err(DatabaseError::UnknownModel(_))));
        assert!(matches!(registry.resolve("TimeCard"), Err(DatabaseError::UnknownModel(_))));
        assert!(matches!(registry.resolve("invoice"), Err(DatabaseError::UnknownModel(_))));
        assert!(matches!(registry.resolve(""), Err(DatabaseError::UnknownModel(_))));
    }

    #[test]
    fn dispatch_reaches_the_matching_type() {
        for kind in ModelKind::ALL {
            let table = crate::with_model!(kind, M => <M as Model>::TABLE);
            assert_eq!(table, kind.table());
        }
    }
}
