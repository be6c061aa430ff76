//! Role model and the registration gate.
//! The predicate here is advisory: the documents service re-checks the role
//! on every create and its verdict is the authoritative one.

/// Permission class of an authenticated user, parsed from the service's
/// role string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Notary,
    Admin,
    Other(String),
}

impl Role {
    pub fn parse(s: &str) -> Self {
        match s {
            "notary" => Role::Notary,
            "admin" => Role::Admin,
            other => Role::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Notary => "notary",
            Role::Admin => "admin",
            Role::Other(s) => s.as_str(),
        }
    }
}

/// Only notaries and admins may register documents.
pub fn can_register(role: &Role) -> bool {
    matches!(role, Role::Notary | Role::Admin)
}
