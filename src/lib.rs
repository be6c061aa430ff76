//! Typed async client for the notarial document registry services.
//!
//! Three remote HTTP services (authentication, documents, activity log) are
//! consumed through [`api::RegistryClient`]; [`session::SessionManager`] owns
//! the authenticated identity and persists its token across restarts.

pub mod access;
pub mod api;
pub mod config;
pub mod error;
pub mod latest;
pub mod session;
pub mod token_store;
