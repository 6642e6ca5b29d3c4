pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod provider;

pub use provider::{AuthError, AuthProvider, DisabledAuthProvider};
