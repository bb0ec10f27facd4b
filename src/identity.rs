pub mod client;
pub mod model;

use async_trait::async_trait;
use model::AuthenticatedUser;

/// Outcome of asking the identity service who the caller is.
#[derive(Debug, Clone, PartialEq)]
pub enum Identity {
    Authenticated(AuthenticatedUser),
    Unauthenticated,
    UpstreamUnavailable,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, authorization: Option<&str>) -> Identity;
}
