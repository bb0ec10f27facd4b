use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::AUTHORIZATION};
use tracing::{debug, warn};

use super::{Identity, IdentityProvider, model::CurrentUserResponse};
use crate::error::CustomError;

/// Resolves callers against the external user service.
pub struct UserServiceClient {
    client: Client,
    url: String,
}

impl UserServiceClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CustomError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CustomError::HttpClient)?;
        Ok(UserServiceClient {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl IdentityProvider for UserServiceClient {
    async fn resolve(&self, authorization: Option<&str>) -> Identity {
        let mut request = self.client.get(&self.url);
        if let Some(credential) = authorization {
            request = request.header(AUTHORIZATION, credential);
        }

        let response = match request.send().await {
            Ok(response) => response,
            // A credential that is not a valid header value never reaches the wire.
            Err(e) if e.is_builder() => {
                debug!("Rejected credential: {}", e);
                return Identity::Unauthenticated;
            }
            Err(e) => {
                warn!("Identity service unreachable: {}", e);
                return Identity::UpstreamUnavailable;
            }
        };

        if response.status() != StatusCode::OK {
            debug!("Identity service answered {}", response.status());
            return Identity::Unauthenticated;
        }

        match response.json::<CurrentUserResponse>().await {
            Ok(CurrentUserResponse { user: Some(user) }) => Identity::Authenticated(user),
            Ok(CurrentUserResponse { user: None }) => Identity::Unauthenticated,
            Err(e) => {
                warn!("Malformed identity response: {}", e);
                Identity::UpstreamUnavailable
            }
        }
    }
}
