use std::sync::Arc;

use tracing::{error, info, warn};

use super::{
    model::{
        AddHoldingRequest, HoldingResponse, MessageResponse, RemoveHoldingRequest, TotalResponse,
    },
    repository::PortfolioRepository,
    service::PortfolioService,
};
use crate::{
    constants::{
        BAD_REQUEST, INTERNAL_ERROR, NOT_FOUND, OK_RESPONSE, STATUS_SUCCESS, UNAUTHORIZED,
    },
    error::CustomError,
    identity::{Identity, IdentityProvider, model::AuthenticatedUser},
    req::Request,
    res::Response,
    utils::{des_from_str, extract_authorization, non_empty},
};

pub struct PortfolioController {
    service: PortfolioService,
    identity: Arc<dyn IdentityProvider>,
}

impl PortfolioController {
    pub fn new(service: PortfolioService, identity: Arc<dyn IdentityProvider>) -> Self {
        PortfolioController { service, identity }
    }

    pub fn from_pool(pool: sqlx::AnyPool, identity: Arc<dyn IdentityProvider>) -> Self {
        Self::new(
            PortfolioService::new(PortfolioRepository::new(pool)),
            identity,
        )
    }

    pub async fn total(&self, request: &Request) -> Response {
        let user = match self.authenticate(request).await {
            Ok(user) => user,
            Err(response) => return response,
        };

        match self.service.get_total_net_holding(&user.id).await {
            Ok(total) => Response::json(
                OK_RESPONSE,
                &TotalResponse {
                    status: STATUS_SUCCESS,
                    user_id: user.id,
                    total_net_holding: total,
                },
            ),
            Err(e) => storage_failure(e),
        }
    }

    pub async fn add(&self, request: &Request) -> Response {
        let user = match self.authenticate(request).await {
            Ok(user) => user,
            Err(response) => return response,
        };

        let body: AddHoldingRequest = match des_from_str(&request.body) {
            Ok(body) => body,
            Err(e) => {
                info!("Invalid add body: {}", e);
                return Response::error(BAD_REQUEST, "invalid body");
            }
        };
        let (Some(coin_id), Some(amount)) = (non_empty(body.coin_id), body.amount) else {
            return Response::error(BAD_REQUEST, "coin_id and amount required");
        };

        match self.service.add_holding(&user.id, &coin_id, amount).await {
            Ok(holding) => Response::json(
                OK_RESPONSE,
                &HoldingResponse {
                    status: STATUS_SUCCESS,
                    holding: holding.into(),
                },
            ),
            Err(e) => storage_failure(e),
        }
    }

    pub async fn remove(&self, request: &Request) -> Response {
        let user = match self.authenticate(request).await {
            Ok(user) => user,
            Err(response) => return response,
        };

        let body: RemoveHoldingRequest = match des_from_str(&request.body) {
            Ok(body) => body,
            Err(e) => {
                info!("Invalid remove body: {}", e);
                return Response::error(BAD_REQUEST, "invalid body");
            }
        };
        let Some(coin_id) = non_empty(body.coin_id) else {
            return Response::error(BAD_REQUEST, "coin_id required");
        };

        match self.service.remove_holding(&user.id, &coin_id).await {
            Ok(true) => Response::json(
                OK_RESPONSE,
                &MessageResponse {
                    status: STATUS_SUCCESS,
                    message: "holding removed",
                },
            ),
            Ok(false) => Response::error(NOT_FOUND, "holding not found"),
            Err(e) => storage_failure(e),
        }
    }

    async fn authenticate(&self, request: &Request) -> Result<AuthenticatedUser, Response> {
        let authorization = extract_authorization(&request.headers);
        match self.identity.resolve(authorization).await {
            Identity::Authenticated(user) => Ok(user),
            Identity::Unauthenticated => {
                info!("Unauthenticated request to {}", request.path);
                Err(Response::error(UNAUTHORIZED, "User not authenticated"))
            }
            // Callers cannot tell an outage from a bad credential.
            Identity::UpstreamUnavailable => {
                warn!("Identity service unavailable for {}", request.path);
                Err(Response::error(UNAUTHORIZED, "User not authenticated"))
            }
        }
    }
}

fn storage_failure(e: CustomError) -> Response {
    error!("Error portfolio db: {:#?}", e);
    Response::error(INTERNAL_ERROR, "Internal server error")
}
