//! gRPC client for the upstream token-issuing auth service.

use std::time::Duration;

use async_trait::async_trait;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Request, Status};
use tracing::warn;

use movify_application::{
    AuthGateway, GatewayLoginRequest, GatewayRegisterRequest, IssuedCredentials,
};
use movify_core::{AppError, AppResult, Principal, Role};

/// Generated protobuf types for the auth service.
#[allow(missing_docs)]
pub mod proto {
    tonic::include_proto!("movify");
}

use proto::auth_service_client::AuthServiceClient;
use proto::{LoginUserRequest, RegisterUserRequest, ValidationTokenRequest};

/// Auth gateway backed by a lazily connected gRPC channel.
#[derive(Clone)]
pub struct GrpcAuthGateway {
    client: AuthServiceClient<Channel>,
}

impl GrpcAuthGateway {
    /// Creates a gateway for `url`. The connection is opened on first use.
    pub fn connect_lazy(url: &str, timeout: Duration) -> AppResult<Self> {
        let endpoint = Endpoint::from_shared(url.to_owned())
            .map_err(|error| {
                AppError::Validation(format!("invalid auth service url '{url}': {error}"))
            })?
            .connect_timeout(timeout)
            .timeout(timeout);

        Ok(Self {
            client: AuthServiceClient::new(endpoint.connect_lazy()),
        })
    }
}

/// Maps a failed remote call onto the application error taxonomy.
///
/// Transport and server faults stay internal; every other rejection means the
/// supplied credentials or token were not accepted.
fn status_to_error(status: &Status, operation: &str) -> AppError {
    match status.code() {
        Code::Unavailable
        | Code::DeadlineExceeded
        | Code::Internal
        | Code::Unknown
        | Code::ResourceExhausted
        | Code::Unimplemented => {
            warn!(code = ?status.code(), operation, "auth service call failed");
            AppError::Internal(format!("auth service {operation} failed: {}", status.message()))
        }
        _ => AppError::Unauthorized(format!("auth service rejected {operation}")),
    }
}

fn parse_role(value: &str) -> AppResult<Role> {
    value
        .parse()
        .map_err(|_| AppError::Internal(format!("auth service returned unknown role '{value}'")))
}

#[async_trait]
impl AuthGateway for GrpcAuthGateway {
    async fn login_user(&self, request: GatewayLoginRequest) -> AppResult<String> {
        let response = self
            .client
            .clone()
            .login_user(Request::new(LoginUserRequest {
                email: request.email,
                password: request.password,
                password_hash: request.password_hash,
                password_salt: request.password_salt,
                role: request.role.as_str().to_owned(),
            }))
            .await
            .map_err(|status| status_to_error(&status, "login"))?;

        Ok(response.into_inner().token)
    }

    async fn register_user(
        &self,
        request: GatewayRegisterRequest,
    ) -> AppResult<IssuedCredentials> {
        let response = self
            .client
            .clone()
            .register_user(Request::new(RegisterUserRequest {
                email: request.email,
                password: request.password,
                role: request.role.as_str().to_owned(),
            }))
            .await
            .map_err(|status| match status_to_error(&status, "registration") {
                AppError::Unauthorized(message) => AppError::Internal(message),
                other => other,
            })?
            .into_inner();

        Ok(IssuedCredentials {
            token: response.token,
            password_hash: response.password_hash,
            password_salt: response.password_salt,
        })
    }

    async fn validate_token(&self, token: &str) -> AppResult<Principal> {
        let response = self
            .client
            .clone()
            .validate_token(Request::new(ValidationTokenRequest {
                token: token.to_owned(),
            }))
            .await
            .map_err(|status| status_to_error(&status, "token validation"))?
            .into_inner();

        if response.email.is_empty() {
            return Err(AppError::Unauthorized("token carries no subject".to_owned()));
        }

        Ok(Principal::new(response.email, parse_role(&response.role)?))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use movify_core::{AppError, Role};
    use tonic::Status;

    use super::{GrpcAuthGateway, parse_role, status_to_error};

    #[test]
    fn rejected_credentials_are_unauthorized() {
        for status in [
            Status::unauthenticated("bad password"),
            Status::invalid_argument("malformed"),
            Status::permission_denied("nope"),
        ] {
            assert!(matches!(
                status_to_error(&status, "login"),
                AppError::Unauthorized(_)
            ));
        }
    }

    #[test]
    fn outages_are_internal() {
        assert!(matches!(
            status_to_error(&Status::unavailable("down"), "login"),
            AppError::Internal(_)
        ));
        assert!(matches!(
            status_to_error(&Status::deadline_exceeded("slow"), "token validation"),
            AppError::Internal(_)
        ));
    }

    #[test]
    fn roles_from_the_auth_service_are_parsed() {
        assert_eq!(parse_role("ADMIN").ok(), Some(Role::Admin));
        assert!(matches!(parse_role("ROOT"), Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn invalid_url_is_rejected_before_connecting() {
        assert!(GrpcAuthGateway::connect_lazy("not a url", Duration::from_secs(1)).is_err());
        assert!(GrpcAuthGateway::connect_lazy("http://127.0.0.1:50051", Duration::from_secs(1)).is_ok());
    }
}
