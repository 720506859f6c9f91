//! Internal gRPC callbacks for the auth and media services.

use std::str::FromStr;

use movify_application::{ContentService, EpisodeService, UserService};
use movify_core::AppError;
use movify_domain::{ContentId, EpisodeId, EpisodeStatus};
use tonic::{Request, Response, Status};
use tracing::{error, info};
use uuid::Uuid;

#[allow(missing_docs)]
pub mod content_proto {
    tonic::include_proto!("content");
}

use content_proto::content_service_server::{
    ContentService as ContentRpc, ContentServiceServer,
};
use content_proto::{
    SetContentImageUrlRequest, SetEpisodeVideoUrlRequest, UserRoleRequest, UserRoleResponse,
};


/// Server side of `content.ContentService`.
#[derive(Clone)]
pub struct ContentCallbacks {
    user_service: UserService,
    content_service: ContentService,
    episode_service: EpisodeService,
}

impl ContentCallbacks {
    pub fn new(
        user_service: UserService,
        content_service: ContentService,
        episode_service: EpisodeService,
    ) -> Self {
        Self {
            user_service,
            content_service,
            episode_service,
        }
    }

    pub fn into_server(self) -> ContentServiceServer<Self> {
        ContentServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl ContentRpc for ContentCallbacks {
    async fn get_user_role(
        &self,
        request: Request<UserRoleRequest>,
    ) -> Result<Response<UserRoleResponse>, Status> {
        let request = request.into_inner();
        let role = self
            .user_service
            .role_for_email(&request.email)
            .await
            .map_err(app_error_to_status)?;

        Ok(Response::new(UserRoleResponse {
            role: role.as_str().to_owned(),
        }))
    }

    async fn set_content_image_url(
        &self,
        request: Request<SetContentImageUrlRequest>,
    ) -> Result<Response<()>, Status> {
        let request = request.into_inner();
        let content_id = ContentId::from_uuid(parse_uuid("content_id", &request.content_id)?);

        self.content_service
            .set_thumbnail(content_id, request.url)
            .await
            .map_err(app_error_to_status)?;

        info!(content_id = %content_id, "content image url set over grpc");
        Ok(Response::new(()))
    }

    async fn set_episode_video_url(
        &self,
        request: Request<SetEpisodeVideoUrlRequest>,
    ) -> Result<Response<()>, Status> {
        let request = request.into_inner();
        let episode_id = EpisodeId::from_uuid(parse_uuid("episode_id", &request.episode_id)?);
        let status = EpisodeStatus::from_str(request.status.trim()).map_err(app_error_to_status)?;

        self.episode_service
            .set_video(episode_id, request.url, status)
            .await
            .map_err(app_error_to_status)?;

        Ok(Response::new(()))
    }
}

fn parse_uuid(field: &str, value: &str) -> Result<Uuid, Status> {
    Uuid::parse_str(value.trim())
        .map_err(|_| Status::invalid_argument(format!("{field} must be a valid uuid")))
}

/// Maps application errors onto gRPC status codes.
pub(crate) fn app_error_to_status(error: AppError) -> Status {
    match error {
        AppError::Validation(message) => Status::invalid_argument(message),
        AppError::NotFound(message) => Status::not_found(message),
        AppError::Conflict(message) => Status::already_exists(message),
        AppError::Unauthorized(message) => Status::unauthenticated(message),
        AppError::Forbidden(message) => Status::permission_denied(message),
        AppError::RateLimited(message) => Status::resource_exhausted(message),
        AppError::Internal(message) => {
            error!(%message, "grpc call failed");
            Status::internal("internal server error")
        }
    }
}
