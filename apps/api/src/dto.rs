mod auth;
mod common;
mod contents;
mod episodes;
mod personal_lists;
mod users;

pub use auth::{
    LoginRequest, LoginResponse, PasswordResetRequest, RegisterRequest, RegisterResponse,
};
pub use common::{HealthDependencyStatus, HealthResponse, PageQuery, PageResponse};
pub use contents::{
    ContentResponse, CreateContentRequest, SearchContentRequest, UpdateContentRequest,
};
pub use episodes::{CreateEpisodeRequest, EpisodeListQuery, EpisodeResponse, UpdateEpisodeRequest};
pub use personal_lists::{AddFavoriteRequest, FavoriteEntryResponse, RemoveFavoriteRequest};
pub use users::{CreateUserRequest, SearchUserRequest, UpdateUserRequest, UserResponse};
