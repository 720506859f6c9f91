//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod content;
mod episode;
mod ids;
mod login_attempt;
mod paging;
mod personal_list;
mod user;

pub use content::{
    AgeRestriction, CastMember, Category, Content, ContentFilter, ContentPatch, Genre,
    NewCastMember, NewContent, Quality, RELEASE_YEAR_MAX, RELEASE_YEAR_MIN,
};
pub use episode::{Episode, EpisodePatch, EpisodeStatus, NewEpisode};
pub use ids::{AttemptRecordId, CastMemberId, ContentId, EpisodeId, FavoriteEntryId, UserId};
pub use login_attempt::{
    AttemptRecord, AttemptTransition, CLIENT_KEY_MAX_LENGTH, ClientKey, LoginAttemptPolicy,
    is_blocked, next_attempt,
};
pub use paging::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest};
pub use personal_list::FavoriteEntry;
pub use user::{
    EmailAddress, LOGIN_MAX_LENGTH, NewUser, User, UserLookup, UserPatch, UserSearchType,
    validate_login,
};
