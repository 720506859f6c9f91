pub mod auth;
pub mod contents;
pub mod episodes;
pub mod health;
pub mod personal_lists;
pub mod users;
