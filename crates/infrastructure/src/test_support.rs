use chrono::Utc;
use movify_core::Role;
use movify_domain::{
    AgeRestriction, Category, Content, Genre, NewContent, NewUser, Quality, User,
};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Returns a migrated pool, or `None` when `DATABASE_URL` is not set.
pub(crate) async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres tests: {error}");
    }

    Some(pool)
}

pub(crate) fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

pub(crate) fn sample_user() -> User {
    let suffix = unique_suffix();
    User::create(
        NewUser {
            login: format!("user-{suffix}"),
            first_name: Some("Test".to_owned()),
            last_name: None,
            email: format!("user-{suffix}@example.com"),
            password_hash: "hash".to_owned(),
            password_salt: "salt".to_owned(),
            role: Role::User,
        },
        Utc::now(),
    )
    .unwrap_or_else(|_| panic!("test"))
}

pub(crate) fn sample_content(title: &str) -> Content {
    Content::create(
        NewContent {
            title: title.to_owned(),
            quality: Quality::P1080,
            genre: Genre::Drama,
            category: Category::Movie,
            age_restriction: AgeRestriction::SixteenPlus,
            description: None,
            thumbnail: None,
            publisher: None,
            release_year: Some(2001),
            cast_members: Vec::new(),
        },
        Utc::now(),
    )
    .unwrap_or_else(|_| panic!("test"))
}
