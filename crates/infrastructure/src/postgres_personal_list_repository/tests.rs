use chrono::{Duration, Utc};
use movify_application::{ContentRepository, PersonalListRepository, UserRepository};
use movify_core::AppError;
use movify_domain::FavoriteEntry;

use super::PostgresPersonalListRepository;
use crate::test_support::{sample_content, sample_user, test_pool};
use crate::{PostgresContentRepository, PostgresUserRepository};

#[tokio::test]
async fn entries_are_unique_per_pair_and_listed_newest_first() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let users = PostgresUserRepository::new(pool.clone());
    let contents = PostgresContentRepository::new(pool.clone());
    let repository = PostgresPersonalListRepository::new(pool);

    let user = sample_user();
    let older_content = sample_content("Favorite Older");
    let newer_content = sample_content("Favorite Newer");
    assert!(users.insert(&user).await.is_ok());
    assert!(contents.insert(&older_content).await.is_ok());
    assert!(contents.insert(&newer_content).await.is_ok());

    let now = Utc::now();
    let older = FavoriteEntry::new(user.id, older_content.id, now - Duration::minutes(5));
    let newer = FavoriteEntry::new(user.id, newer_content.id, now);
    assert!(repository.insert(&older).await.is_ok());
    assert!(repository.insert(&newer).await.is_ok());

    let duplicate = FavoriteEntry::new(user.id, older_content.id, now);
    assert!(matches!(
        repository.insert(&duplicate).await,
        Err(AppError::Conflict(_))
    ));

    let listed = repository
        .list_for_user(user.id)
        .await
        .unwrap_or_else(|_| panic!("test"));
    let ids: Vec<_> = listed.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, [newer.id, older.id]);

    let by_pair = repository
        .find_by_pair(user.id, older_content.id)
        .await
        .unwrap_or_else(|_| panic!("test"));
    assert_eq!(by_pair.map(|entry| entry.id), Some(older.id));

    assert!(users.delete(user.id).await.is_ok());
    assert!(matches!(repository.find(newer.id).await, Ok(None)));
    assert!(contents.delete(older_content.id).await.is_ok());
    assert!(contents.delete(newer_content.id).await.is_ok());
}
