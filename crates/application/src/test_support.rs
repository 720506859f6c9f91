use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::Mutex;

use movify_core::{AppError, AppResult};
use movify_domain::{
    AttemptRecord, ClientKey, Content, ContentFilter, ContentId, Episode, EpisodeId,
    FavoriteEntry, FavoriteEntryId, Page, PageRequest, User, UserId, UserLookup,
};

use crate::{
    AttemptLedger, Clock, ContentRepository, EpisodeRepository, LedgerWrite,
    PersonalListRepository, UserRepository,
};

pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(
        Utc.timestamp_opt(1_700_000_000, 0)
            .single()
            .unwrap_or_else(|| panic!("test")),
    ))
}

pub(crate) struct ManualClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub(crate) fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
        }
    }

    pub(crate) fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|_| panic!("clock lock"));
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|_| panic!("clock lock"))
    }
}

#[derive(Default)]
pub(crate) struct FakeAttemptLedger {
    pub(crate) records: Mutex<HashMap<String, (AttemptRecord, DateTime<Utc>)>>,
    pub(crate) writes: Mutex<usize>,
    pub(crate) forced_conflicts: Mutex<usize>,
    pub(crate) unavailable: Mutex<bool>,
}

impl FakeAttemptLedger {
    pub(crate) async fn record(&self, client_key: &str) -> Option<AttemptRecord> {
        self.records
            .lock()
            .await
            .get(client_key)
            .map(|(record, _)| record.clone())
    }

    pub(crate) async fn writes(&self) -> usize {
        *self.writes.lock().await
    }

    async fn check_available(&self) -> AppResult<()> {
        if *self.unavailable.lock().await {
            return Err(AppError::Internal("ledger unavailable".to_owned()));
        }
        Ok(())
    }

    async fn take_forced_conflict(&self) -> bool {
        let mut remaining = self.forced_conflicts.lock().await;
        if *remaining == 0 {
            return false;
        }
        *remaining -= 1;
        true
    }
}

#[async_trait]
impl AttemptLedger for FakeAttemptLedger {
    async fn find(&self, client_key: &ClientKey) -> AppResult<Option<AttemptRecord>> {
        self.check_available().await?;
        Ok(self.record(client_key.as_str()).await)
    }

    async fn insert(
        &self,
        record: &AttemptRecord,
        written_at: DateTime<Utc>,
    ) -> AppResult<LedgerWrite> {
        self.check_available().await?;
        if self.take_forced_conflict().await {
            return Ok(LedgerWrite::Conflict);
        }

        let mut records = self.records.lock().await;
        if records.contains_key(record.client_key.as_str()) {
            return Ok(LedgerWrite::Conflict);
        }
        records.insert(
            record.client_key.as_str().to_owned(),
            (record.clone(), written_at),
        );
        *self.writes.lock().await += 1;
        Ok(LedgerWrite::Applied)
    }

    async fn update(
        &self,
        record: &AttemptRecord,
        expected_version: i64,
        written_at: DateTime<Utc>,
    ) -> AppResult<LedgerWrite> {
        self.check_available().await?;
        if self.take_forced_conflict().await {
            return Ok(LedgerWrite::Conflict);
        }

        let mut records = self.records.lock().await;
        match records.get_mut(record.client_key.as_str()) {
            Some((stored, stored_at)) if stored.version == expected_version => {
                *stored = record.clone();
                *stored_at = written_at;
                *self.writes.lock().await += 1;
                Ok(LedgerWrite::Applied)
            }
            _ => Ok(LedgerWrite::Conflict),
        }
    }

    async fn delete(&self, client_key: &ClientKey) -> AppResult<bool> {
        self.check_available().await?;
        Ok(self
            .records
            .lock()
            .await
            .remove(client_key.as_str())
            .is_some())
    }

    async fn purge_stale(
        &self,
        written_before: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        self.check_available().await?;
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, (record, written_at)| {
            *written_at >= written_before || record.is_locked_at(now)
        });
        Ok((before - records.len()) as u64)
    }
}

#[derive(Default)]
pub(crate) struct FakeUserRepository {
    pub(crate) users: Mutex<HashMap<UserId, User>>,
}

impl FakeUserRepository {
    async fn check_unique(&self, user: &User) -> AppResult<()> {
        let users = self.users.lock().await;
        let clash = users.values().any(|existing| {
            existing.id != user.id && (existing.login == user.login || existing.email == user.email)
        });
        if clash {
            return Err(AppError::Conflict("duplicate user".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn find(&self, lookup: &UserLookup) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .values()
            .find(|user| lookup.matches(user))
            .cloned())
    }

    async fn insert(&self, user: &User) -> AppResult<()> {
        self.check_unique(user).await?;
        self.users.lock().await.insert(user.id, user.clone());
        Ok(())
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        self.check_unique(user).await?;
        self.users.lock().await.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> AppResult<bool> {
        Ok(self.users.lock().await.remove(&user_id).is_some())
    }
}

#[derive(Default)]
pub(crate) struct FakeContentRepository {
    pub(crate) contents: Mutex<HashMap<ContentId, Content>>,
}

#[async_trait]
impl ContentRepository for FakeContentRepository {
    async fn find(&self, content_id: ContentId) -> AppResult<Option<Content>> {
        Ok(self.contents.lock().await.get(&content_id).cloned())
    }

    async fn find_many(&self, content_ids: &[ContentId]) -> AppResult<Vec<Content>> {
        let contents = self.contents.lock().await;
        Ok(content_ids
            .iter()
            .filter_map(|content_id| contents.get(content_id).cloned())
            .collect())
    }

    async fn insert(&self, content: &Content) -> AppResult<()> {
        self.contents
            .lock()
            .await
            .insert(content.id, content.clone());
        Ok(())
    }

    async fn save(&self, content: &Content) -> AppResult<()> {
        self.insert(content).await
    }

    async fn delete(&self, content_id: ContentId) -> AppResult<bool> {
        Ok(self.contents.lock().await.remove(&content_id).is_some())
    }

    async fn search(&self, filter: &ContentFilter, page: PageRequest) -> AppResult<Page<Content>> {
        let mut matching: Vec<Content> = self
            .contents
            .lock()
            .await
            .values()
            .filter(|content| filter.matches(content))
            .cloned()
            .collect();
        matching.sort_by(|left, right| {
            left.title
                .cmp(&right.title)
                .then(left.id.as_uuid().cmp(&right.id.as_uuid()))
        });

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(Page::new(items, total, page))
    }
}

#[derive(Default)]
pub(crate) struct FakeEpisodeRepository {
    pub(crate) episodes: Mutex<HashMap<EpisodeId, Episode>>,
}

#[async_trait]
impl EpisodeRepository for FakeEpisodeRepository {
    async fn find(&self, episode_id: EpisodeId) -> AppResult<Option<Episode>> {
        Ok(self.episodes.lock().await.get(&episode_id).cloned())
    }

    async fn insert(&self, episode: &Episode) -> AppResult<()> {
        self.episodes
            .lock()
            .await
            .insert(episode.id, episode.clone());
        Ok(())
    }

    async fn save(&self, episode: &Episode) -> AppResult<()> {
        self.insert(episode).await
    }

    async fn delete(&self, episode_id: EpisodeId) -> AppResult<bool> {
        Ok(self.episodes.lock().await.remove(&episode_id).is_some())
    }

    async fn list_for_content(&self, content_id: ContentId) -> AppResult<Vec<Episode>> {
        let mut episodes: Vec<Episode> = self
            .episodes
            .lock()
            .await
            .values()
            .filter(|episode| episode.content_id == content_id)
            .cloned()
            .collect();
        episodes.sort_by_key(|episode| {
            (
                episode.season_number.is_none(),
                episode.season_number,
                episode.episode_number.is_none(),
                episode.episode_number,
            )
        });
        Ok(episodes)
    }
}

#[derive(Default)]
pub(crate) struct FakePersonalListRepository {
    pub(crate) entries: Mutex<Vec<FavoriteEntry>>,
}

#[async_trait]
impl PersonalListRepository for FakePersonalListRepository {
    async fn find(&self, entry_id: FavoriteEntryId) -> AppResult<Option<FavoriteEntry>> {
        Ok(self
            .entries
            .lock()
            .await
            .iter()
            .find(|entry| entry.id == entry_id)
            .cloned())
    }

    async fn find_by_pair(
        &self,
        user_id: UserId,
        content_id: ContentId,
    ) -> AppResult<Option<FavoriteEntry>> {
        Ok(self
            .entries
            .lock()
            .await
            .iter()
            .find(|entry| entry.user_id == user_id && entry.content_id == content_id)
            .cloned())
    }

    async fn insert(&self, entry: &FavoriteEntry) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        if entries
            .iter()
            .any(|existing| existing.user_id == entry.user_id && existing.content_id == entry.content_id)
        {
            return Err(AppError::Conflict("duplicate entry".to_owned()));
        }
        entries.push(entry.clone());
        Ok(())
    }

    async fn delete(&self, entry_id: FavoriteEntryId) -> AppResult<bool> {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|entry| entry.id != entry_id);
        Ok(entries.len() != before)
    }

    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<FavoriteEntry>> {
        let mut entries: Vec<FavoriteEntry> = self
            .entries
            .lock()
            .await
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(entries)
    }
}
