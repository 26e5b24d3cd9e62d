//! In-memory adapters and helpers for integration tests.
//!
//! Compiled with the `test-support` feature. The adapters honour the same
//! port contracts as the PostgreSQL and provider adapters, so services can be
//! exercised end to end without external infrastructure.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use tempfile::TempDir;

use crate::domain::ports::{
    ChatCompletionSource, ChatCompletionSourceError, ProfileRepository, ProfileRepositoryError,
    WardrobeItemRepository, WardrobeItemRepositoryError,
};
use crate::domain::{
    ChatCompletion, ChatMessage, Profile, ProfileUpsert, UserId, WardrobeItem, WardrobeItemId,
};
use crate::outbound::blob::LocalBlobStore;

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Profile repository keyed by user id.
///
/// The upsert runs under one lock, giving the same per-key atomicity as the
/// PostgreSQL `ON CONFLICT` statement.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<UserId, Profile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles.
    pub fn len(&self) -> usize {
        lock(&self.profiles).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn upsert(&self, write: &ProfileUpsert) -> Result<Profile, ProfileRepositoryError> {
        let mut profiles = lock(&self.profiles);
        let existing = profiles.remove(&write.user_id);
        let profile = write.clone().apply(existing);
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(lock(&self.profiles).get(user_id).cloned())
    }
}

/// Wardrobe item repository backed by a vector.
#[derive(Default)]
pub struct InMemoryWardrobeItemRepository {
    items: Mutex<Vec<WardrobeItem>>,
    fail_inserts: Mutex<Option<WardrobeItemRepositoryError>>,
}

impl InMemoryWardrobeItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later insert fail with `error`.
    pub fn fail_inserts_with(&self, error: WardrobeItemRepositoryError) {
        *lock(&self.fail_inserts) = Some(error);
    }

    pub fn len(&self) -> usize {
        lock(&self.items).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl WardrobeItemRepository for InMemoryWardrobeItemRepository {
    async fn insert(&self, item: &WardrobeItem) -> Result<(), WardrobeItemRepositoryError> {
        if let Some(error) = lock(&self.fail_inserts).clone() {
            return Err(error);
        }
        lock(&self.items).push(item.clone());
        Ok(())
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<WardrobeItem>, WardrobeItemRepositoryError> {
        let mut items: Vec<WardrobeItem> = lock(&self.items)
            .iter()
            .filter(|item| item.user_id == *user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn delete(
        &self,
        id: &WardrobeItemId,
    ) -> Result<Option<WardrobeItem>, WardrobeItemRepositoryError> {
        let mut items = lock(&self.items);
        let position = items.iter().position(|item| item.id == *id);
        Ok(position.map(|index| items.remove(index)))
    }
}

/// Completion source replaying queued outcomes and recording every
/// transcript it receives.
#[derive(Default)]
pub struct ScriptedChatSource {
    outcomes: Mutex<VecDeque<Result<ChatCompletion, ChatCompletionSourceError>>>,
    received: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedChatSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, outcome: Result<ChatCompletion, ChatCompletionSourceError>) {
        lock(&self.outcomes).push_back(outcome);
    }

    /// Transcripts received so far, oldest first.
    pub fn received(&self) -> Vec<Vec<ChatMessage>> {
        lock(&self.received).clone()
    }
}

#[async_trait]
impl ChatCompletionSource for ScriptedChatSource {
    async fn complete(
        &self,
        messages: &[ChatMessage],
    ) -> Result<ChatCompletion, ChatCompletionSourceError> {
        lock(&self.received).push(messages.to_vec());
        lock(&self.outcomes).pop_front().unwrap_or_else(|| {
            Err(ChatCompletionSourceError::transport(
                "no scripted outcome left",
            ))
        })
    }
}

/// Clock that only moves when told to.
pub struct SteppingClock {
    now: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward by `step`.
    pub fn advance(&self, step: TimeDelta) {
        let mut now = lock(&self.now);
        *now += step;
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *lock(&self.now)
    }
}

/// A [`LocalBlobStore`] over a temporary directory removed on drop.
pub struct TempUploads {
    dir: TempDir,
    store: LocalBlobStore,
}

impl TempUploads {
    /// Create an empty uploads directory.
    ///
    /// # Errors
    ///
    /// Propagates filesystem failures creating the directory.
    pub fn new() -> io::Result<Self> {
        let dir = TempDir::new()?;
        let store = LocalBlobStore::new(dir.path())?;
        Ok(Self { dir, store })
    }

    pub fn store(&self) -> LocalBlobStore {
        self.store.clone()
    }

    /// Names of the files currently stored, sorted.
    ///
    /// # Errors
    ///
    /// Propagates filesystem failures listing the directory.
    pub fn file_names(&self) -> io::Result<Vec<String>> {
        let dir = cap_std::fs::Dir::open_ambient_dir(self.dir.path(), cap_std::ambient_authority())?;
        let mut names = dir
            .entries()?
            .map(|entry| entry.map(|entry| entry.file_name().to_string_lossy().into_owned()))
            .collect::<io::Result<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }
}
