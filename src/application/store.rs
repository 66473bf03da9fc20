//! Story Store - 持久化状态容器
//!
//! 进程内唯一的状态实例：
//! - 启动时从存储加载（无记录则为空状态）
//! - 每次变更整体替换状态，随后持久化并通知订阅者
//! - 所有操作同步执行，对调用方不可失败

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;

use crate::application::ports::{StateStoragePort, StorageError};
use crate::domain::story::{Chapter, ChapterId, Selection, Story, StoryId, StoryState};
use crate::infrastructure::events::{EventPublisher, StoreChange, StoreEvent};

/// 持久化记录的固定 key
pub const STORAGE_KEY: &str = "story-maker-storage";

/// 持久化记录格式版本
const STORAGE_VERSION: u32 = 0;

/// 持久化记录 `{ state, version }`
#[derive(Serialize)]
struct PersistedRecordRef<'a> {
    state: &'a StoryState,
    version: u32,
}

#[derive(Deserialize)]
struct PersistedRecord {
    state: StoryState,
    #[serde(default)]
    version: u32,
}

/// 编码持久化记录
fn encode_record(state: &StoryState) -> Result<Vec<u8>, StorageError> {
    serde_json::to_vec(&PersistedRecordRef {
        state,
        version: STORAGE_VERSION,
    })
    .map_err(|e| StorageError::SerializationError(e.to_string()))
}

/// 解码持久化记录
fn decode_record(bytes: &[u8]) -> Result<StoryState, StorageError> {
    let record: PersistedRecord = serde_json::from_slice(bytes)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;

    if record.version > STORAGE_VERSION {
        return Err(StorageError::SerializationError(format!(
            "Unsupported record version {} (expected <= {})",
            record.version, STORAGE_VERSION
        )));
    }
    Ok(record.state)
}

/// Story Store
pub struct StoryStore {
    state: RwLock<Arc<StoryState>>,
    storage: Arc<dyn StateStoragePort>,
    storage_key: String,
    publisher: Arc<EventPublisher>,
}

impl StoryStore {
    /// 从存储加载状态；无记录或记录不可读时使用空状态
    pub fn load(
        storage: Arc<dyn StateStoragePort>,
        storage_key: impl Into<String>,
        publisher: Arc<EventPublisher>,
    ) -> Self {
        let storage_key = storage_key.into();
        let state = Self::read_persisted(storage.as_ref(), &storage_key);

        tracing::info!(
            storage_key = %storage_key,
            stories = state.stories().len(),
            "StoryStore initialized"
        );

        Self {
            state: RwLock::new(Arc::new(state)),
            storage,
            storage_key,
            publisher,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn read_persisted(storage: &dyn StateStoragePort, key: &str) -> StoryState {
        let bytes = match storage.load(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return StoryState::default(),
            Err(e) => {
                tracing::warn!(storage_key = %key, error = %e, "Failed to read persisted state, starting empty");
                return StoryState::default();
            }
        };

        decode_record(&bytes).unwrap_or_else(|e| {
            tracing::warn!(storage_key = %key, error = %e, "Persisted state is unreadable, starting empty");
            StoryState::default()
        })
    }

    // ========== 订阅与读取 ==========

    /// 订阅状态变更，通知在变更调用返回前入队
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.publisher.subscribe_store()
    }

    /// 当前状态快照
    pub fn snapshot(&self) -> Arc<StoryState> {
        self.read().clone()
    }

    pub fn selection(&self) -> Selection {
        self.read().selection()
    }

    pub fn story(&self, story_id: StoryId) -> Option<Story> {
        self.read().story(story_id).cloned()
    }

    pub fn chapter(&self, story_id: StoryId, chapter_id: ChapterId) -> Option<Chapter> {
        self.read().chapter(story_id, chapter_id).cloned()
    }

    pub fn current_story(&self) -> Option<Story> {
        self.read().current_story().cloned()
    }

    pub fn current_chapter(&self) -> Option<Chapter> {
        self.read().current_chapter().cloned()
    }

    // ========== 变更 ==========

    /// 追加新故事（标题由调用方校验）
    pub fn add_story(&self, title: &str) -> StoryId {
        self.commit(|state| {
            let story_id = state.add_story(title);
            (story_id, Some(StoreChange::StoryAdded { story_id }))
        })
    }

    /// 追加空章节；故事不存在时静默忽略
    pub fn add_chapter(&self, story_id: StoryId, title: &str) -> Option<ChapterId> {
        self.commit(|state| {
            let created = state.add_chapter(story_id, title);
            let change = created.map(|chapter_id| StoreChange::ChapterAdded {
                story_id,
                chapter_id,
            });
            (created, change)
        })
    }

    /// 替换章节内容；title 非空时同时替换标题
    pub fn update_chapter(
        &self,
        story_id: StoryId,
        chapter_id: ChapterId,
        content: &str,
        title: Option<&str>,
    ) {
        self.commit(|state| {
            let updated = state.update_chapter(story_id, chapter_id, content, title);
            (
                (),
                updated.then_some(StoreChange::ChapterUpdated {
                    story_id,
                    chapter_id,
                }),
            )
        })
    }

    /// 设置当前故事，同时清空当前章节
    pub fn set_current_story(&self, story_id: Option<StoryId>) {
        self.commit(|state| {
            state.set_current_story(story_id);
            ((), Some(StoreChange::CurrentStoryChanged { story_id }))
        })
    }

    /// 设置当前章节（调用方保证章节属于当前故事）
    pub fn set_current_chapter(&self, chapter_id: Option<ChapterId>) {
        self.commit(|state| {
            state.set_current_chapter(chapter_id);
            ((), Some(StoreChange::CurrentChapterChanged { chapter_id }))
        })
    }

    pub fn delete_story(&self, story_id: StoryId) {
        self.commit(|state| {
            let deleted = state.delete_story(story_id);
            ((), deleted.then_some(StoreChange::StoryDeleted { story_id }))
        })
    }

    pub fn delete_chapter(&self, story_id: StoryId, chapter_id: ChapterId) {
        self.commit(|state| {
            let deleted = state.delete_chapter(story_id, chapter_id);
            (
                (),
                deleted.then_some(StoreChange::ChapterDeleted {
                    story_id,
                    chapter_id,
                }),
            )
        })
    }

    /// 在状态副本上执行迁移；有变化时替换、持久化并通知
    ///
    /// 写锁覆盖整个过程，变更按调用顺序生效
    fn commit<R, F>(&self, mutate: F) -> R
    where
        F: FnOnce(&mut StoryState) -> (R, Option<StoreChange>),
    {
        let mut current = self.write();
        let mut next = StoryState::clone(&current);

        let (output, change) = mutate(&mut next);
        let change = match change {
            Some(change) if next != **current => change,
            _ => {
                tracing::debug!("Store mutation matched nothing, state unchanged");
                return output;
            }
        };

        let next = Arc::new(next);
        *current = next.clone();

        self.persist(&next);

        tracing::info!(change = ?change, "Store updated");
        self.publisher.publish_store_changed(change, next);
        output
    }

    fn persist(&self, state: &StoryState) {
        let result = encode_record(state).and_then(|bytes| self.storage.save(&self.storage_key, &bytes));
        if let Err(e) = result {
            tracing::error!(
                storage_key = %self.storage_key,
                error = %e,
                "Failed to persist story state"
            );
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Arc<StoryState>> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arc<StoryState>> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryStateStorage;
    use crate::infrastructure::persistence::SledStateStorage;
    use std::collections::HashSet;
    use tempfile::tempdir;

    fn create_store() -> (StoryStore, Arc<InMemoryStateStorage>) {
        let storage = InMemoryStateStorage::new().arc();
        let store = StoryStore::load(storage.clone(), STORAGE_KEY, EventPublisher::new().arc());
        (store, storage)
    }

    #[test]
    fn test_end_to_end_edit() {
        let (store, _) = create_store();

        let story_id = store.add_story("Book");
        let chapter_id = store.add_chapter(story_id, "Ch1").unwrap();
        store.update_chapter(story_id, chapter_id, "Once upon a time", None);

        let chapter = store.chapter(story_id, chapter_id).unwrap();
        assert_eq!(chapter.content(), "Once upon a time");
        assert_eq!(chapter.title(), "Ch1");
    }

    #[test]
    fn test_ids_are_never_reused() {
        let (store, _) = create_store();
        let mut seen = HashSet::new();

        for i in 0..20 {
            let story_id = store.add_story(&format!("Story {}", i));
            assert!(seen.insert(*story_id.as_uuid()));
            for j in 0..3 {
                let chapter_id = store.add_chapter(story_id, &format!("Ch {}", j)).unwrap();
                assert!(seen.insert(*chapter_id.as_uuid()));

                let chapter = store.chapter(story_id, chapter_id).unwrap();
                assert_eq!(chapter.title(), format!("Ch {}", j));
                assert!(chapter.content().is_empty());
            }
            store.delete_story(story_id);
        }
    }

    #[test]
    fn test_every_change_is_persisted() {
        let (store, storage) = create_store();

        let story_id = store.add_story("Book");
        store.set_current_story(Some(story_id));
        assert_eq!(storage.save_count(), 2);

        let bytes = storage.load(STORAGE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["version"], 0);
        assert_eq!(json["state"]["currentStoryId"], story_id.to_string());
        assert_eq!(json["state"]["stories"][0]["title"], "Book");
    }

    #[test]
    fn test_lookup_miss_neither_persists_nor_notifies() {
        let (store, storage) = create_store();
        let story_id = store.add_story("Book");
        let chapter_id = store.add_chapter(story_id, "Ch1").unwrap();
        store.set_current_story(Some(story_id));
        store.set_current_chapter(Some(chapter_id));

        let before = store.snapshot();
        let saves = storage.save_count();
        let mut rx = store.subscribe();

        assert!(store.add_chapter(StoryId::new(), "Orphan").is_none());
        store.update_chapter(StoryId::new(), chapter_id, "x", Some("y"));
        store.update_chapter(story_id, ChapterId::new(), "x", None);
        store.delete_story(StoryId::new());
        store.delete_chapter(StoryId::new(), chapter_id);
        store.delete_chapter(story_id, ChapterId::new());

        assert_eq!(*store.snapshot(), *before);
        assert_eq!(storage.save_count(), saves);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_subscriber_sees_change_synchronously() {
        let (store, _) = create_store();
        let mut rx = store.subscribe();

        let story_id = store.add_story("Book");

        let event = rx.try_recv().unwrap();
        assert_eq!(event.change, StoreChange::StoryAdded { story_id });
        assert_eq!(event.state.stories().len(), 1);
    }

    #[test]
    fn test_snapshots_are_immutable() {
        let (store, _) = create_store();
        let story_id = store.add_story("Book");
        let before = store.snapshot();

        store.add_chapter(story_id, "Ch1");

        assert_eq!(before.story(story_id).unwrap().chapter_count(), 0);
        assert_eq!(store.snapshot().story(story_id).unwrap().chapter_count(), 1);
    }

    #[test]
    fn test_cursor_rules() {
        let (store, _) = create_store();
        let first = store.add_story("First");
        let second = store.add_story("Second");
        let chapter_id = store.add_chapter(first, "Ch1").unwrap();

        store.set_current_story(Some(first));
        store.set_current_chapter(Some(chapter_id));
        assert_eq!(store.current_chapter().map(|c| c.id()), Some(chapter_id));

        store.set_current_story(Some(second));
        assert_eq!(
            store.selection(),
            Selection {
                story_id: Some(second),
                chapter_id: None,
            }
        );

        store.set_current_story(Some(first));
        store.set_current_chapter(Some(chapter_id));
        store.delete_chapter(first, chapter_id);
        assert_eq!(store.selection().story_id, Some(first));
        assert_eq!(store.selection().chapter_id, None);

        store.delete_story(second);
        assert_eq!(store.selection().story_id, Some(first));

        store.delete_story(first);
        assert_eq!(store.selection(), Selection::default());
    }

    #[test]
    fn test_persist_failure_is_not_observable() {
        let (store, storage) = create_store();
        storage.set_fail_writes(true);

        let story_id = store.add_story("Book");
        assert_eq!(store.story(story_id).unwrap().title(), "Book");
        assert!(storage.load(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_unreadable_record_starts_empty() {
        let storage = InMemoryStateStorage::new()
            .with_record(STORAGE_KEY, "{not json")
            .arc();
        let store = StoryStore::load(storage, STORAGE_KEY, EventPublisher::new().arc());
        assert_eq!(*store.snapshot(), StoryState::default());
    }

    #[test]
    fn test_newer_record_version_starts_empty() {
        let record = r#"{"state":{"stories":[{"id":"6f1c2a8e-3b5d-4e7f-9a0b-1c2d3e4f5a6b","title":"Book","chapters":[]}]},"version":3}"#;
        let storage = InMemoryStateStorage::new()
            .with_record(STORAGE_KEY, record)
            .arc();
        let store = StoryStore::load(storage, STORAGE_KEY, EventPublisher::new().arc());
        assert!(store.snapshot().stories().is_empty());
    }

    #[test]
    fn test_state_reloads_from_disk() {
        let dir = tempdir().unwrap();
        let storage = SledStateStorage::open(dir.path().join("state.sled"))
            .unwrap()
            .arc();

        let (story_id, chapter_id) = {
            let store = StoryStore::load(storage.clone(), STORAGE_KEY, EventPublisher::new().arc());
            let story_id = store.add_story("Book");
            let chapter_id = store.add_chapter(story_id, "Ch1").unwrap();
            store.update_chapter(story_id, chapter_id, "Once upon a time", None);
            store.set_current_story(Some(story_id));
            store.set_current_chapter(Some(chapter_id));
            (story_id, chapter_id)
        };

        let store = StoryStore::load(storage, STORAGE_KEY, EventPublisher::new().arc());

        let chapter = store.current_chapter().unwrap();
        assert_eq!(chapter.id(), chapter_id);
        assert_eq!(chapter.content(), "Once upon a time");
        assert_eq!(store.selection().story_id, Some(story_id));
    }
}
