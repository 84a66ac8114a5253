//! Local result store
//!
//! Durable, capped history of scan results and community posts, one JSON
//! file per collection. Storage is a best-effort local cache: a failed read
//! yields an empty collection and a failed write is logged and swallowed,
//! so the caller is never blocked by storage trouble.

use crate::error::{PlantCareError, Result};
use plantcare_common::{
    CappedList, CommunityPost, HasId, ScanRecord, MAX_COMMUNITY_POSTS, MAX_SCAN_HISTORY,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

const SCAN_HISTORY_FILE: &str = "scan_history.json";
const COMMUNITY_POSTS_FILE: &str = "community_posts.json";

pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store under the platform data directory (~/.local/share/plantcare-ai)
    pub fn default_location() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| PlantCareError::Config("data directory not found".into()))?;
        Ok(Self::new(data_dir.join("plantcare-ai")))
    }

    // =============================================
    // Scan history
    // =============================================

    /// Full scan history, newest first
    pub fn scan_history(&self) -> Vec<ScanRecord> {
        self.read_list(SCAN_HISTORY_FILE, MAX_SCAN_HISTORY)
    }

    pub fn add_scan(&self, record: ScanRecord) {
        let mut list = CappedList::from_items(self.scan_history(), MAX_SCAN_HISTORY);
        list.add(record);
        self.write_list(SCAN_HISTORY_FILE, list.items());
    }

    pub fn delete_scan(&self, id: &str) {
        let mut list = CappedList::from_items(self.scan_history(), MAX_SCAN_HISTORY);
        list.delete(id);
        self.write_list(SCAN_HISTORY_FILE, list.items());
    }

    pub fn clear_scans(&self) {
        self.write_list::<ScanRecord>(SCAN_HISTORY_FILE, &[]);
    }

    // =============================================
    // Community posts
    // =============================================

    /// All community posts, newest first
    pub fn posts(&self) -> Vec<CommunityPost> {
        self.read_list(COMMUNITY_POSTS_FILE, MAX_COMMUNITY_POSTS)
    }

    pub fn add_post(&self, post: CommunityPost) {
        let mut list = CappedList::from_items(self.posts(), MAX_COMMUNITY_POSTS);
        list.add(post);
        self.write_list(COMMUNITY_POSTS_FILE, list.items());
    }

    pub fn delete_post(&self, id: &str) {
        let mut list = CappedList::from_items(self.posts(), MAX_COMMUNITY_POSTS);
        list.delete(id);
        self.write_list(COMMUNITY_POSTS_FILE, list.items());
    }

    pub fn clear_posts(&self) {
        self.write_list::<CommunityPost>(COMMUNITY_POSTS_FILE, &[]);
    }

    // =============================================
    // Best-effort JSON file access
    // =============================================

    fn read_list<T: DeserializeOwned + HasId>(&self, file: &str, cap: usize) -> Vec<T> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Vec::new();
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to read {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&content) {
            Ok(items) => CappedList::from_items(items, cap).into_items(),
            Err(e) => {
                warn!("corrupted store file {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    fn write_list<T: Serialize>(&self, file: &str, items: &[T]) {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            warn!("failed to create {}: {}", self.dir.display(), e);
            return;
        }

        let path = self.dir.join(file);
        let json = match serde_json::to_string_pretty(items) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize {}: {}", path.display(), e);
                return;
            }
        };

        if let Err(e) = std::fs::write(&path, json) {
            warn!("failed to write {}: {}", path.display(), e);
        }
    }
}
