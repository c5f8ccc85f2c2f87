//! In-memory cache of resolved song info, keyed by song id.

use crate::api::SongInfo;
use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Cache entry with expiration
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub info: SongInfo,
    pub timestamp: DateTime<Utc>,
    pub expiry: Duration,
}

impl CacheEntry {
    pub fn new(info: SongInfo, expiry: Duration) -> Self {
        Self {
            info,
            timestamp: Utc::now(),
            expiry,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.timestamp > self.expiry
    }
}

/// Bounded cache; the oldest insertion is evicted first.
#[derive(Debug, Clone)]
pub struct SongInfoCache {
    entries: HashMap<String, CacheEntry>,
    order: VecDeque<String>,
    max_entries: usize,
    expiry: Duration,
}

impl SongInfoCache {
    pub fn new(max_entries: usize, expiry: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_entries: max_entries.max(1),
            expiry,
        }
    }

    pub fn get(&self, song_id: &str) -> Option<&SongInfo> {
        self.get_at(song_id, Utc::now())
    }

    fn get_at(&self, song_id: &str, now: DateTime<Utc>) -> Option<&SongInfo> {
        self.entries
            .get(song_id)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| &entry.info)
    }

    pub fn put(&mut self, song_id: String, info: SongInfo) {
        self.insert_entry(song_id, CacheEntry::new(info, self.expiry));
    }

    fn insert_entry(&mut self, song_id: String, entry: CacheEntry) {
        if self.entries.remove(&song_id).is_some() {
            self.order.retain(|key| key != &song_id);
        }

        while self.entries.len() >= self.max_entries {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }

        self.order.push_back(song_id.clone());
        self.entries.insert(song_id, entry);
    }

    pub fn clean_expired(&mut self) {
        let now = Utc::now();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let entries = &self.entries;
        self.order.retain(|key| entries.contains_key(key));
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for SongInfoCache {
    fn default() -> Self {
        Self::new(500, Duration::hours(6))
    }
}

static SONG_INFO_CACHE: Lazy<Mutex<SongInfoCache>> = Lazy::new(|| Mutex::new(SongInfoCache::default()));

pub fn cached_song_info(song_id: &str) -> Option<SongInfo> {
    let cache = SONG_INFO_CACHE.lock().unwrap_or_else(|e| e.into_inner());
    cache.get(song_id).cloned()
}

pub fn store_song_info(song_id: &str, info: SongInfo) {
    let mut cache = SONG_INFO_CACHE.lock().unwrap_or_else(|e| e.into_inner());
    cache.clean_expired();
    cache.put(song_id.to_string(), info);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(cover: &str) -> SongInfo {
        SongInfo {
            cover: cover.to_string(),
            lyrics: Vec::new(),
        }
    }

    #[test]
    fn stores_and_returns_entries() {
        let mut cache = SongInfoCache::new(4, Duration::hours(1));
        cache.put("a".to_string(), info("cover-a"));
        assert_eq!(cache.get("a").map(|i| i.cover.as_str()), Some("cover-a"));
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn caches_empty_results_too() {
        let mut cache = SongInfoCache::new(4, Duration::hours(1));
        cache.put("a".to_string(), SongInfo::default());
        assert_eq!(cache.get("a"), Some(&SongInfo::default()));
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut cache = SongInfoCache::new(2, Duration::hours(1));
        cache.put("a".to_string(), info("1"));
        cache.put("b".to_string(), info("2"));
        cache.put("a".to_string(), info("3"));
        cache.put("c".to_string(), info("4"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("b").is_none());
        assert_eq!(cache.get("a").map(|i| i.cover.as_str()), Some("3"));
        assert_eq!(cache.get("c").map(|i| i.cover.as_str()), Some("4"));
    }

    #[test]
    fn expired_entries_are_hidden() {
        let mut cache = SongInfoCache::new(4, Duration::minutes(5));
        let mut entry = CacheEntry::new(info("old"), Duration::minutes(5));
        entry.timestamp = Utc::now() - Duration::minutes(10);
        cache.insert_entry("a".to_string(), entry);

        assert!(cache.get("a").is_none());
        assert!(cache.get_at("a", Utc::now() - Duration::minutes(8)).is_some());
        cache.clean_expired();
        assert_eq!(cache.len(), 0);
    }
}
