//! Score ledger: a capped leaderboard persisted in a key-value store

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{LEADERBOARD_CAPACITY, SCORES_KEY};
use crate::error::GameError;

/// Result of one finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub points: u32,
    pub enemies_killed: u32,
}

impl ScoreRecord {
    pub fn new(points: u32, enemies_killed: u32) -> Self {
        Self {
            points,
            enemies_killed,
        }
    }

    /// Ranking key, widened so persisted values near `u32::MAX` cannot overflow
    pub fn total(&self) -> u64 {
        u64::from(self.points) + u64::from(self.enemies_killed)
    }
}

/// Best records, highest total first, ties in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    records: Vec<ScoreRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append, re-sort and truncate to capacity
    pub fn insert(&mut self, record: ScoreRecord) {
        self.records.push(record);
        // `sort_by` is stable, so equal totals keep their arrival order
        self.records.sort_by(|a, b| b.total().cmp(&a.total()));
        self.records.truncate(LEADERBOARD_CAPACITY);
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ranked text lines for display
    pub fn lines(&self) -> Vec<String> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| {
                format!(
                    "Record {}: {} points, {} enemies killed (Total: {})",
                    i + 1,
                    r.points,
                    r.enemies_killed,
                    r.total()
                )
            })
            .collect()
    }
}

/// String key-value persistence
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, GameError>;

    /// Replace the value under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), GameError>;
}

/// One `<key>.json` file per key inside a directory
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, GameError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), GameError> {
        fs::create_dir_all(&self.dir)?;

        // Write-then-rename so a crash never leaves half a file behind
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Process-local store
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, GameError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), GameError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Leaderboard persisted under a fixed key
pub struct ScoreLedger {
    store: Arc<dyn KeyValueStore>,
    key: String,
    /// Sessions finish concurrently; load-modify-store must not interleave
    write_lock: Mutex<()>,
}

impl ScoreLedger {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: SCORES_KEY.to_string(),
            write_lock: Mutex::new(()),
        }
    }

    /// Current leaderboard; missing or unreadable data counts as empty
    pub fn load(&self) -> Leaderboard {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Leaderboard::new(),
            Err(e) => {
                warn!("Failed to read leaderboard '{}': {}", self.key, e);
                return Leaderboard::new();
            }
        };

        match serde_json::from_str::<Leaderboard>(&raw) {
            Ok(board) => board,
            Err(e) => {
                warn!("Discarding corrupt leaderboard '{}': {}", self.key, e);
                Leaderboard::new()
            }
        }
    }

    /// Add a finished round and persist the result
    pub fn record(&self, record: ScoreRecord) -> Result<Leaderboard, GameError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut board = self.load();
        board.insert(record);

        let json = serde_json::to_string(&board)?;
        self.store.set(&self.key, &json)?;

        debug!("Recorded {:?}, leaderboard has {} entries", record, board.len());
        Ok(board)
    }

    /// Ranked text lines of the persisted leaderboard
    pub fn render(&self) -> Vec<String> {
        self.load().lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_ledger() -> ScoreLedger {
        ScoreLedger::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_leaderboard_caps_and_sorts() {
        for n in 0..9u32 {
            let mut board = Leaderboard::new();
            for i in 0..n {
                board.insert(ScoreRecord::new(i * 3 % 7, i % 2));
            }

            assert_eq!(board.len(), (n as usize).min(LEADERBOARD_CAPACITY));
            let totals: Vec<u64> = board.records().iter().map(|r| r.total()).collect();
            assert!(totals.windows(2).all(|w| w[0] >= w[1]), "{totals:?}");
        }
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut board = Leaderboard::new();
        board.insert(ScoreRecord::new(3, 0));
        board.insert(ScoreRecord::new(1, 2));
        board.insert(ScoreRecord::new(0, 3));
        board.insert(ScoreRecord::new(5, 0));

        assert_eq!(
            board.records(),
            &[
                ScoreRecord::new(5, 0),
                ScoreRecord::new(3, 0),
                ScoreRecord::new(1, 2),
                ScoreRecord::new(0, 3),
            ]
        );
    }

    #[test]
    fn test_lowest_dropped_when_full() {
        let mut board = Leaderboard::new();
        for points in [10, 9, 8, 7, 6] {
            board.insert(ScoreRecord::new(points, 0));
        }
        board.insert(ScoreRecord::new(1, 0));
        assert_eq!(board.len(), 5);
        assert_eq!(board.records()[4], ScoreRecord::new(6, 0));

        board.insert(ScoreRecord::new(20, 0));
        assert_eq!(board.records()[0], ScoreRecord::new(20, 0));
        assert_eq!(board.records()[4], ScoreRecord::new(7, 0));
    }

    #[test]
    fn test_ledger_records_two_games() {
        let ledger = memory_ledger();
        assert!(ledger.load().is_empty());

        let board = ledger.record(ScoreRecord::new(5, 2)).unwrap();
        assert_eq!(board.records(), &[ScoreRecord::new(5, 2)]);

        let board = ledger.record(ScoreRecord::new(10, 0)).unwrap();
        assert_eq!(
            board.records(),
            &[ScoreRecord::new(10, 0), ScoreRecord::new(5, 2)]
        );
        assert_eq!(ledger.load(), board);
    }

    #[test]
    fn test_render_lines() {
        let ledger = memory_ledger();
        ledger.record(ScoreRecord::new(5, 2)).unwrap();
        ledger.record(ScoreRecord::new(10, 0)).unwrap();

        assert_eq!(
            ledger.render(),
            vec![
                "Record 1: 10 points, 0 enemies killed (Total: 10)".to_string(),
                "Record 2: 5 points, 2 enemies killed (Total: 7)".to_string(),
            ]
        );
    }

    #[test]
    fn test_wire_format() {
        let mut board = Leaderboard::new();
        board.insert(ScoreRecord::new(5, 2));
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"[{"points":5,"enemiesKilled":2}]"#);
    }

    #[test]
    fn test_corrupt_data_reads_as_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(SCORES_KEY, "{not json").unwrap();
        let ledger = ScoreLedger::new(store);

        assert!(ledger.load().is_empty());
        let board = ledger.record(ScoreRecord::new(1, 1)).unwrap();
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_huge_persisted_totals_rank_and_render() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(SCORES_KEY, r#"[{"points":4294967295,"enemiesKilled":1}]"#)
            .unwrap();
        let ledger = ScoreLedger::new(store);

        assert_eq!(
            ledger.render(),
            vec!["Record 1: 4294967295 points, 1 enemies killed (Total: 4294967296)".to_string()]
        );

        let board = ledger
            .record(ScoreRecord::new(u32::MAX, u32::MAX))
            .unwrap();
        assert_eq!(
            board.records(),
            &[
                ScoreRecord::new(u32::MAX, u32::MAX),
                ScoreRecord::new(u32::MAX, 1),
            ]
        );
        assert_eq!(board.records()[0].total(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_file_store_persists_across_ledgers() {
        let dir = tempfile::tempdir().unwrap();
        let store_dir = dir.path().join("nested");

        let first = ScoreLedger::new(Arc::new(JsonFileStore::new(&store_dir)));
        assert!(first.load().is_empty());
        first.record(ScoreRecord::new(4, 1)).unwrap();

        let second = ScoreLedger::new(Arc::new(JsonFileStore::new(&store_dir)));
        assert_eq!(second.load().records(), &[ScoreRecord::new(4, 1)]);

        let on_disk = fs::read_to_string(store_dir.join("scores.json")).unwrap();
        assert_eq!(on_disk, r#"[{"points":4,"enemiesKilled":1}]"#);
    }

    #[test]
    fn test_file_store_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert_eq!(store.get("absent").unwrap(), None);
    }
}
