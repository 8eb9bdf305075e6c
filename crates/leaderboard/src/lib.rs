//! Leaderboard - persisted top-10 list of `(name, score)` pairs
//!
//! Stored as a JSON array in a single file. Both public operations are best-effort:
//! a missing, unreadable or corrupt file reads as an empty list, and a failed write
//! is logged and dropped. Nothing here ever reaches the simulation core.
//!
//! # Example
//!
//! ```no_run
//! use classic_tetris_leaderboard::Leaderboard;
//!
//! let board = Leaderboard::new(Leaderboard::default_path());
//! board.add_score("alice", 1200);
//! for entry in board.scores() {
//!     println!("{:<12} {}", entry.name, entry.score);
//! }
//! ```

pub mod identity;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use identity::{leaderboard_name, Identity};

/// Entries kept after every insert
pub const MAX_SCORES: usize = 10;

/// Longest stored name, in characters
pub const MAX_NAME_LEN: usize = 12;

/// Name used when the given one is blank
pub const DEFAULT_NAME: &str = "Player";

const APP_DIR: &str = "classic-tetris";
const FILE_NAME: &str = "leaderboard.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Trim, fall back to [`DEFAULT_NAME`] when blank, and cap at [`MAX_NAME_LEN`] characters.
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return DEFAULT_NAME.to_string();
    }
    let capped: String = trimmed.chars().take(MAX_NAME_LEN).collect();
    capped.trim_end().to_string()
}

/// Parse stored JSON, discarding entries that are not `{ name: string, score: positive int }`.
///
/// Fails only when the text is not a JSON array at all.
pub fn parse_entries(text: &str) -> Result<Vec<ScoreEntry>> {
    let value: Value = serde_json::from_str(text).context("Leaderboard is not valid JSON")?;
    let Value::Array(items) = value else {
        anyhow::bail!("Leaderboard is not a JSON array");
    };

    let mut entries: Vec<ScoreEntry> = items
        .iter()
        .filter_map(|item| {
            let name = item.get("name")?.as_str()?;
            let score = item.get("score")?.as_u64()?;
            let score = u32::try_from(score).ok().filter(|&s| s > 0)?;
            Some(ScoreEntry {
                name: name.to_string(),
                score,
            })
        })
        .collect();

    sort_entries(&mut entries);
    Ok(entries)
}

/// Highest score first; equal scores keep their insertion order.
fn sort_entries(entries: &mut [ScoreEntry]) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
}

/// File-backed leaderboard
#[derive(Debug, Clone)]
pub struct Leaderboard {
    path: PathBuf,
}

impl Leaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/classic-tetris/leaderboard.json`, or the working directory when the
    /// platform has no data dir.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored entries, best score first. Never fails.
    ///
    /// A corrupt file is removed so the next write starts clean.
    pub fn scores(&self) -> Vec<ScoreEntry> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                eprintln!(
                    "[Leaderboard] Failed to read {}: {}",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        match parse_entries(&text) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!(
                    "[Leaderboard] Discarding corrupt {}: {:#}",
                    self.path.display(),
                    e
                );
                if let Err(e) = fs::remove_file(&self.path) {
                    eprintln!(
                        "[Leaderboard] Failed to remove {}: {}",
                        self.path.display(),
                        e
                    );
                }
                Vec::new()
            }
        }
    }

    /// Insert, re-sort and keep the top [`MAX_SCORES`]. Never fails.
    ///
    /// An empty name or a zero score is ignored.
    pub fn add_score(&self, name: &str, score: u32) {
        if name.is_empty() || score == 0 {
            return;
        }

        if let Err(e) = self.try_add_score(name, score) {
            eprintln!("[Leaderboard] Failed to save score: {:#}", e);
        }
    }

    fn try_add_score(&self, name: &str, score: u32) -> Result<()> {
        let mut entries = self.scores();
        entries.push(ScoreEntry {
            name: normalize_name(name),
            score,
        });
        sort_entries(&mut entries);
        entries.truncate(MAX_SCORES);
        self.save(&entries)
    }

    fn save(&self, entries: &[ScoreEntry]) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let text = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}
