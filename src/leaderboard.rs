//! Leaderboard of submitted scores
//!
//! Scores are submitted by nickname after a session ends and listed in
//! descending order as `"{rank}. {nickname} - {score}"`. The JSON-file
//! backend keeps a flat array of entries; malformed entries are skipped on
//! read instead of failing the whole listing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LeaderboardError;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Player's nickname
    pub nickname: String,
    /// Final score
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(nickname: impl Into<String>, score: u32) -> Self {
        Self {
            nickname: nickname.into(),
            score,
        }
    }
}

/// Storage for submitted scores
pub trait LeaderboardBackend {
    /// Store one entry
    fn submit(&mut self, entry: ScoreEntry) -> Result<(), LeaderboardError>;
    /// Read every well-formed entry, in storage order
    fn fetch(&self) -> Result<Vec<ScoreEntry>, LeaderboardError>;
}

/// Sort entries descending by score; equal scores keep submission order
pub fn ranked(mut entries: Vec<ScoreEntry>) -> Vec<ScoreEntry> {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}

/// Render ranked display lines starting at rank 1
pub fn ranked_lines(entries: Vec<ScoreEntry>) -> Vec<String> {
    ranked(entries)
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}. {} - {}", i + 1, e.nickname, e.score))
        .collect()
}

/// Parse a JSON array of entries, skipping any that are malformed
pub fn parse_entries(json: &str) -> Result<Vec<ScoreEntry>, LeaderboardError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let total = values.len();
    let entries: Vec<ScoreEntry> = values
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();
    if entries.len() < total {
        log::warn!("Skipped {} malformed leaderboard entries", total - entries.len());
    }
    Ok(entries)
}

/// In-memory leaderboard
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    pub entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

}

impl LeaderboardBackend for Leaderboard {
    fn submit(&mut self, entry: ScoreEntry) -> Result<(), LeaderboardError> {
        self.entries.push(entry);
        Ok(())
    }

    fn fetch(&self) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        Ok(self.entries.clone())
    }
}

/// Leaderboard persisted as a JSON array on disk
#[derive(Debug, Clone)]
pub struct FileLeaderboard {
    path: PathBuf,
}

impl FileLeaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read raw entries; a missing file is an empty leaderboard
    fn read(&self) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) if json.trim().is_empty() => Ok(Vec::new()),
            Ok(json) => parse_entries(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl LeaderboardBackend for FileLeaderboard {
    fn submit(&mut self, entry: ScoreEntry) -> Result<(), LeaderboardError> {
        let mut entries = self.read()?;
        entries.push(entry);
        let json = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, json)?;
        log::info!("Leaderboard saved ({} entries)", entries.len());
        Ok(())
    }

    fn fetch(&self) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        self.read()
    }
}

/// One session's final score awaiting a nickname
///
/// Accepts exactly one successful submission. A blank nickname is rejected
/// and a failed backend write leaves the submission open for retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSubmission {
    final_score: u32,
    submitted: bool,
}

impl ScoreSubmission {
    pub fn new(final_score: u32) -> Self {
        Self {
            final_score,
            submitted: false,
        }
    }

    pub fn final_score(&self) -> u32 {
        self.final_score
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn submit(
        &mut self,
        nickname: &str,
        backend: &mut dyn LeaderboardBackend,
    ) -> Result<(), LeaderboardError> {
        if self.submitted {
            return Err(LeaderboardError::AlreadySubmitted);
        }
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(LeaderboardError::EmptyNickname);
        }
        backend.submit(ScoreEntry::new(nickname, self.final_score))?;
        self.submitted = true;
        log::info!("Submitted score {} for {nickname}", self.final_score);
        Ok(())
    }
}
