//! Fixed-size high score table persisted as raw native-endian integers.
//!
//! The file has no header and no delimiters: `capacity` 4-byte integers in
//! rank order. Short or missing files degrade to zero-filled entries.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const ENTRY_SIZE: usize = std::mem::size_of::<u32>();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    path: PathBuf,
    /// Always exactly `capacity` entries, highest first
    scores: Vec<u32>,
}

impl Leaderboard {
    /// Zero-filled table backed by `path`; nothing is read yet
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            scores: vec![0; capacity],
        }
    }

    /// Replace the in-memory table with the file contents.
    ///
    /// Entries are read in file order, zero-padded when the file is short and
    /// truncated when it is long. On error the table is left zero-filled.
    pub fn load(&mut self) -> Result<()> {
        self.scores.fill(0);

        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("Failed to read leaderboard from {:?}", self.path))?;

        for (slot, chunk) in self.scores.iter_mut().zip(bytes.chunks_exact(ENTRY_SIZE)) {
            let mut raw = [0u8; ENTRY_SIZE];
            raw.copy_from_slice(chunk);
            *slot = u32::from_ne_bytes(raw);
        }
        Ok(())
    }

    /// Insert `score` into the ranking, pushing lower entries down and dropping
    /// the last one. Returns whether the table changed.
    pub fn update(&mut self, score: u32) -> bool {
        let Some(rank) = self.scores.iter().position(|&entry| entry < score) else {
            return false;
        };

        self.scores.insert(rank, score);
        self.scores.pop();
        true
    }

    /// Truncate the file and write every entry in rank order
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let bytes: Vec<u8> = self
            .scores
            .iter()
            .flat_map(|score| score.to_ne_bytes())
            .collect();
        std::fs::write(&self.path, bytes)
            .with_context(|| format!("Failed to write leaderboard to {:?}", self.path))
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn capacity(&self) -> usize {
        self.scores.len()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn board_in(dir: &TempDir) -> Leaderboard {
        Leaderboard::new(dir.path().join("record.dat"), 3)
    }

    #[test]
    fn test_new_is_zero_filled() {
        let temp_dir = TempDir::new().unwrap();
        let leaderboard = board_in(&temp_dir);
        assert_eq!(leaderboard.scores(), &[0, 0, 0]);
        assert_eq!(leaderboard.capacity(), 3);
    }

    #[test]
    fn test_update_sequence() {
        let temp_dir = TempDir::new().unwrap();
        let mut leaderboard = board_in(&temp_dir);

        assert!(leaderboard.update(7));
        assert_eq!(leaderboard.scores(), &[7, 0, 0]);

        assert!(leaderboard.update(3));
        assert_eq!(leaderboard.scores(), &[7, 3, 0]);

        assert!(leaderboard.update(10));
        assert_eq!(leaderboard.scores(), &[10, 7, 3]);

        // 3 falls off the end
        assert!(leaderboard.update(5));
        assert_eq!(leaderboard.scores(), &[10, 7, 5]);
    }

    #[test]
    fn test_update_non_qualifying() {
        let temp_dir = TempDir::new().unwrap();
        let mut leaderboard = board_in(&temp_dir);
        assert!(!leaderboard.update(0));

        leaderboard.update(9);
        leaderboard.update(8);
        leaderboard.update(7);
        assert!(!leaderboard.update(7));
        assert!(!leaderboard.update(2));
        assert_eq!(leaderboard.scores(), &[9, 8, 7]);
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut leaderboard = board_in(&temp_dir);
        leaderboard.update(4);
        leaderboard.update(12);
        leaderboard.save().unwrap();

        let bytes = std::fs::read(leaderboard.path()).unwrap();
        assert_eq!(bytes.len(), 3 * ENTRY_SIZE);

        let mut loaded = board_in(&temp_dir);
        loaded.load().unwrap();
        assert_eq!(loaded.scores(), &[12, 4, 0]);
        assert_eq!(loaded, leaderboard);
    }

    #[test]
    fn test_missing_file_is_error_with_zeroes() {
        let temp_dir = TempDir::new().unwrap();
        let mut leaderboard = board_in(&temp_dir);
        leaderboard.update(5);

        assert!(leaderboard.load().is_err());
        assert_eq!(leaderboard.scores(), &[0, 0, 0]);
    }

    #[test]
    fn test_short_file_is_zero_padded() {
        let temp_dir = TempDir::new().unwrap();
        let mut leaderboard = board_in(&temp_dir);

        let mut bytes = 42u32.to_ne_bytes().to_vec();
        bytes.extend_from_slice(&[1, 2]); // torn trailing entry
        std::fs::write(leaderboard.path(), bytes).unwrap();

        leaderboard.load().unwrap();
        assert_eq!(leaderboard.scores(), &[42, 0, 0]);
    }

    #[test]
    fn test_long_file_is_truncated() {
        let temp_dir = TempDir::new().unwrap();
        let mut leaderboard = board_in(&temp_dir);

        let bytes: Vec<u8> = [9u32, 6, 3, 1].iter().flat_map(|v| v.to_ne_bytes()).collect();
        std::fs::write(leaderboard.path(), bytes).unwrap();

        leaderboard.load().unwrap();
        assert_eq!(leaderboard.scores(), &[9, 6, 3]);
    }

    #[test]
    fn test_load_keeps_file_order() {
        let temp_dir = TempDir::new().unwrap();
        let mut leaderboard = board_in(&temp_dir);

        let bytes: Vec<u8> = [2u32, 8, 5].iter().flat_map(|v| v.to_ne_bytes()).collect();
        std::fs::write(leaderboard.path(), bytes).unwrap();

        leaderboard.load().unwrap();
        assert_eq!(leaderboard.scores(), &[2, 8, 5]);
    }

    #[test]
    fn test_save_to_unwritable_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be
        let leaderboard = Leaderboard::new(temp_dir.path(), 3);
        assert!(leaderboard.save().is_err());
    }
}
