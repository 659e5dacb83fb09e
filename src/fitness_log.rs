// ABOUTME: Append-only CSV fitness log shared by all sessions, plus leaderboard aggregation
// ABOUTME: Weight samples are queued to one background writer; file IO runs on the blocking pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fitness Log Store
//!
//! Flat CSV file with the columns `Username, Weight, Water, BMI, Date`.
//! A missing file reads as empty; malformed rows are skipped.
//!
//! Request handlers never wait on the file. They hand rows to a
//! [`FitnessLogWriter`], whose single task appends them in arrival order and
//! is drained on shutdown.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use companion_core::models::{FitnessLogEntry, LeaderboardEntry};
use tokio::sync::{mpsc, Mutex};
use tokio::task::{self, JoinHandle};
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};

const USERNAME_COLUMN: &str = "Username";
const WEIGHT_COLUMN: &str = "Weight";

/// CSV-backed fitness log
#[derive(Debug)]
pub struct FitnessLogStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FitnessLogStore {
    /// Store backed by the CSV file at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the CSV file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, writing the header first when the file is new or empty
    ///
    /// # Errors
    ///
    /// Returns `STORAGE_ERROR` if the file cannot be created or written
    pub async fn append(&self, entry: FitnessLogEntry) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();

        task::spawn_blocking(move || append_blocking(&path, &entry))
            .await
            .map_err(|e| AppError::internal(format!("Fitness log task failed: {e}")))?
    }

    /// Every well-formed row, oldest first
    pub async fn read_all(&self) -> Vec<FitnessLogEntry> {
        let path = self.path.clone();
        task::spawn_blocking(move || read_all_blocking(&path))
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Fitness log read task failed");
                Vec::new()
            })
    }

    /// Rows counted per user, most entries first, ties by username
    pub async fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let path = self.path.clone();
        task::spawn_blocking(move || leaderboard_blocking(&path))
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Leaderboard task failed");
                Vec::new()
            })
    }
}

/// Queue in front of the fitness log with a single appending task
///
/// The task starts on the first [`enqueue`](Self::enqueue), so the writer can
/// be built outside a runtime.
#[derive(Debug)]
pub struct FitnessLogWriter {
    store: Arc<FitnessLogStore>,
    state: StdMutex<WriterState>,
}

#[derive(Debug, Default)]
struct WriterState {
    sender: Option<mpsc::UnboundedSender<FitnessLogEntry>>,
    worker: Option<JoinHandle<()>>,
    closed: bool,
}

impl FitnessLogWriter {
    /// Writer appending to `store`
    #[must_use]
    pub fn new(store: Arc<FitnessLogStore>) -> Self {
        Self {
            store,
            state: StdMutex::new(WriterState::default()),
        }
    }

    /// Queue a row; failures are logged by the writer task
    ///
    /// Must be called from within a Tokio runtime. Rows queued after
    /// [`shutdown`](Self::shutdown) are dropped with a warning.
    pub fn enqueue(&self, entry: FitnessLogEntry) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.closed {
            warn!(user.id = %entry.username, "Fitness log writer is shut down, dropping entry");
            return;
        }

        if state.sender.is_none() {
            let (sender, receiver) = mpsc::unbounded_channel();
            state.worker = Some(tokio::spawn(run_writer(Arc::clone(&self.store), receiver)));
            state.sender = Some(sender);
        }
        if let Some(sender) = &state.sender {
            if sender.send(entry).is_err() {
                warn!("Fitness log writer task has stopped, dropping entry");
            }
        }
    }

    /// Stop accepting rows and wait until every queued row is written
    pub async fn shutdown(&self) {
        let worker = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.closed = true;
            state.sender = None;
            state.worker.take()
        };

        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                warn!(error = %e, "Fitness log writer task failed");
            }
            debug!("Fitness log writer drained");
        }
    }
}

async fn run_writer(
    store: Arc<FitnessLogStore>,
    mut receiver: mpsc::UnboundedReceiver<FitnessLogEntry>,
) {
    while let Some(entry) = receiver.recv().await {
        if let Err(e) = store.append(entry).await {
            warn!(error = %e, "Failed to persist weight entry");
        }
    }
}

fn storage_error(context: &str, path: &Path, error: impl std::fmt::Display) -> AppError {
    AppError::storage(format!("{context} {}: {error}", path.display()))
}

fn append_blocking(path: &Path, entry: &FitnessLogEntry) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| storage_error("Cannot create directory for", path, e))?;
    }

    let needs_header = !fs::metadata(path).is_ok_and(|meta| meta.len() > 0);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| storage_error("Cannot open", path, e))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);
    writer
        .serialize(entry)
        .map_err(|e| storage_error("Cannot write to", path, e))?;
    writer
        .flush()
        .map_err(|e| storage_error("Cannot flush", path, e))?;

    debug!(user.id = %entry.username, weight = entry.weight, "Fitness log row appended");
    Ok(())
}

/// Open a reader, treating a missing file as empty and other failures as empty with a warning
fn open_reader(path: &Path) -> Option<csv::Reader<fs::File>> {
    match csv::ReaderBuilder::new().flexible(true).from_path(path) {
        Ok(reader) => Some(reader),
        Err(e) => {
            let missing = matches!(e.kind(), csv::ErrorKind::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound);
            if !missing {
                warn!(path = %path.display(), error = %e, "Fitness log unreadable, treating as empty");
            }
            None
        }
    }
}

fn read_all_blocking(path: &Path) -> Vec<FitnessLogEntry> {
    let Some(mut reader) = open_reader(path) else {
        return Vec::new();
    };

    reader
        .deserialize::<FitnessLogEntry>()
        .filter_map(|row| match row {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(error = %e, "Skipping malformed fitness log row");
                None
            }
        })
        .collect()
}

/// Count rows with a username and a non-empty weight
fn leaderboard_blocking(path: &Path) -> Vec<LeaderboardEntry> {
    let Some(mut reader) = open_reader(path) else {
        return Vec::new();
    };

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Fitness log header unreadable");
            return Vec::new();
        }
    };
    let (Some(user_idx), Some(weight_idx)) = (
        headers.iter().position(|h| h.trim() == USERNAME_COLUMN),
        headers.iter().position(|h| h.trim() == WEIGHT_COLUMN),
    ) else {
        warn!(path = %path.display(), "Fitness log lacks Username/Weight columns");
        return Vec::new();
    };

    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in reader.records().filter_map(Result::ok) {
        let (Some(username), Some(weight)) = (record.get(user_idx), record.get(weight_idx)) else {
            continue;
        };
        if username.is_empty() || weight.trim().is_empty() {
            continue;
        }
        *counts.entry(username.to_owned()).or_insert(0) += 1;
    }

    rank_counts(counts)
}

/// Sort descending by count, ties by username ascending
fn rank_counts(counts: HashMap<String, usize>) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = counts
        .into_iter()
        .map(|(username, entries_logged)| LeaderboardEntry {
            username,
            entries_logged,
        })
        .collect();
    entries.sort_by(|a, b| {
        b.entries_logged
            .cmp(&a.entries_logged)
            .then_with(|| a.username.cmp(&b.username))
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_counts_orders_by_count_then_name() {
        let counts = HashMap::from([
            ("zoe".to_owned(), 2),
            ("adam".to_owned(), 2),
            ("bea".to_owned(), 5),
        ]);
        let ranked = rank_counts(counts);
        let names: Vec<&str> = ranked.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["bea", "adam", "zoe"]);
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let path = Path::new("/nonexistent/dir/fitness_data.csv");
        assert!(read_all_blocking(path).is_empty());
        assert!(leaderboard_blocking(path).is_empty());
    }
}
