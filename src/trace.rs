//! # Input Trace Module
//!
//! Records per-frame pad snapshots to JSONL files and replays them
//! through the simulated backend.
//!
//! This module handles:
//! - Formatting one record per update as JSONL (JSON Lines)
//! - Writing to rotating trace files (max N records per file)
//! - Retaining only the last M files
//! - Loading a trace back into a frame script for deterministic replay

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::TraceConfig;
use crate::error::Result;
use crate::hid::SimFrame;
use crate::pad::{AnalogStickState, PadState};

/// One recorded frame of pad input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameRecord {
    /// Wall-clock time the frame was recorded
    pub timestamp: DateTime<Utc>,
    /// Raw button mask held during the frame
    pub buttons: u64,
    /// Left stick reading, `[x, y]`
    pub left_stick: [i32; 2],
    /// Right stick reading, `[x, y]`
    pub right_stick: [i32; 2],
    /// GameCube analog triggers, left and right
    pub gc_triggers: [u32; 2],
}

impl FrameRecord {
    /// Capture the current half of a snapshot, stamped now.
    pub fn from_state(state: &PadState) -> Self {
        Self {
            timestamp: Utc::now(),
            buttons: state.buttons_cur,
            left_stick: [state.sticks[0].x, state.sticks[0].y],
            right_stick: [state.sticks[1].x, state.sticks[1].y],
            gc_triggers: state.gc_triggers,
        }
    }

    /// Convert back into a scriptable simulation frame.
    pub fn to_sim_frame(&self) -> SimFrame {
        SimFrame {
            buttons: self.buttons,
            sticks: [
                AnalogStickState {
                    x: self.left_stick[0],
                    y: self.left_stick[1],
                },
                AnalogStickState {
                    x: self.right_stick[0],
                    y: self.right_stick[1],
                },
            ],
            gc_triggers: self.gc_triggers,
        }
    }
}

/// Rotating JSONL trace writer.
///
/// Files are named `trace-00001.jsonl`, `trace-00002.jsonl`, ... inside
/// the configured directory. A file is closed once it holds
/// `max_records_per_file` records; once more than `max_files_to_keep`
/// files exist, the oldest is deleted.
#[derive(Debug)]
pub struct TraceRecorder {
    dir: PathBuf,
    max_records_per_file: usize,
    max_files_to_keep: usize,
    writer: Option<BufWriter<File>>,
    records_in_file: usize,
    file_index: u64,
    written_files: VecDeque<PathBuf>,
}

impl TraceRecorder {
    /// Create a recorder writing into the configured directory.
    ///
    /// The directory is created if missing; the first file is opened
    /// lazily on the first record.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn new(config: &TraceConfig) -> Result<Self> {
        let dir = PathBuf::from(&config.dir);
        fs::create_dir_all(&dir)?;
        info!("recording input trace to {}", dir.display());
        Ok(Self {
            dir,
            max_records_per_file: config.max_records_per_file,
            max_files_to_keep: config.max_files_to_keep,
            writer: None,
            records_in_file: 0,
            file_index: 0,
            written_files: VecDeque::new(),
        })
    }

    /// Append one record, rotating files as needed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the record cannot be written.
    pub fn record(&mut self, record: &FrameRecord) -> Result<()> {
        if self.writer.is_none() || self.records_in_file >= self.max_records_per_file {
            self.rotate()?;
        }
        let writer = self.writer.as_mut().expect("rotate just opened a file");
        let line = serde_json::to_string(record)?;
        writeln!(writer, "{line}")?;
        self.records_in_file += 1;
        Ok(())
    }

    /// Flush buffered records to disk.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the flush fails.
    pub fn flush(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    /// Paths of the trace files written so far, oldest first.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.written_files.iter().map(PathBuf::as_path)
    }

    fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        self.file_index += 1;
        let path = self.dir.join(format!("trace-{:05}.jsonl", self.file_index));
        debug!("opening trace file {}", path.display());
        self.writer = Some(BufWriter::new(File::create(&path)?));
        self.records_in_file = 0;
        self.written_files.push_back(path);

        while self.written_files.len() > self.max_files_to_keep {
            // Oldest first; a missing file is not worth failing the frame loop for
            if let Some(stale) = self.written_files.pop_front() {
                debug!("removing stale trace file {}", stale.display());
                let _ = fs::remove_file(stale);
            }
        }
        Ok(())
    }
}

/// Load every record of a JSONL trace file, in order.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a trace error
/// for a malformed record.
pub fn load_trace<P: AsRef<Path>>(path: P) -> Result<Vec<FrameRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}

/// Turn loaded records into a frame script for the simulated backend.
pub fn to_script(records: &[FrameRecord]) -> Vec<SimFrame> {
    records.iter().map(FrameRecord::to_sim_frame).collect()
}
