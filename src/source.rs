//! Landmark frame input from an external hand-landmark detector.
//!
//! Self-contained boundary module: the detector process (or a recorded
//! capture of one) writes one JSON record per line; this side only pulls
//! frames, it never calls back.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::hand::HandFrame;

/// One frame as emitted by the detector.
///
/// `landmarks` is 21 [x, y, z] points when a hand was detected. A record
/// with a missing or short landmark list is a valid "no hand" frame, not
/// an error.
#[derive(Debug, Deserialize)]
pub struct FrameRecord {
    #[serde(default)]
    pub hand_detected: bool,
    #[serde(default)]
    pub landmarks: Option<Vec<[f32; 3]>>,
}

impl FrameRecord {
    pub fn into_frame(self) -> HandFrame {
        if !self.hand_detected {
            return HandFrame::empty();
        }
        match self.landmarks {
            Some(points) => HandFrame::from_points(&points),
            None => HandFrame::empty(),
        }
    }
}

/// Pull-based frame supplier: exactly one query per frame.
pub trait LandmarkSource {
    /// Next frame, or None when the stream is exhausted.
    fn next_frame(&mut self) -> Result<Option<HandFrame>>;
}

/// Replays a recorded capture (or a live detector pipe) line by line.
pub struct ReplaySource<R: BufRead> {
    reader: R,
    line: String,
    line_number: usize,
}

impl ReplaySource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)
            .with_context(|| format!("failed to open capture {}", path.as_ref().display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> LandmarkSource for ReplaySource<R> {
    fn next_frame(&mut self) -> Result<Option<HandFrame>> {
        loop {
            self.line.clear();
            let bytes = self.reader.read_line(&mut self.line)?;
            if bytes == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let record: FrameRecord = serde_json::from_str(trimmed)
                .with_context(|| format!("invalid frame record at line {}", self.line_number))?;
            return Ok(Some(record.into_frame()));
        }
    }
}
