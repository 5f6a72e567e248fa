//! # Sample feed module
//!
//! The sample feed replays a prerecorded sequence of classified samples. It is an infinite,
//! stateful sequence: once the last sample has been consumed the cursor wraps back to the first
//! sample and replay continues.
//!
//! Samples can be drawn one at a time with [`SampleFeed::next`], or as whole epochs (contiguous
//! runs sharing one `epoch_id`) with [`SampleFeed::next_epoch_group`].

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod sample;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde_json::Value;
use std::path::Path;

// Internal
pub use sample::*;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A replayable feed of samples.
#[derive(Debug, Clone, Default)]
pub struct SampleFeed {
    samples: Vec<Sample>,

    /// Index of the next sample to be returned
    cursor: usize,

    /// Number of times the cursor has wrapped back to the start
    num_wraps: u64
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while loading a feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Cannot read the sample file: {0}")]
    FileLoadError(std::io::Error),

    #[error("Cannot parse the sample file as JSON: {0}")]
    ParseError(serde_json::Error),

    #[error("Expected the sample document to be a JSON array")]
    NotAnArray,

    #[error("The data loader stopped before delivering the samples")]
    LoaderDisconnected
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SampleFeed {
    /// Create a new feed positioned at the first sample.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self {
            samples,
            cursor: 0,
            num_wraps: 0
        }
    }

    /// Parse a feed from a JSON array of recorded rows.
    pub fn from_json_str(json: &str) -> Result<Self, FeedError> {
        let doc: Value = serde_json::from_str(json).map_err(FeedError::ParseError)?;

        let rows = match doc {
            Value::Array(rows) => rows,
            _ => return Err(FeedError::NotAnArray)
        };

        let samples: Vec<Sample> = rows.iter().map(Sample::from_row).collect();

        debug!(
            "Parsed {} samples ({} with unrecognised labels)",
            samples.len(),
            samples.iter().filter(|s| !s.label.is_recognised()).count()
        );

        Ok(Self::new(samples))
    }

    /// Load a feed from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, FeedError> {
        let json = std::fs::read_to_string(path).map_err(FeedError::FileLoadError)?;
        Self::from_json_str(&json)
    }

    /// Number of samples in one pass of the feed.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Index of the sample which will be returned next.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of times the feed has wrapped back to the first sample.
    pub fn num_wraps(&self) -> u64 {
        self.num_wraps
    }

    /// All samples in the feed, in replay order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Return the sample at the cursor and advance, wrapping at the end of the feed.
    ///
    /// Returns `None` only if the feed is empty.
    pub fn next(&mut self) -> Option<Sample> {
        let sample = *self.samples.get(self.cursor)?;
        self.advance();
        Some(sample)
    }

    /// Return the run of samples starting at the cursor which share the cursor sample's epoch id.
    ///
    /// The cursor is left at the first sample of the following epoch. Runs do not continue past
    /// the end of the feed, instead the cursor wraps back to the start.
    ///
    /// Returns `None` only if the feed is empty.
    pub fn next_epoch_group(&mut self) -> Option<Vec<Sample>> {
        let first = self.next()?;
        let mut group = vec![first];

        // A wrap during `next` means the group ended with the feed
        while self.cursor != 0 {
            match self.samples.get(self.cursor) {
                Some(s) if s.epoch_id == first.epoch_id => {
                    group.push(*s);
                    self.advance();
                },
                _ => break
            }
        }

        Some(group)
    }

    fn advance(&mut self) {
        self.cursor += 1;
        if self.cursor >= self.samples.len() {
            self.cursor = 0;
            self.num_wraps += 1;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn feed_of(labels: &[(Label, f64, Option<i64>)]) -> SampleFeed {
        SampleFeed::new(
            labels.iter().map(|&(l, p, e)| Sample::new(l, p, e)).collect()
        )
    }

    #[test]
    fn test_wraparound() {
        let mut feed = feed_of(&[
            (Label::Feet, 1.0, None),
            (Label::Tongue, 2.0, None),
            (Label::LeftHand, 3.0, None),
        ]);

        let first = feed.next().unwrap();
        feed.next().unwrap();
        feed.next().unwrap();
        assert_eq!(feed.num_wraps(), 1);
        assert_eq!(feed.cursor(), 0);

        // The N+1th sample is the first sample again, unchanged
        assert_eq!(feed.next().unwrap(), first);
    }

    #[test]
    fn test_empty_feed() {
        let mut feed = SampleFeed::default();
        assert!(feed.next().is_none());
        assert!(feed.next_epoch_group().is_none());
        assert_eq!(feed.num_wraps(), 0);
    }

    #[test]
    fn test_epoch_groups() {
        let mut feed = feed_of(&[
            (Label::Feet, 1.0, Some(0)),
            (Label::Feet, 2.0, Some(0)),
            (Label::LeftHand, 3.0, Some(1)),
            (Label::LeftHand, 4.0, Some(1)),
            (Label::LeftHand, 5.0, Some(1)),
            (Label::Feet, 6.0, Some(0)),
        ]);

        let g0 = feed.next_epoch_group().unwrap();
        assert_eq!(g0.len(), 2);
        assert_eq!(feed.cursor(), 2);

        let g1 = feed.next_epoch_group().unwrap();
        assert_eq!(g1.len(), 3);
        assert!(g1.iter().all(|s| s.epoch_id == Some(1)));
        assert_eq!(feed.cursor(), 5);

        // Final group stops at the end of the feed rather than joining the first epoch
        let g2 = feed.next_epoch_group().unwrap();
        assert_eq!(g2.len(), 1);
        assert_eq!(g2[0].power, 6.0);
        assert_eq!(feed.cursor(), 0);
        assert_eq!(feed.num_wraps(), 1);

        assert_eq!(feed.next_epoch_group().unwrap(), g0);
    }

    #[test]
    fn test_from_json_str() {
        let feed = SampleFeed::from_json_str(r#"[
            {"task_label": "feet", "EEG_Ch2": -0.5},
            {"task_label": "tongue", "EEG_Ch2": 1.25, "epoch_id": 3},
            {"EEG_Ch2": 2.0}
        ]"#).unwrap();

        assert_eq!(feed.len(), 3);
        assert_eq!(feed.samples()[0], Sample::new(Label::Feet, 0.5, None));
        assert_eq!(feed.samples()[1].epoch_id, Some(3));
        assert_eq!(feed.samples()[2].label, Label::Other);

        // Elements which aren't rows still count, as samples which produce no motion
        let feed = SampleFeed::from_json_str(r#"[1, "x", null]"#).unwrap();
        assert_eq!(feed.len(), 3);
        assert!(feed.samples().iter().all(|s| *s == Sample::new(Label::Other, 0.0, None)));

        assert!(matches!(
            SampleFeed::from_json_str(r#"{"task_label": "feet"}"#),
            Err(FeedError::NotAnArray)
        ));
        assert!(matches!(
            SampleFeed::from_json_str("[{"),
            Err(FeedError::ParseError(_))
        ));
    }
}
