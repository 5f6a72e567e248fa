//! # Data loader
//!
//! Loads the sample feed on a background thread so the main loop can keep cycling while the
//! data is read. The result is delivered exactly once.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

// Internal
use crate::feed::{FeedError, SampleFeed};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Handle to a feed being loaded in the background.
pub struct DataLoader {
    path: PathBuf,

    /// `None` once the result has been delivered
    receiver: Option<Receiver<Result<SampleFeed, FeedError>>>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DataLoader {
    /// Start loading the JSON sample file at `path`.
    pub fn spawn<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let (tx, rx) = channel();

        let thread_path = path.clone();
        thread::spawn(move || {
            debug!("Loading samples from {:?}", thread_path);
            // If the receiver has gone nobody wants the data any more
            tx.send(SampleFeed::from_json_file(&thread_path)).ok();
        });

        Self {
            path,
            receiver: Some(rx)
        }
    }

    /// Path being loaded
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true until the load result has been delivered by [`DataLoader::poll`].
    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Check for the result of the load without blocking.
    ///
    /// Returns `Some` exactly once, when the load has finished, and `None` otherwise.
    pub fn poll(&mut self) -> Option<Result<SampleFeed, FeedError>> {
        let result = match self.receiver.as_ref()?.try_recv() {
            Ok(r) => r,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(FeedError::LoaderDisconnected)
        };

        self.receiver = None;

        Some(result)
    }
}
