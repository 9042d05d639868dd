//! Link opener that records instead of opening.

use std::sync::{Arc, Mutex};

use crate::traits::{LinkOpener, OpenError};

/// Records every link it is asked to open.
///
/// Clones share the record, so a test can keep a handle after moving the
/// opener into a session.
#[derive(Debug, Clone, Default)]
pub struct RecordingOpener {
    opened: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// An opener whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Links opened so far.
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&mut self, link: &str) -> Result<(), OpenError> {
        if self.fail {
            return Err(OpenError::Failed("refused by test opener".to_string()));
        }
        self.opened.lock().unwrap().push(link.to_string());
        Ok(())
    }
}
