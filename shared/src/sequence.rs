//! Poll response sequencing
//!
//! Polls are fire-and-forget, so responses can resolve out of order. Each
//! request is stamped with an increasing sequence number and a response is
//! only applied when it is newer than the last one applied.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceGuard {
    last_applied: Option<u64>,
}

impl SequenceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` and records `seq` if it is newer than anything applied so far
    pub fn admit(&mut self, seq: u64) -> bool {
        match self.last_applied {
            Some(last) if seq <= last => false,
            _ => {
                self.last_applied = Some(seq);
                true
            }
        }
    }

    pub fn last_applied(&self) -> Option<u64> {
        self.last_applied
    }
}
