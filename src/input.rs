use crate::snake::Direction;

/// Holds the most recent direction request between two ticks.
///
/// Later requests overwrite earlier ones; nothing is queued.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputLatch {
    pending: Option<Direction>,
}

impl InputLatch {
    pub fn new() -> Self {
        InputLatch::default()
    }

    pub fn request(&mut self, direction: Direction) {
        self.pending = Some(direction);
    }

    /// Hands the pending request to the tick and clears the latch.
    pub fn take(&mut self) -> Option<Direction> {
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
