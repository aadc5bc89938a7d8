//! Action queue: concurrent intake, sequence numbering, ordered drain.
//!
//! Sequence numbers are assigned under the buffer lock, so assignment
//! order equals buffer order: the drain is already ascending without a
//! sort. "First accepted, first applied" is the only ordering promise;
//! wall-clock submission order is not.

use parking_lot::Mutex;

use super::action::GameAction;

#[derive(Debug, Default)]
struct Inner {
    next_seq: u64,
    buffer: Vec<GameAction>,
}

#[derive(Debug, Default)]
pub struct ActionQueue {
    inner: Mutex<Inner>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer an action, assigning the next sequence number. Returns the
    /// assigned number. Any caller-supplied `seq` is overwritten.
    pub fn add_action(&self, mut action: GameAction) -> u64 {
        let mut inner = self.inner.lock();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        action.seq = Some(seq);
        inner.buffer.push(action);
        seq
    }

    /// Drain all buffered actions in ascending sequence order, clearing
    /// the buffer. Safe to call concurrently with `add_action`; an
    /// action is either in this drain or a later one, never lost or
    /// duplicated.
    pub fn process_actions(&self) -> Vec<GameAction> {
        let mut inner = self.inner.lock();
        std::mem::take(&mut inner.buffer)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().buffer.is_empty()
    }
}
