use std::collections::VecDeque;

use super::ProcessId;

/// The ready and blocked queues.
///
/// Both are strict FIFO. Priority is tracked per process but never used to
/// reorder the ready queue.
#[derive(Default)]
pub(crate) struct ShortTermScheduler {
    ready_queue: VecDeque<ProcessId>,
    blocked_queue: VecDeque<ProcessId>,
}

impl ShortTermScheduler {
    pub fn new() -> ShortTermScheduler {
        ShortTermScheduler {
            ready_queue: VecDeque::new(),
            blocked_queue: VecDeque::new(),
        }
    }

    pub fn schedule_process(&mut self, id: ProcessId) {
        self.ready_queue.push_back(id);
    }

    pub fn schedule_next(&mut self) -> Option<ProcessId> {
        self.ready_queue.pop_front()
    }

    pub fn block_process(&mut self, id: ProcessId) {
        self.blocked_queue.push_back(id);
    }

    /// Pops the longest-blocked process.
    pub fn unblock_next(&mut self) -> Option<ProcessId> {
        self.blocked_queue.pop_front()
    }

    pub fn ready(&self) -> &VecDeque<ProcessId> {
        &self.ready_queue
    }

    pub fn blocked(&self) -> &VecDeque<ProcessId> {
        &self.blocked_queue
    }
}
