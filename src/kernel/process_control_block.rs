use std::fmt;

use crate::io::Program;

pub type ProcessId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessState {
    Ready,
    Running,
    Blocked,
    Terminated,
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessState::Ready => "ready",
            ProcessState::Running => "running",
            ProcessState::Blocked => "blocked",
            ProcessState::Terminated => "terminated",
        };
        f.pad(name)
    }
}

/// The process control block. Holds process metadata that survives
/// context switches.
///
/// While the process is running its program, program counter and value
/// live on the CPU; the fields here are only meaningful otherwise.
#[derive(Debug)]
pub struct ProcessControlBlock {
    pub program: Program,
    pub program_counter: usize,
    pub value: i32,
    pub state: ProcessState,
    pub time_used: u64,
    pub end_time: Option<u64>,

    id: ProcessId,
    parent_id: Option<ProcessId>,
    priority: u32,
    start_time: u64,
}

impl ProcessControlBlock {
    pub fn new(
        id: ProcessId,
        parent_id: Option<ProcessId>,
        program: Program,
        priority: u32,
        start_time: u64,
    ) -> ProcessControlBlock {
        ProcessControlBlock {
            program,
            program_counter: 0,
            value: 0,
            state: ProcessState::Ready,
            time_used: 0,
            end_time: None,
            id,
            parent_id,
            priority,
            start_time,
        }
    }

    pub fn get_id(&self) -> ProcessId {
        self.id
    }

    pub fn get_parent_id(&self) -> Option<ProcessId> {
        self.parent_id
    }

    /// Recorded and inherited at fork; the scheduler does not consult it.
    pub fn get_priority(&self) -> u32 {
        self.priority
    }

    pub fn get_start_time(&self) -> u64 {
        self.start_time
    }

    /// `end + 1 - start`, once the process has executed `E`.
    pub fn get_turnaround_time(&self) -> Option<u64> {
        self.end_time.map(|end| end + 1 - self.start_time)
    }
}

/// Formats a parent id the way the process manager prints it, `-1` for the
/// root process.
pub fn display_parent(parent_id: Option<ProcessId>) -> String {
    match parent_id {
        Some(id) => id.to_string(),
        None => "-1".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pcb_is_ready_with_zeroed_context() {
        let pcb = ProcessControlBlock::new(3, Some(1), Program::default(), 2, 7);

        assert_eq!(pcb.get_id(), 3);
        assert_eq!(pcb.get_parent_id(), Some(1));
        assert_eq!(pcb.get_priority(), 2);
        assert_eq!(pcb.get_start_time(), 7);
        assert_eq!(pcb.state, ProcessState::Ready);
        assert_eq!(pcb.program_counter, 0);
        assert_eq!(pcb.value, 0);
        assert_eq!(pcb.time_used, 0);
        assert_eq!(pcb.get_turnaround_time(), None);
    }

    #[test]
    fn test_turnaround_time_includes_final_tick() {
        let mut pcb = ProcessControlBlock::new(1, Some(0), Program::default(), 0, 2);
        pcb.end_time = Some(5);
        assert_eq!(pcb.get_turnaround_time(), Some(4));
    }

    #[test]
    fn test_display_parent_of_root() {
        assert_eq!(display_parent(None), "-1");
        assert_eq!(display_parent(Some(4)), "4");
    }
}
