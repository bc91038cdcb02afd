use std::fmt;

use super::{display_parent, ProcessControlBlock, ProcessId, ProcessState};

/// Turnaround accounting for terminated processes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Statistics {
    cumulative_turnaround: u64,
    terminated: u64,
}

impl Statistics {
    pub fn new() -> Statistics {
        Statistics::default()
    }

    pub fn record_termination(&mut self, turnaround: u64) {
        self.cumulative_turnaround += turnaround;
        self.terminated += 1;
    }

    pub fn cumulative_turnaround(&self) -> u64 {
        self.cumulative_turnaround
    }

    pub fn terminated(&self) -> u64 {
        self.terminated
    }

    /// `None` until at least one process has terminated.
    pub fn average_turnaround(&self) -> Option<f64> {
        if self.terminated == 0 {
            return None;
        }
        Some(self.cumulative_turnaround as f64 / self.terminated as f64)
    }
}

/// One line of the end-of-session process table.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessStats {
    pub id: ProcessId,
    pub parent_id: Option<ProcessId>,
    pub priority: u32,
    pub state: ProcessState,
    pub start_time: u64,
    pub time_used: u64,
    pub turnaround_time: Option<u64>,
}

impl From<&ProcessControlBlock> for ProcessStats {
    fn from(pcb: &ProcessControlBlock) -> ProcessStats {
        ProcessStats {
            id: pcb.get_id(),
            parent_id: pcb.get_parent_id(),
            priority: pcb.get_priority(),
            state: pcb.state,
            start_time: pcb.get_start_time(),
            time_used: pcb.time_used,
            turnaround_time: pcb.get_turnaround_time(),
        }
    }
}

/// What the terminate command prints.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub statistics: Statistics,
    pub processes: Vec<ProcessStats>,
}

impl Summary {
    pub fn average_turnaround(&self) -> Option<f64> {
        self.statistics.average_turnaround()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.average_turnaround() {
            Some(average) => writeln!(
                f,
                "Average turnaround time: {:.2} ({} processes terminated)",
                average, self.statistics.terminated
            )?,
            None => writeln!(f, "No processes terminated")?,
        }

        writeln!(f, "... ID | Parent | Priority | State      | Start | Time Used | Turnaround")?;
        writeln!(f, "...----|--------|----------|------------|-------|-----------|-----------")?;
        for process in &self.processes {
            let turnaround = match process.turnaround_time {
                Some(turnaround) => turnaround.to_string(),
                None => "-".to_string(),
            };
            writeln!(
                f,
                "... {:02} | {:>6} | {:02}       | {:<10} | {:>5} | {:>9} | {:>10}",
                process.id,
                display_parent(process.parent_id),
                process.priority,
                process.state,
                process.start_time,
                process.time_used,
                turnaround
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_average_turnaround() {
        let mut stats = Statistics::new();
        assert_eq!(stats.average_turnaround(), None);

        stats.record_termination(4);
        stats.record_termination(7);

        assert_eq!(stats.terminated(), 2);
        assert_eq!(stats.cumulative_turnaround(), 11);
        assert_eq!(stats.average_turnaround(), Some(5.5));
    }

    #[test]
    fn test_summary_without_terminations() {
        let summary = Summary {
            statistics: Statistics::new(),
            processes: Vec::new(),
        };

        let text = summary.to_string();
        assert!(text.starts_with("No processes terminated"));
    }

    #[test]
    fn test_summary_lists_processes() {
        let mut statistics = Statistics::new();
        statistics.record_termination(4);
        let summary = Summary {
            statistics,
            processes: vec![ProcessStats {
                id: 0,
                parent_id: None,
                priority: 0,
                state: ProcessState::Terminated,
                start_time: 0,
                time_used: 4,
                turnaround_time: Some(4),
            }],
        };

        let text = summary.to_string();
        assert!(text.starts_with("Average turnaround time: 4.00 (1 processes terminated)"));
        assert!(text.contains("terminated"));
        assert_eq!(text.lines().count(), 4);
    }
}
