mod cpu;
mod interpreter;
mod process_control_block;
mod process_table;
mod short_term_scheduler;
mod stats;

use cpu::Cpu;
use process_table::ProcessTable;
use short_term_scheduler::ShortTermScheduler;

pub mod driver;

pub use driver::{Config, Driver, ProcessSnapshot, Report, TickOutcome};
pub use process_control_block::{display_parent, ProcessControlBlock, ProcessId, ProcessState};
pub use stats::{ProcessStats, Statistics, Summary};
