use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};

use crossbeam_channel::Receiver;
use log::{debug, info, warn};

use super::*;

use crate::io::{Command, Instruction, LoadError, Program, ProgramSource};

/// Engine settings that are fixed for a session.
#[derive(Clone, Debug)]
pub struct Config {
    /// Program loaded for process 0 at boot.
    pub init_program: String,
    /// Upper bound on the process table; `None` grows without limit.
    pub max_processes: Option<usize>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            init_program: "init.txt".to_string(),
            max_processes: None,
        }
    }
}

/// What a single quantum did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Executed {
        process_id: ProcessId,
        instruction: Instruction,
    },
}

/// A read-only view of the running process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessSnapshot {
    pub id: ProcessId,
    pub parent_id: Option<ProcessId>,
    pub priority: u32,
    pub state: ProcessState,
    pub start_time: u64,
    pub time_used: u64,
    pub program_counter: usize,
    pub value: i32,
    pub timestamp: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Report {
    Idle,
    Running(ProcessSnapshot),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Idle => write!(f, "Nothing running"),
            Report::Running(process) => {
                writeln!(f, "Current time: {}", process.timestamp)?;
                writeln!(f, "Process ID: {}", process.id)?;
                writeln!(f, "Parent process ID: {}", display_parent(process.parent_id))?;
                writeln!(f, "Priority: {}", process.priority)?;
                writeln!(f, "State: {}", process.state)?;
                writeln!(f, "Start time: {}", process.start_time)?;
                writeln!(f, "Time used: {}", process.time_used)?;
                writeln!(f, "Program counter: {}", process.program_counter)?;
                write!(f, "Value: {}", process.value)
            }
        }
    }
}

/// Holds the simulated system and executes the process manager commands.
///
/// Everything is owned here and mutated only through `&mut self`, one
/// command at a time.
pub struct Driver {
    pub(super) cpu: Cpu,
    pub(super) process_table: ProcessTable,
    pub(super) sts: ShortTermScheduler,
    pub(super) stats: Statistics,
    pub(super) timestamp: u64,
    pub(super) source: Box<dyn ProgramSource>,
}

impl Driver {
    /// Loads the init program as process 0 and binds it to the CPU.
    pub fn boot(config: &Config, source: Box<dyn ProgramSource>) -> Result<Driver, LoadError> {
        let program = source.load(&config.init_program)?;
        info!(
            "loaded init program {} ({} instructions)",
            config.init_program,
            program.len()
        );

        let mut driver = Driver {
            cpu: Cpu::new(),
            process_table: ProcessTable::new(config.max_processes),
            sts: ShortTermScheduler::new(),
            stats: Statistics::new(),
            timestamp: 0,
            source,
        };

        let init = driver.process_table.create(None, program, 0, 0);
        driver.sts.schedule_process(init);
        driver.dispatch();

        Ok(driver)
    }

    /// Boots from in-memory program texts keyed by name.
    pub fn boot_with_programs(
        config: &Config,
        programs: HashMap<String, String>,
    ) -> Result<Driver, LoadError> {
        Driver::boot(config, Box::new(programs))
    }

    /// Receives command bytes until `T` or until the sender goes away, then
    /// writes and returns the summary.
    pub fn run<W: Write>(&mut self, commands: &Receiver<u8>, out: &mut W) -> io::Result<Summary> {
        loop {
            let byte = match commands.recv() {
                Ok(byte) => byte,
                Err(_) => {
                    info!("command channel closed, terminating");
                    break;
                }
            };

            let command = match Command::try_from(byte) {
                Ok(command) => command,
                Err(byte) => {
                    warn!("ignoring invalid command {:#04x}", byte);
                    continue;
                }
            };

            info!("received command {}", command);
            match command {
                Command::Quantum => {
                    self.tick();
                }
                Command::Unblock => {
                    self.unblock();
                }
                Command::Print => writeln!(out, "{}", self.report())?,
                Command::Terminate => break,
            }
        }

        let summary = self.summary();
        write!(out, "{}", summary)?;
        out.flush()?;
        Ok(summary)
    }

    /// Runs one quantum.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(process_id) = self.cpu.running_process() else {
            info!("[t={}] no processes are running", self.timestamp);
            self.timestamp += 1;
            return TickOutcome::Idle;
        };

        let instruction = match self.cpu.fetch() {
            Some(instruction) => instruction,
            None => {
                warn!(
                    "process {} reached the end of its program without E operation",
                    process_id
                );
                Instruction::End
            }
        };

        info!("[t={}] process {} executing {}", self.timestamp, process_id, instruction);
        self.execute(&instruction);

        if let Some(running) = self.cpu.running_process() {
            self.process_table.get_mut(running).time_used += 1;
        }

        self.timestamp += 1;
        self.dispatch();

        TickOutcome::Executed {
            process_id,
            instruction,
        }
    }

    /// Moves the longest-blocked process to the back of the ready queue.
    pub fn unblock(&mut self) -> Option<ProcessId> {
        let Some(id) = self.sts.unblock_next() else {
            info!("no blocked processes");
            return None;
        };

        self.process_table.get_mut(id).state = ProcessState::Ready;
        self.sts.schedule_process(id);
        info!("process {} unblocked", id);

        self.dispatch();
        Some(id)
    }

    pub fn report(&self) -> Report {
        let Some(context) = self.cpu.context() else {
            return Report::Idle;
        };

        let pcb = self.process_table.get(context.process_id);
        Report::Running(ProcessSnapshot {
            id: pcb.get_id(),
            parent_id: pcb.get_parent_id(),
            priority: pcb.get_priority(),
            state: pcb.state,
            start_time: pcb.get_start_time(),
            time_used: pcb.time_used,
            program_counter: context.program_counter,
            value: context.value,
            timestamp: self.timestamp,
        })
    }

    pub fn summary(&self) -> Summary {
        Summary {
            statistics: self.stats,
            processes: self.process_table.iter().map(ProcessStats::from).collect(),
        }
    }

    /// Binds the next ready process if the CPU is free. Never preempts.
    pub(super) fn dispatch(&mut self) {
        if !self.cpu.is_idle() {
            return;
        }

        let Some(id) = self.sts.schedule_next() else {
            debug!("ready queue empty, cpu idle");
            return;
        };

        let pcb = self.process_table.get_mut(id);
        pcb.state = ProcessState::Running;
        self.cpu.load_from(pcb);
        info!("process {} dispatched", id);
    }

    pub fn running_process(&self) -> Option<ProcessId> {
        self.cpu.running_process()
    }

    /// The running process's live program, which is not in its PCB.
    pub fn running_program(&self) -> Option<&Program> {
        self.cpu.context().map(|context| &context.program)
    }

    /// The running process's live accumulator value.
    pub fn running_value(&self) -> Option<i32> {
        self.cpu.context().map(|context| context.value)
    }

    pub fn ready_queue(&self) -> Vec<ProcessId> {
        self.sts.ready().iter().copied().collect()
    }

    pub fn blocked_queue(&self) -> Vec<ProcessId> {
        self.sts.blocked().iter().copied().collect()
    }

    pub fn process(&self, id: ProcessId) -> &ProcessControlBlock {
        self.process_table.get(id)
    }

    pub fn process_count(&self) -> usize {
        self.process_table.len()
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }
}
