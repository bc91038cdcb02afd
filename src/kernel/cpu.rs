use super::{ProcessControlBlock, ProcessId};

use crate::io::{Instruction, Program};

/// The live execution context of the running process.
///
/// The process's program is moved in from its PCB on dispatch and moved
/// back on context save, so the CPU never aliases the process table.
#[derive(Debug)]
pub(crate) struct CpuContext {
    pub process_id: ProcessId,
    pub program: Program,
    pub program_counter: usize,
    pub value: i32,
}

/// The single simulated CPU. Holds a context only while a process is bound
/// to it.
#[derive(Default)]
pub(crate) struct Cpu {
    context: Option<CpuContext>,
}

impl Cpu {
    pub fn new() -> Cpu {
        Cpu { context: None }
    }

    pub fn is_idle(&self) -> bool {
        self.context.is_none()
    }

    pub fn running_process(&self) -> Option<ProcessId> {
        self.context.as_ref().map(|context| context.process_id)
    }

    pub fn context(&self) -> Option<&CpuContext> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut CpuContext> {
        self.context.as_mut()
    }

    /// Binds `pcb` to the CPU, taking its program.
    pub fn load_from(&mut self, pcb: &mut ProcessControlBlock) {
        self.context = Some(CpuContext {
            process_id: pcb.get_id(),
            program: std::mem::take(&mut pcb.program),
            program_counter: pcb.program_counter,
            value: pcb.value,
        });
    }

    /// Unbinds the running process and hands its context back.
    pub fn release(&mut self) -> Option<CpuContext> {
        self.context.take()
    }

    /// Fetches the instruction at the program counter and advances it.
    /// `None` means the counter ran off the end of the program.
    pub fn fetch(&mut self) -> Option<Instruction> {
        let context = self.context.as_mut()?;
        let instruction = context.program.get(context.program_counter)?.clone();
        context.program_counter += 1;
        Some(instruction)
    }
}

impl CpuContext {
    /// Writes the context back into the PCB it was loaded from.
    pub fn save_into(self, pcb: &mut ProcessControlBlock) {
        debug_assert_eq!(self.process_id, pcb.get_id());
        pcb.program = self.program;
        pcb.program_counter = self.program_counter;
        pcb.value = self.value;
    }

    /// Instructions not yet consumed.
    pub fn remaining(&self) -> usize {
        self.program.len().saturating_sub(self.program_counter)
    }
}
