//! Opcode handlers. Each runs against the process currently bound to the
//! CPU; with an idle CPU they do nothing.

use log::{info, warn};

use super::{Driver, ProcessState};

use crate::io::Instruction;

impl Driver {
    pub(super) fn execute(&mut self, instruction: &Instruction) {
        match instruction {
            Instruction::Set(value) => {
                let value = *value;
                self.update_value(|_| value);
            }
            Instruction::Add(value) => {
                let value = *value;
                self.update_value(|current| current.wrapping_add(value));
            }
            Instruction::Decrement(value) => {
                let value = *value;
                self.update_value(|current| current.wrapping_sub(value));
            }
            Instruction::Block => self.block(),
            Instruction::End => self.end(),
            Instruction::Fork(offset) => self.fork(*offset),
            Instruction::Replace(file) => self.replace(file),
        }
    }

    fn update_value(&mut self, op: impl FnOnce(i32) -> i32) {
        if let Some(context) = self.cpu.context_mut() {
            let before = context.value;
            context.value = op(before);
            info!("value {} -> {}", before, context.value);
        }
    }

    fn block(&mut self) {
        let Some(context) = self.cpu.release() else {
            return;
        };

        let id = context.process_id;
        let pcb = self.process_table.get_mut(id);
        context.save_into(pcb);
        pcb.state = ProcessState::Blocked;
        pcb.time_used += 1;

        self.sts.block_process(id);
        info!("process {} blocked", id);
    }

    fn end(&mut self) {
        let Some(context) = self.cpu.release() else {
            return;
        };

        let id = context.process_id;
        let pcb = self.process_table.get_mut(id);
        context.save_into(pcb);
        pcb.state = ProcessState::Terminated;
        pcb.time_used += 1;
        pcb.end_time = Some(self.timestamp);

        let turnaround = self.timestamp + 1 - pcb.get_start_time();
        self.stats.record_termination(turnaround);
        info!("process {} terminated, turnaround time {}", id, turnaround);
    }

    /// Starts a child at the instruction after the fork, then skips the
    /// next `offset` instructions in the parent.
    fn fork(&mut self, offset: i32) {
        let Some(context) = self.cpu.context() else {
            return;
        };

        let skip = match usize::try_from(offset) {
            Ok(skip) if skip < context.remaining() => skip,
            _ => {
                warn!("invalid fork value {} in process {}", offset, context.process_id);
                return;
            }
        };

        if !self.process_table.has_capacity() {
            warn!(
                "process table full ({} processes), process {} cannot fork",
                self.process_table.len(),
                context.process_id
            );
            return;
        }

        let parent_id = context.process_id;
        let program = context.program.clone();
        let program_counter = context.program_counter;
        let value = context.value;
        let priority = self.process_table.get(parent_id).get_priority();

        let child_id = self
            .process_table
            .create(Some(parent_id), program, priority, self.timestamp);
        let child = self.process_table.get_mut(child_id);
        child.program_counter = program_counter;
        child.value = value;

        self.sts.schedule_process(child_id);
        info!("process {} forked child {}", parent_id, child_id);

        if let Some(context) = self.cpu.context_mut() {
            context.program_counter += skip;
        }
    }

    /// A failed load leaves the process running an empty program, so its
    /// next quantum ends it.
    fn replace(&mut self, file: &str) {
        let Some(context) = self.cpu.context_mut() else {
            return;
        };

        context.program.clear();
        match self.source.load(file) {
            Ok(program) => {
                info!(
                    "process {} replaced its program with {} ({} instructions)",
                    context.process_id,
                    file,
                    program.len()
                );
                context.program = program;
                context.program_counter = 0;
                context.value = 0;
            }
            Err(err) => {
                warn!("failed to replace program of process {}: {}", context.process_id, err);
            }
        }
    }
}
