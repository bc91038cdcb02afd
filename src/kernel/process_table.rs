use super::{ProcessControlBlock, ProcessId};

use crate::io::Program;

/// Append-only arena of process control blocks, indexed by process id.
///
/// Entries are never cleared and ids are never reused, so a slot index is
/// always the process id. Memory grows with every fork unless a capacity is
/// configured.
pub(crate) struct ProcessTable {
    pcbs: Vec<ProcessControlBlock>,
    capacity: Option<usize>,
}

impl ProcessTable {
    pub fn new(capacity: Option<usize>) -> ProcessTable {
        ProcessTable {
            pcbs: Vec::new(),
            capacity,
        }
    }

    pub fn create(
        &mut self,
        parent_id: Option<ProcessId>,
        program: Program,
        priority: u32,
        start_time: u64,
    ) -> ProcessId {
        let id = self.pcbs.len();
        self.pcbs
            .push(ProcessControlBlock::new(id, parent_id, program, priority, start_time));
        id
    }

    pub fn get(&self, id: ProcessId) -> &ProcessControlBlock {
        match self.pcbs.get(id) {
            Some(pcb) => pcb,
            None => panic!("No process found for id: {}", id),
        }
    }

    pub fn get_mut(&mut self, id: ProcessId) -> &mut ProcessControlBlock {
        match self.pcbs.get_mut(id) {
            Some(pcb) => pcb,
            None => panic!("No process found for id: {}", id),
        }
    }

    pub fn has_capacity(&self) -> bool {
        self.capacity.map_or(true, |max| self.pcbs.len() < max)
    }

    pub fn len(&self) -> usize {
        self.pcbs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessControlBlock> {
        self.pcbs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::io::Instruction;
    use crate::kernel::ProcessState;

    #[test]
    fn test_process_table_create_then_get() {
        let mut table = ProcessTable::new(None);
        let program = Program::new(vec![Instruction::End]);

        let init = table.create(None, program.clone(), 0, 0);
        let child = table.create(Some(init), program, 3, 4);

        assert_eq!(init, 0);
        assert_eq!(child, 1);
        assert_eq!(table.len(), 2);

        let pcb = table.get(child);
        assert_eq!(pcb.get_id(), 1);
        assert_eq!(pcb.get_parent_id(), Some(0));
        assert_eq!(pcb.get_priority(), 3);
        assert_eq!(pcb.get_start_time(), 4);
        assert_eq!(pcb.state, ProcessState::Ready);
    }

    #[test]
    fn test_process_table_ids_never_reused() {
        let mut table = ProcessTable::new(None);
        let first = table.create(None, Program::default(), 0, 0);
        table.get_mut(first).state = ProcessState::Terminated;

        let second = table.create(Some(first), Program::default(), 0, 1);

        assert_eq!(second, 1);
        assert_eq!(table.get(first).state, ProcessState::Terminated);
        assert_eq!(table.iter().map(|pcb| pcb.get_id()).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_process_table_capacity() {
        let mut table = ProcessTable::new(Some(2));
        assert!(table.has_capacity());
        table.create(None, Program::default(), 0, 0);
        assert!(table.has_capacity());
        table.create(Some(0), Program::default(), 0, 0);
        assert!(!table.has_capacity());

        assert!(ProcessTable::new(None).has_capacity());
    }

    #[test]
    #[should_panic]
    fn test_process_table_get_invalid_id() {
        let table = ProcessTable::new(None);
        table.get(1);
    }
}
