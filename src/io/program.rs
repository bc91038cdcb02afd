use super::Instruction;

/// An ordered instruction sequence owned by exactly one process.
///
/// Cloning is a deep copy, which is what gives forked children a program
/// independent of their parent's.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Program {
        Program { instructions }
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn clear(&mut self) {
        self.instructions.clear();
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Program {
        Program::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_clone_is_independent() {
        let original: Program = vec![Instruction::Set(1), Instruction::End].into_iter().collect();
        let mut copy = original.clone();
        copy.clear();

        assert_eq!(original.len(), 2);
        assert!(copy.is_empty());
        assert_eq!(original.get(1), Some(&Instruction::End));
        assert_eq!(original.get(2), None);
    }
}
