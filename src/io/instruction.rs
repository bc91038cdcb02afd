use std::fmt;

/// A single decoded program line.
///
/// Each variant carries exactly the operand it needs, so an instruction
/// with a missing or ill-typed argument cannot exist past the loader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `S n`: set the accumulator to `n`.
    Set(i32),
    /// `A n`: add `n` to the accumulator.
    Add(i32),
    /// `D n`: subtract `n` from the accumulator.
    Decrement(i32),
    /// `B`: block the running process until an unblock command.
    Block,
    /// `E`: terminate the running process.
    End,
    /// `F n`: fork a child, then skip the next `n` instructions in the parent.
    Fork(i32),
    /// `R file`: replace the running program with the one loaded from `file`.
    Replace(String),
}

impl Instruction {
    pub fn opcode(&self) -> char {
        match self {
            Instruction::Set(_) => 'S',
            Instruction::Add(_) => 'A',
            Instruction::Decrement(_) => 'D',
            Instruction::Block => 'B',
            Instruction::End => 'E',
            Instruction::Fork(_) => 'F',
            Instruction::Replace(_) => 'R',
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Set(value)
            | Instruction::Add(value)
            | Instruction::Decrement(value)
            | Instruction::Fork(value) => write!(f, "{} {}", self.opcode(), value),
            Instruction::Replace(file) => write!(f, "{} {}", self.opcode(), file),
            Instruction::Block | Instruction::End => write!(f, "{}", self.opcode()),
        }
    }
}
