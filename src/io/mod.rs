pub mod commander;
pub mod error;
pub mod instruction;
pub mod loader;
pub mod program;

pub use commander::{spawn_commander, Command};
pub use error::LoadError;
pub use instruction::Instruction;
pub use loader::{parse_program, FileSystemSource, ProgramSource};
pub use program::Program;
