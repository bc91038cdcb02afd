use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use super::{Instruction, LoadError, Program};

/// Resolves a program name to a freshly parsed [`Program`].
///
/// Used once at boot for the init program and again by every `R`
/// instruction.
pub trait ProgramSource {
    fn load(&self, name: &str) -> Result<Program, LoadError>;
}

/// Loads program files relative to a base directory.
pub struct FileSystemSource {
    base_dir: PathBuf,
}

impl FileSystemSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> FileSystemSource {
        FileSystemSource {
            base_dir: base_dir.into(),
        }
    }
}

impl ProgramSource for FileSystemSource {
    fn load(&self, name: &str) -> Result<Program, LoadError> {
        let unreadable = |source| LoadError::Unreadable {
            name: name.to_string(),
            source,
        };

        let file = File::open(self.base_dir.join(name)).map_err(unreadable)?;
        let reader = BufReader::new(file);

        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line.map_err(unreadable)?);
        }

        parse_lines(name, lines.iter().map(String::as_str))
    }
}

/// In-memory sources map a program name to its text.
impl ProgramSource for HashMap<String, String> {
    fn load(&self, name: &str) -> Result<Program, LoadError> {
        match self.get(name) {
            Some(text) => parse_program(name, text),
            None => Err(LoadError::Unreadable {
                name: name.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such program"),
            }),
        }
    }
}

/// Parses program text. `name` is only used for diagnostics.
pub fn parse_program(name: &str, text: &str) -> Result<Program, LoadError> {
    parse_lines(name, text.lines())
}

fn parse_lines<'a>(name: &str, lines: impl Iterator<Item = &'a str>) -> Result<Program, LoadError> {
    let mut instructions = Vec::new();

    for (idx, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        instructions.push(parse_line(name, idx + 1, line)?);
    }

    Ok(Program::new(instructions))
}

fn parse_line(name: &str, line_num: usize, line: &str) -> Result<Instruction, LoadError> {
    let mut chars = line.chars();
    let operation = chars.next().map(|c| c.to_ascii_uppercase());
    let argument = chars.as_str().trim();

    let int_argument = || {
        argument.parse::<i32>().map_err(|_| LoadError::InvalidInteger {
            name: name.to_string(),
            line: line_num,
            text: line.to_string(),
        })
    };

    match operation {
        Some('S') => Ok(Instruction::Set(int_argument()?)),
        Some('A') => Ok(Instruction::Add(int_argument()?)),
        Some('D') => Ok(Instruction::Decrement(int_argument()?)),
        Some('F') => Ok(Instruction::Fork(int_argument()?)),
        Some('B') => Ok(Instruction::Block),
        Some('E') => Ok(Instruction::End),
        Some('R') => {
            // Filenames with leading or trailing whitespace are not supported.
            if argument.is_empty() {
                return Err(LoadError::MissingArgument {
                    name: name.to_string(),
                    line: line_num,
                    text: line.to_string(),
                });
            }
            Ok(Instruction::Replace(argument.to_string()))
        }
        _ => Err(LoadError::UnknownOperation {
            name: name.to_string(),
            line: line_num,
            text: line.to_string(),
        }),
    }
}
