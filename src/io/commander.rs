use std::collections::VecDeque;
use std::fmt;
use std::io::{BufRead, Write};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use log::debug;

const PROMPT: &str = "Enter Q, P, U or T\n$ ";

/// One command byte as understood by the process manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// `Q`: run one quantum.
    Quantum,
    /// `U`: move the longest-blocked process back to the ready queue.
    Unblock,
    /// `P`: print the running process.
    Print,
    /// `T`: print the summary and end the session.
    Terminate,
}

impl TryFrom<u8> for Command {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Command, u8> {
        match byte {
            b'Q' => Ok(Command::Quantum),
            b'U' => Ok(Command::Unblock),
            b'P' => Ok(Command::Print),
            b'T' => Ok(Command::Terminate),
            other => Err(other),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Command::Quantum => 'Q',
            Command::Unblock => 'U',
            Command::Print => 'P',
            Command::Terminate => 'T',
        };
        write!(f, "{}", ch)
    }
}

/// Spawns the commander thread.
///
/// Every non-whitespace byte read from `input` is forwarded, in order, over
/// a channel of capacity one. The thread stops after forwarding `T`, at end
/// of input, or once the receiving side has been dropped; the sender is
/// dropped on exit so the receiver observes the disconnect.
pub fn spawn_commander<R, W>(input: R, prompt: W) -> (JoinHandle<()>, Receiver<u8>)
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    let (sender, receiver) = crossbeam_channel::bounded(1);

    let handle = thread::spawn(move || {
        forward_commands(input, prompt, &sender);
        debug!("commander exiting");
    });

    (handle, receiver)
}

fn forward_commands<R: BufRead, W: Write>(mut input: R, mut prompt: W, sender: &Sender<u8>) {
    let mut line = Vec::new();
    let mut pending = VecDeque::new();

    loop {
        // A closed prompt stream is not a reason to stop forwarding.
        let _ = write!(prompt, "{}", PROMPT).and_then(|_| prompt.flush());

        // Raw bytes: anything that is not a command is rejected by the driver.
        while pending.is_empty() {
            line.clear();
            match input.read_until(b'\n', &mut line) {
                Ok(0) => return,
                Ok(_) => pending.extend(line.iter().copied().filter(|b| !b.is_ascii_whitespace())),
                Err(err) => {
                    debug!("commander input failed: {}", err);
                    return;
                }
            }
        }

        let Some(byte) = pending.pop_front() else {
            continue;
        };
        if sender.send(byte).is_err() || byte == b'T' {
            return;
        }
    }
}
