//! A single-CPU process manager simulator.
//!
//! A commander thread forwards one command byte at a time to the
//! [`kernel::Driver`], which owns the process table, the ready and blocked
//! queues and the CPU, and advances one quantum per `Q` command.

pub mod cli;
pub mod io;
pub mod kernel;
