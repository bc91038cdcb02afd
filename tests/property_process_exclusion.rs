//! Property: process placement is exclusive
//!
//! For any sequence of Q/U/P commands over programs that fork, block,
//! replace and end, every process id is in at most one of {cpu, ready
//! queue, blocked queue}, its recorded state agrees with where it is, and
//! terminated processes are in none of them.

use std::collections::HashMap;

use process_manager_simulator::io::Command;
use process_manager_simulator::kernel::{Config, Driver, ProcessState};
use proptest::prelude::*;

const PROGRAMS: &[(&str, &str)] = &[
    ("init.txt", "S 1\nF 2\nB\nA 4\nF 0\nR child.txt\nD 2\nB\nE\n"),
    ("child.txt", "S 10\nF 1\nB\nF 0\nR missing.txt\nA 1\n"),
];

fn programs() -> HashMap<String, String> {
    PROGRAMS
        .iter()
        .map(|(name, text)| (name.to_string(), text.to_string()))
        .collect()
}

fn arb_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => Just(Command::Quantum),
        2 => Just(Command::Unblock),
        1 => Just(Command::Print),
    ]
}

fn apply(driver: &mut Driver, command: Command) {
    match command {
        Command::Quantum => {
            driver.tick();
        }
        Command::Unblock => {
            driver.unblock();
        }
        Command::Print => {
            driver.report();
        }
        Command::Terminate => {}
    }
}

fn check_exclusive(driver: &Driver) -> Result<(), TestCaseError> {
    let running = driver.running_process();
    let ready = driver.ready_queue();
    let blocked = driver.blocked_queue();

    for id in 0..driver.process_count() {
        let places = usize::from(running == Some(id))
            + ready.iter().filter(|&&r| r == id).count()
            + blocked.iter().filter(|&&b| b == id).count();
        let state = driver.process(id).state;

        prop_assert!(places <= 1, "process {} is in {} places", id, places);
        match state {
            ProcessState::Running => prop_assert_eq!(running, Some(id)),
            ProcessState::Ready => prop_assert!(ready.contains(&id)),
            ProcessState::Blocked => prop_assert!(blocked.contains(&id)),
            ProcessState::Terminated => prop_assert_eq!(places, 0),
        }
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn process_placement_is_exclusive(commands in prop::collection::vec(arb_command(), 0..120)) {
        let mut driver = Driver::boot_with_programs(&Config::default(), programs()).unwrap();
        check_exclusive(&driver)?;

        for command in commands {
            apply(&mut driver, command);
            check_exclusive(&driver)?;
        }
    }

    #[test]
    fn timestamp_advances_once_per_quantum(commands in prop::collection::vec(arb_command(), 0..120)) {
        let mut driver = Driver::boot_with_programs(&Config::default(), programs()).unwrap();
        let quanta = commands.iter().filter(|&&c| c == Command::Quantum).count() as u64;

        for command in commands {
            apply(&mut driver, command);
        }

        prop_assert_eq!(driver.timestamp(), quanta);
    }

    #[test]
    fn average_turnaround_matches_terminated_processes(commands in prop::collection::vec(arb_command(), 0..120)) {
        let mut driver = Driver::boot_with_programs(&Config::default(), programs()).unwrap();
        for command in commands {
            apply(&mut driver, command);
        }

        let summary = driver.summary();
        let turnarounds: Vec<u64> = summary
            .processes
            .iter()
            .filter_map(|process| process.turnaround_time)
            .collect();

        prop_assert_eq!(turnarounds.len() as u64, summary.statistics.terminated());
        prop_assert_eq!(turnarounds.iter().sum::<u64>(), summary.statistics.cumulative_turnaround());
        if turnarounds.is_empty() {
            prop_assert_eq!(summary.average_turnaround(), None);
        }
    }
}
