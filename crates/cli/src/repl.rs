use crate::launch::ProcessLauncher;
use anyhow::{Context, Result};
use appdex_indexer::{IndexStore, SharedIndex};
use appdex_resolver::{open, Outcome};
use std::io::{self, BufRead, Write};

/// Interactive read-eval loop. One query resolves to completion before the
/// next is read; `refresh` rebuilds the index and swaps the snapshot
/// wholesale, so a query never sees a half-built mapping.
pub fn run(store: &IndexStore) -> Result<()> {
    let shared = SharedIndex::new(store.load().context("loading application index")?);
    let launcher = ProcessLauncher;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "exit" | "quit" | "bye" => break,
            "refresh" => {
                let index = store.rebuild().context("rebuilding application index")?;
                writeln!(stdout, "indexed {} apps", index.len())?;
                shared.replace(index);
            }
            query => {
                let snapshot = shared.snapshot();
                match open(query, &snapshot, store.config(), &launcher) {
                    Outcome::Launched { key, target } => {
                        writeln!(stdout, "launched {key} ({target})")?;
                    }
                    Outcome::NotFound => {
                        writeln!(stdout, "no match for {query:?}; try `refresh`")?;
                    }
                    Outcome::LaunchFailed { attempts } => {
                        writeln!(stdout, "all {attempts} candidates failed to launch")?;
                    }
                }
            }
        }
    }

    Ok(())
}
