//! Line-oriented batch interpreter.
//!
//! Each non-blank input line is parsed into a [`Command`], applied to a
//! [`StoreRegistry`] and reported as one row of a two-column table. Every
//! failure is rendered into the row, so one bad line never stops a batch.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use log::{debug, log_enabled, trace, warn, Level};

use crate::command::Command;
use crate::error::StoreError;
use crate::registry::StoreRegistry;

/// Report text for deleting a store that was never created.
const DELETE_MISSING: &str = "Store does not exist";

/// Configuration for the batch interpreter.
#[derive(Debug, Clone)]
pub struct Config {
    /// Width of the command column in the report.
    pub command_width: usize,
    /// Value literal that deletes the key instead of storing it.
    pub null_literal: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command_width: 40,
            null_literal: "null".to_owned(),
        }
    }
}

/// Applies text commands to an in-memory set of stores holding string values.
#[derive(Debug, Default)]
pub struct Interpreter {
    registry: StoreRegistry<String>,
    config: Config,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            registry: StoreRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &StoreRegistry<String> {
        &self.registry
    }

    /// Execute one command line and return its report text.
    pub fn execute(&mut self, line: &str) -> String {
        match Command::parse(line) {
            Ok(command) => {
                let output = self.apply(command);
                self.trace_store(command.store());
                output
            }
            Err(err) => {
                warn!("rejected command {line:?}: {err}");
                err.to_string()
            }
        }
    }

    fn apply(&mut self, command: Command<'_>) -> String {
        let outcome = match command {
            Command::Create { store } => self
                .registry
                .create_store(store)
                .map(|()| format!("Store {store} created")),
            Command::Delete { store } => self
                .registry
                .delete_store(store)
                .map(|()| format!("Store {store} deleted"))
                .or_else(|err| match err {
                    StoreError::NotFound(_) => Ok(DELETE_MISSING.to_owned()),
                    err => Err(err),
                }),
            Command::Insert { key, value, store } if value == self.config.null_literal => self
                .registry
                .remove(store, key)
                .map(|()| format!("{key} removed from {store}")),
            Command::Insert { key, value, store } => self
                .registry
                .insert(store, key, Some(value.to_owned()))
                .map(|()| format!("{key} {value} inserted into {store}")),
            Command::Get { key, store } => self
                .registry
                .lookup(store, key)
                .map(|found| found.cloned().unwrap_or_else(|| "Not found".to_owned())),
            Command::Exists { key, store } => self
                .registry
                .exists(store, key)
                .map(|found| found.to_string()),
        };
        outcome.unwrap_or_else(|err| {
            debug!("{command:?} failed: {err}");
            err.to_string()
        })
    }

    fn trace_store(&self, store: &str) {
        if !log_enabled!(Level::Trace) {
            return;
        }
        if let Ok(root) = self.registry.resolve(store) {
            trace!("store {store:?}:\n{}", root.dump());
        }
    }

    /// Run every line from `reader`, writing the report to `writer`.
    ///
    /// Returns the number of commands executed. Blank lines are skipped.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, mut writer: W) -> io::Result<usize> {
        let width = self.config.command_width;
        writeln!(writer, "{:<width$}{}", "Command", "Output")?;

        let mut executed = 0;
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let output = self.execute(&line);
            writeln!(writer, "{line:<width$}{output}")?;
            executed += 1;
        }
        writer.flush()?;
        debug!("executed {executed} commands");
        Ok(executed)
    }

    /// Run the commands stored in the file at `path`.
    pub fn run_file<W: Write>(&mut self, path: impl AsRef<Path>, writer: W) -> io::Result<usize> {
        let file = File::open(path.as_ref())?;
        debug!("running batch file {}", path.as_ref().display());
        self.run(BufReader::new(file), writer)
    }
}
