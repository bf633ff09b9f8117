use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use log::error;
use triestore::Interpreter;

const BANNER: &str =
    "================================* Trie Store *======================================";

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: triestore <commands-file>");
        return ExitCode::from(2);
    };

    let mut report = Vec::new();
    let mut interpreter = Interpreter::new();
    if let Err(err) = interpreter.run_file(&path, &mut report) {
        error!("failed to run {}: {err}", path.display());
        return ExitCode::FAILURE;
    }

    let mut stdout = io::stdout().lock();
    let written = writeln!(stdout, "{BANNER}").and_then(|()| stdout.write_all(&report));
    match written {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("failed to write report: {err}");
            ExitCode::FAILURE
        }
    }
}
