//! `todolist` executable.
//!
//! # Responsibility
//! - Wire configuration, logging, storage and the menu loop together.
//! - Map a failure that escapes the menu to a non-zero exit code.

use log::{error, info};
use std::error::Error;
use std::io;
use std::process::ExitCode;
use todolist_core::{init_logging, AppConfig, SqliteTaskRepository, TaskService, TodoApp};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("todolist: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_current_dir()?;
    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        // Menu stays usable without file logs.
        eprintln!("todolist: logging disabled: {err}");
    }

    let repo = SqliteTaskRepository::open(config.db_path())?;
    let mut app = TodoApp::new(TaskService::new(repo));

    let stdin = io::stdin();
    let stdout = io::stdout();
    app.run(&mut stdin.lock(), &mut stdout.lock())?;

    info!("event=app_exit module=cli status=ok");
    Ok(())
}
