//! main.rs
//! Entry point for explorer

use explorer_tui::app::AppState;
use explorer_tui::config::Config;
use explorer_tui::core::terminal::{self, Outcome};
use explorer_tui::error::{ExplorerError, Result};
use explorer_tui::utils::cli::{Options, handle_args};

use std::fs::{self, File};
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(io::stderr(), crossterm::cursor::Show);

        eprintln!("\n[explorer] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    match run() {
        Ok(Outcome::Quit) => ExitCode::SUCCESS,
        Ok(Outcome::Selected(path)) => {
            let mut stdout = io::stdout().lock();
            if stdout
                .write_all(path.as_os_str().as_bytes())
                .and_then(|()| stdout.flush())
                .is_err()
            {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Ok(Outcome::Terminated(sig)) => {
            tracing::info!("terminated by signal {sig}");
            ExitCode::from(u8::try_from(128 + sig).unwrap_or(u8::MAX))
        }
        Err(e) => {
            eprintln!("explorer: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<Outcome> {
    let Some(options) = handle_args()? else {
        return Ok(Outcome::Quit);
    };
    init_logging();

    let dir = start_directory(&options)?;
    let config = Config::from_env();
    let mut app = AppState::new(&config, dir, terminal::window_metrics())?;
    if let Some(name) = &options.start
        && !app.select_name(name)
    {
        tracing::debug!("start entry {name:?} not found");
    }

    terminal::run_terminal(&mut app)
}

/// Installs a file logger when `EXPLORER_LOG` names a path. Stderr and stdout are taken.
fn init_logging() {
    let Some(path) = std::env::var_os("EXPLORER_LOG").filter(|p| !p.is_empty()) else {
        return;
    };
    match File::create(&path) {
        Ok(file) => {
            let _ = tracing_subscriber::fmt()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_max_level(tracing::Level::DEBUG)
                .try_init();
        }
        Err(e) => eprintln!("explorer: cannot open log file {}: {e}", path.display()),
    }
}

/// Resolves DIR (or the working directory) to an absolute directory path.
fn start_directory(options: &Options) -> Result<PathBuf> {
    let requested = match &options.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let bad = |source| ExplorerError::BadDirectory {
        path: requested.clone(),
        source,
    };

    let dir = fs::canonicalize(&requested).map_err(bad)?;
    if !dir.is_dir() {
        return Err(bad(io::Error::new(
            io::ErrorKind::NotADirectory,
            "Not a directory",
        )));
    }
    fs::read_dir(&dir).map_err(bad)?;
    Ok(dir)
}
