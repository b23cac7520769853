//! Command-line argument parsing and help for explorer.
//!
//! `explorer [OPTIONS] [DIR]`. Parsing is a pure function over the argument list so
//! it can be tested without a process; [handle_args] adds the printing.

use crate::error::{ExplorerError, Result};

use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

/// Options of an interactive run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Options {
    pub dir: Option<PathBuf>,
    pub start: Option<OsString>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Run(Options),
    Help,
    Version,
}

pub const USAGE: &str = "Usage: explorer [OPTIONS] [DIR]";

const HELP_TEXT: &str = r#"Terminal file browser with vim-like navigation.

Options:
  -s, --start NAME    Start with the cursor on the file with the given name
  -h, --help          Print this help
  -v, --version       Print the version

Keybindings:
  Navigation:
    Up/Down           Move cursor up/down
    Left/Right        Go to parent directory / Enter directory
    Home, g           Go to first item
    End, G            Go to last item
    Page Up, u        Move cursor to top of page (then previous page)
    Page Down, d      Move cursor to bottom of page (then next page)

  Search:
    /                 Open search box (filters files by substring)
    Enter             Close search box, keep filter
    Escape Escape     Clear search and close search box
    Ctrl-W, Ctrl-U    Delete word / delete to start of query
    Ctrl-Left/Right   Move by word

  Actions:
    Enter             Select current file and exit
    e                 Open file in $EDITOR
    D, Delete         Delete file/directory (with confirmation)
    q                 Quit without selection

Output:
  Prints the absolute path of the selected file to stdout.

Environment:
  EDITOR              Program used by the open action
  LS_COLORS           Colors for file types
  EXPLORER_LOG        Write a debug log to the given file
"#;

fn usage_error(msg: impl Into<String>) -> ExplorerError {
    ExplorerError::Usage(format!("{}\n{USAGE}", msg.into()))
}

/// Parses the arguments after the program name.
pub fn parse_args<I>(args: I) -> Result<CliAction>
where
    I: IntoIterator<Item = OsString>,
{
    let mut opts = Options::default();
    let mut positional: Vec<OsString> = Vec::new();
    let mut args = args.into_iter();
    let mut options_done = false;

    while let Some(arg) = args.next() {
        let bytes = arg.as_bytes();

        if options_done || bytes == b"-" || !bytes.starts_with(b"-") {
            positional.push(arg);
            continue;
        }

        match bytes {
            b"--" => options_done = true,
            b"-h" | b"--help" => return Ok(CliAction::Help),
            b"-v" | b"--version" => return Ok(CliAction::Version),
            b"-s" | b"--start" => match args.next() {
                Some(name) => opts.start = Some(name),
                None => {
                    return Err(usage_error(format!(
                        "option '{}' requires an argument",
                        arg.to_string_lossy()
                    )));
                }
            },
            _ if bytes.starts_with(b"--start=") => {
                opts.start = Some(OsStr::from_bytes(&bytes[8..]).to_os_string());
            }
            _ if bytes.starts_with(b"-s") => {
                opts.start = Some(OsStr::from_bytes(&bytes[2..]).to_os_string());
            }
            _ => {
                return Err(usage_error(format!(
                    "unknown option '{}'",
                    arg.to_string_lossy()
                )));
            }
        }
    }

    if positional.len() > 1 {
        return Err(usage_error("too many arguments"));
    }
    opts.dir = positional.pop().map(PathBuf::from);
    Ok(CliAction::Run(opts))
}

/// Parses `std::env::args_os` and prints help or version when asked.
///
/// Returns `None` when the process should exit successfully without running.
pub fn handle_args() -> Result<Option<Options>> {
    match parse_args(std::env::args_os().skip(1))? {
        CliAction::Run(opts) => Ok(Some(opts)),
        CliAction::Help => {
            print_help();
            Ok(None)
        }
        CliAction::Version => {
            print_version();
            Ok(None)
        }
    }
}

fn print_version() {
    println!("explorer {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!("{USAGE}\n\n{HELP_TEXT}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliAction> {
        parse_args(args.iter().map(OsString::from))
    }

    fn run(dir: Option<&str>, start: Option<&str>) -> CliAction {
        CliAction::Run(Options {
            dir: dir.map(PathBuf::from),
            start: start.map(OsString::from),
        })
    }

    #[test]
    fn no_arguments_runs_in_cwd() -> Result<()> {
        assert_eq!(parse(&[])?, run(None, None));
        Ok(())
    }

    #[test]
    fn start_option_spellings() -> Result<()> {
        for args in [
            &["-s", "main.rs", "src"][..],
            &["-smain.rs", "src"][..],
            &["--start", "main.rs", "src"][..],
            &["src", "--start=main.rs"][..],
        ] {
            assert_eq!(parse(args)?, run(Some("src"), Some("main.rs")), "{args:?}");
        }
        Ok(())
    }

    #[test]
    fn help_and_version_win() -> Result<()> {
        assert_eq!(parse(&["dir", "--help"])?, CliAction::Help);
        assert_eq!(parse(&["-v"])?, CliAction::Version);
        Ok(())
    }

    #[test]
    fn double_dash_ends_options() -> Result<()> {
        assert_eq!(parse(&["--", "-weird"])?, run(Some("-weird"), None));
        Ok(())
    }

    #[test]
    fn usage_errors() {
        for args in [&["a", "b"][..], &["--bogus"][..], &["-s"][..], &["--start"][..]] {
            assert!(
                matches!(parse(args), Err(ExplorerError::Usage(_))),
                "{args:?} should be rejected"
            );
        }
    }
}
