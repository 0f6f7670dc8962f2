//! Command-line interface for bsky-session.
//!
//! Uses lexopt for minimal binary size overhead (~34KB).

use std::ffi::OsString;
use std::io::Read;
use std::path::PathBuf;

use crate::session::Session;

/// What the binary should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Restore the persisted session and report the login state.
    Status,
    /// Store a session record and resume it.
    Login(SessionSource),
    /// Forget the persisted session.
    Logout,
}

/// Where `login` reads the session record from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSource {
    Stdin,
    File(PathBuf),
}

impl SessionSource {
    /// Read and decode the session record handed to `login`.
    pub fn read_session(&self) -> Result<Session, LoginInputError> {
        let raw = match self {
            SessionSource::Stdin => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(|e| LoginInputError::Io(self.to_string(), e))?;
                buf
            }
            SessionSource::File(path) => std::fs::read_to_string(path)
                .map_err(|e| LoginInputError::Io(self.to_string(), e))?,
        };
        self.parse_session(&raw)
    }

    fn parse_session(&self, raw: &str) -> Result<Session, LoginInputError> {
        serde_json::from_str(raw).map_err(|e| LoginInputError::Invalid(self.to_string(), e))
    }
}

impl std::fmt::Display for SessionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionSource::Stdin => f.write_str("standard input"),
            SessionSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Failure reading the `login` input.
#[derive(Debug)]
pub enum LoginInputError {
    /// The input could not be read.
    Io(String, std::io::Error),
    /// The input is not a session record.
    Invalid(String, serde_json::Error),
}

impl std::fmt::Display for LoginInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(source, e) => write!(f, "failed to read login input {}: {}", source, e),
            Self::Invalid(source, e) => {
                write!(f, "login input {} is not a session record: {}", source, e)
            }
        }
    }
}

impl std::error::Error for LoginInputError {}

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Command to run.
    pub command: Option<Command>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Service URL (overrides config file).
    pub service: Option<String>,
    /// Directory holding the session file.
    pub data_dir: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('s') | Long("service") => {
                result.service = Some(parser.value()?.parse()?);
            }
            Short('d') | Long("data-dir") => {
                result.data_dir = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) if result.command.is_none() => {
                let name: String = val.string()?;
                result.command = Some(match name.as_str() {
                    "status" => Command::Status,
                    "logout" => Command::Logout,
                    "login" => {
                        let source: String = parser.value()?.parse()?;
                        Command::Login(if source == "-" {
                            SessionSource::Stdin
                        } else {
                            SessionSource::File(PathBuf::from(source))
                        })
                    }
                    _ => return Err(ArgsError::UnknownCommand(name)),
                });
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"bsky-session {version}
Persisted login session manager for AT Protocol clients

USAGE:
    bsky-session [OPTIONS] <COMMAND>

COMMANDS:
    status                  Restore the saved session and report login state
    login <FILE|->          Save a session record (JSON) and resume it
    logout                  Forget the saved session

OPTIONS:
    -c, --config <FILE>     Path to configuration file (JSON)
    -s, --service <URL>     Service endpoint [default: https://bsky.social]
    -d, --data-dir <DIR>    Directory holding the session file
    -l, --log-level <LVL>   Log level (error, warn, info, debug, trace)
    -h, --help              Print help
    -V, --version           Print version

ENVIRONMENT VARIABLES:
    BSKY_SESSION_SERVICE    Service endpoint (overrides config)
    BSKY_SESSION_DIR        Data directory (overrides config)
    BSKY_SESSION_LOG_LEVEL  Log level (overrides config)
    RUST_LOG                Alternative log level setting

EXAMPLES:
    # Save a session returned by com.atproto.server.createSession
    bsky-session login session.json

    # Check whether the saved session is still accepted
    bsky-session status

    # Use a self-hosted PDS
    bsky-session -s https://pds.example status
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("bsky-session {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Command name not recognized.
    UnknownCommand(String),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::UnknownCommand(name) => write!(f, "unknown command: '{}'", name),
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
