//! bsky-session binary entry point.

use std::process::ExitCode;

use bsky_session::cli::{self, Command, SessionSource};
use bsky_session::config::Config;
use bsky_session::{logging, FileStorage, InitOutcome, SessionManager, XrpcClientFactory};
use tracing::{debug, error};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Run 'bsky-session --help' for usage.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let Some(command) = args.command.clone() else {
        cli::print_help();
        return ExitCode::from(2);
    };

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::try_init_with_filter(config.log_filter()).ok();
    debug!(service = %config.service.url, dir = %config.data_dir().display(), "configuration loaded");

    match run(&config, command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Composition root: wire storage and client factory into one manager.
async fn run(config: &Config, command: Command) -> Result<(), BoxError> {
    let storage = FileStorage::open(config.data_dir())?;
    let factory = XrpcClientFactory::new()?;
    let mut manager = SessionManager::new(storage, factory, config.service.url.clone())
        .with_key(config.storage.key.clone());

    match command {
        Command::Status => status(&mut manager).await,
        Command::Login(source) => login(&mut manager, &source).await,
        Command::Logout => {
            manager.clear_session()?;
            println!("logged out");
            Ok(())
        }
    }
}

async fn status(manager: &mut SessionManager) -> Result<(), BoxError> {
    let outcome = manager.initialize().await?;

    let Some(session) = manager.session() else {
        println!("logged out");
        return Ok(());
    };

    println!("logged in as {} ({})", session.handle, session.did);
    if outcome.is_confirmed() {
        println!("session confirmed by {}", manager.service());
    } else if let InitOutcome::ResumeFailed(e) = outcome {
        println!("session not confirmed: {}", e);
    }
    Ok(())
}

async fn login(manager: &mut SessionManager, source: &SessionSource) -> Result<(), BoxError> {
    let session = source.read_session()?;

    let pending = manager.set_session(session)?;
    if let Some(session) = manager.session() {
        println!("logged in as {} ({})", session.handle, session.did);
    }

    match pending.outcome().await {
        Ok(()) => println!("session confirmed by {}", manager.service()),
        Err(e) => println!("session saved but not confirmed: {}", e),
    }
    Ok(())
}
