//! gg CLI entry point.
//!
//! Parses command-line arguments and dispatches to the appropriate command handler.

use clap::Parser;
use gg::cli::{Cli, Commands, GithubCommand};
use gg::commands::{
    branch_command, commit_command, config_command, configure_command, getback_command,
    info_command, mainmerge_command, push_command, start_command, token_command,
};
use gg::completion::{detect_shell, generate_completion_script, ShellType};
use gg::output::{print_error, GRAY, RESET};
use gg::{ConfigStore, GgError, Git, Result, TerminalReporter};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directive.
const LOG_ENV: &str = "GG_LOG";

fn init_tracing(debug: bool) {
    let default_level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    // Completion scripts don't need a repository or the store.
    if let Commands::ShellCompletion { shell } = &cli.command {
        let shell = match shell {
            Some(name) => ShellType::from_name(name)?,
            None => detect_shell()?,
        };
        print!("{}", generate_completion_script(shell));
        eprintln!("{GRAY}# Install with: {}{RESET}", shell.install_hint());
        return Ok(());
    }

    let git = Git::new();
    let reporter = TerminalReporter;
    let store = ConfigStore::open_default(&git, &reporter)?;
    tracing::debug!(path = %store.path().display(), "using storage file");

    match &cli.command {
        Commands::Start { title } => start_command(&store, &git, title),
        Commands::Commit(args) => commit_command(&store, &git, args),
        Commands::Push => push_command(&store, &git),
        Commands::GetBack { force } => getback_command(&store, &git, *force),
        Commands::MainMerge { yes } => mainmerge_command(&store, &git, *yes),
        Commands::Branch(args) => branch_command(&store, &git, args),
        Commands::Info => info_command(&store, &git),
        Commands::Config { global } => config_command(&store, *global),
        Commands::Configure { key, value } => {
            configure_command(&store, key.as_deref(), value.as_deref())
        }
        Commands::Github {
            command: GithubCommand::Token { token, show },
        } => token_command(&store, token.as_deref(), *show),
        Commands::ShellCompletion { .. } => Ok(()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(&cli) {
        Ok(()) => {}
        Err(GgError::Cancelled) => {
            println!();
        }
        Err(e) => {
            if cli.debug {
                eprintln!("{:?}", e);
            } else {
                print_error(&e.to_string());
            }
            std::process::exit(1);
        }
    }
}
