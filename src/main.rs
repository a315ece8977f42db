//! clipvault CLI - inspect and modify the daemon's settings.

use clap::Parser;
use clipvault::cli::{Cli, Commands};
use clipvault::commands::{self, CommandResult};
use clipvault::settings::Settings;
use clipvault::store::FileStore;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

fn main() {
    let cli = Cli::parse();
    let human = cli.human_readable;

    init_tracing();

    if let Err(e) = run(cli, human) {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!(r#"{{"error": "{}"}}"#, e);
        }
        process::exit(1);
    }
}

fn run(cli: Cli, human: bool) -> clipvault::Result<()> {
    let path: PathBuf = cli.store_path.unwrap_or_else(FileStore::default_path);
    let store = FileStore::open(&path)?;
    let mut settings = Settings::open(Box::new(store))?;

    match cli.command {
        Commands::Get { key } => print_result(&commands::get(&settings, &key)?, human),
        Commands::Set { key, value } => {
            print_result(&commands::set(&mut settings, &key, &value)?, human)
        }
        Commands::List => print_result(&commands::list(&settings), human),
        Commands::Watch { interval } => {
            commands::watch(&mut settings, Duration::from_millis(interval), human)?
        }
    }

    Ok(())
}

fn print_result(result: &dyn CommandResult, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}

/// Route library logging to stderr so stdout stays machine-parseable.
/// Controlled by the standard RUST_LOG filter, off by default.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
