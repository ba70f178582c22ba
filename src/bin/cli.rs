//! filekv CLI
//!
//! Command-line interface for inspecting and editing a store file.
//! Each invocation opens the store, runs one command and closes it.

use std::process;

use clap::{Parser, Subcommand};
use filekv::{Config, Document, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// filekv CLI
#[derive(Parser, Debug)]
#[command(name = "filekv-cli")]
#[command(about = "CLI for filekv store files")]
#[command(version)]
struct Args {
    /// Store file (empty generates `<unix-seconds>.store`)
    #[arg(short, long, default_value = "")]
    path: String,

    /// fsync after every write
    #[arg(long)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Create a key with a JSON object value
    Set {
        /// The key to set
        key: String,

        /// The value, a JSON object such as '{"a":1}'
        value: String,

        /// Seconds until the key expires (0 = never)
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        ttl: i64,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// List live keys
    Keys,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,filekv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .path(&args.path)
        .sync_writes(args.sync)
        .build();

    let store = match Store::open(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            process::exit(1);
        }
    };

    let outcome = run(&store, args.command);

    if let Err(e) = store.close() {
        tracing::error!("Failed to close store: {}", e);
        process::exit(1);
    }

    if let Err(message) = outcome {
        eprintln!("error: {}", message);
        process::exit(2);
    }
}

/// Execute one command against an open store
fn run(store: &Store, command: Commands) -> Result<(), String> {
    match command {
        Commands::Get { key } => {
            let value = store.read(&key).map_err(|e| e.to_string())?;
            let text = serde_json::to_string_pretty(&value).map_err(|e| e.to_string())?;
            println!("{}", text);
        }
        Commands::Set { key, value, ttl } => {
            let value: Document = serde_json::from_str(&value)
                .map_err(|e| format!("value must be a JSON object: {}", e))?;
            store.create(&key, value, ttl).map_err(|e| e.to_string())?;
            println!("OK");
        }
        Commands::Del { key } => {
            store.delete(&key).map_err(|e| e.to_string())?;
            println!("OK");
        }
        Commands::Keys => {
            for key in store.keys() {
                println!("{}", key);
            }
        }
    }

    Ok(())
}
