//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `acquire <key>` | Take the lock, print the owner token |
//! | `release <key> <token>` | Release a lock held with `token` |
//! | `inspect <key>` | Show the current holder and remaining TTL |
//! | `key <kind> <logical-key>` | Print a fully-qualified key |
//! | `providers` | List available store backends |
//!
//! Lock keys given on the command line are logical names; they are
//! namespaced with the configured environment and application as `string`
//! keys before reaching the store.

use clap::{Parser, Subcommand};
use kvlock_domain::error::Result;
use kvlock_domain::{KeyKind, KeyTtl};
use kvlock_infrastructure::config::{AppConfig, ConfigLoader};
use kvlock_infrastructure::logging::init_logging;
use kvlock_infrastructure::{build_lock_manager, list_store_providers};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Command line interface for kvlock
#[derive(Parser, Debug)]
#[command(name = "kvlock")]
#[command(about = "Distributed locks on a shared key-value store")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// kvlock subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Acquire a lock and print its owner token
    Acquire {
        /// Logical lock name
        key: String,

        /// Lock lifetime in milliseconds (default: `lock.default_ttl_ms`)
        #[arg(long)]
        ttl_ms: Option<u64>,

        /// Maximum wait in milliseconds (default: `lock.default_timeout_ms`)
        #[arg(long, conflicts_with = "once")]
        timeout_ms: Option<u64>,

        /// Make a single attempt instead of waiting
        #[arg(long)]
        once: bool,
    },

    /// Release a lock previously acquired with `token`
    Release {
        /// Logical lock name
        key: String,

        /// Owner token printed by `acquire`
        token: String,
    },

    /// Show the holder and remaining lifetime of a lock
    Inspect {
        /// Logical lock name
        key: String,
    },

    /// Print the fully-qualified store key for a logical key
    Key {
        /// Key kind segment
        kind: KeyKind,

        /// Logical key
        logical_key: String,
    },

    /// List available store providers
    Providers,
}

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The command did what was asked
    Success,
    /// The lock was held by someone else, or was not ours to release
    NotHeld,
}

impl From<CommandStatus> for ExitCode {
    fn from(status: CommandStatus) -> Self {
        match status {
            CommandStatus::Success => ExitCode::SUCCESS,
            CommandStatus::NotHeld => ExitCode::from(1),
        }
    }
}

/// Load configuration from `path`, or from the default locations when absent
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let loader = match path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    loader.load()
}

/// Load configuration, initialize logging, and run the selected command
pub async fn run(cli: Cli) -> Result<CommandStatus> {
    let config = load_config(cli.config.as_deref())?;
    init_logging(config.logging.clone())?;

    let mut stdout = std::io::stdout().lock();
    execute(&cli.command, &config, &mut stdout).await
}

/// Run one command against the given configuration, writing results to `out`
pub async fn execute<W: Write>(
    command: &Commands,
    config: &AppConfig,
    out: &mut W,
) -> Result<CommandStatus> {
    match command {
        Commands::Acquire {
            key,
            ttl_ms,
            timeout_ms,
            once,
        } => {
            let manager = build_lock_manager(config)?;
            let lock_key = manager.lock_key(key);
            let ttl_ms = ttl_ms.unwrap_or(config.lock.default_ttl_ms);

            let token = if *once {
                manager.try_lock_once(&lock_key, ttl_ms).await?
            } else {
                let timeout_ms = timeout_ms.unwrap_or(config.lock.default_timeout_ms);
                manager
                    .try_lock_with_timeout(&lock_key, ttl_ms, timeout_ms)
                    .await?
            };

            match token {
                Some(token) => {
                    writeln!(out, "{token}")?;
                    Ok(CommandStatus::Success)
                }
                None => {
                    writeln!(out, "not acquired: {lock_key}")?;
                    Ok(CommandStatus::NotHeld)
                }
            }
        }
        Commands::Release { key, token } => {
            let manager = build_lock_manager(config)?;
            let lock_key = manager.lock_key(key);
            if manager.release_lock(&lock_key, token).await? {
                writeln!(out, "released: {lock_key}")?;
                Ok(CommandStatus::Success)
            } else {
                writeln!(out, "not held: {lock_key}")?;
                Ok(CommandStatus::NotHeld)
            }
        }
        Commands::Inspect { key } => {
            let manager = build_lock_manager(config)?;
            let lock_key = manager.lock_key(key);
            let holder = manager.get(&lock_key).await;
            let ttl_secs = match manager.store().ttl(&lock_key).await? {
                KeyTtl::Expires(secs) => Some(secs),
                KeyTtl::Persistent | KeyTtl::Missing => None,
            };

            let report = serde_json::json!({
                "key": lock_key,
                "held": holder.is_some(),
                "holder": holder,
                "ttl_secs": ttl_secs,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            Ok(CommandStatus::Success)
        }
        Commands::Key { kind, logical_key } => {
            let namespace = config.namespace.to_namespace();
            writeln!(out, "{}", namespace.build_key(*kind, logical_key))?;
            Ok(CommandStatus::Success)
        }
        Commands::Providers => {
            for provider in list_store_providers() {
                let marker = if provider.name == config.store.provider.as_str() {
                    "*"
                } else {
                    " "
                };
                writeln!(out, "{marker} {:<8} {}", provider.name, provider.description)?;
            }
            Ok(CommandStatus::Success)
        }
    }
}
