//! linelog CLI
//!
//! Decorates line-oriented console output with timestamps, levels and domains.
//!
//! ## Usage
//!
//! ```bash
//! # Decorate stdin at info level
//! make 2>&1 | linelog -c time pipe --domain build
//!
//! # Run a command, stdout at info and stderr at error
//! linelog -c time,microsecond run --domain test -- cargo test
//!
//! # List configuration tokens
//! linelog tokens
//! ```
//!
//! Tokens from the `LINELOG` environment variable are applied first, then
//! every `-c` flag in order.

mod pump;

use std::process::{ExitStatus, Stdio};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use linelog_core::{global, ConsoleLayer, Level, Options, CONFIGURATION_TOKENS};
use tokio::process::Command;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::pump::pump;

/// Environment variable holding configuration tokens
const ENV_TOKENS: &str = "LINELOG";

/// Domain of the CLI's own diagnostics
const DIAGNOSTICS_DOMAIN: &str = "linelog";

/// linelog - decorated console lines
#[derive(Parser)]
#[command(name = "linelog")]
#[command(version = "0.1.0")]
#[command(about = "Decorate console output with timestamps, levels and domains")]
struct Cli {
    /// Configuration tokens, comma separated (see `linelog tokens`)
    #[arg(short, long = "config", value_name = "TOKENS", value_delimiter = ',', global = true)]
    config: Vec<String>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decorate standard input
    Pipe {
        /// Level of every line
        #[arg(short, long, default_value = "info")]
        level: Level,

        /// Domain of every line
        #[arg(short, long, default_value = "")]
        domain: String,
    },

    /// Run a command and decorate its output
    Run {
        /// Level of the command's stdout
        #[arg(long, default_value = "info")]
        out_level: Level,

        /// Level of the command's stderr
        #[arg(long, default_value = "error")]
        err_level: Level,

        /// Domain of every line
        #[arg(short, long, default_value = "")]
        domain: String,

        /// Command and its arguments
        #[arg(last = true, required = true, value_name = "CMD")]
        command: Vec<String>,
    },

    /// Print the accepted configuration tokens
    Tokens,
}

fn load_options(tokens: &[String], verbosity: u8) -> Result<Options> {
    let mut options = Options::from_env(ENV_TOKENS)
        .with_context(|| format!("invalid tokens in ${}", ENV_TOKENS))?;
    options.apply(tokens).context("invalid -c tokens")?;
    if verbosity >= 1 {
        options.filter.debug = true;
    }
    if verbosity >= 2 {
        options.filter.trace = true;
    }
    Ok(options)
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let layer = ConsoleLayer::new(global::root().clone()).with_domain(DIAGNOSTICS_DOMAIN);
    tracing_subscriber::registry()
        .with(layer.with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        ))
        .init();
}

/// Exit code to report for a finished child
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

async fn run_child(
    command: &[String],
    out_level: Level,
    err_level: Level,
    domain: &str,
) -> Result<i32> {
    let Some((program, args)) = command.split_first() else {
        bail!("no command given");
    };

    tracing::debug!(program = %program, args = args.len(), "spawning child");
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to start '{}'", program))?;

    let stdout = child.stdout.take().context("child stdout not captured")?;
    let stderr = child.stderr.take().context("child stderr not captured")?;

    let root = global::root();
    let out_domain = domain.to_string();
    let err_domain = domain.to_string();
    let out_task =
        tokio::spawn(async move { pump(stdout, root.clone(), out_level, &out_domain).await });
    let err_task =
        tokio::spawn(async move { pump(stderr, root.clone(), err_level, &err_domain).await });

    let status = child.wait().await.context("failed to wait for child")?;
    let out_bytes = out_task.await??;
    let err_bytes = err_task.await??;

    let code = exit_code(status);
    tracing::debug!(code, out_bytes, err_bytes, "child exited");
    Ok(code)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let options = load_options(&cli.config, cli.verbose)?;
    global::configure(&options);
    setup_logging(cli.verbose);
    tracing::trace!(?options, "options loaded");

    let code = match cli.command {
        Commands::Pipe { level, domain } => {
            let read = pump(tokio::io::stdin(), global::root().clone(), level, &domain).await;
            read.context("failed to read stdin")?;
            0
        }

        Commands::Run {
            out_level,
            err_level,
            domain,
            command,
        } => run_child(&command, out_level, err_level, &domain).await?,

        Commands::Tokens => {
            for token in CONFIGURATION_TOKENS {
                println!("{}", token);
            }
            0
        }
    };

    global::close();
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
