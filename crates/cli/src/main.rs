// CLI modules
mod args;
mod mode;
mod op;
mod ops;
mod state;
mod version;

use anyhow::Context;
use args::Args;
use clap::{Parser, Subcommand};
use op::Op;
use ops::{Init, Keygen, Open, Protect, Pubkey, SendRequest, Version};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

command_enum! {
    (Init, Init),
    (Keygen, Keygen),
    (Pubkey, Pubkey),
    (Protect, Protect),
    (Open, Open),
    (Send, SendRequest),
    (Version, Version),
}

/// Log to stderr so command output on stdout stays clean
fn init_logging(log_level: &str) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let log_level: tracing::Level = log_level
        .parse()
        .with_context(|| format!("invalid log level: {}", log_level))?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).try_init()?;
    Ok(guard)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let guard = match init_logging(&args.log_level) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: Failed to initialize logging: {:#}", e);
            std::process::exit(1);
        }
    };

    let ctx = op::OpContext::new(args.remote, args.config_path);

    let code = match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    // Flush buffered log lines before exiting
    drop(guard);
    std::process::exit(code);
}
