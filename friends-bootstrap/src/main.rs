use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "untappd-friends")]
#[command(about = "Untappd friend activity for Slack", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Write logs to a daily rolling file in this directory
    #[arg(long)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the Slack slash-command endpoint (default)
    Serve,
    /// Run one chat command, e.g. `run untappd user stephenyeargin`
    Run {
        /// Print attachment fallbacks instead of delivering to Slack
        #[arg(long)]
        plain_text: bool,
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
}

fn init_tracing(log_dir: Option<&str>) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "untappd-friends.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_tracing(args.log_dir.as_deref());

    if let Some(config) = args.config {
        std::env::set_var("UNTAPPD_FRIENDS_CONFIG", config);
    }

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => friends_bootstrap::run_standalone().await,
        Command::Run { text, plain_text } => {
            friends_bootstrap::run_once(&text.join(" "), plain_text).await
        }
    }
}
