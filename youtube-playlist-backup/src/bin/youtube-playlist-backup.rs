use clap::Parser;
use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_playlist_backup::cli::Cli;
use youtube_playlist_backup::config::Config;
use youtube_playlist_backup::{Error, backup_channel};

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    // stdout is reserved for the backup itself
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();
    let config = Config::load_or_init(&cli.config_path()).await?;

    let options = match cli.resolve(config) {
        Ok(options) => options,
        Err(Error::Usage(msg)) => Cli::usage_error(msg).exit(),
        Err(e) => return Err(e.into()),
    };

    let client = options.client()?;
    let mut stdout = std::io::stdout().lock();
    backup_channel(&client, &options.channel_id, &mut stdout).await
}
