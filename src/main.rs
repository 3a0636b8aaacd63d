use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use modfetch::config::UpdateConfig;
use modfetch::download::HttpDownloader;
use modfetch::resolve::ExemptionList;
use modfetch::source::HttpCatalogSource;
use modfetch::updater::Updater;
use modfetch::version::is_pre_or_candidate;

#[derive(Parser)]
#[command(name = "modfetch")]
#[command(version, about = "Downloads game-version-compatible mod releases")]
struct Cli {
    /// Path to the run configuration
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = UpdateConfig::load(&cli.config)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(config))
}

async fn run(config: UpdateConfig) -> anyhow::Result<()> {
    if is_pre_or_candidate(&config.version) {
        println!("Release candidate and pre-release versions are not supported, exiting..");
        return Ok(());
    }

    let updater = Updater::new(
        HttpCatalogSource::default(),
        HttpDownloader::default(),
        ExemptionList::new(config.exempt_mods),
    );

    let outcomes = updater.resolve_all(&config.version, &config.mods).await?;
    updater
        .download_all(&outcomes, &config.download_folder)
        .await?;

    for outcome in &outcomes {
        if outcome.resolved.is_none() {
            println!(
                "{}: no release compatible with {}",
                outcome.mod_id, config.version
            );
        }
    }

    Ok(())
}
