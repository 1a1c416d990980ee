//! `avatar-demo`: runs every avatar service operation once and stores the
//! results in a directory, optionally rendering the generated avatar into an
//! HTML page.

mod demo;
mod page;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use avatar_core::{
    AvatarClient, AvatarService, ClientConfig, DirectorySink, NoopPresenter, UreqTransport, DEFAULT_BASE_URL,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::demo::{Demo, DemoSummary};
use crate::page::HtmlPage;

/// Command-line arguments for the demonstration client.
#[derive(Parser, Debug)]
#[command(name = "avatar-demo")]
#[command(about = "Exercise the avatar generation service")]
#[command(version)]
struct Args {
    /// Base URL of the avatar service
    #[arg(long, env = "AVATAR_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Directory downloaded avatars and archives are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Also write an HTML page displaying the generated avatar
    #[arg(long)]
    html: Option<PathBuf>,

    /// Skip the initial service health check
    #[arg(long)]
    skip_health: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = ClientConfig::new(&args.base_url);
    info!(base_url = config.base_url(), out_dir = %args.out_dir.display(), "starting demonstration");

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {}", args.out_dir.display()))?;

    let service = AvatarService::new(
        AvatarClient::with_config(config),
        UreqTransport::new(),
        DirectorySink::new(&args.out_dir),
    );

    let summary = match &args.html {
        Some(path) => {
            let mut demo = Demo::new(service, HtmlPage::new("Avatar demo")).check_health(!args.skip_health);
            let summary = demo.run();
            demo.into_presenter()
                .write(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "page written");
            summary
        }
        None => Demo::new(service, NoopPresenter)
            .check_health(!args.skip_health)
            .run(),
    };

    report(summary)
}

fn report(summary: DemoSummary) -> anyhow::Result<()> {
    if summary.failed > 0 {
        bail!("{} of {} steps failed", summary.failed, summary.succeeded + summary.failed);
    }
    Ok(())
}
