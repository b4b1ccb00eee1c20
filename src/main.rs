// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use minikadlar::{
    connect, fetch_block_tree, render_page, resolve_api_key, server, Command, CommandLineInput,
    NotionId, RenderContext, Site, SiteConfig, SiteIdentity,
};
use std::fs;
use std::time::Duration;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}";

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("minikadlar.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

fn revalidation_window(cli: &CommandLineInput) -> Option<Duration> {
    (!cli.no_cache).then(|| Duration::from_secs(cli.revalidate))
}

/// Starts the site on `host:port`.
async fn run_server(cli: &CommandLineInput, host: &str, port: u16) -> anyhow::Result<()> {
    let config = SiteConfig::resolve(cli).context("Invalid site configuration")?;
    log::info!(
        "Serving {} from posts database {} and names database {}",
        config.site_url,
        config.posts_database,
        config.names_database
    );

    let repo = connect(&config.api_key, revalidation_window(cli))?;
    let site = Site::new(repo, config)?;
    server::serve(site, host, port).await?;
    Ok(())
}

/// Fetches one page's blocks and prints them as HTML.
async fn render_one(cli: &CommandLineInput, page: &str) -> anyhow::Result<()> {
    let api_key = resolve_api_key(|name| std::env::var(name).ok())?;
    let page_id = NotionId::parse(page).with_context(|| format!("Not a Notion page: {}", page))?;

    let repo = connect(&api_key, revalidation_window(cli))?;
    let blocks = fetch_block_tree(repo.as_ref(), &page_id).await?;
    log::info!("Fetched {} top-level blocks for {}", blocks.len(), page_id);

    let identity = SiteIdentity::default();
    println!(
        "{}",
        render_page(&blocks, &RenderContext::new(identity.image_proxy_base))
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    match &cli.command {
        Command::Serve { host, port } => run_server(&cli, host, *port).await,
        Command::Render { page } => render_one(&cli, page).await,
    }
}
