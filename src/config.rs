// src/config.rs
use crate::constants::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_REVALIDATE_SECS, DEFAULT_SITE_URL};
use crate::error::AppError;
use crate::site::alphabet::Alphabet;
use crate::types::{ApiKey, DatabaseId, SiteUrl};
use clap::{Parser, Subcommand};
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Seconds an upstream response stays fresh before it is fetched again
    #[arg(long, global = true, default_value_t = DEFAULT_REVALIDATE_SECS)]
    pub revalidate: u64,

    /// Disable response caching (always fetch fresh data)
    #[arg(long, global = true, default_value_t = false)]
    pub no_cache: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Serve the site over HTTP
    Serve {
        /// Interface to bind
        #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Fetch one page's blocks and print them as HTML
    Render {
        /// Notion page URL or ID
        page: String,
    },
}

/// Fixed identity of the site: who writes it and where its images live.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteIdentity {
    pub name: &'static str,
    pub tagline: &'static str,
    pub author: &'static str,
    pub fact_checker: &'static str,
    pub language: &'static str,
    pub locale: &'static str,
    pub image_proxy_base: &'static str,
    pub default_image_key: &'static str,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            name: "MinikAdlar",
            tagline: "Bebek İsimleri ve Anlamları",
            author: "MinikAdlar Editör",
            fact_checker: "Uzman Editör",
            language: "tr-TR",
            locale: "tr_TR",
            image_proxy_base: "https://minikadlar-gallery.vercel.app/api/image",
            default_image_key: "default-image.webp",
        }
    }
}

impl SiteIdentity {
    /// `MinikAdlar - Bebek İsimleri ve Anlamları`
    pub fn full_title(&self) -> String {
        format!("{} - {}", self.name, self.tagline)
    }

    pub fn logo_url(&self, site: &SiteUrl) -> String {
        site.join("/logo.png")
    }
}

/// Resolved site configuration, built once at start-up and shared by
/// reference with every request.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub api_key: ApiKey,
    pub posts_database: DatabaseId,
    pub names_database: DatabaseId,
    pub site_url: SiteUrl,
    pub identity: SiteIdentity,
    pub alphabet: Alphabet,
    pub revalidate: Duration,
    pub no_cache: bool,
}

impl SiteConfig {
    pub fn new(
        api_key: ApiKey,
        posts_database: DatabaseId,
        names_database: DatabaseId,
        site_url: SiteUrl,
    ) -> Self {
        Self {
            api_key,
            posts_database,
            names_database,
            site_url,
            identity: SiteIdentity::default(),
            alphabet: Alphabet::turkish(),
            revalidate: Duration::from_secs(DEFAULT_REVALIDATE_SECS),
            no_cache: false,
        }
    }

    /// Resolves the configuration from CLI input and the process environment.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Resolves the configuration with an explicit variable lookup.
    pub fn resolve_with<F>(cli: &CommandLineInput, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = resolve_api_key(&lookup)?;
        let posts_database = DatabaseId::parse(&require(&lookup, "NOTION_DATABASE_ID")?)?;
        let names_database = DatabaseId::parse(&require(&lookup, "NOTION_NAMES_DATABASE_ID")?)?;
        let site_url = SiteUrl::parse(
            lookup("NEXT_PUBLIC_SITE_URL")
                .filter(|url| !url.trim().is_empty())
                .as_deref()
                .unwrap_or(DEFAULT_SITE_URL),
        )?;

        let mut config = Self::new(api_key, posts_database, names_database, site_url);
        config.revalidate = Duration::from_secs(cli.revalidate);
        config.no_cache = cli.no_cache;
        Ok(config)
    }
}

/// Reads and validates `NOTION_API_KEY`.
pub fn resolve_api_key<F>(lookup: F) -> Result<ApiKey, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let key = require(&lookup, "NOTION_API_KEY")?;
    Ok(ApiKey::new(key)?)
}

fn require<F>(lookup: &F, name: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            AppError::MissingConfiguration(format!("{} environment variable not set", name))
        })
}
