//! locale-shim - render Fluent messages from published locale resources

use clap::Parser;
use locale_shim_app::{App, AppError, AppResult, Page, ProviderState};
use locale_shim_common::init_logging;
use locale_shim_config::{ConfigLoader, Settings};
use std::path::PathBuf;
use tracing::{error, info};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "LOCALE_SHIM_CONFIG")]
    config: Option<PathBuf>,

    /// Public base path: an http(s) URL or a directory containing `locale/`
    #[arg(short, long)]
    base_path: Option<String>,

    /// Locale to load; repeat in negotiation order
    #[arg(short = 'L', long = "locale")]
    locales: Vec<String>,

    /// Message argument as NAME=VALUE; may be repeated
    #[arg(short, long = "arg", value_parser = parse_arg)]
    args: Vec<(String, String)>,

    /// Log level filter
    #[arg(short, long)]
    log_level: Option<String>,

    /// Message ids to render
    #[arg(required = true)]
    messages: Vec<String>,
}

fn parse_arg(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))
}

fn load_settings(args: &Args) -> AppResult<Settings> {
    let mut settings = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    if let Some(base) = &args.base_path {
        settings.assets.public_base_path.clone_from(base);
    }
    if !args.locales.is_empty() {
        settings.assets.locales.clone_from(&args.locales);
    }
    if let Some(level) = &args.log_level {
        settings.logging.level.clone_from(level);
    }

    settings.validate_all().map_err(locale_shim_config::ConfigError::from)?;
    Ok(settings)
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let args = Args::parse();
    let settings = load_settings(&args)?;
    init_logging(&settings.logging)?;

    info!(
        "Loading [{}] from {} '{}'",
        settings.assets.locales.join(", "),
        if settings.is_remote() { "URL" } else { "directory" },
        settings.assets.public_base_path
    );

    let page = args
        .args
        .iter()
        .fold(Page::new(args.messages.iter().cloned()), |page, (name, value)| {
            page.with_arg(name.as_str(), value.as_str())
        });

    let outcome = App::from_settings(&settings, page)?.run().await?;

    match outcome.state {
        ProviderState::Ready(_) => {
            println!("{}", outcome.settled);
            Ok(())
        }
        ProviderState::Failed(e) => {
            error!("Localization failed: {}", e);
            Err(AppError::Localization(e))
        }
        ProviderState::Uninitialized => Err(locale_shim_i18n::L10nError::Cancelled.into()),
    }
}
