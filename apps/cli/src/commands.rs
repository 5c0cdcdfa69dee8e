//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use siteprofiler_core::{ProfileResult, ProgressReporter, profile_site};
use siteprofiler_shared::{AppConfig, ProfileConfig, init_config, load_config, render_token};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// SiteProfiler — turn a company website into a structured knowledge record.
#[derive(Parser)]
#[command(
    name = "siteprofiler",
    version,
    about = "Profile a company website into a structured JSON knowledge record.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Profile a website and emit its knowledge record.
    Profile {
        /// Website URL; https:// is assumed when the scheme is missing.
        url: String,

        /// Write the record JSON here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Preferred company name, stored first in alternativeNames.
        #[arg(short, long)]
        name: Option<String>,

        /// Main-page fetch timeout in seconds.
        #[arg(long)]
        timeout: Option<u64>,

        /// Upper bound on auxiliary pages fetched.
        #[arg(long)]
        max_aux_pages: Option<usize>,

        /// Browser-render service URL for script-only pages.
        #[arg(long)]
        render_endpoint: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "siteprofiler=info",
        1 => "siteprofiler=debug",
        _ => "siteprofiler=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Profile {
            url,
            out,
            name,
            timeout,
            max_aux_pages,
            render_endpoint,
        } => {
            cmd_profile(
                &url,
                out.as_deref(),
                name.as_deref(),
                timeout,
                max_aux_pages,
                render_endpoint.as_deref(),
            )
            .await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// profile
// ---------------------------------------------------------------------------

async fn cmd_profile(
    url: &str,
    out: Option<&Path>,
    name: Option<&str>,
    timeout: Option<u64>,
    max_aux_pages: Option<usize>,
    render_endpoint: Option<&str>,
) -> Result<()> {
    let app_config = load_config()?;
    let mut config = ProfileConfig::from(&app_config);
    config.render_token = render_token(&app_config);

    // Flags override config file values.
    if let Some(secs) = timeout {
        config.timeout_secs = secs;
    }
    if let Some(pages) = max_aux_pages {
        config.max_aux_pages = pages;
    }
    if let Some(endpoint) = render_endpoint {
        config.render_endpoint = Some(endpoint.to_string());
    }

    info!(url, "profiling site");

    let reporter = CliProgress::new();
    let mut result = profile_site(url, &config, &reporter).await?;

    if let Some(name) = name {
        promote_name(
            &mut result.record.company_foundation.alternative_names,
            name,
        );
    }

    let json = serde_json::to_string_pretty(&result.record)?;
    match out {
        Some(path) => {
            std::fs::write(path, &json)
                .map_err(|e| eyre!("cannot write {}: {e}", path.display()))?;
            print_summary(&result, path);
        }
        // Record goes to stdout; the spinner and logs stay on stderr.
        None => println!("{json}"),
    }

    Ok(())
}

/// Put the user-provided company name first, dropping any case-insensitive
/// duplicate of it further down the list.
fn promote_name(names: &mut Vec<String>, preferred: &str) {
    names.retain(|n| !n.eq_ignore_ascii_case(preferred));
    names.insert(0, preferred.to_string());
}

fn print_summary(result: &ProfileResult, path: &Path) {
    let record = &result.record;
    let company = record
        .company_foundation
        .alternative_names
        .first()
        .map(String::as_str)
        .unwrap_or("unknown");

    println!();
    println!("  Knowledge record written!");
    println!("  Company: {company}");
    println!("  Pages:   {}", result.pages_fetched);
    println!("  People:  {}", record.key_people.len());
    println!("  Offers:  {}", record.offerings.len());
    println!("  Bios:    {}", result.bios_filled);
    println!("  Path:    {}", path.display());
    println!("  Time:    {:.1}s", result.elapsed.as_secs_f64());
    println!();
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn page_fetched(&self, url: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Fetching [{current}/{total}] {url}"));
    }

    fn done(&self, _result: &ProfileResult) {
        self.spinner.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promoted_name_lands_first_and_dedups() {
        let mut names = vec![
            "Acme Roofing | Storm Repair".to_string(),
            "ACME ROOFING".to_string(),
        ];
        promote_name(&mut names, "Acme Roofing");
        assert_eq!(
            names,
            vec![
                "Acme Roofing".to_string(),
                "Acme Roofing | Storm Repair".to_string()
            ]
        );
    }

    #[test]
    fn promoted_name_works_on_empty_list() {
        let mut names = Vec::new();
        promote_name(&mut names, "Quiet Shop");
        assert_eq!(names, vec!["Quiet Shop".to_string()]);
    }
}
