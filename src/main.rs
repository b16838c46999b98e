use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use policyr::prelude::*;
use policyr::source::http_client;
use policyr::{page, server};

#[derive(Parser)]
#[command(name = "policyr", version, about = "Render a markdown privacy policy as a styled html page")]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at info level regardless of RUST_LOG.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a markdown file into an html fragment.
    Convert {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Load the policy, falling back to the embedded copy, and write the full page.
    Render {
        /// Markdown URL or path, overrides the configured one.
        #[arg(long)]
        source: Option<String>,
        /// Never use the embedded copy.
        #[arg(long)]
        no_embedded: bool,
        /// Theme to use when no preference has been stored.
        #[arg(long)]
        system_theme: Option<Theme>,
        #[arg(short, long, default_value = "index.html")]
        output: PathBuf,
    },
    /// Serve the page and the theme toggle over http.
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: String,
    },
    /// Inspect or change the stored theme preference.
    #[command(subcommand)]
    Theme(ThemeCommand),
}

#[derive(Subcommand)]
enum ThemeCommand {
    Show {
        #[arg(long)]
        system_theme: Option<Theme>,
    },
    Toggle {
        #[arg(long)]
        system_theme: Option<Theme>,
    },
    Set {
        theme: Theme,
    },
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Convert { input, output } => {
            let bytes = fs::read(&input).with_context(|| format!("Failed to read {}", input.display()))?;
            let html = Converter::new()
                .convert_bytes(&bytes)
                .with_context(|| format!("While converting {}", input.display()))?;

            write_or_print(output, &html)
        },
        Command::Render { source, no_embedded, system_theme, output } => {
            let mut config = config;

            if let Some(source) = source {
                config = config.markdown_file(source);
            }

            if no_embedded {
                config = config.without_embedded();
            }

            let theme = PreferenceStore::open(config.preferences.clone())?.resolve_theme(system_theme);
            let outcome = PolicyLoader::from_config(&config, &http_client()?).load().await;

            write_or_print(Some(output), &page::render(&config, theme, &outcome))
        },
        Command::Serve { addr } => server::serve(config, &addr).await,
        Command::Theme(command) => {
            let mut store = PreferenceStore::open(config.preferences.clone())?;
            let theme = match command {
                ThemeCommand::Show { system_theme } => store.resolve_theme(system_theme),
                ThemeCommand::Toggle { system_theme } => store.toggle_theme(system_theme)?,
                ThemeCommand::Set { theme } => {
                    store.set_theme(theme)?;
                    theme
                },
            };

            println!("{}", theme);
            Ok(())
        },
    }
}

fn write_or_print(output: Option<PathBuf>, html: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }

            fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))
        },
        None => {
            println!("{}", html);
            Ok(())
        },
    }
}
