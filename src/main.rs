//! blog-lang - Main Entry Point
//!
//! Inspect and change the persisted language preference from the command line.

use std::path::PathBuf;

use blog_lang::app::preferences::{LangChange, change_lang, open_storage};
use blog_lang::domain::config::AppConfig;
use blog_lang::error::Result;
use blog_lang::i18n::Lang;
use blog_lang::state::LangStore;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "blog-lang", version, about)]
struct Cli {
    /// Application config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Preferences file, overriding the configured one
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Run without persistent storage
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the current language
    Show,

    /// Change the language
    Set {
        lang: Lang,
        /// Route the reader is on, used to compute the redirect
        #[arg(long)]
        route: Option<String>,
    },

    /// Switch to the other language
    Toggle {
        #[arg(long)]
        route: Option<String>,
    },

    /// Print the resolved site configuration as JSON
    Site,
}

fn main() {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        tracing::error!(error = %e, "blog-lang failed");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::default_path()?,
    };
    let config = AppConfig::try_load(&config_path)?;

    match cli.command {
        Command::Show => {
            let store = LangStore::new(open_storage(cli.storage.as_deref(), &config, cli.ephemeral)?);
            let lang = store.get();
            println!("{lang} ({})", lang.display_name());
        }
        Command::Set { lang, route } => {
            let storage = open_storage(cli.storage.as_deref(), &config, cli.ephemeral)?;
            print_change(&change_lang(storage, &config, route, |store| store.set(lang)));
        }
        Command::Toggle { route } => {
            let storage = open_storage(cli.storage.as_deref(), &config, cli.ephemeral)?;
            print_change(&change_lang(storage, &config, route, LangStore::toggle));
        }
        Command::Site => {
            let storage = open_storage(cli.storage.as_deref(), &config, cli.ephemeral)?;
            let lang = LangStore::new(storage).get();
            let site = config.site.clone().with_env_overrides();
            let giscus = config
                .post
                .comment
                .enabled_giscus()
                .map(|giscus| giscus.with_lang(lang));
            let value = serde_json::json!({
                "url": site.url(),
                "site": &site,
                "comment": {
                    "use": &config.post.comment.use_providers,
                    "giscus": giscus,
                },
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}

fn print_change(change: &LangChange) {
    println!("{} ({})", change.lang, change.lang.display_name());
    if let Some(target) = &change.redirect {
        println!("redirect: {target}");
    }
}
