// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod logging;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use podfeed::presentation::EffectReceiver;
use podfeed::{
    CachingHomeRepository, ClientConfig, ContentItem, ContentSection, GetHomeSections,
    HomeEffect, HomeIntent, HomeRepository, HomeStateHolder, InMemoryLanguagePreferences,
    Language, LanguagePreferences, LiveSearchRepository, NetworkHomeDataSource,
    NetworkSearchDataSource, RefreshHomeSections, ReqwestClient, SearchContent, SearchEffect,
    SearchIntent, SearchOptions, SearchStateHolder, display_error_message,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[+] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");
static BULLET: Emoji<'_, '_> = Emoji("• ", "- ");

/// Browse the podcast home feed and search content
#[derive(Parser, Debug)]
#[command(name = "podfeed")]
#[command(about = "Browse the podcast home feed and search content")]
#[command(version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Content language (en, ar), overriding the configuration
    #[arg(short, long, global = true)]
    language: Option<Language>,

    /// Print results as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the home feed
    Home {
        /// Fetch again after the first load
        #[arg(short, long)]
        refresh: bool,
    },
    /// Search podcasts, episodes, audio books and articles
    Search {
        /// Text to search for
        query: String,
    },
}

fn load_config(args: &Args) -> Result<ClientConfig> {
    let config = match &args.config {
        Some(path) => ClientConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ClientConfig::default(),
    };
    Ok(config)
}

fn spinner(message: String) -> Result<ProgressBar> {
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {wide_msg}")?);
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    Ok(bar)
}

fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        title.to_string()
    } else {
        let kept: String = title.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

fn print_item(item: &ContentItem) {
    let now = Utc::now();
    let details: Vec<String> = [
        item.display_author().map(String::from),
        item.formatted_duration(),
        item.formatted_publish_date(now),
    ]
    .into_iter()
    .flatten()
    .collect();

    println!(
        "  {BULLET}{} {}",
        format!("[{}]", item.kind().display_name()).dimmed(),
        truncate_title(item.display_title(), 60).bold()
    );
    if !details.is_empty() {
        println!("      {}", details.join(" · ").dimmed());
    }
}

fn print_section(section: &ContentSection) {
    println!(
        "\n{HEADPHONES}{} {}",
        section.display_title().bold().magenta(),
        format!(
            "({}, {})",
            section.section_type.display_name(),
            section.item_count_text()
        )
        .dimmed()
    );
    if let Some(breakdown) = section.content_breakdown_text() {
        println!("  {}", breakdown.cyan());
    }
    for item in &section.items {
        print_item(item);
    }
    if let Some(more) = section.has_more_text() {
        println!("  {}", more.cyan().underline());
    }
}

fn print_failure(message: &str, action: Option<&str>) {
    let hint = action
        .map(|a| format!(" ({a})").dimmed().to_string())
        .unwrap_or_default();
    eprintln!(
        "{FAILURE}{}{hint}",
        display_error_message(Some(message)).red().bold()
    );
}

fn report_home_effects(effects: &mut EffectReceiver<HomeEffect>) {
    while let Ok(effect) = effects.try_recv() {
        match effect {
            HomeEffect::ShowErrorSnackbar { message, action } => {
                print_failure(&message, action.as_deref());
            }
            HomeEffect::ShowRefreshSuccess => {
                eprintln!("{SUCCESS}{}", "Feed refreshed".green());
            }
            other => debug!(?other, "ignoring home effect"),
        }
    }
}

fn report_search_effects(effects: &mut EffectReceiver<SearchEffect>) {
    while let Ok(effect) = effects.try_recv() {
        match effect {
            SearchEffect::ShowErrorSnackbar { message, action } => {
                print_failure(&message, action.as_deref());
            }
            other => debug!(?other, "ignoring search effect"),
        }
    }
}

/// Load the home feed through the state holder; returns whether it succeeded
async fn run_home(
    config: &ClientConfig,
    client: ReqwestClient,
    refresh: bool,
    json: bool,
) -> Result<bool> {
    let source = NetworkHomeDataSource::new(client, config.home_sections_url()?);
    let repository: Arc<dyn HomeRepository> = Arc::new(CachingHomeRepository::new(source));
    let (holder, mut effects) = HomeStateHolder::new(
        GetHomeSections::new(Arc::clone(&repository)),
        RefreshHomeSections::new(repository),
    );

    let bar = (!json)
        .then(|| spinner(format!("{SEARCH}Loading home feed")))
        .transpose()?;

    let mut state = holder.state();
    state
        .wait_for(|s| !s.is_loading)
        .await
        .context("Home feed stopped before loading finished")?;

    if refresh {
        if let Some(bar) = &bar {
            bar.set_message(format!("{SEARCH}Refreshing home feed"));
        }
        holder.handle_intent(HomeIntent::Refresh);
        state
            .wait_for(|s| !s.is_refreshing)
            .await
            .context("Home feed stopped before refresh finished")?;
    }

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    report_home_effects(&mut effects);

    let state = holder.current_state();
    if state.should_show_error_state() {
        return Ok(false);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&state.sections)?);
    } else if state.should_show_empty_state() {
        println!("{}", "Nothing to show yet".dimmed());
    } else {
        for section in &state.sections {
            print_section(section);
        }
        println!();
    }

    Ok(true)
}

/// Run one search through the state holder; returns whether it succeeded
async fn run_search(
    config: &ClientConfig,
    client: ReqwestClient,
    query: String,
    json: bool,
) -> Result<bool> {
    if query.trim().is_empty() {
        bail!("Search query must not be empty");
    }

    let source = NetworkSearchDataSource::new(client, config.search_url()?);
    let (holder, mut effects) = SearchStateHolder::new(
        SearchContent::new(Arc::new(LiveSearchRepository::new(source))),
        SearchOptions {
            debounce: config.search_debounce(),
            ..Default::default()
        },
    );

    let bar = (!json)
        .then(|| spinner(format!("{SEARCH}Searching for {}", query.cyan())))
        .transpose()?;

    holder.handle_intent(SearchIntent::UpdateQuery(query));
    holder
        .state()
        .wait_for(|s| s.has_searched && !s.is_loading)
        .await
        .context("Search stopped before it finished")?;

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    report_search_effects(&mut effects);

    let state = holder.current_state();
    if state.has_error() {
        return Ok(false);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&state.search_results)?);
    } else if state.should_show_empty_results() {
        println!("{}", "No results".dimmed());
    } else {
        println!(
            "\n{HEADPHONES}{} {}",
            "Results".bold().magenta(),
            format!("({})", state.search_results.len()).dimmed()
        );
        for item in &state.search_results {
            print_item(item);
        }
        println!();
    }

    Ok(true)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    let config = load_config(&args)?;

    let preferences = InMemoryLanguagePreferences::new(config.language);
    if let Some(language) = args.language {
        preferences.set_language(language);
    }
    let language = preferences.selected_language();
    debug!(%language, "content language");

    if !args.json {
        println!(
            "\n{}{} {}",
            MICROPHONE,
            "podfeed".bold().magenta(),
            format!("- {}", language.native_name()).dimmed()
        );
    }

    let client = ReqwestClient::with_settings(config.timeout(), language)
        .context("Failed to build HTTP client")?;

    let succeeded = match args.command {
        Command::Home { refresh } => run_home(&config, client, refresh, args.json).await?,
        Command::Search { query } => run_search(&config, client, query, args.json).await?,
    };

    if !succeeded {
        std::process::exit(1);
    }

    Ok(())
}
