//! moviesearch - look up movie details from the OMDb API.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{API_KEY_ENV, AppConfig, resolve_config_path};
use crate::tui::run_search_form;
use crate::tui::state::{SearchPhase, SearchState, run_search};
use moviesearch_api::omdb::{MediaKind, MovieRecord, OmdbClient, PlotLength};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Open the interactive search form.
    Tui(TuiArgs),
    /// Look up a single title and print it.
    Lookup(LookupArgs),
    /// Inspect or create the config file.
    Config(ConfigCommand),
}

/// Arguments for the `tui` subcommand.
#[derive(clap::Args)]
struct TuiArgs {
    /// Pre-fill the search box (the search still needs Enter).
    #[arg(long)]
    title: Option<String>,
}

/// Result type filter accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    /// Movies only.
    Movie,
    /// TV series only.
    Series,
    /// Single episodes only.
    Episode,
}

impl From<KindArg> for MediaKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Movie => Self::Movie,
            KindArg::Series => Self::Series,
            KindArg::Episode => Self::Episode,
        }
    }
}

/// Arguments for the `lookup` subcommand.
#[derive(clap::Args)]
struct LookupArgs {
    /// Title to look up (e.g. "Inception").
    #[arg(long, required = true)]
    title: String,
    /// Filter by release year.
    #[arg(long)]
    year: Option<u32>,
    /// Filter by result type.
    #[arg(long = "type", value_enum)]
    kind: Option<KindArg>,
    /// Request the full plot.
    #[arg(long)]
    full_plot: bool,
    /// Print the record as JSON on stdout.
    #[arg(long)]
    json: bool,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the config file path.
    Path,
    /// Print the effective configuration.
    Show,
    /// Write a default config file.
    Init,
}

/// Loads the config file for the given `--dir` override.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    AppConfig::load(&path)
}

/// Builds an `OmdbClient` from config and the `OMDB_API_KEY` environment variable.
///
/// A missing key is not an error: the service reports it on the first lookup.
///
/// # Errors
///
/// Returns an error if the configured base URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_omdb_client(config: &AppConfig) -> Result<OmdbClient> {
    let api_key = config
        .omdb
        .resolve_api_key(std::env::var(API_KEY_ENV).ok())
        .unwrap_or_else(|| {
            tracing::warn!("{API_KEY_ENV} is not set; OMDb will reject requests");
            String::new()
        });

    let mut builder = OmdbClient::builder()
        .api_key(api_key)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .timeout(config.omdb.timeout());
    if let Some(url) = config.omdb.parsed_base_url()? {
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build OMDb client")
}

/// Plot length selected by config or flag.
const fn plot_length(full: bool) -> PlotLength {
    if full { PlotLength::Full } else { PlotLength::Short }
}

/// Runs the `tui` subcommand.
///
/// # Errors
///
/// Returns an error if the config or client cannot be loaded, or the terminal fails.
#[instrument(skip_all)]
async fn run_tui(args: &TuiArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_omdb_client(&config)?;

    let mut state = SearchState::new().with_plot(plot_length(config.omdb.full_plot));
    if let Some(title) = &args.title {
        state.set_query(title.clone());
    }

    run_search_form(Arc::new(client), state).await
}

/// Runs the `lookup` subcommand.
///
/// Goes through the same state machine as the search form, so the error
/// text matches what the form would show.
///
/// # Errors
///
/// Returns an error carrying the user-facing message if the search fails.
#[instrument(skip_all)]
async fn run_lookup(args: &LookupArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;

    let client = build_omdb_client(&config)?;

    let mut state = SearchState::new()
        .with_plot(plot_length(args.full_plot || config.omdb.full_plot))
        .with_year(args.year)
        .with_kind(args.kind.map(MediaKind::from));
    state.set_query(args.title.clone());

    run_search(&client, &mut state).await;

    match state.phase() {
        SearchPhase::Success(record) if args.json => print_json(record),
        SearchPhase::Success(record) => {
            log_record(record);
            Ok(())
        }
        SearchPhase::Failure(message) => bail!("{message}"),
        SearchPhase::Idle | SearchPhase::Loading => bail!("search did not complete"),
    }
}

/// Logs a record in the same layout as the form's result panel.
fn log_record(record: &MovieRecord) {
    tracing::info!("Title: {}", record.title);
    tracing::info!("Year: {}", record.year);
    tracing::info!("Rating: {}", record.imdb_rating);
    tracing::info!("Genre: {}", record.genre);
    tracing::info!("Director: {}", record.director);
    tracing::info!("Actors: {}", record.actors);
    tracing::info!("Runtime: {}", record.runtime);
    tracing::info!("Released: {}", record.released);
    tracing::info!("Poster: {}", record.poster_url().unwrap_or("-"));
    tracing::info!("Plot: {}", record.plot_text().unwrap_or("-"));
}

/// Writes a record as pretty JSON to stdout.
fn print_json(record: &MovieRecord) -> Result<()> {
    let json = serde_json::to_string_pretty(record).context("failed to serialize record")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("failed to write to stdout")
}

/// Runs the `config` subcommands.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file cannot be read or written.
fn run_config(command: &ConfigSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    let mut stdout = std::io::stdout().lock();
    match command {
        ConfigSubcommands::Path => {
            writeln!(stdout, "{}", path.display()).context("failed to write to stdout")
        }
        ConfigSubcommands::Show => {
            let mut config = AppConfig::load(&path)?;
            if config.omdb.api_key.is_some() {
                config.omdb.api_key = Some(String::from("********"));
            }
            let content =
                toml::to_string_pretty(&config).context("failed to serialize config to TOML")?;
            write!(stdout, "{content}").context("failed to write to stdout")
        }
        ConfigSubcommands::Init => {
            if path.exists() {
                bail!("config file already exists: {}", path.display());
            }
            AppConfig::default().save(&path)?;
            tracing::info!("Wrote default config to {}", path.display());
            Ok(())
        }
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Tui(args) => run_tui(&args, cli.dir.as_ref()).await,
        Commands::Lookup(args) => run_lookup(&args, cli.dir.as_ref()).await,
        Commands::Config(cfg) => run_config(&cfg.command, cli.dir.as_ref()),
    }
}
