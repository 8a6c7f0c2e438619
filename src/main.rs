//! Folio CLI - create, inspect and serve a portfolio site

use clap::{Parser, Subcommand};
use folio::config::{self, FolioConfig, Overrides, Settings, ADMIN_TOKEN_ENV, DEFAULT_PORT};
use folio::repository::DEFAULT_DOCUMENT;
use folio::ui::{self, Icons, SectionTable};
use folio::{Error, ListItem, ListName, Portfolio, PortfolioRecord, SqliteStore};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Personal portfolio site with a gated admin dashboard")]
#[command(long_about = r#"
Folio serves a single-page portfolio (profile, experience, projects, skills)
rendered from one JSON document, plus an admin dashboard to edit it.

Example usage:
  folio init --from portfolio.json
  FOLIO_ADMIN_TOKEN=secret folio serve --port 8080
  folio export --output backup.json
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the portfolio record (and a default config file if missing)
    Init {
        /// Seed the record from a JSON file
        #[arg(long)]
        from: Option<PathBuf>,

        /// Overwrite an existing record
        #[arg(long)]
        force: bool,
    },

    /// Run the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Print the stored portfolio
    Show,

    /// Write the record as pretty JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Overwrite the record from a JSON file
    Import {
        /// JSON file holding a full portfolio record
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);

    match cli.command {
        Commands::Init { from, force } => {
            if !config_path.exists() {
                let defaults = FolioConfig {
                    database: Some(config::default_database_path_in(Path::new(".")).display().to_string()),
                    document: Some(DEFAULT_DOCUMENT.to_string()),
                    port: Some(DEFAULT_PORT),
                    ..FolioConfig::default()
                };
                config::write_config(&config_path, &defaults, false)?;
                ui::status(Icons::FILE, "Config", &config_path.display().to_string());
            }

            let settings = resolve(&config_path, cli.database, Overrides::default())?;
            if settings.database.starts_with(".folio") || settings.database.starts_with("./.folio") {
                config::ensure_gitignore(Path::new("."))?;
            }
            let portfolio = open_portfolio(&settings)?;

            let record = match from {
                Some(path) => read_record(&path)?,
                None => PortfolioRecord::default(),
            };
            if force {
                portfolio.replace_record(&record)?;
            } else {
                match portfolio.create_record(&record) {
                    Err(Error::DocumentExists(path)) => {
                        anyhow::bail!("a portfolio already exists at {} (use --force to overwrite)", path)
                    }
                    other => other?,
                }
            }

            ui::success(&format!("Portfolio ready at {}", settings.document));
            ui::status(Icons::DATABASE, "Database", &settings.database.display().to_string());
            if settings.admin_token.is_none() {
                ui::warn(&format!(
                    "No admin token set; export {} or add admin_token to {} to enable the dashboard",
                    ADMIN_TOKEN_ENV,
                    config_path.display()
                ));
            }
        }

        Commands::Serve { port, bind } => {
            let overrides = Overrides {
                database: None,
                bind,
                port,
            };
            let settings = resolve(&config_path, cli.database, overrides)?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(folio::server::start_server(settings))?;
        }

        Commands::Show => {
            let settings = resolve(&config_path, cli.database, Overrides::default())?;
            let portfolio = open_portfolio(&settings)?;
            let Some(record) = portfolio.fetch_record()? else {
                ui::warn(&format!(
                    "No portfolio at {}; run `folio init` first",
                    settings.document
                ));
                return Ok(());
            };
            show_record(&portfolio, &settings, &record)?;
        }

        Commands::Export { output } => {
            let settings = resolve(&config_path, cli.database, Overrides::default())?;
            let portfolio = open_portfolio(&settings)?;
            let record = portfolio
                .fetch_record()?
                .ok_or_else(|| Error::DocumentNotFound(settings.document.clone()))?;
            let json = serde_json::to_string_pretty(&record)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, json + "\n")?;
                    ui::success(&format!("Exported portfolio to {}", path.display()));
                }
                None => println!("{}", json),
            }
        }

        Commands::Import { file } => {
            let settings = resolve(&config_path, cli.database, Overrides::default())?;
            let portfolio = open_portfolio(&settings)?;
            let record = read_record(&file)?;
            portfolio.replace_record(&record)?;
            ui::success(&format!(
                "Imported {} into {}",
                file.display(),
                settings.document
            ));
        }
    }

    Ok(())
}

fn resolve(config_path: &Path, database: Option<PathBuf>, overrides: Overrides) -> anyhow::Result<Settings> {
    let config = config::load_config(Some(config_path))?;
    let overrides = Overrides {
        database: database.or(overrides.database),
        ..overrides
    };
    Settings::resolve(config, overrides, std::env::var(ADMIN_TOKEN_ENV).ok())
}

fn open_portfolio(settings: &Settings) -> anyhow::Result<Portfolio> {
    config::ensure_db_dir(&settings.database)?;
    let store = SqliteStore::open(&settings.database)?;
    Ok(Portfolio::new(store, settings.document.clone()))
}

fn read_record(path: &Path) -> anyhow::Result<PortfolioRecord> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
    let record = serde_json::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("{} is not a valid portfolio: {}", path.display(), e))?;
    Ok(record)
}

fn show_record(portfolio: &Portfolio, settings: &Settings, record: &PortfolioRecord) -> anyhow::Result<()> {
    let hero = &record.hero;
    ui::header(&format!("Portfolio · {}", settings.document));
    ui::status(Icons::PERSON, "Name", or_dash(&hero.name));
    ui::status(Icons::INFO, "Title", or_dash(&hero.title));
    ui::status(Icons::MAIL, "Email", or_dash(&hero.email));

    let mut table = SectionTable::new();
    for list in ListName::all() {
        let labels = match list {
            ListName::Experiences => labels(&record.experiences),
            ListName::Projects => labels(&record.projects),
            ListName::Skills => labels(&record.skills),
        };
        table.add_row(list.title(), &labels);
    }
    ui::section(" Sections ");
    println!("{}", table.build());

    let stats = portfolio.store().stats()?;
    ui::section(" Storage ");
    ui::summary_row("Database:", &settings.database.display().to_string());
    ui::summary_row("Documents:", &stats.documents.to_string());
    ui::summary_row("Size:", &ui::human_bytes(stats.bytes));
    if let Some(updated) = portfolio
        .store()
        .updated_at(portfolio.document())?
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
    {
        ui::summary_row("Updated:", &updated.format("%Y-%m-%d %H:%M UTC").to_string());
    }
    match &settings.admin_token {
        Some(_) => ui::summary_row("Admin:", "enabled"),
        None => ui::summary_row("Admin:", &ui::muted("disabled")),
    }
    Ok(())
}

fn labels<T: ListItem>(items: &[T]) -> Vec<String> {
    items.iter().map(ListItem::label).collect()
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}
