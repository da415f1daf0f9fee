mod import;
mod output;
mod sync;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "kitbag")]
#[command(about = "Supplier feed to storefront catalog importer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the catalog from the supplier export
    Import {
        /// Local export to read (defaults to KITBAG_FEED_PATH)
        #[arg(long, conflicts_with = "url")]
        input: Option<PathBuf>,
        /// Remote export to download instead of a local file
        #[arg(long)]
        url: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Build the catalog from the backend product API
    Sync {
        /// API base URL (defaults to KITBAG_API_URL)
        #[arg(long)]
        api_url: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the built-in rule tables as YAML
    Rules,
}

/// Options shared by the catalog-producing commands.
#[derive(Debug, Clone, clap::Args)]
struct OutputArgs {
    /// Where to write the catalog (defaults to KITBAG_OUTPUT_PATH)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Artifact format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// First catalog id (defaults to KITBAG_START_ID)
    #[arg(long)]
    start_id: Option<u32>,
    /// Rule tables YAML (defaults to KITBAG_RULES_PATH, else built-in)
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Run the pipeline and log the summary without writing
    #[arg(long)]
    dry_run: bool,
}

/// Settings for one catalog-producing run, after CLI flags are applied
/// over the environment configuration.
#[derive(Debug)]
pub(crate) struct RunSettings {
    pub output_path: PathBuf,
    pub format: OutputFormat,
    pub start_id: u32,
    pub rules: kitbag_core::CatalogRules,
    pub dry_run: bool,
}

impl RunSettings {
    fn resolve(args: OutputArgs, config: &kitbag_core::AppConfig) -> anyhow::Result<Self> {
        let rules = match args.rules.or_else(|| config.rules_path.clone()) {
            Some(path) => kitbag_core::load_rules(&path)?,
            None => kitbag_core::CatalogRules::default(),
        };
        Ok(Self {
            output_path: args.output.unwrap_or_else(|| config.output_path.clone()),
            format: args.format,
            start_id: args.start_id.unwrap_or(config.start_id),
            rules,
            dry_run: args.dry_run,
        })
    }
}

impl Commands {
    /// `rules` prints built-in data and must work even with a broken env.
    fn needs_config(&self) -> bool {
        !matches!(self, Commands::Rules)
    }
}

fn render_default_rules() -> anyhow::Result<String> {
    Ok(serde_yaml::to_string(&kitbag_core::CatalogRules::default())?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("kitbag: run `kitbag --help` for commands");
        return Ok(());
    };
    if !command.needs_config() {
        print!("{}", render_default_rules()?);
        return Ok(());
    }

    let config = kitbag_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let result = match command {
        Commands::Import { input, url, output } => {
            let settings = RunSettings::resolve(output, &config)?;
            import::run_import(&config, input, url, &settings).await
        }
        Commands::Sync { api_url, output } => {
            let settings = RunSettings::resolve(output, &config)?;
            let api_url = api_url.unwrap_or_else(|| config.api_url.clone());
            sync::run_sync(&config, &api_url, &settings).await
        }
        Commands::Rules => Ok(()),
    };

    if let Err(e) = &result {
        tracing::error!(error = %format!("{e:#}"), "run failed");
    }
    result
}
