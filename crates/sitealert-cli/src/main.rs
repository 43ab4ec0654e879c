mod commands;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sitealert")]
#[command(about = "Look up Service Now site records and mail them as alerts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the canonical site code and Service Now filter for a site code
    Query {
        /// Raw site code, e.g. bpuk12924-FGT_DSL_Remote
        site_code: String,
    },
    /// Fetch and print the Service Now records for a site code
    Fetch {
        /// Raw site code
        site_code: String,
        #[command(flatten)]
        page: PageArgs,
        /// Print records as JSON instead of a text table
        #[arg(long)]
        json: bool,
    },
    /// Fetch the records for a site code and e-mail them
    Alert {
        /// Raw site code
        site_code: String,
        /// Recipient address (repeatable)
        #[arg(long = "to", required = true)]
        to: Vec<String>,
        /// Message subject
        #[arg(long, default_value = "Alert")]
        subject: String,
        #[command(flatten)]
        page: PageArgs,
        /// Print the plain-text body instead of sending
        #[arg(long)]
        dry_run: bool,
    },
}

/// Paging controls shared by commands that hit the table API.
#[derive(Debug, Args, PartialEq, Eq)]
struct PageArgs {
    /// First row to fetch
    #[arg(long, default_value = "0")]
    offset: u32,
    /// Rows per page (defaults to SNOW_PAGE_LIMIT)
    #[arg(long)]
    limit: Option<u32>,
    /// Follow X-Total-Count across pages (overrides SNOW_PAGINATE=false)
    #[arg(long)]
    paginate: bool,
}

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Query { site_code } = &cli.command {
        init_tracing("warn")?;
        commands::run_query(site_code);
        return Ok(());
    }

    let config = sitealert_core::load_app_config()?;
    init_tracing(&config.log_level)?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Query { .. } => {}
        Commands::Fetch {
            site_code,
            page,
            json,
        } => commands::run_fetch(&config, &site_code, &page, json).await?,
        Commands::Alert {
            site_code,
            to,
            subject,
            page,
            dry_run,
        } => {
            let request = commands::AlertRequest {
                site_code,
                to,
                subject,
            };
            commands::run_alert(&config, &request, &page, dry_run).await?;
        }
    }

    Ok(())
}
