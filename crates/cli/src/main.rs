use crate::{error::CliError, statement::StatementFile};
use clap::Parser;
use commands::Commands;
use query_builder::{error::QueryError, renderer::ParamStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;
mod statement;

#[derive(Parser)]
#[command(name = "mergeql", version = "0.1.0", about = "SQL MERGE statement builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            config,
            params,
            output,
        } => {
            let statement = StatementFile::load(&config)?;
            let mut render_config = statement.settings;
            if params {
                render_config.param_style = ParamStyle::Placeholder;
            }

            let (sql, values) = statement.into_builder()?.render_with(render_config)?;

            match output {
                Some(path) => {
                    output::write_rendered(&sql, &values, path.clone())?;
                    info!("Wrote MERGE statement to {}", path);
                }
                None => output::print_rendered(&sql, &values)?,
            }
        }
        Commands::Validate { config } => {
            info!("Validating statement file: {}", config);

            let merge = StatementFile::load(&config)?
                .into_builder()?
                .build()
                .map_err(QueryError::from)?;
            info!(
                "Statement is valid: MERGE into {} using {} with {} WHEN clause(s)",
                merge.target,
                merge.source,
                merge.when_clauses.len()
            );
        }
        Commands::Ast { config } => {
            let merge = StatementFile::load(&config)?
                .into_builder()?
                .build()
                .map_err(QueryError::from)?;
            let ast_json = serde_json::to_string_pretty(&merge).map_err(CliError::JsonSerialize)?;
            println!("{ast_json}");
        }
    }

    Ok(())
}
