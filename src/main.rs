mod common;
mod errors;

mod database;
mod services;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sea_orm_migration::MigratorTrait;
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::database::connection::{establish_connection, get_database_url};
use crate::database::migrations::Migrator;
use crate::services::DatasetClassService;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
    Classes {
        #[clap(subcommand)]
        command: ClassCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    Init {
        #[clap(short, long, default_value = "annokit.db")]
        database: String,
    },
    Migrate {
        #[clap(subcommand)]
        direction: MigrateDirection,
        #[clap(short, long, default_value = "annokit.db")]
        database: String,
    },
}

#[derive(Subcommand, Debug)]
enum MigrateDirection {
    Up,
    Down,
}

#[derive(Subcommand, Debug)]
enum ClassCommands {
    /// List every live class of a dataset
    List {
        #[clap(long)]
        dataset_id: i32,
        #[clap(short, long, default_value = "annokit.db")]
        database: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Db { command } => match command {
            DbCommands::Init { database } => {
                info!("Initializing database: {}", database);
                migrate_database(&database, MigrateDirection::Up).await?;
            }
            DbCommands::Migrate {
                direction,
                database,
            } => {
                info!("Running database migration: {:?}", direction);
                migrate_database(&database, direction).await?;
            }
        },
        Commands::Classes { command } => match command {
            ClassCommands::List {
                dataset_id,
                database,
            } => {
                let db = establish_connection(&get_database_url(Some(&database))).await?;
                let service = DatasetClassService::new(db);
                let classes = service.find_all(dataset_id).await?;
                for class in &classes {
                    println!(
                        "{}\t{}\t{}\t{}",
                        class.id, class.name, class.tool_type, class.created_at
                    );
                }
                info!("{} classes in dataset {}", classes.len(), dataset_id);
            }
        },
    }

    Ok(())
}

async fn migrate_database(database: &str, direction: MigrateDirection) -> Result<()> {
    let db = establish_connection(&get_database_url(Some(database))).await?;
    match direction {
        MigrateDirection::Up => Migrator::up(&db, None).await?,
        MigrateDirection::Down => Migrator::down(&db, None).await?,
    }
    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("sqlx=warn,{}", log_level)))
        .init();
}
