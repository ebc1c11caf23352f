use anyhow::Result;
use clap::{Parser, Subcommand};
use signup::{Config, cli};

/// signup - Weekly sign-up schedule
#[derive(Parser)]
#[command(name = "signup")]
#[command(about = "Weekly sign-up schedule for students and volunteers", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Manage schedule days
    Day {
        #[command(subcommand)]
        command: DayCommands,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
}

#[derive(Subcommand)]
enum DayCommands {
    /// Create the schedule day of a date, or print the existing one
    Create {
        /// Day in YYYY-MM-DD form
        date: String,

        /// Author id (overrides config file)
        #[arg(long)]
        author: Option<String>,
    },
    /// Set the sign-up limits of a day
    Limits {
        date: String,

        #[arg(long)]
        students: Option<u32>,

        #[arg(long)]
        volunteers: Option<u32>,
    },
    /// Attach a category to a day
    Tag { date: String, category_id: String },
    /// Align a schedule day's title and slug with its date
    Normalize { id: String },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Add a category and print its id
    Add {
        name: String,

        /// Parent category id
        #[arg(long)]
        parent: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let config = Config::load(args.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    signup::observability::init_observability(
        "signup",
        env!("CARGO_PKG_VERSION"),
        &config.logging,
    )?;

    match args.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Migrate => migrate(config).await,
        Commands::Day { command } => match command {
            DayCommands::Create { date, author } => {
                let id = cli::day::create(&config, &date, author).await?;
                println!("{id}");
                Ok(())
            }
            DayCommands::Limits {
                date,
                students,
                volunteers,
            } => cli::day::limits(&config, &date, students, volunteers).await,
            DayCommands::Tag { date, category_id } => {
                cli::day::tag(&config, &date, &category_id).await
            }
            DayCommands::Normalize { id } => {
                let changed = cli::day::normalize(&config, &id).await?;
                println!("{}", if changed { "normalized" } else { "unchanged" });
                Ok(())
            }
        },
        Commands::Category { command } => match command {
            CategoryCommands::Add { name, parent } => {
                let id = cli::category::add(&config, &name, parent.as_deref()).await?;
                println!("{id}");
                Ok(())
            }
        },
    }
}

#[tracing::instrument(skip(config))]
async fn migrate(config: Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    let pool = signup::create_pool(&config.database.url, 1).await?;
    signup::db::migrate(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations completed successfully");

    Ok(())
}
