mod recommend;
mod recompute;

use clap::{Parser, Subcommand};
use dotenv::dotenv;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recompute the similarity matrix from the raw collections and
    /// persist it as a new version
    Recompute {},
    /// Top jobs for a candidate, from the latest similarity version
    Jobs {
        candidate_id: String,
        #[clap(long, default_value_t = 10)]
        top_n: usize,
    },
    /// Top candidates for a job, from the latest similarity version
    Candidates {
        job_id: String,
        #[clap(long, default_value_t = 10)]
        top_n: usize,
    },
    /// List the creation timestamps of all persisted similarity versions
    Versions {},
}

async fn database() -> mongodb::Database {
    let mongodb_connection_url =
        std::env::var("MONGODB_CONNECTION_URL").expect("MONGODB_CONNECTION_URL not set");
    let database_name = std::env::var("DATABASE").expect("DATABASE not set");
    persistence::connect(&mongodb_connection_url, &database_name)
        .await
        .expect("Failed to connect to mongodb")
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let args = Cli::parse();
    let db = database().await;
    log::info!("Connected to database");

    let result = match args.command {
        Commands::Recompute {} => recompute::run(db).await,
        Commands::Jobs {
            candidate_id,
            top_n,
        } => recommend::jobs(db, &candidate_id, top_n).await,
        Commands::Candidates { job_id, top_n } => {
            recommend::candidates(db, &job_id, top_n).await
        }
        Commands::Versions {} => recommend::versions(db).await,
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
