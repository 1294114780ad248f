mod auth;
mod dlq;
mod domain;
mod engine;
mod ingestion;
mod persistence;
mod store;

use std::{env, fs::File, path::Path};

use tracing::info;

use crate::dlq::StdErrDlq;
use crate::engine::Engine;
use crate::store::AccountStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args();
    let script_path = args.nth(1).expect("No command script was provided");
    let accounts_path = args.next();

    let store = match &accounts_path {
        Some(path) if Path::new(path).exists() => {
            let accounts = persistence::load_accounts(Path::new(path))?;
            info!(count = accounts.len(), "accounts loaded");
            AccountStore::from_accounts(accounts)
        }
        _ => AccountStore::from_accounts(persistence::sample_accounts()),
    };

    let script = File::open(Path::new(&script_path))?;
    let ingestion = ingestion::CsvReader::new(script)?;

    let mut engine = Engine::new(ingestion, store, StdErrDlq::default());
    engine.process().await?;
    engine.flush()?;

    if let Some(path) = accounts_path {
        persistence::save_accounts(Path::new(&path), engine.store())?;
    }

    Ok(())
}
