use std::time::Duration;

use mongodb::{bson::doc, Client, Database};

use crate::config::Settings;

/// Connects and pings the server, retrying a few times before giving up.
pub async fn connect_with_retry(settings: &Settings) -> Result<Database, String> {
    let attempts = settings.db_connect_retries.max(1);
    let mut last_err = String::new();

    for attempt in 1..=attempts {
        tracing::info!("MongoDB connection attempt {attempt} of {attempts}");

        match try_connect(settings).await {
            Ok(db) => {
                tracing::info!("connected to MongoDB database {}", settings.mongodb_db);
                return Ok(db);
            }
            Err(e) => {
                tracing::warn!("MongoDB connection attempt {attempt} failed: {e}");
                last_err = e;
                if attempt < attempts {
                    tokio::time::sleep(Duration::from_secs(2 * attempt as u64)).await;
                }
            }
        }
    }

    Err(format!("could not connect to MongoDB after {attempts} attempts: {last_err}"))
}

async fn try_connect(settings: &Settings) -> Result<Database, String> {
    // tolerate quoted URIs copied into .env
    let uri = settings.mongodb_uri.trim_matches(|c| c == '"' || c == '\'');

    let client = Client::with_uri_str(uri).await.map_err(|e| e.to_string())?;
    let db = client.database(&settings.mongodb_db);

    db.run_command(doc! { "ping": 1 }, None)
        .await
        .map_err(|e| e.to_string())?;

    Ok(db)
}
