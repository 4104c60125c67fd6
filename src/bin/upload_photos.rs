//! One-shot bulk upload: every file in a local photo directory whose stem is
//! a user id gets pushed to S3 and recorded on the user row. Runs outside the
//! request path; a fixed sleep between objects is the only throttle.

use std::path::PathBuf;
use std::time::Duration;

use bytes::Bytes;
use tracing::{info, warn};

use gradbooth::{
    config::AppConfig,
    storage::{Storage, StorageClient},
    users::repo,
};

const THROTTLE: Duration = Duration::from_secs(1);

fn content_type_for(path: &std::path::Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "upload_photos=info".to_string()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let db = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let storage = Storage::new(&config.aws).await?;

    let photos_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("local_photos"));
    anyhow::ensure!(
        photos_dir.is_dir(),
        "photo directory not found: {}",
        photos_dir.display()
    );

    let mut uploaded = 0usize;
    for entry in std::fs::read_dir(&photos_dir)? {
        let path = entry?.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if file_name.starts_with('.') || !path.is_file() {
            continue;
        }
        let Some(user_id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        info!(file = file_name, user_id, "processing");

        let Some(_user) = repo::find_by_id(&db, user_id).await? else {
            warn!(user_id, "user not found, skipping");
            continue;
        };

        let body = Bytes::from(std::fs::read(&path)?);
        let content_type = content_type_for(&path);
        // Keep the original file name as the object key.
        storage.put_object(file_name, body, content_type).await?;
        repo::update_image(&db, user_id, file_name).await?;
        uploaded += 1;
        info!(user_id, key = file_name, "uploaded and linked");

        tokio::time::sleep(THROTTLE).await;
    }

    info!(uploaded, "done");
    Ok(())
}
