//! One-shot bulk generation: for every local photo whose stem is a user id,
//! run the generation gateway and upload the result. Unlike the serving path
//! this deliberately overwrites any existing `image` key (batch regeneration
//! is the only sanctioned overwrite). A fixed sleep between users is the only
//! rate-limit handling; the gateway itself never retries.

use std::path::PathBuf;
use std::time::Duration;

use bytes::Bytes;
use tracing::{error, info, warn};

use gradbooth::{
    config::AppConfig,
    generation::{GeminiGenerator, ImageGenerator, ReferenceAssets, Style},
    photos::service::photo_key,
    storage::{Storage, StorageClient},
    users::repo,
};

const THROTTLE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "generate_photos=info".to_string()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let db = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let storage = Storage::new(&config.aws).await?;

    let style = match std::env::var("GENERATION_STYLE").as_deref() {
        Ok("full") => Style::Full,
        _ => Style::FlashEdit,
    };
    let assets = ReferenceAssets::load(&config.assets_dir)?;
    let generator = GeminiGenerator::new(config.google_api_key.clone(), style, assets);

    let photos_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("local_photos"));
    anyhow::ensure!(
        photos_dir.is_dir(),
        "photo directory not found: {}",
        photos_dir.display()
    );

    let mut generated = 0usize;
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

        let Some(user) = repo::find_by_id(&db, user_id).await? else {
            warn!(user_id, "user not found, skipping");
            continue;
        };
        info!(name = %user.name, gender = %user.gender, career = %user.career, "user found");

        let photo = Bytes::from(std::fs::read(&path)?);
        let image = match generator
            .generate(photo, &user.gender, &user.name, &user.career)
            .await
        {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(user_id, error = %e, "generation failed, skipping");
                tokio::time::sleep(THROTTLE).await;
                continue;
            }
        };

        let key = photo_key(&user.name);
        storage.put_object(&key, image, "image/png").await?;
        repo::update_image(&db, user_id, &key).await?;
        generated += 1;
        info!(user_id, key, "generated and linked");

        tokio::time::sleep(THROTTLE).await;
    }

    info!(generated, "done");
    Ok(())
}
