use serde::Serialize;

use crate::users::dto::PublicUser;

use super::service::PhotoOutcome;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponse {
    pub success: bool,
    pub has_existing_photo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    pub user: PublicUser,
    /// Signed URL, or null when signing failed (photo unavailable).
    pub image: Option<String>,
}

impl From<PhotoOutcome> for PhotoResponse {
    fn from(outcome: PhotoOutcome) -> Self {
        match outcome {
            PhotoOutcome::Existing { user, url } => Self {
                success: true,
                has_existing_photo: true,
                generated: None,
                image_path: None,
                user: PublicUser::from(&user),
                image: url,
            },
            PhotoOutcome::Generated { user, key, url } => Self {
                success: true,
                has_existing_photo: false,
                generated: Some(true),
                image_path: Some(key),
                user: PublicUser::from(&user),
                image: url,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckPhotoResponse {
    pub success: bool,
    pub user: PublicUser,
    pub has_photo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repo::User;

    fn user(image: Option<&str>) -> User {
        User {
            id: "1019762841".into(),
            name: "Laura Ruiz".into(),
            gender: "female".into(),
            career: "Matemáticas".into(),
            image: image.map(String::from),
            created_at: time::OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn test_generated_response_shape() {
        let outcome = PhotoOutcome::Generated {
            user: user(Some("Laura_Ruiz_graduado_1.png")),
            key: "Laura_Ruiz_graduado_1.png".into(),
            url: Some("https://bucket.s3/x?sig=1".into()),
        };
        let json = serde_json::to_value(PhotoResponse::from(outcome)).unwrap();
        assert_eq!(json["hasExistingPhoto"], false);
        assert_eq!(json["generated"], true);
        assert_eq!(json["imagePath"], "Laura_Ruiz_graduado_1.png");
        assert_eq!(json["image"], "https://bucket.s3/x?sig=1");
    }

    #[test]
    fn test_existing_response_omits_generated() {
        let outcome = PhotoOutcome::Existing {
            user: user(Some("k.png")),
            url: None,
        };
        let json = serde_json::to_value(PhotoResponse::from(outcome)).unwrap();
        assert_eq!(json["hasExistingPhoto"], true);
        assert!(json.get("generated").is_none());
        // Signing failure renders as explicit null, not an omitted field.
        assert!(json["image"].is_null());
    }
}
