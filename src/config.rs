use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AwsConfig {
    pub region: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    /// Custom endpoint for S3-compatible stores (MinIO); None for real AWS.
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub aws: AwsConfig,
    pub google_api_key: String,
    pub assets_dir: PathBuf,
    pub signed_url_ttl_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let aws = AwsConfig {
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".into()),
            bucket: std::env::var("AWS_BUCKET_NAME")?,
            access_key: std::env::var("AWS_ACCESS_KEY_ID")?,
            secret_key: std::env::var("AWS_SECRET_ACCESS_KEY")?,
            endpoint: std::env::var("AWS_ENDPOINT_URL").ok(),
        };
        let google_api_key = std::env::var("GOOGLE_API_KEY").or_else(|_| {
            // GOOGLE_API_KEYS is a comma-separated pool; take the first entry.
            std::env::var("GOOGLE_API_KEYS")
                .map(|keys| keys.split(',').next().unwrap_or_default().trim().to_string())
        })?;
        let assets_dir = std::env::var("ASSETS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("assets"));
        let signed_url_ttl_secs = std::env::var("SIGNED_URL_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(3600);
        Ok(Self {
            database_url,
            aws,
            google_api_key,
            assets_dir,
            signed_url_ttl_secs,
        })
    }
}
