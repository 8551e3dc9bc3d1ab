use super::StorageService;
use crate::models::StorageConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::{config::Region, Client as S3Client};

pub struct R2Client {
    client: S3Client,
    bucket: String,
    public_url: String,
}

impl R2Client {
    pub async fn new(config: &StorageConfig) -> Self {
        let credentials = aws_sdk_s3::config::Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "cloudflare-r2",
        );

        // R2 accepts "auto" in place of a real region
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new("auto"))
            .endpoint_url(&config.endpoint)
            .load()
            .await;

        Self {
            client: S3Client::new(&sdk_config),
            bucket: config.bucket.clone(),
            public_url: config.public_url.clone(),
        }
    }

    fn get_public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_url, key)
    }
}

#[async_trait]
impl StorageService for R2Client {
    async fn upload_file(&self, key: &str, data: &[u8], content_type: &str) -> Result<String> {
        let body = ByteStream::from(data.to_vec());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| Error::S3(format!("Failed to upload {}: {}", key, e)))?;

        Ok(self.get_public_url(key))
    }
}
