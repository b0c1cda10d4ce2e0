use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStream;

/// Errors surfaced by an object store
///
/// Credential failures are kept apart from everything else; neither class is
/// fatal to a crawl.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("credentials error: {0}")]
    Credentials(String),

    #[error("{0}")]
    Other(String),
}

/// Upserts text objects under a key
#[async_trait]
pub trait ObjectStore {
    /// Write `body` at `key`, overwriting any existing object
    async fn put_text(&self, key: &str, body: String) -> Result<(), StoreError>;
}

/// Object store backed by an S3 bucket
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Resolve shared AWS configuration and build a client for the bucket
    ///
    /// Uses the named credentials profile when one is given, the default
    /// provider chain otherwise.
    pub async fn connect(bucket: &str, profile: Option<&str>) -> Self {
        let region = RegionProviderChain::default_provider().or_else("us-east-1");
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        let shared_config = loader.load().await;

        Self {
            client: Client::new(&shared_config),
            bucket: bucket.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_text(&self, key: &str, body: String) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("text/plain; charset=utf-8")
            .body(ByteStream::from(body.into_bytes()))
            .send()
            .await
            .map(|_| ())
            .map_err(classify_put_error)
    }
}

fn classify_put_error(err: SdkError<PutObjectError>) -> StoreError {
    match &err {
        // The request never left the SDK, typically because no credentials
        // were resolvable for the selected profile
        SdkError::ConstructionFailure(_) => StoreError::Credentials(err.to_string()),
        SdkError::ServiceError(service_err) => {
            let status = service_err.raw().status();
            if status.as_u16() == 401 || status.as_u16() == 403 {
                StoreError::Credentials(err.to_string())
            } else {
                StoreError::Other(err.to_string())
            }
        }
        _ => StoreError::Other(err.to_string()),
    }
}
