use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::{config::Credentials, Client};

use crate::config::StoreConfig;

/// Build a DynamoDB client from configuration.
///
/// Static credentials are used when both keys are set; otherwise the SDK's
/// default provider chain applies. Nothing is sent to the store here.
pub async fn build_client(config: &StoreConfig) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .endpoint_url(&config.endpoint_url);

    if let (Some(access_key_id), Some(secret_access_key)) =
        (&config.access_key_id, &config.secret_access_key)
    {
        loader = loader.credentials_provider(Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "environment",
        ));
    }

    let sdk_config = loader.load().await;
    Client::new(&sdk_config)
}
