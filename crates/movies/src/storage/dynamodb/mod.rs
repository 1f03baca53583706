//! DynamoDB storage backend using `aws-sdk-dynamodb`.

mod client;
mod conversions;
mod error;
mod store;

pub use client::build_client;
pub use store::DynamoDbStore;
