mod access_keys;
mod aws_err;
mod client;

pub use access_keys::{ADMIN_USER_NAME, AccessKey, AccessKeyProvider};
pub use aws_err::AwsError;
pub use client::{AwsClient, AwsClientBuilder, DEFAULT_REGION};
