use aws_sdk_iam::error::{DisplayErrorContext, SdkError};
use std::error::Error as StdError;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum AwsError {
    /// IAM rejected or failed a call; carries the service message.
    #[error("{0}")]
    Service(String),

    #[error("no usable AWS credentials: {0}")]
    Credentials(String),

    #[error("{operation} response is missing '{field}'")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },
}

// SdkError's own Display only names the error kind
impl<E, R> From<SdkError<E, R>> for AwsError
where
    E: StdError + 'static,
    R: fmt::Debug,
{
    fn from(err: SdkError<E, R>) -> Self {
        AwsError::Service(DisplayErrorContext(&err).to_string())
    }
}
