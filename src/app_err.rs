use crate::aws::AwsError;
use crate::config::ConfigError;
use crate::ocm::OcmError;

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to create OCM connection: {0}")]
    Connection(#[source] OcmError),

    #[error("Failed to create AWS client: {0}")]
    AwsClient(#[source] AwsError),

    #[error("Failed to get access keys for user '{user}': {source}")]
    AccessKeys { user: String, source: AwsError },

    #[error("Failed to fetch regions: {0}")]
    FetchRegions(#[source] OcmError),

    #[error("There are no regions available for this AWS account")]
    NoRegions,

    #[error("Failed to close OCM connection: {0}")]
    CloseConnection(#[source] OcmError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl ApplicationError {
    /// Warnings still fail the command but are reported at a lower level.
    pub fn is_warning(&self) -> bool {
        matches!(self, ApplicationError::NoRegions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_includes_cause() {
        let err = ApplicationError::FetchRegions(OcmError::Api {
            status: 400,
            reason: "Invalid AWS credentials".to_string(),
        });

        let message = err.to_string();
        assert!(message.starts_with("Failed to fetch regions:"));
        assert!(message.contains("Invalid AWS credentials"));
    }

    #[test]
    fn access_key_error_names_user() {
        let err = ApplicationError::AccessKeys {
            user: "osdCcsAdmin".to_string(),
            source: AwsError::Service("AccessDenied".to_string()),
        };

        assert_eq!(
            err.to_string(),
            "Failed to get access keys for user 'osdCcsAdmin': AccessDenied"
        );
    }

    #[test]
    fn only_empty_result_is_a_warning() {
        assert!(ApplicationError::NoRegions.is_warning());
        assert!(!ApplicationError::Connection(OcmError::NotLoggedIn).is_warning());
    }
}
