use std::fmt;

use tracing::debug;

use super::{AwsClient, AwsError};

/// IAM user that owns the credentials handed to OCM.
pub const ADMIN_USER_NAME: &str = "osdCcsAdmin";

#[derive(Clone, PartialEq, Eq)]
pub struct AccessKey {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessKey")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .finish()
    }
}

/// Source of the access keys sent to OCM as customer cloud credentials.
#[allow(async_fn_in_trait)]
pub trait AccessKeyProvider {
    fn admin_user_name(&self) -> &str {
        ADMIN_USER_NAME
    }

    async fn get_aws_access_keys(&self) -> Result<AccessKey, AwsError>;
}

impl AccessKeyProvider for AwsClient {
    /// Replaces every access key of the admin user with a freshly created one.
    ///
    /// IAM caps a user at two keys, so the old ones have to go first.
    async fn get_aws_access_keys(&self) -> Result<AccessKey, AwsError> {
        let existing = self
            .iam
            .list_access_keys()
            .user_name(ADMIN_USER_NAME)
            .send()
            .await?;

        for key_id in existing
            .access_key_metadata
            .into_iter()
            .filter_map(|metadata| metadata.access_key_id)
        {
            self.iam
                .delete_access_key()
                .user_name(ADMIN_USER_NAME)
                .access_key_id(&key_id)
                .send()
                .await?;
            debug!(access_key_id = %key_id, "Deleted access key");
        }

        let created = self
            .iam
            .create_access_key()
            .user_name(ADMIN_USER_NAME)
            .send()
            .await?;

        let access_key = created.access_key.ok_or(AwsError::MissingField {
            operation: "CreateAccessKey",
            field: "AccessKey",
        })?;

        Ok(AccessKey {
            access_key_id: access_key.access_key_id,
            secret_access_key: access_key.secret_access_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secret() {
        let key = AccessKey {
            access_key_id: "AKIAEXAMPLE".to_string(),
            secret_access_key: "super-secret".to_string(),
        };

        let rendered = format!("{:?}", key);
        assert!(rendered.contains("AKIAEXAMPLE"));
        assert!(!rendered.contains("super-secret"));
    }
}
