use std::io::Write;
use std::ops::AsyncFnOnce;

use tracing::{debug, error};

use crate::app_err::ApplicationError;
use crate::aws::{AccessKeyProvider, AwsClient, DEFAULT_REGION};
use crate::cli::RegionsArgs;
use crate::config::{AppSettings, OcmConfig};
use crate::ocm::{Ccs, Connection};
use crate::regions::{filter_regions, write_table};

const PROVIDER: &str = "aws";

pub async fn execute(args: RegionsArgs) -> Result<(), ApplicationError> {
    let ocm_config = OcmConfig::load()?;
    let settings = AppSettings::load()?;

    with_connection(ocm_config, async |connection| {
        let aws_client = AwsClient::builder()
            .region(
                settings
                    .aws_region
                    .clone()
                    .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            )
            .profile(settings.aws_profile.clone())
            .endpoint_url(settings.iam_endpoint.clone())
            .build()
            .await
            .map_err(ApplicationError::AwsClient)?;

        list_regions(connection, &aws_client, args, &mut std::io::stdout()).await
    })
    .await
}

/// Runs `f` against a fresh OCM connection and closes it afterwards, whatever
/// `f` returned. Close failures are reported but don't replace `f`'s result.
pub async fn with_connection<T, F>(ocm_config: OcmConfig, f: F) -> Result<T, ApplicationError>
where
    F: AsyncFnOnce(&Connection) -> Result<T, ApplicationError>,
{
    let connection = Connection::builder()
        .config(ocm_config)
        .build()
        .await
        .map_err(ApplicationError::Connection)?;

    let result = f(&connection).await;

    if let Err(err) = connection.close().await {
        error!("{}", ApplicationError::CloseConnection(err));
    }

    result
}

pub async fn list_regions<P, W>(
    connection: &Connection,
    keys: &P,
    args: RegionsArgs,
    out: &mut W,
) -> Result<(), ApplicationError>
where
    P: AccessKeyProvider,
    W: Write,
{
    let access_key = keys
        .get_aws_access_keys()
        .await
        .map_err(|source| ApplicationError::AccessKeys {
            user: keys.admin_user_name().to_string(),
            source,
        })?;

    debug!("Fetching regions");
    let ccs = Ccs {
        enabled: true,
        aws: access_key,
    };
    let regions = connection
        .clusters_mgmt()
        .get_regions(PROVIDER, &ccs)
        .await
        .map_err(ApplicationError::FetchRegions)?;

    if regions.is_empty() {
        return Err(ApplicationError::NoRegions);
    }

    write_table(out, &filter_regions(&regions, args.multi_az))?;
    Ok(())
}
