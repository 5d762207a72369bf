use crate::model::Error;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::TimeToLiveSpecification;
use std::fmt::{Display, Formatter};

/// Administrative client for a table's TTL configuration.
///
/// The production implementation wraps the DynamoDB SDK; tests substitute a
/// recording fake.
#[async_trait]
pub trait TtlClient: Send + Sync {
    async fn update_time_to_live(
        &self,
        table_name: &str,
        enabled: bool,
        attribute_name: &str,
    ) -> Result<(), Error>;
}

/// Errors arising while performing the TTL update action.
#[derive(Debug)]
pub enum TtlError {
    // The event did not carry a property the update needs
    MissingProperty(&'static str),
    // An error from the administrative API
    Service(Error),
}

impl Display for TtlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TtlError::MissingProperty(name) => {
                write!(f, "Missing required resource property {name}")
            }
            TtlError::Service(err) => write!(f, "TTL update failed: {err}"),
        }
    }
}

impl std::error::Error for TtlError {}

/// `TtlClient` backed by the DynamoDB `UpdateTimeToLive` operation.
///
/// The call is idempotent, so no local retry is performed; any SDK error is
/// propagated to the handler's failure boundary.
pub struct DynamoDbTtlClient {
    dynamodb_client: aws_sdk_dynamodb::Client,
}

impl DynamoDbTtlClient {
    pub fn new(dynamodb_client: aws_sdk_dynamodb::Client) -> Self {
        DynamoDbTtlClient { dynamodb_client }
    }
}

#[async_trait]
impl TtlClient for DynamoDbTtlClient {
    async fn update_time_to_live(
        &self,
        table_name: &str,
        enabled: bool,
        attribute_name: &str,
    ) -> Result<(), Error> {
        let specification: TimeToLiveSpecification = TimeToLiveSpecification::builder()
            .enabled(enabled)
            .attribute_name(attribute_name)
            .build()?;

        self.dynamodb_client
            .update_time_to_live()
            .table_name(table_name)
            .time_to_live_specification(specification)
            .send()
            .await?;

        Ok(())
    }
}
