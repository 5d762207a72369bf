use crate::model::{CfnEvent, CfnResponse, Error, RequestType, ResourceProperties, TtlSpecification};
use crate::responder::ResponseSender;
use crate::ttl::{TtlClient, TtlError};
use lambda_runtime::{tracing, LambdaEvent};
use std::sync::Arc;

/// Custom resource provider for DynamoDB table TTL.
///
/// Holds the administrative client and the acknowledgment sender, both
/// constructed once at startup and reused across warm invocations.
pub struct TtlProvider {
    ttl_client: Arc<dyn TtlClient>,
    response_sender: Arc<dyn ResponseSender>,
}

impl TtlProvider {
    pub fn new(ttl_client: Arc<dyn TtlClient>, response_sender: Arc<dyn ResponseSender>) -> Self {
        TtlProvider {
            ttl_client,
            response_sender,
        }
    }

    /// Drive one provisioning event to completion.
    ///
    /// Exactly one acknowledgment is sent on every path through the action:
    /// any error from the Create/Update branch is caught at this boundary,
    /// logged, and mapped to a FAILED acknowledgment. The only error this
    /// function itself returns is a failure to deliver the acknowledgment.
    pub async fn handle(&self, event: LambdaEvent<CfnEvent>) -> Result<(), Error> {
        let (event, context) = event.into_parts();

        // Audit line; a serialization failure degrades to the Debug format
        match serde_json::to_string(&event) {
            Ok(json) => tracing::info!("Received event for request {}: {json}", context.request_id),
            Err(_) => tracing::info!(
                "Received event for request {}: {:?}",
                context.request_id,
                event
            ),
        }

        let response: CfnResponse = match self.run_action(&event).await {
            Ok(()) => CfnResponse::success(&event),
            Err(err) => {
                tracing::error!("Failed to perform {:?} action: {err}", event.request_type);

                CfnResponse::failed(&event)
            }
        };

        self.response_sender.send(&event, &response).await?;

        Ok(())
    }

    async fn run_action(&self, event: &CfnEvent) -> Result<(), TtlError> {
        match &event.request_type {
            RequestType::Create | RequestType::Update => self.set_ttl(event).await,
            // Deleting the owning table cascades the TTL configuration away
            RequestType::Delete => Ok(()),
            RequestType::Other(verb) => {
                tracing::info!("Ignoring unrecognised request type {verb}");

                Ok(())
            }
        }
    }

    async fn set_ttl(&self, event: &CfnEvent) -> Result<(), TtlError> {
        let properties: &ResourceProperties = &event.resource_properties;

        let table_name: &str = properties
            .table_name
            .as_deref()
            .ok_or(TtlError::MissingProperty("TableName"))?;
        let specification: &TtlSpecification = properties
            .time_to_live_specification
            .as_ref()
            .ok_or(TtlError::MissingProperty("TimeToLiveSpecification"))?;
        let enabled: bool = specification
            .enabled
            .ok_or(TtlError::MissingProperty("Enabled"))?;
        let attribute_name: &str = specification
            .attribute_name
            .as_deref()
            .ok_or(TtlError::MissingProperty("AttributeName"))?;

        self.ttl_client
            .update_time_to_live(table_name, enabled, attribute_name)
            .await
            .map_err(TtlError::Service)
    }
}
