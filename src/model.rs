use serde::{Deserialize, Serialize};

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Lifecycle action requested by CloudFormation.
///
/// Verbs outside the three known ones must not abort the invocation before an
/// acknowledgment can be sent, so deserialization never fails: anything else
/// lands in `Other` and the handler treats it as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestType {
    Create,
    Update,
    Delete,
    Other(String),
}

impl From<String> for RequestType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Create" => RequestType::Create,
            "Update" => RequestType::Update,
            "Delete" => RequestType::Delete,
            _ => RequestType::Other(value),
        }
    }
}

impl From<RequestType> for String {
    fn from(value: RequestType) -> Self {
        match value {
            RequestType::Create => "Create".to_string(),
            RequestType::Update => "Update".to_string(),
            RequestType::Delete => "Delete".to_string(),
            RequestType::Other(verb) => verb,
        }
    }
}

/// Custom resource event as delivered by CloudFormation.
///
/// Every property is optional on the wire: a malformed event still
/// deserializes, and a missing field only surfaces once the TTL update
/// needs it. Validating upfront would fail the invocation before the
/// acknowledgment boundary is reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnEvent {
    pub request_type: RequestType,
    #[serde(default)]
    pub resource_properties: ResourceProperties,
    #[serde(default)]
    pub physical_resource_id: Option<String>,
    // Pre-signed S3 URL the acknowledgment is PUT to
    #[serde(rename = "ResponseURL", default)]
    pub response_url: Option<String>,
    #[serde(default)]
    pub stack_id: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub logical_resource_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceProperties {
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub time_to_live_specification: Option<TtlSpecification>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TtlSpecification {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub attribute_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILED")]
    Failed,
}

/// Acknowledgment payload sent back over the CloudFormation callback URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnResponse {
    pub status: ResponseStatus,
    // Reason and the physical resource id are always serialized, null when
    // there is nothing to report
    pub reason: Option<String>,
    pub physical_resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseData {
    pub attribute_name: String,
}

impl CfnResponse {
    /// SUCCESS acknowledgment echoing the event's identifiers and, when the
    /// event names one, the TTL attribute.
    pub fn success(event: &CfnEvent) -> CfnResponse {
        let data: Option<ResponseData> = event
            .resource_properties
            .time_to_live_specification
            .as_ref()
            .and_then(|spec| spec.attribute_name.clone())
            .map(|attribute_name| ResponseData { attribute_name });

        CfnResponse {
            status: ResponseStatus::Success,
            reason: None,
            data,
            ..CfnResponse::echoing(event)
        }
    }

    /// FAILED acknowledgment. No reason text is attached; diagnostics live in
    /// the log line emitted before the send. The event's physical resource id
    /// is carried through unchanged and never newly assigned.
    pub fn failed(event: &CfnEvent) -> CfnResponse {
        CfnResponse {
            status: ResponseStatus::Failed,
            ..CfnResponse::echoing(event)
        }
    }

    fn echoing(event: &CfnEvent) -> CfnResponse {
        CfnResponse {
            status: ResponseStatus::Failed,
            reason: None,
            physical_resource_id: event.physical_resource_id.clone(),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn create_event_json() -> Value {
        json!({
            "RequestType": "Create",
            "ResponseURL": "https://cloudformation.example/callback",
            "StackId": "arn:aws:cloudformation:eu-west-1:123:stack/s/1",
            "RequestId": "req-1",
            "LogicalResourceId": "OrdersTtl",
            "ResourceProperties": {
                "TableName": "Orders",
                "TimeToLiveSpecification": {
                    "Enabled": true,
                    "AttributeName": "expiresAt"
                }
            }
        })
    }

    #[test]
    fn deserializes_create_event() {
        let event: CfnEvent = serde_json::from_value(create_event_json()).unwrap();

        assert_eq!(RequestType::Create, event.request_type);
        assert_eq!(
            Some("Orders"),
            event.resource_properties.table_name.as_deref()
        );

        let spec: &TtlSpecification = event
            .resource_properties
            .time_to_live_specification
            .as_ref()
            .unwrap();
        assert_eq!(Some(true), spec.enabled);
        assert_eq!(Some("expiresAt"), spec.attribute_name.as_deref());
        assert_eq!(None, event.physical_resource_id);
    }

    #[test]
    fn unknown_request_type_deserializes_to_other() {
        let event: CfnEvent = serde_json::from_value(json!({"RequestType": "Read"})).unwrap();

        assert_eq!(RequestType::Other("Read".to_string()), event.request_type);
    }

    #[test]
    fn sparse_event_still_deserializes() {
        let event: CfnEvent = serde_json::from_value(json!({
            "RequestType": "Update",
            "ResourceProperties": {"TableName": "Orders"}
        }))
        .unwrap();

        assert!(event
            .resource_properties
            .time_to_live_specification
            .is_none());
        assert!(event.response_url.is_none());
    }

    #[test]
    fn success_response_carries_attribute_name() {
        let event: CfnEvent = serde_json::from_value(create_event_json()).unwrap();

        let body: Value = serde_json::to_value(CfnResponse::success(&event)).unwrap();

        assert_eq!(json!("SUCCESS"), body["Status"]);
        assert_eq!(json!("expiresAt"), body["Data"]["AttributeName"]);
        // Null rather than absent
        assert_eq!(Value::Null, body["PhysicalResourceId"]);
        assert_eq!(Some(&Value::Null), body.get("Reason"));
        assert_eq!(json!("req-1"), body["RequestId"]);
    }

    #[test]
    fn failed_response_has_no_reason_or_data() {
        let mut event: CfnEvent = serde_json::from_value(create_event_json()).unwrap();
        event.physical_resource_id = Some("abc-123".to_string());

        let body: Value = serde_json::to_value(CfnResponse::failed(&event)).unwrap();

        assert_eq!(json!("FAILED"), body["Status"]);
        assert_eq!(json!("abc-123"), body["PhysicalResourceId"]);
        // Reason is present but null; no diagnostic payload is attached
        assert_eq!(Some(&Value::Null), body.get("Reason"));
        assert!(body.get("Data").is_none());
    }
}
