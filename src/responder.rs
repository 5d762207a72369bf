use crate::model::{CfnEvent, CfnResponse, Error};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use std::fmt::{Display, Formatter};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Channel over which the acknowledgment reaches CloudFormation.
///
/// The event supplies the addressing; implementations only deliver the
/// payload.
#[async_trait]
pub trait ResponseSender: Send + Sync {
    async fn send(&self, event: &CfnEvent, response: &CfnResponse) -> Result<(), SendError>;
}

/// Errors arising while delivering an acknowledgment.
#[derive(Debug)]
pub enum SendError {
    // The event carried no callback URL to address
    MissingResponseUrl,
    Payload(serde_json::Error),
    Http(reqwest::Error),
    // The callback endpoint refused the payload
    Rejected(StatusCode),
}

impl Display for SendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(format!("{:?}", self).as_str())
    }
}

impl std::error::Error for SendError {}

/// `ResponseSender` implementing the CloudFormation callback contract: an
/// HTTP PUT of the JSON payload to the event's pre-signed `ResponseURL`.
pub struct HttpResponseSender {
    http_client: Client,
}

impl HttpResponseSender {
    pub fn new() -> Result<Self, Error> {
        let http_client: Client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(HttpResponseSender { http_client })
    }
}

#[async_trait]
impl ResponseSender for HttpResponseSender {
    async fn send(&self, event: &CfnEvent, response: &CfnResponse) -> Result<(), SendError> {
        let url: &str = event
            .response_url
            .as_deref()
            .ok_or(SendError::MissingResponseUrl)?;

        let body: String = serde_json::to_string(response).map_err(SendError::Payload)?;

        let reply: Response = self
            .http_client
            .put(url)
            // The pre-signed URL signature covers an empty content type
            .header(CONTENT_TYPE, "")
            .body(body)
            .send()
            .await
            .map_err(SendError::Http)?;

        if !reply.status().is_success() {
            return Err(SendError::Rejected(reply.status()));
        }

        Ok(())
    }
}
