use crate::model::CfnEvent;
use crate::provider::TtlProvider;
use crate::responder::HttpResponseSender;
use crate::ttl::DynamoDbTtlClient;
use aws_config::BehaviorVersion;
use lambda_runtime::{service_fn, tracing, Error, LambdaEvent};
use std::sync::Arc;

mod model;
mod provider;
mod responder;
mod ttl;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    // Clients are built once at startup and reused across warm invocations
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let provider: TtlProvider = TtlProvider::new(
        Arc::new(DynamoDbTtlClient::new(aws_sdk_dynamodb::Client::new(
            &config,
        ))),
        Arc::new(HttpResponseSender::new()?),
    );

    lambda_runtime::run(service_fn(|event: LambdaEvent<CfnEvent>| {
        provider.handle(event)
    }))
    .await
}
