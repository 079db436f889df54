use aws_config::BehaviorVersion;
use aws_config::Region;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tracing::Level;
use vmx3::clients::PresignerClients;

#[tokio::main]
async fn main() -> Result<(), Error> {
    vmx3::setup_logging(vmx3::log_level_from_env(Level::INFO));

    // The secret lives in the configured region.
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Ok(region) = std::env::var("aws_region") {
        loader = loader.region(Region::new(region));
    }
    let shared = loader.load().await;
    let clients = PresignerClients::from_sdk_config(&shared);

    run(service_fn(|event: LambdaEvent<Value>| {
        vmx3::presigner::handler(event, &clients)
    }))
    .await
}
