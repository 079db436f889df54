use aws_config::BehaviorVersion;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tracing::Level;
use vmx3::clients::PackagerClients;

#[tokio::main]
async fn main() -> Result<(), Error> {
    vmx3::setup_logging(vmx3::log_level_from_env(Level::DEBUG));

    let shared = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let clients = PackagerClients::from_sdk_config(&shared);

    run(service_fn(|event: LambdaEvent<Value>| {
        vmx3::packager::handler(event, &clients)
    }))
    .await
}
