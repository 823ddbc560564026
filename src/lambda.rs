use index_template_probe::{APP_NAME, ProbeResponse, probe_index_templates_from_env, set_up_logger};
use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::Value;
use std::error::Error;

type LambdaError = Box<dyn Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    set_up_logger(APP_NAME, module_path!(), false)?;

    let func = service_fn(function);
    lambda_runtime::run(func).await?;
    Ok(())
}

async fn function(event: LambdaEvent<Value>) -> Result<Value, LambdaError> {
    function_with(event, probe_index_templates_from_env()).await
}

async fn function_with(
    _event: LambdaEvent<Value>,
    probe: impl Future<Output = ProbeResponse>,
) -> Result<Value, LambdaError> {
    Ok(serde_json::to_value(probe.await)?)
}
