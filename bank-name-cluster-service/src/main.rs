use bank_name_cluster_service::{pipeline, util};
use bank_name_dedup_service::dto::ClusterConfig;
use bank_name_dedup_service::error::ServiceError;
use bank_name_dedup_service::response::make_response_payload;
use bank_name_dedup_service::util::{get_env_var_or, get_region};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use lazy_static::lazy_static;
use rusoto_core::{Client, Region};
use rusoto_s3::S3Client;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

lazy_static! {
    // AWS Region
    static ref REGION: Region = get_region().unwrap();
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
    run(service_fn(process)).await?;
    Ok(())
}

async fn process(event: LambdaEvent<ClusterConfig>) -> Result<Value, Error> {
    let (config, context) = event.into_parts();
    info!(request_id = %context.request_id, key = %config.data.key, "clustering bank names");
    let result = cluster_bank_names(config).await;
    if let Err(err) = &result {
        error!(status = ?err.status, origin = ?err.origin, msg = %err.msg, "clustering failed");
    }
    make_response_payload(result)
}

async fn cluster_bank_names(config: ClusterConfig) -> Result<Value, ServiceError> {
    let start = Instant::now();
    let client = S3Client::new_with_client(Client::shared(), REGION.clone());
    let input = util::pull_data_file(&client, &config.data).await?;
    let reference = match &config.reference {
        Some(data) => Some(util::pull_data_file(&client, data).await?),
        None => None,
    };
    info!(
        input_bytes = input.len(),
        reference_bytes = reference.as_ref().map_or(0, Vec::len),
        elapsed_secs = start.elapsed().as_secs_f64(),
        "files downloaded"
    );

    let output = pipeline::run(&input, reference.as_deref(), &config)?;

    let start = Instant::now();
    let prefix = get_env_var_or("OUTPUT_PREFIX", "output");
    let keys = util::push_artifacts(
        &client,
        &config.data.bucket,
        &prefix,
        &config.data.key,
        output.artifacts,
    )
    .await?;
    info!(
        elapsed_secs = start.elapsed().as_secs_f64(),
        "results uploaded"
    );
    Ok(json!({
        "bucket": config.data.bucket,
        "keys": keys,
        "summary": output.summary,
    }))
}
