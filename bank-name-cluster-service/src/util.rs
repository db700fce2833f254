use crate::pipeline::Artifact;
use bank_name_dedup_service::dto::DataFile;
use bank_name_dedup_service::error::ServiceError;
use bank_name_dedup_service::util::{download_object_from_s3, upload_object_to_s3};
use rusoto_s3::S3Client;
use serde_json::{Map, Value};

pub async fn pull_data_file(client: &S3Client, data: &DataFile) -> Result<Vec<u8>, ServiceError> {
    download_object_from_s3(client, data).await
}

/// `{prefix}/{input file stem}/{artifact}.csv`
pub fn output_key(prefix: &str, input_key: &str, artifact: &str) -> String {
    let file = input_key.rsplit('/').next().unwrap_or(input_key);
    let stem = match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file,
    };
    format!("{}/{stem}/{artifact}.csv", prefix.trim_end_matches('/'))
}

/// Uploads every artifact next to each other and returns `{artifact: key}`.
pub async fn push_artifacts(
    client: &S3Client,
    bucket: &str,
    prefix: &str,
    input_key: &str,
    artifacts: Vec<Artifact>,
) -> Result<Value, ServiceError> {
    let mut keys = Map::new();
    for Artifact { name, body } in artifacts {
        let file = DataFile {
            bucket: bucket.to_string(),
            key: output_key(prefix, input_key, name),
        };
        upload_object_to_s3(client, body, &file).await?;
        keys.insert(name.to_string(), Value::String(file.key));
    }
    Ok(Value::Object(keys))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_keys_group_artifacts_by_input_stem() {
        assert_eq!(
            output_key("output", "input/2024/branches.csv", "groups"),
            "output/branches/groups.csv"
        );
        assert_eq!(
            output_key("results/", "branches", "detailed"),
            "results/branches/detailed.csv"
        );
        assert_eq!(
            output_key("output", ".hidden", "invalid"),
            "output/.hidden/invalid.csv"
        );
    }
}
