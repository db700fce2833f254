use crate::cluster::{cluster, ClusterOutcome};
use crate::reference::ReferenceTable;
use crate::report::{correction_rows, detail_rows, group_rows, write_records, write_table};
use crate::sort::sort_records;
use crate::validate::validate;
use bank_name_dedup_service::dto::{ClusterConfig, Record};
use bank_name_dedup_service::error::ServiceError;
use csv::ReaderBuilder;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// A named CSV file produced by a run.
pub struct Artifact {
    pub name: &'static str,
    pub body: Vec<u8>,
}

#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSummary {
    pub input_records: usize,
    pub invalid_records: usize,
    pub matched_records: usize,
    pub clustered_records: usize,
    pub distinct_names: usize,
    pub groups: usize,
    /// Distinct names that were folded into another name's group
    pub corrected_names: usize,
}

pub struct PipelineOutput {
    pub artifacts: Vec<Artifact>,
    pub summary: PipelineSummary,
}

///
/// Parses delimited rows into records. Short rows are padded and bytes that
/// are not UTF-8 are decoded lossily, so no single row can fail the file.
///
/// * `file` - `input` or `reference`, named in the error if the file itself
/// cannot be read.
///
pub fn read_records(
    file: &str,
    bytes: &[u8],
    has_headers: bool,
) -> Result<Vec<Record>, ServiceError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .from_reader(bytes);
    reader
        .byte_records()
        .map(|row| {
            row.map(|row| Record::from(&row))
                .map_err(|err| ServiceError::unreadable_file(file, err))
        })
        .collect()
}

fn check_threshold(threshold: f64) -> Result<(), ServiceError> {
    if (0.0..=100.0).contains(&threshold) {
        Ok(())
    } else {
        Err(ServiceError::invalid_setting(
            "threshold",
            format!("must lie in [0, 100], got {threshold}"),
        ))
    }
}

///
/// Runs every stage over in-memory files: validate, compare against the
/// reference table, sort, cluster and report.
///
/// ## Arguments
///
/// * `input` - Raw records (MICR, IFSC, bank name), or the already prepared
/// 5-column file when `config.prepared` is set.
/// * `reference` - Reference mapping file (MICR, IFSC, ...), optional.
/// * `config` - Run options from the invoking event.
///
pub fn run(
    input: &[u8],
    reference: Option<&[u8]>,
    config: &ClusterConfig,
) -> Result<PipelineOutput, ServiceError> {
    check_threshold(config.threshold)?;
    let rows = read_records("input", input, config.has_headers)?;
    let mut summary = PipelineSummary {
        input_records: rows.len(),
        ..Default::default()
    };
    let mut artifacts = Vec::new();

    let unmatched = if config.prepared {
        rows
    } else {
        let start = Instant::now();
        let validation = validate(rows);
        let table = match reference {
            Some(bytes) => ReferenceTable::from_records(read_records(
                "reference",
                bytes,
                config.reference_has_headers,
            )?),
            None => ReferenceTable::default(),
        };
        let (matched, mut unmatched) = table.partition(validation.valid);
        sort_records(&mut unmatched, config.sort_by);
        info!(
            valid = matched.len() + unmatched.len(),
            invalid = validation.invalid.len(),
            matched = matched.len(),
            reference_pairs = table.len(),
            elapsed_secs = start.elapsed().as_secs_f64(),
            "prepared records for clustering"
        );

        summary.invalid_records = validation.invalid.len();
        summary.matched_records = matched.len();
        artifacts.push(Artifact {
            name: "invalid",
            body: write_records(&validation.invalid)?,
        });
        artifacts.push(Artifact {
            name: "matched",
            body: write_records(&matched)?,
        });
        artifacts.push(Artifact {
            name: "unmatched",
            body: write_records(&unmatched)?,
        });
        unmatched
    };

    let start = Instant::now();
    let outcome = cluster(unmatched, config.threshold);
    info!(
        records = outcome.record_count(),
        distinct_names = outcome.corrections().len(),
        groups = outcome.groups().len(),
        elapsed_secs = start.elapsed().as_secs_f64(),
        "clustered bank names"
    );

    summarize(&outcome, &mut summary);
    artifacts.push(Artifact {
        name: "detailed",
        body: write_table(detail_rows(&outcome))?,
    });
    artifacts.push(Artifact {
        name: "corrections",
        body: write_table(correction_rows(&outcome))?,
    });
    artifacts.push(Artifact {
        name: "groups",
        body: write_table(group_rows(&outcome))?,
    });

    Ok(PipelineOutput { artifacts, summary })
}

fn summarize(outcome: &ClusterOutcome, summary: &mut PipelineSummary) {
    summary.clustered_records = outcome.record_count();
    summary.distinct_names = outcome.corrections().len();
    summary.groups = outcome.groups().len();
    summary.corrected_names = outcome
        .corrections()
        .iter()
        .filter(|c| c.original != c.canonical)
        .count();
}
