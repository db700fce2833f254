use crate::cluster::ClusterOutcome;
use bank_name_dedup_service::dto::Record;
use bank_name_dedup_service::error::ServiceError;
use csv::{QuoteStyle, WriterBuilder};
use rustc_hash::FxHashSet;

/// One output field. The variant, not the content, decides the quoting: a
/// bank name such as `123` or `NaN` is still text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Count(usize),
    Score(f64),
}

impl Cell<'_> {
    /// Text is always double quoted with embedded quotes doubled; numbers are bare.
    fn render(&self) -> String {
        match self {
            Cell::Text(text) => format!("\"{}\"", text.replace('"', "\"\"")),
            Cell::Count(count) => count.to_string(),
            Cell::Score(score) => score.to_string(),
        }
    }
}

/// A table that can be written as a CSV file with a fixed header.
pub trait Table {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<Cell<'_>>;
}

/// One row per clustered input record.
#[derive(Debug, PartialEq)]
pub struct DetailRow<'a> {
    pub micr: &'a str,
    pub ifsc: &'a str,
    pub original: &'a str,
    pub corrected: &'a str,
    pub score: f64,
    pub micr_length: &'a str,
    pub ifsc_length: &'a str,
}

impl Table for DetailRow<'_> {
    const HEADERS: &'static [&'static str] = &[
        "MICR",
        "IFSC",
        "OriginalBankName",
        "CorrectedBankName",
        "MatchScore",
        "MICR_Length",
        "IFSC_Length",
    ];

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Text(self.micr),
            Cell::Text(self.ifsc),
            Cell::Text(self.original),
            Cell::Text(self.corrected),
            Cell::Score(self.score),
            Cell::Text(self.micr_length),
            Cell::Text(self.ifsc_length),
        ]
    }
}

/// One row per distinct original bank name.
#[derive(Debug, PartialEq)]
pub struct CorrectionRow<'a> {
    pub original: &'a str,
    pub corrected: &'a str,
    pub record_count: usize,
}

impl Table for CorrectionRow<'_> {
    const HEADERS: &'static [&'static str] =
        &["OriginalBankName", "CorrectedBankName", "RecordCount"];

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Text(self.original),
            Cell::Text(self.corrected),
            Cell::Count(self.record_count),
        ]
    }
}

/// One row per cluster.
#[derive(Debug, PartialEq)]
pub struct GroupRow<'a> {
    pub bank_name: &'a str,
    pub record_count: usize,
    pub unique_ifsc: usize,
    pub unique_micr: usize,
}

impl Table for GroupRow<'_> {
    const HEADERS: &'static [&'static str] =
        &["BankName", "RecordCount", "UniqueIFSCCodes", "UniqueMICRCodes"];

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Text(self.bank_name),
            Cell::Count(self.record_count),
            Cell::Count(self.unique_ifsc),
            Cell::Count(self.unique_micr),
        ]
    }
}

/// A pass-through record, as produced by the upstream stages.
#[derive(Debug, PartialEq)]
pub struct RecordRow<'a> {
    pub micr: &'a str,
    pub ifsc: &'a str,
    pub bank_name: &'a str,
    pub micr_length: &'a str,
    pub ifsc_length: &'a str,
}

impl Table for RecordRow<'_> {
    const HEADERS: &'static [&'static str] =
        &["MICR", "IFSC", "BankName", "MICR_Length", "IFSC_Length"];

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Text(self.micr),
            Cell::Text(self.ifsc),
            Cell::Text(self.bank_name),
            Cell::Text(self.micr_length),
            Cell::Text(self.ifsc_length),
        ]
    }
}

impl<'a> From<&'a Record> for RecordRow<'a> {
    fn from(record: &'a Record) -> Self {
        RecordRow {
            micr: &record.micr,
            ifsc: &record.ifsc,
            bank_name: &record.bank_name,
            micr_length: &record.micr_length,
            ifsc_length: &record.ifsc_length,
        }
    }
}

pub fn detail_rows(outcome: &ClusterOutcome) -> Vec<DetailRow<'_>> {
    outcome
        .records()
        .filter_map(|record| {
            let correction = outcome.correction(&record.bank_name)?;
            let score = if correction.original == correction.canonical {
                100.0
            } else {
                correction.score
            };
            Some(DetailRow {
                micr: &record.micr,
                ifsc: &record.ifsc,
                original: &record.bank_name,
                corrected: &correction.canonical,
                score,
                micr_length: &record.micr_length,
                ifsc_length: &record.ifsc_length,
            })
        })
        .collect()
}

pub fn correction_rows(outcome: &ClusterOutcome) -> Vec<CorrectionRow<'_>> {
    outcome
        .corrections()
        .iter()
        .map(|correction| CorrectionRow {
            original: &correction.original,
            corrected: &correction.canonical,
            record_count: correction.record_count,
        })
        .collect()
}

pub fn group_rows(outcome: &ClusterOutcome) -> Vec<GroupRow<'_>> {
    outcome
        .groups()
        .iter()
        .map(|group| {
            let ifsc: FxHashSet<&str> = group.members.iter().map(|r| r.ifsc.as_str()).collect();
            let micr: FxHashSet<&str> = group.members.iter().map(|r| r.micr.as_str()).collect();
            GroupRow {
                bank_name: &group.canonical,
                record_count: group.members.len(),
                unique_ifsc: ifsc.len(),
                unique_micr: micr.len(),
            }
        })
        .collect()
}

///
/// Writes rows under the table's header. Every field is rendered by its
/// [`Cell`] kind, so the writer itself never quotes.
///
pub fn write_table<T, I>(rows: I) -> Result<Vec<u8>, ServiceError>
where
    T: Table,
    I: IntoIterator<Item = T>,
{
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(vec![]);
    let header: Vec<String> = T::HEADERS.iter().map(|h| Cell::Text(h).render()).collect();
    writer
        .write_record(&header)
        .map_err(ServiceError::internal_server_error)?;
    for row in rows {
        let fields: Vec<String> = row.cells().iter().map(Cell::render).collect();
        writer
            .write_record(&fields)
            .map_err(ServiceError::internal_server_error)?;
    }
    writer
        .into_inner()
        .map_err(ServiceError::internal_server_error)
}

pub fn write_records(records: &[Record]) -> Result<Vec<u8>, ServiceError> {
    write_table(records.iter().map(RecordRow::from))
}
