use csv::ByteRecord;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DataFile {
    pub bucket: String,
    pub key: String,
}

impl DataFile {
    /// `s3://bucket/key`, used to say which file an error came from.
    pub fn location(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }
}

/// Column the upstream sorter orders records by before clustering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Micr,
    Ifsc,
    #[default]
    BankName,
}

impl SortKey {
    pub fn column<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            SortKey::Micr => &record.micr,
            SortKey::Ifsc => &record.ifsc,
            SortKey::BankName => &record.bank_name,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConfig {
    pub data: DataFile,
    #[serde(default)]
    pub reference: Option<DataFile>,
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default)]
    pub has_headers: bool,
    /// The reference table is usually exported separately and carries its own header setting.
    #[serde(default)]
    pub reference_has_headers: bool,
    /// Input is already the validated, unmatched and sorted 5-column file.
    #[serde(default)]
    pub prepared: bool,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

pub const DEFAULT_THRESHOLD: f64 = 70.0;

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Record {
    pub micr: String,
    pub ifsc: String,
    pub bank_name: String,
    pub micr_length: String,
    pub ifsc_length: String,
}

impl Record {
    /// Builds a record from positional fields. Missing trailing fields are
    /// left empty and anything past the fifth field is ignored.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = fields.into_iter().map(str::to_string);
        Record {
            micr: fields.next().unwrap_or_default(),
            ifsc: fields.next().unwrap_or_default(),
            bank_name: fields.next().unwrap_or_default(),
            micr_length: fields.next().unwrap_or_default(),
            ifsc_length: fields.next().unwrap_or_default(),
        }
    }

    pub fn to_fields(&self) -> [&str; 5] {
        [
            &self.micr,
            &self.ifsc,
            &self.bank_name,
            &self.micr_length,
            &self.ifsc_length,
        ]
    }
}

/// Fields that are not valid UTF-8 (Latin-1 exports are common) are decoded
/// lossily, so one stray byte costs a replacement character, not the run.
impl From<&ByteRecord> for Record {
    fn from(row: &ByteRecord) -> Self {
        let fields: Vec<String> = row
            .iter()
            .take(5)
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect();
        Record::from_fields(fields.iter().map(String::as_str))
    }
}
