use bank_name_dedup_service::dto::Record;
use rustc_hash::{FxHashMap, FxHashSet};

/// Known `(MICR, IFSC)` pairs from the reference mapping file.
#[derive(Debug, Default)]
pub struct ReferenceTable {
    /// MICR to the IFSC codes it is registered with
    pairs: FxHashMap<String, FxHashSet<String>>,
}

impl ReferenceTable {
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let mut pairs: FxHashMap<String, FxHashSet<String>> = FxHashMap::default();
        for record in records {
            pairs
                .entry(record.micr.trim().to_string())
                .or_default()
                .insert(record.ifsc.trim().to_string());
        }
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.values().map(FxHashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn contains(&self, record: &Record) -> bool {
        self.pairs
            .get(record.micr.as_str())
            .map_or(false, |ifscs| ifscs.contains(record.ifsc.as_str()))
    }

    /// Splits records into `(matched, unmatched)`, keeping input order.
    pub fn partition(&self, records: Vec<Record>) -> (Vec<Record>, Vec<Record>) {
        records.into_iter().partition(|record| self.contains(record))
    }
}
