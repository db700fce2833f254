use bank_name_dedup_service::dto::{Record, SortKey};

/// Stable lexicographic sort on one column. Ties keep their input order,
/// which the clusterer relies on to pick canonical names.
pub fn sort_records(records: &mut [Record], key: SortKey) {
    records.sort_by(|a, b| key.column(a).cmp(key.column(b)));
}
