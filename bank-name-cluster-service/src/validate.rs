use bank_name_dedup_service::dto::Record;
use lazy_static::lazy_static;
use rayon::prelude::*;
use regex::Regex;

lazy_static! {
    static ref MICR_PATTERN: Regex = Regex::new(r"^[0-9]{9}$").unwrap();
    static ref IFSC_PATTERN: Regex = Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").unwrap();
}

/// Raw rows split by format check, input order kept on both sides.
#[derive(Debug, Default)]
pub struct Validation {
    pub valid: Vec<Record>,
    pub invalid: Vec<Record>,
}

/// Trims the codes and stamps their character lengths onto the record.
pub fn tag_lengths(record: Record) -> Record {
    let micr = record.micr.trim().to_string();
    let ifsc = record.ifsc.trim().to_string();
    Record {
        micr_length: micr.chars().count().to_string(),
        ifsc_length: ifsc.chars().count().to_string(),
        micr,
        ifsc,
        bank_name: record.bank_name,
    }
}

pub fn is_valid(record: &Record) -> bool {
    MICR_PATTERN.is_match(&record.micr) && IFSC_PATTERN.is_match(&record.ifsc)
}

pub fn validate(rows: Vec<Record>) -> Validation {
    let checked: Vec<(Record, bool)> = rows
        .into_par_iter()
        .map(|row| {
            let record = tag_lengths(row);
            let valid = is_valid(&record);
            (record, valid)
        })
        .collect();
    checked
        .into_iter()
        .fold(Validation::default(), |mut validation, (record, valid)| {
            if valid {
                validation.valid.push(record);
            } else {
                validation.invalid.push(record);
            }
            validation
        })
}
