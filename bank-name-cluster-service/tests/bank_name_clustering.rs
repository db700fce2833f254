use bank_name_cluster_service::cluster::cluster;
use bank_name_cluster_service::matcher::{compare, MatchCategory};
use bank_name_cluster_service::metrics::{edit_ratio, soundex};
use bank_name_cluster_service::normalize::normalize;
use bank_name_cluster_service::report::{correction_rows, group_rows};
use bank_name_dedup_service::dto::{Record, DEFAULT_THRESHOLD};

fn records(names: &[&str]) -> Vec<Record> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let micr = format!("4000020{:02}", i);
            let ifsc = format!("TEST0{:06}", i);
            Record::from_fields([micr.as_str(), ifsc.as_str(), *name, "9", "11"])
        })
        .collect()
}

#[test]
fn whitespace_variants_share_a_cluster() {
    let outcome = cluster(
        records(&["STATE BANK OF INDIA", "STATE BANK OF  INDIA", "PUNJAB NATIONAL BANK"]),
        DEFAULT_THRESHOLD,
    );
    assert_eq!(outcome.groups().len(), 2);
    assert_eq!(outcome.groups()[0].canonical, "STATE BANK OF INDIA");
    assert_eq!(outcome.groups()[0].members.len(), 2);
    assert_eq!(outcome.groups()[1].canonical, "PUNJAB NATIONAL BANK");
}

#[test]
fn canonical_name_is_the_first_one_seen() {
    let outcome = cluster(records(&["ICICI BANK LTD", "ICICI BANK LIMITED"]), DEFAULT_THRESHOLD);
    assert!(compare("ICICI BANK LIMITED", "ICICI BANK LTD").final_score >= 70.0);
    assert_eq!(outcome.canonical_for("ICICI BANK LIMITED"), Some("ICICI BANK LTD"));
}

#[test]
fn correction_and_group_tables_count_differently() {
    let outcome = cluster(
        records(&["ABC BANK LTD", "ABC BANK", "ABC BANK LTD.", "ABC BANK", "ABC BANK"]),
        DEFAULT_THRESHOLD,
    );
    let corrections = correction_rows(&outcome);
    let abc = corrections.iter().find(|row| row.original == "ABC BANK").unwrap();
    assert_eq!(abc.corrected, "ABC BANK LTD");
    assert_eq!(abc.record_count, 3);

    let groups = group_rows(&outcome);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].bank_name, "ABC BANK LTD");
    assert_eq!(groups[0].record_count, 5);
}

#[test]
fn clustering_twice_gives_the_same_answer() {
    let names = [
        "HDFC BANK",
        "HDFC BANK LTD",
        "AXIS BANK",
        "H.D.F.C. BANK",
        "AXIS BANK LIMITED",
        "CANARA BANK",
    ];
    assert_eq!(
        cluster(records(&names), DEFAULT_THRESHOLD),
        cluster(records(&names), DEFAULT_THRESHOLD)
    );
}

#[test]
fn reference_values() {
    assert!((edit_ratio("KITTEN", "SITTING") - 57.14).abs() < 0.01);
    assert_eq!(soundex("Smith"), "S530");
    assert_eq!(soundex("Smyth"), "S530");
    assert_eq!(normalize(&normalize(" Bank of  Baroda. ")), normalize(" Bank of  Baroda. "));
    assert_eq!(compare("Bank of Baroda", "Bank of Baroda").category, MatchCategory::StrongMatch);
}
