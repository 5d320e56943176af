//! Dual-dealer record splitting.
//!
//! Some dealer codes operate under a primary and a secondary company whose
//! rosters arrive merged. Position keywords decide which company a row
//! belongs to; rows may be kept, retargeted, partitioned or duplicated.

use tracing::debug;

use dtc_map::MappingTable;
use dtc_model::{PersonnelRecord, dealer_code};
use dtc_normalization::{join_values, split_values};

use crate::config::DualDealerRules;

/// How a single personnel row is treated by the splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DualDealerBranch {
    /// Not a primary-company row, or its dealer has no secondary counterpart.
    PassThrough,
    /// Only the primary marker appears; the row stays as-is.
    PrimaryOnly,
    /// Only the secondary marker appears; the row moves to the secondary dealer.
    SecondaryOnly,
    /// Both markers appear; positions are partitioned between two rows.
    SplitByMarker,
    /// Neither marker appears; the row is kept and a secondary copy is added.
    Duplicate,
}

/// Decides the branch for `record` and returns the secondary dealer name when
/// one applies.
pub fn classify_record<'a>(
    record: &PersonnelRecord,
    secondary_dealers: &'a MappingTable,
    rules: &DualDealerRules,
) -> (DualDealerBranch, Option<&'a str>) {
    if !rules.is_primary_company(&record.company) {
        return (DualDealerBranch::PassThrough, None);
    }
    let Some(secondary_dealer) = secondary_dealers.get(dealer_code(&record.dealer_name)) else {
        return (DualDealerBranch::PassThrough, None);
    };
    let positions = record.combined_position_text();
    let has_primary = positions.contains(rules.primary_marker.as_str());
    let has_secondary = positions.contains(rules.secondary_marker.as_str());
    let branch = match (has_primary, has_secondary) {
        (true, false) => DualDealerBranch::PrimaryOnly,
        (false, true) => DualDealerBranch::SecondaryOnly,
        (true, true) => DualDealerBranch::SplitByMarker,
        (false, false) => DualDealerBranch::Duplicate,
    };
    (branch, Some(secondary_dealer))
}

/// Produces the authoritative personnel table from the merged roster.
///
/// Input order is preserved; a primary row always precedes the secondary row
/// derived from it. Every output row keeps its source personnel code.
pub fn split_dual_dealer_records(
    records: &[PersonnelRecord],
    secondary_dealers: &MappingTable,
    rules: &DualDealerRules,
) -> Vec<PersonnelRecord> {
    let mut output = Vec::with_capacity(records.len());
    for record in records {
        let (branch, secondary_dealer) = classify_record(record, secondary_dealers, rules);
        match (branch, secondary_dealer) {
            (DualDealerBranch::SecondaryOnly, Some(dealer)) => {
                output.push(retarget(record.clone(), dealer, rules));
            }
            (DualDealerBranch::SplitByMarker, Some(dealer)) => {
                output.push(filter_positions(record.clone(), &rules.primary_marker));
                let secondary = filter_positions(record.clone(), &rules.secondary_marker);
                output.push(retarget(secondary, dealer, rules));
            }
            (DualDealerBranch::Duplicate, Some(dealer)) => {
                output.push(record.clone());
                let secondary = append_marker(record.clone(), &rules.secondary_marker);
                output.push(retarget(secondary, dealer, rules));
            }
            _ => output.push(record.clone()),
        }
    }
    debug!(
        input = records.len(),
        output = output.len(),
        "dual-dealer split complete"
    );
    output
}

fn retarget(mut record: PersonnelRecord, dealer: &str, rules: &DualDealerRules) -> PersonnelRecord {
    record.company = rules.secondary_company.clone();
    record.dealer_name = dealer.to_string();
    record
}

fn filter_positions(mut record: PersonnelRecord, marker: &str) -> PersonnelRecord {
    record.main_position = join_values(
        split_values(&record.main_position).filter(|segment| segment.contains(marker)),
    );
    record
        .alternate_positions
        .retain(|position| position.contains(marker));
    record
}

fn append_marker(mut record: PersonnelRecord, marker: &str) -> PersonnelRecord {
    record.main_position = with_marker(&record.main_position, marker);
    record.alternate_positions = record
        .alternate_positions
        .iter()
        .map(|position| with_marker(position, marker))
        .collect();
    record
}

fn with_marker(position: &str, marker: &str) -> String {
    let position = position.trim();
    if position.contains(marker) {
        position.to_string()
    } else if position.is_empty() {
        marker.to_string()
    } else {
        format!("{position} {marker}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtc_model::MappingKind;
    use dtc_normalization::JOINER;

    fn smc_table() -> MappingTable {
        MappingTable::from_entries(MappingKind::BdcToSmc, [("1234", "سیبا مرکزی")])
    }

    fn bdc(main: &str, alternates: &[&str]) -> PersonnelRecord {
        PersonnelRecord::new("77", "رضا", "1234 نمایندگی", "bdc")
            .with_main_position(main)
            .with_alternate_positions(alternates.iter().copied())
    }

    fn split(record: &PersonnelRecord) -> Vec<PersonnelRecord> {
        split_dual_dealer_records(
            std::slice::from_ref(record),
            &smc_table(),
            &DualDealerRules::default(),
        )
    }

    #[test]
    fn other_company_passes_through() {
        let record =
            PersonnelRecord::new("1", "a", "1234 نمایندگی", "ikco").with_main_position("مکانیک");
        assert_eq!(split(&record), vec![record]);
    }

    #[test]
    fn unmapped_dealer_passes_through() {
        let mut record = bdc("مکانیک", &[]);
        record.dealer_name = "9999 دیگر".to_string();
        let table = smc_table();
        let (branch, dealer) = classify_record(&record, &table, &DualDealerRules::default());
        assert_eq!(branch, DualDealerBranch::PassThrough);
        assert!(dealer.is_none());
    }

    #[test]
    fn mapped_dealer_reports_secondary_name() {
        let record = bdc("مکانیک", &[]);
        let table = smc_table();
        let (branch, dealer) = classify_record(&record, &table, &DualDealerRules::default());
        assert_eq!(branch, DualDealerBranch::Duplicate);
        assert_eq!(dealer, Some("سیبا مرکزی"));
    }

    #[test]
    fn primary_marker_keeps_row() {
        let record = bdc("مکانیک دیزل", &[]);
        let output = split(&record);
        assert_eq!(output, vec![record]);
    }

    #[test]
    fn secondary_marker_retargets_row() {
        let record = bdc("مکانیک", &["پذیرش سیبا"]);
        let output = split(&record);
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].company, "smc");
        assert_eq!(output[0].dealer_name, "سیبا مرکزی");
        assert_eq!(output[0].main_position, "مکانیک");
        assert_eq!(output[0].alternate_positions, vec!["پذیرش سیبا"]);
    }

    #[test]
    fn both_markers_partition_positions() {
        let main = format!("مکانیک دیزل{JOINER}مکانیک سیبا");
        let record = bdc(&main, &["پذیرش سیبا", "انباردار دیزل"]);
        let output = split(&record);
        assert_eq!(output.len(), 2);

        assert_eq!(output[0].company, "bdc");
        assert_eq!(output[0].dealer_name, "1234 نمایندگی");
        assert_eq!(output[0].main_position, "مکانیک دیزل");
        assert_eq!(output[0].alternate_positions, vec!["انباردار دیزل"]);

        assert_eq!(output[1].company, "smc");
        assert_eq!(output[1].dealer_name, "سیبا مرکزی");
        assert_eq!(output[1].main_position, "مکانیک سیبا");
        assert_eq!(output[1].alternate_positions, vec!["پذیرش سیبا"]);

        assert!(output.iter().all(|row| row.personnel_code == "77"));
    }

    #[test]
    fn no_marker_duplicates_with_appended_marker() {
        let record = bdc("مکانیک", &["پذیرش", ""]);
        let output = split(&record);
        assert_eq!(output.len(), 2);
        assert_eq!(output[0], record);
        assert_eq!(output[1].company, "smc");
        assert_eq!(output[1].main_position, "مکانیک سیبا");
        assert_eq!(output[1].alternate_positions, vec!["پذیرش سیبا", "سیبا"]);
        assert_eq!(output[1].personnel_code, record.personnel_code);
    }

    #[test]
    fn empty_main_position_becomes_marker() {
        assert_eq!(with_marker("", "سیبا"), "سیبا");
        assert_eq!(with_marker("کارشناس سیبا", "سیبا"), "کارشناس سیبا");
    }
}
