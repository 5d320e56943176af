use std::fs;

use dtc_core::{Dataset, DualDealerRules, RuleTable, TrainingAnalyzer};
use dtc_ingest::{DealerTable, RequirementTables};
use dtc_map::{MappingSet, MappingTable};
use dtc_model::{MappingKind, PersonnelRecord, RequirementRow};
use dtc_report::{EXPORT_HEADERS, export_all, export_dealer};

fn dataset(mappings: &MappingSet) -> Dataset {
    let mut after = RequirementTables::new();
    after.insert(
        "bdc".to_string(),
        vec![
            RequirementRow::new("مکانیک", None, "ایمنی", "دورهایمنی"),
            RequirementRow::new("مکانیک", None, "خودروهای گازسوز", "دورهگاز"),
        ],
    );
    let mut sales = RequirementTables::new();
    sales.insert(
        "bdc".to_string(),
        vec![RequirementRow::new("مکانیک", None, "فن بیان", "دورهبیان")],
    );
    Dataset::from_parts(
        vec![
            PersonnelRecord::new("1", "علی", "1234 - شعبه شرق", "bdc")
                .with_main_position("مکانیک")
                .with_passed_course("دورهایمنی"),
            PersonnelRecord::new("2", "سارا", "1234 - شعبه شرق", "bdc")
                .with_main_position("انباردار"),
            PersonnelRecord::new("3", "رضا", "5678 - شعبه غرب", "bdc")
                .with_main_position("مکانیک"),
        ],
        DealerTable::default(),
        after,
        sales,
        mappings,
        &DualDealerRules::default(),
    )
}

fn mappings() -> MappingSet {
    MappingSet::new().with_table(MappingTable::from_entries(
        MappingKind::Position,
        [("مکانیک", "مکانیک")],
    ))
}

#[test]
fn dealer_export_lists_every_criterion() {
    let mappings = mappings();
    let dataset = dataset(&mappings);
    let rules = RuleTable::default();
    let analyzer = TrainingAnalyzer::new(&dataset, &mappings, &rules);
    let dir = tempfile::tempdir().expect("temp dir");

    let path = export_dealer(&analyzer, "1234 - شعبه شرق", &dir.path().join("out"))
        .expect("export dealer");
    assert_eq!(path.file_name().and_then(|name| name.to_str()), Some("شعبه شرق.csv"));

    let contents = fs::read_to_string(&path).expect("read export");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], EXPORT_HEADERS.join(","));
    // The unmapped انباردار position is left out; علی has three criteria.
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().skip(1).all(|line| line.contains("علی")));
    assert!(
        contents.contains("1234 - شعبه شرق,علی,مکانیک,ایمنی,خدمات پس از فروش,عمومی,بله,دورهایمنی")
    );
    assert!(contents.contains("گازسوز (معاف)"));
    assert!(contents.contains("فروش,فروش,خیر,گذرانده نشده"));
}

#[test]
fn export_all_writes_one_file_per_dealer() {
    let mappings = mappings();
    let dataset = dataset(&mappings);
    let rules = RuleTable::default();
    let analyzer = TrainingAnalyzer::new(&dataset, &mappings, &rules);
    let dir = tempfile::tempdir().expect("temp dir");

    let paths = export_all(&analyzer, dir.path()).expect("export all");
    let names: Vec<_> = paths
        .iter()
        .filter_map(|path| path.file_name().and_then(|name| name.to_str()))
        .collect();
    assert_eq!(names, vec!["شعبه شرق.csv", "شعبه غرب.csv"]);
    assert!(paths.iter().all(|path| path.is_file()));
}
