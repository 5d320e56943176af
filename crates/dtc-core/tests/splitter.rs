use dtc_core::{DualDealerRules, split_dual_dealer_records};
use dtc_map::MappingTable;
use dtc_model::{MappingKind, PersonnelRecord};
use proptest::prelude::*;

fn secondary_dealers() -> MappingTable {
    MappingTable::from_entries(MappingKind::BdcToSmc, [("1234", "4321 سیبا")])
}

proptest! {
    #[test]
    fn unmarked_primary_rows_are_duplicated(
        code in "[0-9]{1,6}",
        main in "[a-z ]{0,12}",
        alternates in prop::collection::vec("[a-z]{1,8}", 0..4),
    ) {
        let rules = DualDealerRules::default();
        let record = PersonnelRecord::new(code.clone(), "name", "1234 dealer", "bdc")
            .with_main_position(main)
            .with_alternate_positions(alternates.clone());
        let output = split_dual_dealer_records(&[record.clone()], &secondary_dealers(), &rules);

        prop_assert_eq!(output.len(), 2);
        prop_assert_eq!(&output[0], &record);
        prop_assert!(output.iter().all(|row| row.personnel_code == code));
        let secondary = &output[1];
        prop_assert_eq!(secondary.company.as_str(), "smc");
        prop_assert_eq!(secondary.dealer_name.as_str(), "4321 سیبا");
        prop_assert!(secondary.main_position.contains(&rules.secondary_marker));
        prop_assert_eq!(secondary.alternate_positions.len(), alternates.len());
        prop_assert!(
            secondary
                .alternate_positions
                .iter()
                .all(|position| position.contains(&rules.secondary_marker))
        );
    }

    #[test]
    fn other_companies_pass_through(
        company in "[a-z]{1,6}",
        main in "[a-z ]{0,12}",
    ) {
        prop_assume!(company != "bdc");
        let record = PersonnelRecord::new("1", "name", "1234 dealer", company)
            .with_main_position(main);
        let output = split_dual_dealer_records(
            &[record.clone()],
            &secondary_dealers(),
            &DualDealerRules::default(),
        );
        prop_assert_eq!(output, vec![record]);
    }
}

#[test]
fn marked_segments_are_partitioned_between_companies() {
    let rules = DualDealerRules::default();
    let record = PersonnelRecord::new("9", "name", "1234 dealer", "bdc")
        .with_main_position("تکنسین دیزل&&&تکنسین سیبا&&&مدیر")
        .with_alternate_positions(["مشاور سیبا"]);
    let output = split_dual_dealer_records(&[record], &secondary_dealers(), &rules);

    assert_eq!(output.len(), 2);
    assert_eq!(output[0].main_position, "تکنسین دیزل");
    assert!(output[0].alternate_positions.is_empty());
    assert_eq!(output[1].main_position, "تکنسین سیبا");
    assert_eq!(output[1].alternate_positions, vec!["مشاور سیبا"]);
    assert_eq!(output[0].personnel_code, output[1].personnel_code);
}
