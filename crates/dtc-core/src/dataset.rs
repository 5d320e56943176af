//! The in-memory snapshot every analysis reads from.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use tracing::{info, warn};

use dtc_ingest::{
    DealerTable, RequirementTables, load_dealer_table, load_personnel, load_requirement_tables,
};
use dtc_map::MappingSet;
use dtc_model::{
    DealerProfile, MappingKind, PersonnelRecord, RequirementRow, RequirementSource, dealer_code,
};

use crate::config::{AppConfig, DualDealerRules};
use crate::splitter::split_dual_dealer_records;

/// Row counts gathered while assembling a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Personnel rows as read, before dual-dealer splitting.
    pub source_rows: usize,
    pub personnel_rows: usize,
    /// Rows added by dual-dealer splitting.
    pub split_rows_added: usize,
    pub dealers: usize,
    pub after_sales_tables: usize,
    pub sales_tables: usize,
}

/// Raw values seen before renaming and splitting, kept for mapping discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceValues {
    pub dealer_names: BTreeSet<String>,
    /// Dealer codes of primary-company rows.
    pub primary_dealer_codes: BTreeSet<String>,
}

/// Personnel, dealer profiles and requirement tables after loading.
///
/// Immutable once built; reloading produces a new dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    personnel: Vec<PersonnelRecord>,
    dealers: BTreeMap<String, DealerProfile>,
    categories: Vec<String>,
    after_sales: RequirementTables,
    sales: RequirementTables,
    source_values: SourceValues,
    stats: LoadStats,
}

impl Dataset {
    /// Reads every input table under the configured resource directory.
    ///
    /// A table that cannot be read is logged and treated as empty.
    pub fn load(config: &AppConfig, mappings: &MappingSet) -> Self {
        let started = Instant::now();
        let personnel_path = config.personnel_path();
        let personnel = load_personnel(&personnel_path).unwrap_or_else(|error| {
            warn!(path = %personnel_path.display(), %error, "personnel table unavailable");
            Vec::new()
        });
        let dealers_path = config.dealers_path();
        let dealers = load_dealer_table(&dealers_path).unwrap_or_else(|error| {
            warn!(path = %dealers_path.display(), %error, "dealer table unavailable");
            DealerTable::default()
        });
        let after_sales = requirement_tables(config, RequirementSource::AfterSales);
        let sales = requirement_tables(config, RequirementSource::Sales);

        let dataset = Self::from_parts(
            personnel,
            dealers,
            after_sales,
            sales,
            mappings,
            &config.dual_dealer,
        );
        let stats = dataset.stats;
        info!(
            source_rows = stats.source_rows,
            personnel = stats.personnel_rows,
            split_rows_added = stats.split_rows_added,
            dealers = stats.dealers,
            after_sales_tables = stats.after_sales_tables,
            sales_tables = stats.sales_tables,
            duration_ms = started.elapsed().as_millis() as u64,
            "dataset loaded"
        );
        dataset
    }

    /// Assembles a dataset from already-loaded tables.
    ///
    /// The dealer rename table is applied before dual-dealer splitting.
    pub fn from_parts(
        personnel: Vec<PersonnelRecord>,
        dealers: DealerTable,
        after_sales: RequirementTables,
        sales: RequirementTables,
        mappings: &MappingSet,
        rules: &DualDealerRules,
    ) -> Self {
        let mut source_values = SourceValues::default();
        let renames = mappings.table(MappingKind::DealerRename);
        let renamed: Vec<PersonnelRecord> = personnel
            .into_iter()
            .map(|mut record| {
                source_values
                    .dealer_names
                    .insert(record.dealer_name.clone());
                let renamed = renames.lookup(&record.dealer_name).to_string();
                record.dealer_name = renamed;
                if rules.is_primary_company(&record.company) {
                    source_values
                        .primary_dealer_codes
                        .insert(dealer_code(&record.dealer_name).to_string());
                }
                record
            })
            .collect();
        let personnel =
            split_dual_dealer_records(&renamed, mappings.table(MappingKind::BdcToSmc), rules);

        let mut profiles = BTreeMap::new();
        for profile in dealers.profiles {
            profiles
                .entry(profile.dealer_code.clone())
                .or_insert(profile);
        }

        let stats = LoadStats {
            source_rows: renamed.len(),
            personnel_rows: personnel.len(),
            split_rows_added: personnel.len().saturating_sub(renamed.len()),
            dealers: profiles.len(),
            after_sales_tables: after_sales.len(),
            sales_tables: sales.len(),
        };
        Self {
            personnel,
            dealers: profiles,
            categories: dealers.categories,
            after_sales,
            sales,
            source_values,
            stats,
        }
    }

    pub fn personnel(&self) -> &[PersonnelRecord] {
        &self.personnel
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    pub fn source_values(&self) -> &SourceValues {
        &self.source_values
    }

    /// Every category label of the dealer table, in column order.
    pub fn category_labels(&self) -> &[String] {
        &self.categories
    }

    /// Sorted, unique dealer names of the personnel table.
    pub fn dealer_names(&self) -> Vec<&str> {
        self.personnel
            .iter()
            .map(|record| record.dealer_name.as_str())
            .filter(|name| !name.trim().is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn personnel_for_dealer<'a>(
        &'a self,
        dealer_name: &'a str,
    ) -> impl Iterator<Item = &'a PersonnelRecord> + 'a {
        self.personnel
            .iter()
            .filter(move |record| record.dealer_name == dealer_name)
    }

    pub fn dealer_profile(&self, dealer_name: &str) -> Option<&DealerProfile> {
        self.dealers.get(dealer_code(dealer_name))
    }

    pub fn dealer_profiles(&self) -> impl Iterator<Item = &DealerProfile> {
        self.dealers.values()
    }

    /// Raw authorized category labels of a dealer; empty when unknown.
    pub fn dealer_categories(&self, dealer_name: &str) -> &[String] {
        self.dealer_profile(dealer_name)
            .map_or(&[][..], |profile| profile.authorized_categories.as_slice())
    }

    pub fn requirement_tables(&self, source: RequirementSource) -> &RequirementTables {
        match source {
            RequirementSource::AfterSales => &self.after_sales,
            RequirementSource::Sales => &self.sales,
        }
    }

    /// Requirement rows of one company, or `None` when it has no table.
    pub fn requirement_rows(
        &self,
        source: RequirementSource,
        company: &str,
    ) -> Option<&[RequirementRow]> {
        self.requirement_tables(source)
            .get(company)
            .map(Vec::as_slice)
    }
}

fn requirement_tables(config: &AppConfig, source: RequirementSource) -> RequirementTables {
    let dir = match source {
        RequirementSource::AfterSales => config.after_sales_dir(),
        RequirementSource::Sales => config.sales_dir(),
    };
    load_requirement_tables(&dir, source).unwrap_or_else(|error| {
        warn!(dir = %dir.display(), %source, %error, "requirement tables unavailable");
        RequirementTables::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtc_map::MappingTable;

    fn record(code: &str, dealer: &str, company: &str, position: &str) -> PersonnelRecord {
        PersonnelRecord::new(code, "نام", dealer, company).with_main_position(position)
    }

    fn dealer_table() -> DealerTable {
        DealerTable {
            categories: vec!["پژو".to_string(), "دنا".to_string()],
            profiles: vec![
                DealerProfile {
                    dealer_code: "1234".to_string(),
                    dealer_name: None,
                    authorized_categories: vec!["پژو".to_string()],
                },
                DealerProfile {
                    dealer_code: "1234".to_string(),
                    dealer_name: None,
                    authorized_categories: vec!["دنا".to_string()],
                },
            ],
        }
    }

    #[test]
    fn rename_applies_before_split() {
        let mappings = MappingSet::new()
            .with_table(MappingTable::from_entries(
                MappingKind::DealerRename,
                [("قدیمی", "1234 نمایندگی")],
            ))
            .with_table(MappingTable::from_entries(
                MappingKind::BdcToSmc,
                [("1234", "5678 سیبا")],
            ));
        let dataset = Dataset::from_parts(
            vec![record("1", "قدیمی", "bdc", "مکانیک")],
            dealer_table(),
            RequirementTables::new(),
            RequirementTables::new(),
            &mappings,
            &DualDealerRules::default(),
        );
        assert_eq!(dataset.dealer_names(), vec!["1234 نمایندگی", "5678 سیبا"]);
        assert_eq!(dataset.stats().source_rows, 1);
        assert_eq!(dataset.stats().personnel_rows, 2);
        assert_eq!(dataset.stats().split_rows_added, 1);
        assert!(dataset.source_values().dealer_names.contains("قدیمی"));
        assert!(dataset.source_values().primary_dealer_codes.contains("1234"));
    }

    #[test]
    fn first_profile_per_code_wins() {
        let dataset = Dataset::from_parts(
            Vec::new(),
            dealer_table(),
            RequirementTables::new(),
            RequirementTables::new(),
            &MappingSet::new(),
            &DualDealerRules::default(),
        );
        assert_eq!(dataset.dealer_categories("1234 هر نام"), ["پژو".to_string()]);
        assert!(dataset.dealer_categories("0000 ناشناس").is_empty());
        assert_eq!(dataset.stats().dealers, 1);
    }
}
