//! Per-person training analysis over a loaded dataset.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, trace};

use dtc_map::MappingSet;
use dtc_model::{
    AnalysisResult, MappingKind, NO_POSITION_PLACEHOLDER, PersonnelRecord, RequirementSource,
    RosterEntry, dealer_code,
};

use crate::dataset::Dataset;
use crate::requirements::{RequirementQuery, build_requirement_index};
use crate::rules::{RuleTable, evaluate_pass_status};

/// Read-only facade combining a dataset, a mapping snapshot and the rule table.
///
/// Every query is a pure computation; absent data yields `None` or an empty
/// collection.
#[derive(Debug, Clone, Copy)]
pub struct TrainingAnalyzer<'a> {
    dataset: &'a Dataset,
    mappings: &'a MappingSet,
    rules: &'a RuleTable,
}

/// A distinct (person, position) pair at one dealer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PersonPosition<'a> {
    pub personnel_code: &'a str,
    pub name: &'a str,
    pub position: &'a str,
}

impl<'a> TrainingAnalyzer<'a> {
    pub fn new(dataset: &'a Dataset, mappings: &'a MappingSet, rules: &'a RuleTable) -> Self {
        Self {
            dataset,
            mappings,
            rules,
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn mappings(&self) -> &'a MappingSet {
        self.mappings
    }

    /// Analyzes one person in one raw position at one dealer.
    ///
    /// Passed courses are gathered from every record of the person at that
    /// dealer. Returns `None` when no record matches.
    pub fn analyze(
        &self,
        personnel_code: &str,
        dealer_name: &str,
        position: &str,
    ) -> Option<AnalysisResult> {
        let records: Vec<&PersonnelRecord> = self
            .dataset
            .personnel_for_dealer(dealer_name)
            .filter(|record| record.personnel_code == personnel_code)
            .collect();
        let Some(first) = records.first() else {
            debug!(dealer = %dealer_name, "no personnel rows for analysis");
            return None;
        };

        let mappings = self.mappings;
        let company = mappings.lookup(MappingKind::Company, first.company.trim());
        let standard_position = mappings.lookup(MappingKind::Position, position.trim());
        let categories: Vec<String> = self
            .dataset
            .dealer_categories(dealer_name)
            .iter()
            .map(|category| mappings.lookup(MappingKind::Vehicle, category).to_string())
            .collect();
        let passed_courses: BTreeSet<String> = records
            .iter()
            .flat_map(|record| record.passed_courses.iter())
            .map(|course| mappings.lookup(MappingKind::Course, course).to_string())
            .collect();

        let dataset = self.dataset;
        let requirements = build_requirement_index(
            RequirementQuery {
                position: standard_position,
                categories: &categories,
            },
            dataset.requirement_rows(RequirementSource::AfterSales, company),
            dataset.requirement_rows(RequirementSource::Sales, company),
        );
        let statuses = evaluate_pass_status(&requirements, &passed_courses, self.rules);
        trace!(
            company = %company,
            position = %standard_position,
            criteria = requirements.len(),
            "analysis complete"
        );

        Some(AnalysisResult {
            personnel_code: personnel_code.to_string(),
            name: first.full_name.clone(),
            position: position.trim().to_string(),
            dealer_name: dealer_name.to_string(),
            passed_courses,
            requirements,
            statuses,
        })
    }

    /// Whether a raw position has an entry in the position mapping.
    pub fn is_mapped_position(&self, position: &str) -> bool {
        self.mappings.contains(MappingKind::Position, position.trim())
    }

    /// One entry per distinct (name, position, code) at a dealer.
    ///
    /// A record without any position yields a single placeholder entry.
    pub fn roster(&self, dealer_name: &str) -> Vec<RosterEntry> {
        let code = dealer_code(dealer_name).to_string();
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for record in self.dataset.personnel_for_dealer(dealer_name) {
            let mut positions = record.positions();
            if positions.is_empty() {
                positions.push(NO_POSITION_PLACEHOLDER);
            }
            for position in positions {
                let key = (
                    record.full_name.as_str(),
                    position,
                    record.personnel_code.as_str(),
                );
                if !seen.insert(key) {
                    continue;
                }
                entries.push(RosterEntry {
                    dealer_code: code.clone(),
                    name: record.full_name.clone(),
                    position: position.to_string(),
                    personnel_code: record.personnel_code.clone(),
                    selectable: self.is_mapped_position(position),
                });
            }
        }
        entries
    }

    /// Distinct (code, position) pairs at a dealer whose position is mapped.
    pub(crate) fn mapped_positions<'s>(&'s self, dealer_name: &'s str) -> Vec<PersonPosition<'s>> {
        let mut seen = HashSet::new();
        let mut pairs = Vec::new();
        for record in self.dataset.personnel_for_dealer(dealer_name) {
            for position in record.positions() {
                if !self.is_mapped_position(position) {
                    continue;
                }
                if seen.insert((record.personnel_code.as_str(), position)) {
                    pairs.push(PersonPosition {
                        personnel_code: &record.personnel_code,
                        name: &record.full_name,
                        position,
                    });
                }
            }
        }
        pairs
    }
}
