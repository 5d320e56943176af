//! Discovery of raw values that mapping tables should cover.

use std::collections::BTreeSet;

use dtc_map::{MappingSet, Suggestion, suggest_standard};
use dtc_model::{MappingKind, RequirementSource};

use crate::dataset::Dataset;

#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyEntry {
    pub raw: String,
    /// Current standardized value, if the table has one.
    pub mapped: Option<String>,
    /// Closest standard candidate for an unmapped value.
    pub suggestion: Option<Suggestion>,
}

impl VocabularyEntry {
    pub fn is_mapped(&self) -> bool {
        self.mapped.is_some()
    }

    /// Case-insensitive substring match on the raw value.
    pub fn matches(&self, filter: &str) -> bool {
        self.raw.to_lowercase().contains(&filter.to_lowercase())
    }
}

/// Raw values of one mapping kind together with the standard candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingVocabulary {
    pub kind: MappingKind,
    pub entries: Vec<VocabularyEntry>,
    pub standards: BTreeSet<String>,
}

impl MappingVocabulary {
    pub fn unmapped(&self) -> impl Iterator<Item = &VocabularyEntry> {
        self.entries.iter().filter(|entry| !entry.is_mapped())
    }

    /// Keeps entries whose raw value contains `filter`; a blank filter keeps all.
    pub fn filtered(mut self, filter: &str) -> Self {
        let filter = filter.trim();
        if !filter.is_empty() {
            self.entries.retain(|entry| entry.matches(filter));
        }
        self
    }
}

/// Builds the vocabulary of `kind` from the loaded dataset.
pub fn mapping_vocabulary(
    dataset: &Dataset,
    mappings: &MappingSet,
    kind: MappingKind,
) -> MappingVocabulary {
    let raw_values = raw_values(dataset, kind);
    let standards = standard_values(dataset, kind);
    let table = mappings.table(kind);
    let entries = raw_values
        .into_iter()
        .map(|raw| {
            let mapped = table.get(&raw).map(str::to_string);
            let suggestion = match mapped {
                Some(_) => None,
                None => suggest_standard(&raw, standards.iter().map(String::as_str)),
            };
            VocabularyEntry {
                raw,
                mapped,
                suggestion,
            }
        })
        .collect();
    MappingVocabulary {
        kind,
        entries,
        standards,
    }
}

fn raw_values(dataset: &Dataset, kind: MappingKind) -> BTreeSet<String> {
    let personnel = dataset.personnel();
    let values: BTreeSet<String> = match kind {
        MappingKind::Position => personnel
            .iter()
            .flat_map(|record| {
                std::iter::once(record.main_position.as_str())
                    .chain(record.alternate_positions.iter().map(String::as_str))
            })
            .map(|value| value.trim().to_string())
            .collect(),
        MappingKind::Vehicle => dataset.category_labels().iter().cloned().collect(),
        MappingKind::Company => personnel
            .iter()
            .map(|record| record.company.trim().to_string())
            .collect(),
        MappingKind::Course => personnel
            .iter()
            .flat_map(|record| record.passed_courses.iter().cloned())
            .collect(),
        MappingKind::DealerRename => dataset.source_values().dealer_names.clone(),
        MappingKind::BdcToSmc => dataset.source_values().primary_dealer_codes.clone(),
    };
    values.into_iter().filter(|value| !value.is_empty()).collect()
}

fn standard_values(dataset: &Dataset, kind: MappingKind) -> BTreeSet<String> {
    let rows = move || {
        RequirementSource::ALL
            .into_iter()
            .flat_map(move |source| dataset.requirement_tables(source).values().flatten())
    };
    let values: BTreeSet<String> = match kind {
        MappingKind::Position => rows().map(|row| row.job_post.trim().to_string()).collect(),
        MappingKind::Vehicle => dataset
            .requirement_tables(RequirementSource::AfterSales)
            .values()
            .flatten()
            .map(|row| row.vehicle_or_general().to_string())
            .collect(),
        MappingKind::Company => RequirementSource::ALL
            .into_iter()
            .flat_map(|source| dataset.requirement_tables(source).keys().cloned())
            .collect(),
        MappingKind::Course => rows().map(|row| row.course.trim().to_string()).collect(),
        MappingKind::DealerRename | MappingKind::BdcToSmc => dataset
            .dealer_profiles()
            .filter_map(|profile| profile.dealer_name.clone())
            .collect(),
    };
    values.into_iter().filter(|value| !value.is_empty()).collect()
}
