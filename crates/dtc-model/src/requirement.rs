//! Training requirements and the per-analysis requirement index.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Vehicle category every dealer is implicitly authorized for.
pub const GENERAL_CATEGORY: &str = "عمومی";

/// Fixed pseudo-category all sales requirements are grouped under.
pub const SALES_CATEGORY: &str = "فروش";

/// Origin of a requirement; each source is reported separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementSource {
    AfterSales,
    Sales,
}

impl RequirementSource {
    pub const ALL: [RequirementSource; 2] =
        [RequirementSource::AfterSales, RequirementSource::Sales];

    /// Short machine key.
    pub fn key(self) -> &'static str {
        match self {
            Self::AfterSales => "after",
            Self::Sales => "sales",
        }
    }

    /// Display label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::AfterSales => "خدمات پس از فروش",
            Self::Sales => "فروش",
        }
    }
}

impl fmt::Display for RequirementSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One row of a per-company requirement table.
///
/// `vehicle` is only meaningful for after-sales tables; `None` means the row
/// applies to the general category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementRow {
    pub job_post: String,
    pub vehicle: Option<String>,
    pub criterion: String,
    pub course: String,
}

impl RequirementRow {
    pub fn new(
        job_post: impl Into<String>,
        vehicle: Option<&str>,
        criterion: impl Into<String>,
        course: impl Into<String>,
    ) -> Self {
        Self {
            job_post: job_post.into(),
            vehicle: vehicle.map(str::to_string),
            criterion: criterion.into(),
            course: course.into(),
        }
    }

    /// Vehicle category with the general fallback applied.
    pub fn vehicle_or_general(&self) -> &str {
        match self.vehicle.as_deref().map(str::trim) {
            Some(vehicle) if !vehicle.is_empty() => vehicle,
            _ => GENERAL_CATEGORY,
        }
    }
}

/// Fully qualified criterion identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequirementKey {
    pub source: RequirementSource,
    pub category: String,
    pub criterion: String,
}

impl RequirementKey {
    pub fn new(
        source: RequirementSource,
        category: impl Into<String>,
        criterion: impl Into<String>,
    ) -> Self {
        Self {
            source,
            category: category.into(),
            criterion: criterion.into(),
        }
    }
}

/// Criteria of one (source, category) group and their acceptable courses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    criteria: BTreeMap<String, Vec<String>>,
}

impl CategoryGroup {
    pub fn push_course(&mut self, criterion: impl Into<String>, course: impl Into<String>) {
        self.criteria
            .entry(criterion.into())
            .or_default()
            .push(course.into());
    }

    pub fn courses(&self, criterion: &str) -> Option<&[String]> {
        self.criteria.get(criterion).map(Vec::as_slice)
    }

    pub fn criteria(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.criteria
            .iter()
            .map(|(name, courses)| (name.as_str(), courses.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

/// Applicable criteria grouped by source, then vehicle category.
///
/// Built fresh for every analysis. A criterion only exists once at least one
/// acceptable course was collected for it, so course lists are never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementIndex {
    sources: BTreeMap<RequirementSource, BTreeMap<String, CategoryGroup>>,
}

impl RequirementIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an acceptable course to a criterion, creating the groups on demand.
    pub fn push(
        &mut self,
        source: RequirementSource,
        category: impl Into<String>,
        criterion: impl Into<String>,
        course: impl Into<String>,
    ) {
        self.sources
            .entry(source)
            .or_default()
            .entry(category.into())
            .or_default()
            .push_course(criterion, course);
    }

    /// Category groups of one source, or `None` when the source has no criteria.
    pub fn source(&self, source: RequirementSource) -> Option<&BTreeMap<String, CategoryGroup>> {
        self.sources.get(&source)
    }

    pub fn group(&self, source: RequirementSource, category: &str) -> Option<&CategoryGroup> {
        self.sources.get(&source)?.get(category)
    }

    pub fn courses(&self, key: &RequirementKey) -> Option<&[String]> {
        self.group(key.source, &key.category)?.courses(&key.criterion)
    }

    /// Every (source, category, group) triple in key order.
    pub fn groups(&self) -> impl Iterator<Item = (RequirementSource, &str, &CategoryGroup)> {
        self.sources.iter().flat_map(|(source, categories)| {
            categories
                .iter()
                .map(move |(category, group)| (*source, category.as_str(), group))
        })
    }

    /// Every criterion with its key and acceptable courses, in key order.
    pub fn entries(&self) -> impl Iterator<Item = (RequirementKey, &[String])> {
        self.groups().flat_map(|(source, category, group)| {
            group.criteria().map(move |(criterion, courses)| {
                (RequirementKey::new(source, category, criterion), courses)
            })
        })
    }

    /// Number of criteria applicable under one source.
    pub fn criteria_count(&self, source: RequirementSource) -> usize {
        self.source(source)
            .map(|categories| categories.values().map(CategoryGroup::len).sum())
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        RequirementSource::ALL
            .into_iter()
            .map(|source| self.criteria_count(source))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_groups_courses_in_source_order() {
        let mut index = RequirementIndex::new();
        index.push(RequirementSource::AfterSales, "عمومی", "x", "b");
        index.push(RequirementSource::AfterSales, "عمومی", "x", "a");
        index.push(RequirementSource::AfterSales, "عمومی", "x", "b");
        index.push(RequirementSource::Sales, SALES_CATEGORY, "y", "c");

        let key = RequirementKey::new(RequirementSource::AfterSales, "عمومی", "x");
        assert_eq!(
            index.courses(&key),
            Some(&["b".to_string(), "a".to_string(), "b".to_string()][..])
        );
        assert_eq!(index.criteria_count(RequirementSource::AfterSales), 1);
        assert_eq!(index.criteria_count(RequirementSource::Sales), 1);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn vehicle_defaults_to_general() {
        let row = RequirementRow::new("p", Some("  "), "c", "k");
        assert_eq!(row.vehicle_or_general(), GENERAL_CATEGORY);
        let row = RequirementRow::new("p", None, "c", "k");
        assert_eq!(row.vehicle_or_general(), GENERAL_CATEGORY);
        let row = RequirementRow::new("p", Some("پژو"), "c", "k");
        assert_eq!(row.vehicle_or_general(), "پژو");
    }
}
