//! Mapping tables and the set of all tables used by one analysis.

use std::collections::BTreeMap;

use dtc_model::MappingKind;

/// Raw label to standardized label, for one mapping kind.
///
/// Lookups never fail: a raw value without an entry maps to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    kind: MappingKind,
    entries: BTreeMap<String, String>,
}

impl MappingTable {
    pub fn new(kind: MappingKind) -> Self {
        Self {
            kind,
            entries: BTreeMap::new(),
        }
    }

    /// Builds a table from pairs; later duplicates of a key replace earlier ones.
    pub fn from_entries<I, K, V>(kind: MappingKind, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new(kind);
        for (raw, standard) in entries {
            table.insert(raw, standard);
        }
        table
    }

    pub fn kind(&self) -> MappingKind {
        self.kind
    }

    /// Standardized value for `raw`, or `raw` itself when unmapped.
    pub fn lookup<'a>(&'a self, raw: &'a str) -> &'a str {
        self.entries.get(raw).map_or(raw, String::as_str)
    }

    pub fn get(&self, raw: &str) -> Option<&str> {
        self.entries.get(raw).map(String::as_str)
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.entries.contains_key(raw)
    }

    /// Adds or replaces an entry. Blank keys or values are ignored.
    pub fn insert(&mut self, raw: impl Into<String>, standard: impl Into<String>) -> bool {
        let raw = raw.into().trim().to_string();
        let standard = standard.into().trim().to_string();
        if raw.is_empty() || standard.is_empty() {
            return false;
        }
        self.entries.insert(raw, standard);
        true
    }

    pub fn remove(&mut self, raw: &str) -> Option<String> {
        self.entries.remove(raw)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(raw, standard)| (raw.as_str(), standard.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One table per [`MappingKind`]; every kind is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSet {
    position: MappingTable,
    vehicle: MappingTable,
    company: MappingTable,
    course: MappingTable,
    dealer_rename: MappingTable,
    bdc_to_smc: MappingTable,
}

impl Default for MappingSet {
    fn default() -> Self {
        Self::new()
    }
}

impl MappingSet {
    pub fn new() -> Self {
        Self {
            position: MappingTable::new(MappingKind::Position),
            vehicle: MappingTable::new(MappingKind::Vehicle),
            company: MappingTable::new(MappingKind::Company),
            course: MappingTable::new(MappingKind::Course),
            dealer_rename: MappingTable::new(MappingKind::DealerRename),
            bdc_to_smc: MappingTable::new(MappingKind::BdcToSmc),
        }
    }

    pub fn table(&self, kind: MappingKind) -> &MappingTable {
        match kind {
            MappingKind::Position => &self.position,
            MappingKind::Vehicle => &self.vehicle,
            MappingKind::Company => &self.company,
            MappingKind::Course => &self.course,
            MappingKind::DealerRename => &self.dealer_rename,
            MappingKind::BdcToSmc => &self.bdc_to_smc,
        }
    }

    fn table_mut(&mut self, kind: MappingKind) -> &mut MappingTable {
        match kind {
            MappingKind::Position => &mut self.position,
            MappingKind::Vehicle => &mut self.vehicle,
            MappingKind::Company => &mut self.company,
            MappingKind::Course => &mut self.course,
            MappingKind::DealerRename => &mut self.dealer_rename,
            MappingKind::BdcToSmc => &mut self.bdc_to_smc,
        }
    }

    pub fn lookup<'a>(&'a self, kind: MappingKind, raw: &'a str) -> &'a str {
        self.table(kind).lookup(raw)
    }

    pub fn contains(&self, kind: MappingKind, raw: &str) -> bool {
        self.table(kind).contains(raw)
    }

    /// Replaces the table of the table's own kind.
    pub fn with_table(mut self, table: MappingTable) -> Self {
        let kind = table.kind();
        *self.table_mut(kind) = table;
        self
    }

    pub fn tables(&self) -> impl Iterator<Item = &MappingTable> {
        MappingKind::ALL.into_iter().map(|kind| self.table(kind))
    }
}
