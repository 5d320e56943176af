//! Mapping table kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The independent raw-to-standard vocabularies a user maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingKind {
    /// Personnel job titles to requirement-table job posts.
    Position,
    /// Dealer category-flag headers to requirement-table vehicle names.
    Vehicle,
    /// Personnel company values to requirement-table sheet names.
    Company,
    /// Passed course titles to requirement-table course titles.
    Course,
    /// Raw dealer names to standardized dealer names.
    DealerRename,
    /// Dealer codes of the primary company to the secondary company's dealer name.
    BdcToSmc,
}

impl MappingKind {
    pub const ALL: [MappingKind; 6] = [
        MappingKind::Position,
        MappingKind::Vehicle,
        MappingKind::Company,
        MappingKind::Course,
        MappingKind::DealerRename,
        MappingKind::BdcToSmc,
    ];

    /// File name the table is persisted under inside the mapping directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Position => "position_mapping.csv",
            Self::Vehicle => "car_mapping.csv",
            Self::Company => "company_mapping.csv",
            Self::Course => "course_mapping.csv",
            Self::DealerRename => "dealer_mapping.csv",
            Self::BdcToSmc => "bdc_smc_mapping.csv",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Vehicle => "vehicle",
            Self::Company => "company",
            Self::Course => "course",
            Self::DealerRename => "dealer-rename",
            Self::BdcToSmc => "bdc-to-smc",
        }
    }
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MappingKind {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == key)
            .ok_or_else(|| ModelError::UnknownMappingKind(value.to_string()))
    }
}
