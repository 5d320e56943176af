pub mod analysis;
pub mod dealer;
pub mod error;
pub mod mapping;
pub mod personnel;
pub mod requirement;

pub use analysis::{
    AnalysisResult, CriterionStatus, ExportRow, PassBasis, PassReason, PassStatusMap, Progress,
    RosterEntry, SummaryRow,
};
pub use dealer::{DealerProfile, dealer_code};
pub use error::{ModelError, Result};
pub use mapping::MappingKind;
pub use personnel::{NO_POSITION_PLACEHOLDER, PersonnelRecord};
pub use requirement::{
    CategoryGroup, GENERAL_CATEGORY, RequirementIndex, RequirementKey, RequirementRow,
    RequirementSource, SALES_CATEGORY,
};
