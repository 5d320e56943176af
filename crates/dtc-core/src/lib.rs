#![deny(unsafe_code)]

pub mod analyzer;
pub mod config;
pub mod dataset;
pub mod export;
pub mod requirements;
pub mod rules;
pub mod splitter;
pub mod summary;
pub mod vocabulary;

pub use analyzer::TrainingAnalyzer;
pub use config::{AppConfig, ConfigError, DualDealerRules};
pub use dataset::{Dataset, LoadStats, SourceValues};
pub use export::export_rows;
pub use requirements::{RequirementQuery, build_requirement_index};
pub use rules::{CriterionRule, RuleEffect, RuleTable, evaluate_pass_status};
pub use splitter::{DualDealerBranch, classify_record, split_dual_dealer_records};
pub use summary::{DealerOverview, OverviewTable};
pub use vocabulary::{MappingVocabulary, VocabularyEntry, mapping_vocabulary};
