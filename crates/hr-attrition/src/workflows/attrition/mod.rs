pub mod aggregation;
pub mod cleaning;
pub mod domain;
pub mod export;
pub mod features;
pub mod import;
pub mod merge;
mod pipeline;
pub mod report;
pub mod risk;
pub mod stats;
mod store;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aggregation::{GroupRate, RateTable};
pub use cleaning::{CleanedDataset, CleaningError, QualityReport, TableQuality};
pub use domain::{
    AttritionStatus, Employee, EmployeeId, ExitSurvey, PerformanceReview, RecordDate, TableKind,
};
pub use export::{ExportError, ExportedFiles};
pub use features::{EmployeeFeatures, FeatureTable};
pub use import::{DatasetImporter, ImportError, RawDataset};
pub use merge::MergedEmployee;
pub use pipeline::{AttritionPipeline, PipelineOutput};
pub use report::{AttritionReport, DatasetSummary};
pub use risk::{RiskAssessment, RiskRanking};
pub use store::RecordStore;
