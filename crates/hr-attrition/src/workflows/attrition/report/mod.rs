mod insights;
mod summary;
pub mod views;

pub use summary::AttritionReport;
pub use views::{DatasetSummary, ExecutiveSummary, Priority, Recommendation};

pub(crate) use insights::{executive_summary, generate_recommendations};
