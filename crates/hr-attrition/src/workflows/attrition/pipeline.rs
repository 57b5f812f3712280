use super::cleaning::{self, CleaningError, QualityReport};
use super::export::{self, ExportError, ExportedFiles};
use super::features::FeatureTable;
use super::import::RawDataset;
use super::merge::{merge, MergedEmployee};
use super::report::{AttritionReport, DatasetSummary};
use super::risk::RiskRanking;
use super::store::RecordStore;
use crate::config::AnalysisConfig;
use chrono::NaiveDate;
use std::path::Path;
use tracing::info;

/// Runs cleaning, feature engineering, risk scoring and aggregation over one
/// raw dataset.
#[derive(Debug, Clone, Default)]
pub struct AttritionPipeline {
    config: AnalysisConfig,
}

impl AttritionPipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn run(&self, raw: &RawDataset, today: NaiveDate) -> Result<PipelineOutput, CleaningError> {
        let store = RecordStore::new(cleaning::clean_dataset(raw)?);
        let features = FeatureTable::build(store.employees());
        info!(
            employees = features.rows.len(),
            flagged = features.high_risk_count(),
            "derived employee features"
        );

        let risk = RiskRanking::build(store.employees());
        info!(
            scored = risk.assessments.len(),
            high_risk = risk.high_risk.len(),
            "scored current employees"
        );

        let report = {
            let merged = merge(&store, &features);
            AttritionReport::build(
                &merged,
                store.exit_surveys(),
                &features,
                &risk,
                &self.config,
                today,
            )
        };
        let dataset_summary = DatasetSummary::from_employees(store.employees());

        Ok(PipelineOutput {
            store,
            features,
            risk,
            report,
            dataset_summary,
        })
    }
}

/// Results of one pipeline run. The merged table borrows from the store and
/// feature table, so it is rebuilt on demand.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub store: RecordStore,
    pub features: FeatureTable,
    pub risk: RiskRanking,
    pub report: AttritionReport,
    pub dataset_summary: DatasetSummary,
}

impl PipelineOutput {
    pub fn merged(&self) -> Vec<MergedEmployee<'_>> {
        merge(&self.store, &self.features)
    }

    pub fn quality(&self) -> &QualityReport {
        self.store.quality()
    }

    pub fn export(&self, output_dir: &Path) -> Result<ExportedFiles, ExportError> {
        export::export_dataset(output_dir, &self.store, &self.merged())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::attrition::import::DatasetImporter;
    use std::io::Cursor;

    const EMPLOYEES: &str = "\
employee_id,first_name,last_name,age,gender,department,job_role,years_at_company,monthly_income,distance_from_home,job_satisfaction,work_life_balance,performance_rating,attrition
1,ana,lee,29,f,it,Senior Engineer,2,6200,4,1,1,5,No
2,ben,ray,41,m,Sales,Account Manager,8,7100,25,4,4,3,Yes
3,cy,diaz,35,f,HR,Recruiter,0.5,3900,12,3,3,4,No
";

    const REVIEWS: &str = "\
employee_id,review_date,performance_rating,goals_met,promotion_ready
1,2024-01-15,5,92,Yes
";

    const SURVEYS: &str = "\
employee_id,exit_date,exit_reason_primary,overall_satisfaction,would_recommend_company
2,2023-11-30,Better Pay,2,No
";

    fn raw() -> RawDataset {
        DatasetImporter::from_readers(
            Cursor::new(EMPLOYEES),
            Cursor::new(REVIEWS),
            Cursor::new(SURVEYS),
        )
        .expect("parse fixtures")
    }

    #[test]
    fn run_produces_report_and_summary() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        let output = AttritionPipeline::default()
            .run(&raw(), today)
            .expect("pipeline run");

        assert_eq!(output.report.generated_on, today);
        assert_eq!(output.report.overall.total, 3);
        assert_eq!(output.report.overall.departed, 1);
        assert_eq!(output.dataset_summary.overview.total_employees, 3);
        assert_eq!(output.merged().len(), 3);
        assert_eq!(output.report.high_risk_employees[0].employee_id.as_str(), "1");
        assert!(output.report.departments.get("IT").is_some());
        assert_eq!(output.report.exit_reasons[0].reason, "Better Pay");
    }

    #[test]
    fn lone_employee_with_blank_distance_still_runs() {
        let raw = DatasetImporter::from_readers(
            Cursor::new(
                "employee_id,age,department,years_at_company,monthly_income,distance_from_home,job_satisfaction,work_life_balance,performance_rating,attrition\n\
                 1,30,IT,2,5000,,1,1,5,No\n",
            ),
            Cursor::new(REVIEWS),
            Cursor::new(SURVEYS),
        )
        .expect("parse fixtures");

        let output = AttritionPipeline::default()
            .run(&raw, NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"))
            .expect("pipeline run");

        assert_eq!(output.report.overall.total, 1);
        let quality = &output.quality().employee_data;
        assert_eq!(quality.values_defaulted.get("distance_from_home"), Some(&1));
        let employee = output.store.employee(&"1".into()).expect("employee kept");
        assert_eq!(employee.distance_from_home, 0.0);
        assert_eq!(output.report.high_risk_employees[0].employee_id.as_str(), "1");
    }

    #[test]
    fn run_surfaces_structural_errors() {
        let raw = DatasetImporter::from_readers(
            Cursor::new("employee_id,age\n1,30\n"),
            Cursor::new(REVIEWS),
            Cursor::new(SURVEYS),
        )
        .expect("parse fixtures");

        let error = AttritionPipeline::default()
            .run(&raw, NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"))
            .expect_err("missing columns");

        assert!(matches!(error, CleaningError::MissingColumn { .. }));
    }
}
