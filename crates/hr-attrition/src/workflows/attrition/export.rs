//! CSV and JSON writers for the cleaned tables, the merged analysis table and
//! the quality report. Cleaned tables keep the input column names so an
//! exported file can be imported again.

use super::cleaning::QualityReport;
use super::domain::{
    serialize_yes_no, AttritionStatus, Employee, EmployeeId, ExitSurvey, PerformanceReview,
    RecordDate,
};
use super::merge::MergedEmployee;
use super::store::RecordStore;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const MERGED_FILE: &str = "attrition_analysis_clean.csv";
pub const EMPLOYEE_FILE: &str = "employee_data_clean.csv";
pub const PERFORMANCE_FILE: &str = "performance_data_clean.csv";
pub const EXIT_SURVEY_FILE: &str = "exit_survey_data_clean.csv";
pub const QUALITY_REPORT_FILE: &str = "data_quality_report.json";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Column names of an exported table, in serialization order.
pub trait CsvColumns {
    const COLUMNS: &'static [&'static str];
}

const EMPLOYEE_COLUMNS: [&str; 20] = [
    "employee_id",
    "first_name",
    "last_name",
    "age",
    "gender",
    "marital_status",
    "education_level",
    "department",
    "job_role",
    "years_at_company",
    "monthly_income",
    "distance_from_home",
    "overtime",
    "job_satisfaction",
    "work_life_balance",
    "performance_rating",
    "attrition",
    "attrition_date",
    "exit_reason",
    "manager_id",
];

impl CsvColumns for Employee {
    const COLUMNS: &'static [&'static str] = &EMPLOYEE_COLUMNS;
}

impl CsvColumns for PerformanceReview {
    const COLUMNS: &'static [&'static str] = &[
        "employee_id",
        "review_date",
        "performance_rating",
        "competency_score",
        "leadership_score",
        "teamwork_score",
        "innovation_score",
        "manager_rating",
        "peer_feedback_score",
        "self_assessment_score",
        "goals_met",
        "promotion_ready",
        "strengths",
        "improvement_areas",
    ];
}

impl CsvColumns for ExitSurvey {
    const COLUMNS: &'static [&'static str] = &[
        "employee_id",
        "exit_date",
        "exit_reason_primary",
        "exit_reason_secondary",
        "overall_satisfaction",
        "manager_satisfaction",
        "compensation_satisfaction",
        "growth_opportunities",
        "work_life_balance_rating",
        "job_role_clarity",
        "training_adequacy",
        "company_culture_rating",
        "likelihood_to_return",
        "would_recommend_company",
        "feedback_comments",
    ];
}

/// Writes each row under a header derived from the row's field names. An
/// empty table still gets its header so the file can be imported again.
pub fn write_rows<W, T>(writer: W, rows: &[T]) -> Result<(), ExportError>
where
    W: Write,
    T: Serialize + CsvColumns,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        csv_writer.write_record(T::COLUMNS)?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Flat view of one merged row: employee columns, derived features, then the
/// joined review and exit survey columns.
#[derive(Debug, Serialize)]
struct MergedRecord<'a> {
    employee_id: &'a EmployeeId,
    first_name: Option<&'a str>,
    last_name: Option<&'a str>,
    age: Option<f64>,
    gender: Option<&'a str>,
    marital_status: Option<&'a str>,
    education_level: Option<&'a str>,
    department: Option<&'a str>,
    job_role: Option<&'a str>,
    years_at_company: Option<f64>,
    monthly_income: Option<f64>,
    distance_from_home: f64,
    #[serde(serialize_with = "serialize_yes_no")]
    overtime: Option<bool>,
    job_satisfaction: f64,
    work_life_balance: f64,
    performance_rating: f64,
    attrition: AttritionStatus,
    attrition_date: Option<RecordDate>,
    exit_reason: Option<&'a str>,
    manager_id: Option<&'a str>,
    age_group: Option<&'static str>,
    tenure_group: Option<&'static str>,
    salary_quartile: Option<&'static str>,
    salary_band: Option<&'static str>,
    commute_category: Option<&'static str>,
    performance_category: Option<&'static str>,
    satisfaction_risk_score: f64,
    engagement_score: f64,
    high_risk_flag: bool,
    leadership_role: bool,
    tenure_at_exit: Option<f64>,
    review_date: Option<RecordDate>,
    review_performance_rating: Option<f64>,
    competency_score: Option<f64>,
    leadership_score: Option<f64>,
    teamwork_score: Option<f64>,
    innovation_score: Option<f64>,
    manager_rating: Option<f64>,
    goals_met: Option<f64>,
    #[serde(serialize_with = "serialize_yes_no")]
    promotion_ready: Option<bool>,
    exit_date: Option<RecordDate>,
    exit_reason_primary: Option<&'a str>,
    exit_reason_secondary: Option<&'a str>,
    overall_satisfaction: Option<f64>,
    compensation_satisfaction: Option<f64>,
    growth_opportunities: Option<f64>,
    #[serde(serialize_with = "serialize_yes_no")]
    would_recommend_company: Option<bool>,
}

impl CsvColumns for MergedRecord<'_> {
    const COLUMNS: &'static [&'static str] = &[
        EMPLOYEE_COLUMNS[0],
        EMPLOYEE_COLUMNS[1],
        EMPLOYEE_COLUMNS[2],
        EMPLOYEE_COLUMNS[3],
        EMPLOYEE_COLUMNS[4],
        EMPLOYEE_COLUMNS[5],
        EMPLOYEE_COLUMNS[6],
        EMPLOYEE_COLUMNS[7],
        EMPLOYEE_COLUMNS[8],
        EMPLOYEE_COLUMNS[9],
        EMPLOYEE_COLUMNS[10],
        EMPLOYEE_COLUMNS[11],
        EMPLOYEE_COLUMNS[12],
        EMPLOYEE_COLUMNS[13],
        EMPLOYEE_COLUMNS[14],
        EMPLOYEE_COLUMNS[15],
        EMPLOYEE_COLUMNS[16],
        EMPLOYEE_COLUMNS[17],
        EMPLOYEE_COLUMNS[18],
        EMPLOYEE_COLUMNS[19],
        "age_group",
        "tenure_group",
        "salary_quartile",
        "salary_band",
        "commute_category",
        "performance_category",
        "satisfaction_risk_score",
        "engagement_score",
        "high_risk_flag",
        "leadership_role",
        "tenure_at_exit",
        "review_date",
        "review_performance_rating",
        "competency_score",
        "leadership_score",
        "teamwork_score",
        "innovation_score",
        "manager_rating",
        "goals_met",
        "promotion_ready",
        "exit_date",
        "exit_reason_primary",
        "exit_reason_secondary",
        "overall_satisfaction",
        "compensation_satisfaction",
        "growth_opportunities",
        "would_recommend_company",
    ];
}

impl<'a> From<&MergedEmployee<'a>> for MergedRecord<'a> {
    fn from(row: &MergedEmployee<'a>) -> Self {
        let employee = row.employee;
        let features = row.features;
        let review = row.review;
        let exit = row.exit_survey;

        Self {
            employee_id: &employee.employee_id,
            first_name: employee.first_name.as_deref(),
            last_name: employee.last_name.as_deref(),
            age: employee.age,
            gender: employee.gender.as_deref(),
            marital_status: employee.marital_status.as_deref(),
            education_level: employee.education_level.as_deref(),
            department: employee.department.as_deref(),
            job_role: employee.job_role.as_deref(),
            years_at_company: employee.years_at_company,
            monthly_income: employee.monthly_income,
            distance_from_home: employee.distance_from_home,
            overtime: employee.overtime,
            job_satisfaction: employee.job_satisfaction,
            work_life_balance: employee.work_life_balance,
            performance_rating: employee.performance_rating,
            attrition: employee.attrition,
            attrition_date: employee.attrition_date,
            exit_reason: employee.exit_reason.as_deref(),
            manager_id: employee.manager_id.as_deref(),
            age_group: features.age_group,
            tenure_group: features.tenure_group,
            salary_quartile: features.salary_quartile,
            salary_band: features.salary_band,
            commute_category: features.commute_category,
            performance_category: features.performance_category,
            satisfaction_risk_score: features.satisfaction_risk_score,
            engagement_score: features.engagement_score,
            high_risk_flag: features.high_risk_flag,
            leadership_role: features.leadership_role,
            tenure_at_exit: features.tenure_at_exit,
            review_date: review.and_then(|review| review.review_date),
            review_performance_rating: review.and_then(|review| review.performance_rating),
            competency_score: review.and_then(|review| review.competency_score),
            leadership_score: review.and_then(|review| review.leadership_score),
            teamwork_score: review.and_then(|review| review.teamwork_score),
            innovation_score: review.and_then(|review| review.innovation_score),
            manager_rating: review.and_then(|review| review.manager_rating),
            goals_met: review.and_then(|review| review.goals_met),
            promotion_ready: review.and_then(|review| review.promotion_ready),
            exit_date: exit.and_then(|exit| exit.exit_date),
            exit_reason_primary: exit.and_then(|exit| exit.exit_reason_primary.as_deref()),
            exit_reason_secondary: exit.and_then(|exit| exit.exit_reason_secondary.as_deref()),
            overall_satisfaction: exit.and_then(|exit| exit.overall_satisfaction),
            compensation_satisfaction: exit.and_then(|exit| exit.compensation_satisfaction),
            growth_opportunities: exit.and_then(|exit| exit.growth_opportunities),
            would_recommend_company: exit.and_then(|exit| exit.would_recommend_company),
        }
    }
}

pub fn write_merged<W: Write>(writer: W, rows: &[MergedEmployee<'_>]) -> Result<(), ExportError> {
    let records: Vec<MergedRecord<'_>> = rows.iter().map(MergedRecord::from).collect();
    write_rows(writer, &records)
}

pub fn write_quality_report<W: Write>(
    mut writer: W,
    report: &QualityReport,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Files produced by [`export_dataset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedFiles {
    pub merged: PathBuf,
    pub employees: PathBuf,
    pub performance: PathBuf,
    pub exit_surveys: PathBuf,
    pub quality_report: PathBuf,
}

impl ExportedFiles {
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            merged: output_dir.join(MERGED_FILE),
            employees: output_dir.join(EMPLOYEE_FILE),
            performance: output_dir.join(PERFORMANCE_FILE),
            exit_surveys: output_dir.join(EXIT_SURVEY_FILE),
            quality_report: output_dir.join(QUALITY_REPORT_FILE),
        }
    }

    pub fn paths(&self) -> [&Path; 5] {
        [
            &self.merged,
            &self.employees,
            &self.performance,
            &self.exit_surveys,
            &self.quality_report,
        ]
    }
}

/// Writes every processed table plus the quality report into `output_dir`,
/// creating the directory when needed.
pub fn export_dataset(
    output_dir: &Path,
    store: &RecordStore,
    merged: &[MergedEmployee<'_>],
) -> Result<ExportedFiles, ExportError> {
    fs::create_dir_all(output_dir).map_err(|source| ExportError::Create {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let files = ExportedFiles::in_dir(output_dir);

    write_merged(create(&files.merged)?, merged)?;
    write_rows(create(&files.employees)?, store.employees())?;
    write_rows(create(&files.performance)?, store.reviews())?;
    write_rows(create(&files.exit_surveys)?, store.exit_surveys())?;
    write_quality_report(create(&files.quality_report)?, store.quality())?;

    for path in files.paths() {
        info!(path = %path.display(), "exported");
    }

    Ok(files)
}

fn create(path: &Path) -> Result<BufWriter<File>, ExportError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| ExportError::Create {
            path: path.to_path_buf(),
            source,
        })
}
