//! Validation and cleaning of the raw HR tables.
//!
//! Each function takes a raw table and returns the cleaned rows together with
//! a [`TableQuality`] describing what had to be corrected. Malformed cells are
//! fixed or flagged, never fatal; only a structurally unusable table (missing
//! column, no rows) produces a [`CleaningError`].

mod mapping;
mod normalizer;
pub mod ranges;

use super::domain::{
    AttritionStatus, Employee, EmployeeId, ExitSurvey, PerformanceReview, RecordDate, TableKind,
};
use super::import::{RawDataset, RawEmployeeRow, RawExitSurveyRow, RawReviewRow, RawTable};
use normalizer::{capitalize, clean_text, parse_number, title_case};
use ranges::FieldBounds;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CleaningError {
    #[error("{table} is missing required column '{column}'")]
    MissingColumn {
        table: TableKind,
        column: &'static str,
    },
    #[error("{table} contains no usable rows")]
    EmptyTable { table: TableKind },
}

pub const REQUIRED_EMPLOYEE_COLUMNS: [&str; 10] = [
    "employee_id",
    "age",
    "department",
    "years_at_company",
    "monthly_income",
    "distance_from_home",
    "job_satisfaction",
    "work_life_balance",
    "performance_rating",
    "attrition",
];

pub const REQUIRED_KEY_COLUMNS: [&str; 1] = ["employee_id"];

/// Per-table record of what cleaning found and changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableQuality {
    pub total_records: usize,
    pub missing_identifiers: usize,
    pub duplicate_identifiers: usize,
    pub duplicates_removed: usize,
    pub missing_values: BTreeMap<&'static str, usize>,
    pub unparseable_values: BTreeMap<&'static str, usize>,
    pub outliers_capped: BTreeMap<&'static str, usize>,
    pub values_imputed: BTreeMap<&'static str, usize>,
    /// Cells filled with a fixed fallback because the column had no value to
    /// take a median from.
    pub values_defaulted: BTreeMap<&'static str, usize>,
    pub unknown_dates: usize,
}

impl TableQuality {
    pub fn total_missing(&self) -> usize {
        self.missing_values.values().sum()
    }

    pub fn total_capped(&self) -> usize {
        self.outliers_capped.values().sum()
    }

    pub fn total_imputed(&self) -> usize {
        self.values_imputed.values().sum()
    }

    pub fn total_defaulted(&self) -> usize {
        self.values_defaulted.values().sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QualityReport {
    pub employee_data: TableQuality,
    pub performance_data: TableQuality,
    pub exit_survey_data: TableQuality,
}

impl QualityReport {
    pub fn tables(&self) -> [(TableKind, &TableQuality); 3] {
        [
            (TableKind::Employees, &self.employee_data),
            (TableKind::PerformanceReviews, &self.performance_data),
            (TableKind::ExitSurveys, &self.exit_survey_data),
        ]
    }
}

/// All three tables after cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedDataset {
    pub employees: Vec<Employee>,
    pub reviews: Vec<PerformanceReview>,
    pub exit_surveys: Vec<ExitSurvey>,
    pub quality: QualityReport,
}

pub fn clean_dataset(raw: &RawDataset) -> Result<CleanedDataset, CleaningError> {
    let (employees, employee_quality) = clean_employees(&raw.employees)?;
    let (reviews, performance_quality) = clean_reviews(&raw.performance)?;
    let (exit_surveys, exit_quality) = clean_exit_surveys(&raw.exit_surveys)?;

    for (table, quality) in [
        (TableKind::Employees, &employee_quality),
        (TableKind::PerformanceReviews, &performance_quality),
        (TableKind::ExitSurveys, &exit_quality),
    ] {
        info!(
            %table,
            records = quality.total_records,
            missing = quality.total_missing(),
            capped = quality.total_capped(),
            imputed = quality.total_imputed(),
            defaulted = quality.total_defaulted(),
            "quality summary"
        );
    }

    Ok(CleanedDataset {
        employees,
        reviews,
        exit_surveys,
        quality: QualityReport {
            employee_data: employee_quality,
            performance_data: performance_quality,
            exit_survey_data: exit_quality,
        },
    })
}

// Positions inside `EMPLOYEE_BOUNDS`.
const AGE: usize = 0;
const MONTHLY_INCOME: usize = 1;
const YEARS_AT_COMPANY: usize = 2;
const PERFORMANCE_RATING: usize = 3;
const JOB_SATISFACTION: usize = 4;
const WORK_LIFE_BALANCE: usize = 5;
const DISTANCE_FROM_HOME: usize = 6;

/// Midpoint of the 1-5 rating scale.
const RATING_MIDPOINT: f64 = 3.0;

/// Median-imputed columns with the value used when a column has nothing to
/// take a median from. A distance of zero falls in no commute category.
const IMPUTED_EMPLOYEE_FIELDS: [(usize, f64); 4] = [
    (JOB_SATISFACTION, RATING_MIDPOINT),
    (WORK_LIFE_BALANCE, RATING_MIDPOINT),
    (PERFORMANCE_RATING, RATING_MIDPOINT),
    (DISTANCE_FROM_HOME, ranges::DISTANCE_FROM_HOME.min),
];

pub fn clean_employees(
    table: &RawTable<RawEmployeeRow>,
) -> Result<(Vec<Employee>, TableQuality), CleaningError> {
    const TABLE: TableKind = TableKind::Employees;
    require_columns(table, TABLE, &REQUIRED_EMPLOYEE_COLUMNS)?;

    let mut quality = TableQuality {
        total_records: table.len(),
        missing_values: count_missing(table, employee_cells),
        ..TableQuality::default()
    };

    let rows = unique_rows(table, |row| row.employee_id.as_deref(), &mut quality);
    if quality.duplicates_removed > 0 {
        info!(
            removed = quality.duplicates_removed,
            "removed duplicate employee records"
        );
    }
    if rows.is_empty() {
        return Err(CleaningError::EmptyTable { table: TABLE });
    }

    let mut numbers: Vec<[Option<f64>; 7]> = rows
        .iter()
        .map(|(_, row)| {
            [
                row.age.as_deref(),
                row.monthly_income.as_deref(),
                row.years_at_company.as_deref(),
                row.performance_rating.as_deref(),
                row.job_satisfaction.as_deref(),
                row.work_life_balance.as_deref(),
                row.distance_from_home.as_deref(),
            ]
            .map(|cell| cell.and_then(parse_number))
        })
        .collect();
    count_unparseable(&rows, &numbers, &ranges::EMPLOYEE_BOUNDS, employee_cells, &mut quality);
    cap_columns(&mut numbers, &ranges::EMPLOYEE_BOUNDS, TABLE, &mut quality);

    for (index, fallback) in IMPUTED_EMPLOYEE_FIELDS {
        let field = ranges::EMPLOYEE_BOUNDS[index].field;
        let mut column: Vec<Option<f64>> = numbers.iter().map(|row| row[index]).collect();
        match ranges::impute_median(&mut column) {
            Some((median, filled)) if filled > 0 => {
                info!(field, filled, median, "filled missing values with column median");
                quality.values_imputed.insert(field, filled);
            }
            Some(_) => {}
            None => {
                let filled = ranges::fill_missing(&mut column, fallback);
                warn!(
                    field,
                    filled,
                    fallback,
                    "column has no values to take a median from; using fallback"
                );
                quality.values_defaulted.insert(field, filled);
            }
        }
        for (row, value) in numbers.iter_mut().zip(column) {
            row[index] = value;
        }
    }

    let mut employees = Vec::with_capacity(rows.len());
    for ((id, row), values) in rows.into_iter().zip(numbers) {
        let attrition_date = row.attrition_date.as_deref().map(RecordDate::parse);
        if attrition_date == Some(RecordDate::Unknown) {
            quality.unknown_dates += 1;
        }

        employees.push(Employee {
            employee_id: EmployeeId(id),
            first_name: titled(row.first_name.as_deref()),
            last_name: titled(row.last_name.as_deref()),
            age: values[AGE],
            gender: titled(row.gender.as_deref()).map(|value| value.to_uppercase()),
            marital_status: titled(row.marital_status.as_deref()),
            education_level: titled(row.education_level.as_deref()),
            department: titled(row.department.as_deref()).map(mapping::canonical_department),
            job_role: titled(row.job_role.as_deref()),
            years_at_company: values[YEARS_AT_COMPANY],
            monthly_income: values[MONTHLY_INCOME],
            distance_from_home: values[DISTANCE_FROM_HOME].unwrap_or_default(),
            overtime: flag(row.overtime.as_deref()),
            job_satisfaction: values[JOB_SATISFACTION].unwrap_or_default(),
            work_life_balance: values[WORK_LIFE_BALANCE].unwrap_or_default(),
            performance_rating: values[PERFORMANCE_RATING].unwrap_or_default(),
            attrition: titled(row.attrition.as_deref())
                .map(|value| AttritionStatus::from_label(&capitalize(&value)))
                .unwrap_or(AttritionStatus::Unknown),
            attrition_date,
            exit_reason: titled(row.exit_reason.as_deref()),
            manager_id: row.manager_id.as_deref().and_then(clean_text),
        });
    }

    info!(records = employees.len(), "employee data cleaning completed");
    Ok((employees, quality))
}

const REVIEW_BOUNDS: [FieldBounds; 9] = [
    rating("performance_rating"),
    rating("competency_score"),
    rating("leadership_score"),
    rating("teamwork_score"),
    rating("innovation_score"),
    rating("manager_rating"),
    rating("peer_feedback_score"),
    rating("self_assessment_score"),
    ranges::GOALS_MET,
];

pub fn clean_reviews(
    table: &RawTable<RawReviewRow>,
) -> Result<(Vec<PerformanceReview>, TableQuality), CleaningError> {
    const TABLE: TableKind = TableKind::PerformanceReviews;
    require_columns(table, TABLE, &REQUIRED_KEY_COLUMNS)?;

    let mut quality = TableQuality {
        total_records: table.len(),
        missing_values: count_missing(table, review_cells),
        ..TableQuality::default()
    };
    let rows = keyed_rows(table, |row| row.employee_id.as_deref(), &mut quality);

    let mut numbers: Vec<[Option<f64>; 9]> = rows
        .iter()
        .map(|(_, row)| {
            [
                row.performance_rating.as_deref(),
                row.competency_score.as_deref(),
                row.leadership_score.as_deref(),
                row.teamwork_score.as_deref(),
                row.innovation_score.as_deref(),
                row.manager_rating.as_deref(),
                row.peer_feedback_score.as_deref(),
                row.self_assessment_score.as_deref(),
                row.goals_met.as_deref(),
            ]
            .map(|cell| cell.and_then(parse_number))
        })
        .collect();
    count_unparseable(&rows, &numbers, &REVIEW_BOUNDS, review_cells, &mut quality);
    cap_columns(&mut numbers, &REVIEW_BOUNDS, TABLE, &mut quality);

    let reviews = rows
        .into_iter()
        .zip(numbers)
        .map(|((id, row), [performance, competency, leadership, teamwork, innovation, manager, peer, self_assessment, goals])| {
            let review_date = row.review_date.as_deref().map(RecordDate::parse);
            if review_date == Some(RecordDate::Unknown) {
                quality.unknown_dates += 1;
            }

            PerformanceReview {
                employee_id: EmployeeId(id),
                review_date,
                performance_rating: performance,
                competency_score: competency,
                leadership_score: leadership,
                teamwork_score: teamwork,
                innovation_score: innovation,
                manager_rating: manager,
                peer_feedback_score: peer,
                self_assessment_score: self_assessment,
                goals_met: goals,
                promotion_ready: flag(row.promotion_ready.as_deref()),
                strengths: row.strengths.as_deref().and_then(clean_text),
                improvement_areas: row.improvement_areas.as_deref().and_then(clean_text),
            }
        })
        .collect::<Vec<_>>();

    info!(records = reviews.len(), "performance data cleaning completed");
    Ok((reviews, quality))
}

const EXIT_BOUNDS: [FieldBounds; 9] = [
    rating("overall_satisfaction"),
    rating("manager_satisfaction"),
    rating("compensation_satisfaction"),
    rating("growth_opportunities"),
    rating("work_life_balance_rating"),
    rating("job_role_clarity"),
    rating("training_adequacy"),
    rating("company_culture_rating"),
    rating("likelihood_to_return"),
];

pub fn clean_exit_surveys(
    table: &RawTable<RawExitSurveyRow>,
) -> Result<(Vec<ExitSurvey>, TableQuality), CleaningError> {
    const TABLE: TableKind = TableKind::ExitSurveys;
    require_columns(table, TABLE, &REQUIRED_KEY_COLUMNS)?;

    let mut quality = TableQuality {
        total_records: table.len(),
        missing_values: count_missing(table, exit_cells),
        ..TableQuality::default()
    };
    let rows = keyed_rows(table, |row| row.employee_id.as_deref(), &mut quality);

    let mut numbers: Vec<[Option<f64>; 9]> = rows
        .iter()
        .map(|(_, row)| {
            [
                row.overall_satisfaction.as_deref(),
                row.manager_satisfaction.as_deref(),
                row.compensation_satisfaction.as_deref(),
                row.growth_opportunities.as_deref(),
                row.work_life_balance_rating.as_deref(),
                row.job_role_clarity.as_deref(),
                row.training_adequacy.as_deref(),
                row.company_culture_rating.as_deref(),
                row.likelihood_to_return.as_deref(),
            ]
            .map(|cell| cell.and_then(parse_number))
        })
        .collect();
    count_unparseable(&rows, &numbers, &EXIT_BOUNDS, exit_cells, &mut quality);
    cap_columns(&mut numbers, &EXIT_BOUNDS, TABLE, &mut quality);

    let surveys = rows
        .into_iter()
        .zip(numbers)
        .map(|((id, row), [overall, manager, compensation, growth, balance, clarity, training, culture, return_likelihood])| {
            let exit_date = row.exit_date.as_deref().map(RecordDate::parse);
            if exit_date == Some(RecordDate::Unknown) {
                quality.unknown_dates += 1;
            }

            ExitSurvey {
                employee_id: EmployeeId(id),
                exit_date,
                exit_reason_primary: row.exit_reason_primary.as_deref().and_then(clean_text),
                exit_reason_secondary: row.exit_reason_secondary.as_deref().and_then(clean_text),
                overall_satisfaction: overall,
                manager_satisfaction: manager,
                compensation_satisfaction: compensation,
                growth_opportunities: growth,
                work_life_balance_rating: balance,
                job_role_clarity: clarity,
                training_adequacy: training,
                company_culture_rating: culture,
                likelihood_to_return: return_likelihood,
                would_recommend_company: flag(row.would_recommend_company.as_deref()),
                feedback_comments: row.feedback_comments.as_deref().and_then(clean_text),
            }
        })
        .collect::<Vec<_>>();

    info!(records = surveys.len(), "exit survey data cleaning completed");
    Ok((surveys, quality))
}

const fn rating(field: &'static str) -> FieldBounds {
    FieldBounds::new(field, ranges::RATING_SCALE.0, ranges::RATING_SCALE.1)
}

fn require_columns<T>(
    table: &RawTable<T>,
    kind: TableKind,
    required: &[&'static str],
) -> Result<(), CleaningError> {
    match required.iter().copied().find(|column| !table.has_column(column)) {
        Some(column) => Err(CleaningError::MissingColumn {
            table: kind,
            column,
        }),
        None => Ok(()),
    }
}

fn count_missing<T>(
    table: &RawTable<T>,
    cells: fn(&T) -> Vec<(&'static str, Option<&str>)>,
) -> BTreeMap<&'static str, usize> {
    let mut missing = BTreeMap::new();
    for row in &table.rows {
        for (field, value) in cells(row) {
            if value.is_none() && table.has_column(field) {
                *missing.entry(field).or_insert(0) += 1;
            }
        }
    }
    missing
}

fn count_unparseable<T, const N: usize>(
    rows: &[(String, &T)],
    numbers: &[[Option<f64>; N]],
    bounds: &[FieldBounds; N],
    cells: fn(&T) -> Vec<(&'static str, Option<&str>)>,
    quality: &mut TableQuality,
) {
    for ((_, row), parsed) in rows.iter().zip(numbers) {
        let raw = cells(row);
        for (index, field_bounds) in bounds.iter().enumerate() {
            let present = raw
                .iter()
                .any(|(field, value)| *field == field_bounds.field && value.is_some());
            if present && parsed[index].is_none() {
                *quality
                    .unparseable_values
                    .entry(field_bounds.field)
                    .or_insert(0) += 1;
            }
        }
    }
}

fn cap_columns<const N: usize>(
    numbers: &mut [[Option<f64>; N]],
    bounds: &[FieldBounds; N],
    table: TableKind,
    quality: &mut TableQuality,
) {
    for (index, field_bounds) in bounds.iter().enumerate() {
        let mut column: Vec<Option<f64>> = numbers.iter().map(|row| row[index]).collect();
        let capped = ranges::cap_column(&mut column, field_bounds);
        if capped == 0 {
            continue;
        }

        warn!(
            %table,
            field = field_bounds.field,
            capped,
            min = field_bounds.min,
            max = field_bounds.max,
            "capped out-of-range values"
        );
        quality.outliers_capped.insert(field_bounds.field, capped);
        for (row, value) in numbers.iter_mut().zip(column) {
            row[index] = value;
        }
    }
}

/// Drops rows without an identifier and every repeat of an identifier after
/// its first appearance.
fn unique_rows<'a, T>(
    table: &'a RawTable<T>,
    key: impl Fn(&T) -> Option<&str>,
    quality: &mut TableQuality,
) -> Vec<(String, &'a T)> {
    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(table.len());

    for (id, row) in keyed_rows(table, key, quality) {
        if seen.insert(id.clone()) {
            rows.push((id, row));
        } else {
            quality.duplicates_removed += 1;
        }
    }

    rows
}

/// Drops rows without an identifier and counts repeated identifiers while
/// keeping every row.
fn keyed_rows<'a, T>(
    table: &'a RawTable<T>,
    key: impl Fn(&T) -> Option<&str>,
    quality: &mut TableQuality,
) -> Vec<(String, &'a T)> {
    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(table.len());

    for row in &table.rows {
        match key(row).and_then(clean_text) {
            Some(id) => {
                if !seen.insert(id.clone()) {
                    quality.duplicate_identifiers += 1;
                }
                rows.push((id, row));
            }
            None => quality.missing_identifiers += 1,
        }
    }

    if quality.missing_identifiers > 0 {
        warn!(
            dropped = quality.missing_identifiers,
            "dropped rows without an employee identifier"
        );
    }

    rows
}

fn titled(value: Option<&str>) -> Option<String> {
    value.and_then(clean_text).map(|text| title_case(&text))
}

fn flag(value: Option<&str>) -> Option<bool> {
    value
        .and_then(clean_text)
        .and_then(|text| mapping::parse_flag(&capitalize(&text)))
}

fn employee_cells(row: &RawEmployeeRow) -> Vec<(&'static str, Option<&str>)> {
    vec![
        ("employee_id", row.employee_id.as_deref()),
        ("first_name", row.first_name.as_deref()),
        ("last_name", row.last_name.as_deref()),
        ("age", row.age.as_deref()),
        ("gender", row.gender.as_deref()),
        ("marital_status", row.marital_status.as_deref()),
        ("education_level", row.education_level.as_deref()),
        ("department", row.department.as_deref()),
        ("job_role", row.job_role.as_deref()),
        ("years_at_company", row.years_at_company.as_deref()),
        ("monthly_income", row.monthly_income.as_deref()),
        ("distance_from_home", row.distance_from_home.as_deref()),
        ("overtime", row.overtime.as_deref()),
        ("job_satisfaction", row.job_satisfaction.as_deref()),
        ("work_life_balance", row.work_life_balance.as_deref()),
        ("performance_rating", row.performance_rating.as_deref()),
        ("attrition", row.attrition.as_deref()),
        ("attrition_date", row.attrition_date.as_deref()),
        ("exit_reason", row.exit_reason.as_deref()),
        ("manager_id", row.manager_id.as_deref()),
    ]
}

fn review_cells(row: &RawReviewRow) -> Vec<(&'static str, Option<&str>)> {
    vec![
        ("employee_id", row.employee_id.as_deref()),
        ("review_date", row.review_date.as_deref()),
        ("performance_rating", row.performance_rating.as_deref()),
        ("competency_score", row.competency_score.as_deref()),
        ("leadership_score", row.leadership_score.as_deref()),
        ("teamwork_score", row.teamwork_score.as_deref()),
        ("innovation_score", row.innovation_score.as_deref()),
        ("manager_rating", row.manager_rating.as_deref()),
        ("peer_feedback_score", row.peer_feedback_score.as_deref()),
        ("self_assessment_score", row.self_assessment_score.as_deref()),
        ("goals_met", row.goals_met.as_deref()),
        ("promotion_ready", row.promotion_ready.as_deref()),
        ("strengths", row.strengths.as_deref()),
        ("improvement_areas", row.improvement_areas.as_deref()),
    ]
}

fn exit_cells(row: &RawExitSurveyRow) -> Vec<(&'static str, Option<&str>)> {
    vec![
        ("employee_id", row.employee_id.as_deref()),
        ("exit_date", row.exit_date.as_deref()),
        ("exit_reason_primary", row.exit_reason_primary.as_deref()),
        ("exit_reason_secondary", row.exit_reason_secondary.as_deref()),
        ("overall_satisfaction", row.overall_satisfaction.as_deref()),
        ("manager_satisfaction", row.manager_satisfaction.as_deref()),
        (
            "compensation_satisfaction",
            row.compensation_satisfaction.as_deref(),
        ),
        ("growth_opportunities", row.growth_opportunities.as_deref()),
        (
            "work_life_balance_rating",
            row.work_life_balance_rating.as_deref(),
        ),
        ("job_role_clarity", row.job_role_clarity.as_deref()),
        ("training_adequacy", row.training_adequacy.as_deref()),
        ("company_culture_rating", row.company_culture_rating.as_deref()),
        ("likelihood_to_return", row.likelihood_to_return.as_deref()),
        (
            "would_recommend_company",
            row.would_recommend_company.as_deref(),
        ),
        ("feedback_comments", row.feedback_comments.as_deref()),
    ]
}

#[cfg(test)]
mod tests;
