//! Group-by attrition rates over the merged employee table.

use super::domain::{EmployeeId, ExitSurvey};
use super::features::{
    labels, AGE_GROUPS, PERFORMANCE_CATEGORIES, SALARY_BANDS, SALARY_QUARTILE_LABELS,
    TENURE_GROUPS,
};
use super::merge::MergedEmployee;
use super::stats;
use serde::Serialize;
use std::collections::BTreeSet;

/// Performance rating at or above which an employee counts as a high performer.
pub const HIGH_PERFORMER_RATING: f64 = 4.0;

/// Tenure, in years, that bounds the early-career window.
pub const EARLY_TENURE_YEARS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Department,
    Gender,
    AgeGroup,
    TenureGroup,
    SalaryQuartile,
    SalaryBand,
    SatisfactionLevel,
    PerformanceRating,
    PerformanceCategory,
    HighPerformerDepartment,
}

impl Dimension {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Department => "Department",
            Self::Gender => "Gender",
            Self::AgeGroup => "Age Group",
            Self::TenureGroup => "Tenure Group",
            Self::SalaryQuartile => "Salary Quartile",
            Self::SalaryBand => "Salary Band",
            Self::SatisfactionLevel => "Job Satisfaction",
            Self::PerformanceRating => "Performance Rating",
            Self::PerformanceCategory => "Performance Category",
            Self::HighPerformerDepartment => "High Performers by Department",
        }
    }
}

/// Column averaged alongside the rate for each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Auxiliary {
    MonthlyIncome,
    JobSatisfaction,
    WorkLifeBalance,
    GoalsMet,
}

impl Auxiliary {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MonthlyIncome => "Avg Monthly Income",
            Self::JobSatisfaction => "Avg Job Satisfaction",
            Self::WorkLifeBalance => "Avg Work-Life Balance",
            Self::GoalsMet => "Avg Goals Met",
        }
    }

    fn value(self, row: &MergedEmployee<'_>) -> Option<f64> {
        match self {
            Self::MonthlyIncome => row.employee.monthly_income,
            Self::JobSatisfaction => Some(row.employee.job_satisfaction),
            Self::WorkLifeBalance => Some(row.employee.work_life_balance),
            Self::GoalsMet => row.goals_met(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AuxiliaryMean {
    pub auxiliary: Auxiliary,
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRate {
    pub group: String,
    pub population: usize,
    pub departed: usize,
    /// Exactly `100 * departed / population`; rounding is left to rendering.
    pub attrition_rate: f64,
    /// One entry per auxiliary column of the table, in table order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub auxiliary_means: Vec<AuxiliaryMean>,
}

impl GroupRate {
    pub fn mean_of(&self, auxiliary: Auxiliary) -> Option<f64> {
        self.auxiliary_means
            .iter()
            .find(|entry| entry.auxiliary == auxiliary)
            .and_then(|entry| entry.mean)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTable {
    pub dimension: Dimension,
    pub dimension_label: &'static str,
    pub auxiliaries: &'static [Auxiliary],
    /// Natural order: bucket order for banded dimensions, sorted otherwise.
    pub rows: Vec<GroupRate>,
}

impl RateTable {
    /// Rows by descending attrition rate; equal rates keep natural order.
    pub fn ranked(&self) -> Vec<&GroupRate> {
        let mut ranked: Vec<&GroupRate> = self.rows.iter().collect();
        ranked.sort_by(|a, b| b.attrition_rate.total_cmp(&a.attrition_rate));
        ranked
    }

    pub fn highest(&self) -> Option<&GroupRate> {
        self.ranked().into_iter().next()
    }

    pub fn get(&self, group: &str) -> Option<&GroupRate> {
        self.rows.iter().find(|row| row.group == group)
    }

    pub fn total_population(&self) -> usize {
        self.rows.iter().map(|row| row.population).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

enum GroupOrder {
    Labels(Vec<&'static str>),
    Sorted,
    Numeric,
}

/// Groups `rows` by `key` and computes per-group attrition. Rows whose key is
/// `None` are skipped; groups with no rows never appear.
fn rate_table<'r, 'a: 'r, I, K>(
    rows: I,
    dimension: Dimension,
    order: GroupOrder,
    auxiliaries: &'static [Auxiliary],
    key: K,
) -> RateTable
where
    I: IntoIterator<Item = &'r MergedEmployee<'a>>,
    K: Fn(&MergedEmployee<'a>) -> Option<String>,
{
    let keyed: Vec<(String, &MergedEmployee<'a>)> = rows
        .into_iter()
        .filter_map(|row| key(row).map(|group| (group, row)))
        .collect();

    let groups: Vec<String> = match order {
        GroupOrder::Labels(labels) => labels.into_iter().map(str::to_string).collect(),
        GroupOrder::Sorted => keyed
            .iter()
            .map(|(group, _)| group.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
        GroupOrder::Numeric => {
            let mut groups: Vec<String> = keyed
                .iter()
                .map(|(group, _)| group.clone())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            groups.sort_by(|a, b| {
                let a = a.parse::<f64>().unwrap_or(f64::INFINITY);
                let b = b.parse::<f64>().unwrap_or(f64::INFINITY);
                a.total_cmp(&b)
            });
            groups
        }
    };

    let rows = groups
        .into_iter()
        .filter_map(|group| {
            let members: Vec<&MergedEmployee<'a>> = keyed
                .iter()
                .filter(|(key, _)| *key == group)
                .map(|(_, row)| *row)
                .collect();
            let population = members.len();
            let departed = members
                .iter()
                .filter(|row| row.employee.is_departed())
                .count();
            let attrition_rate = stats::percentage(departed, population)?;
            let auxiliary_means = auxiliaries
                .iter()
                .map(|&auxiliary| {
                    let values: Vec<f64> = members
                        .iter()
                        .filter_map(|row| auxiliary.value(row))
                        .collect();
                    AuxiliaryMean {
                        auxiliary,
                        mean: stats::mean(&values),
                    }
                })
                .collect();

            Some(GroupRate {
                group,
                population,
                departed,
                attrition_rate,
                auxiliary_means,
            })
        })
        .collect();

    RateTable {
        dimension,
        dimension_label: dimension.label(),
        auxiliaries,
        rows,
    }
}

/// Renders a rating without a trailing `.0` so `4.0` groups as `"4"`.
pub fn level_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

pub fn by_department(rows: &[MergedEmployee<'_>]) -> RateTable {
    rate_table(rows, Dimension::Department, GroupOrder::Sorted, &[], |row| {
        row.employee.department.clone()
    })
}

pub fn by_gender(rows: &[MergedEmployee<'_>]) -> RateTable {
    rate_table(rows, Dimension::Gender, GroupOrder::Sorted, &[], |row| {
        row.employee.gender.clone()
    })
}

pub fn by_age_group(rows: &[MergedEmployee<'_>]) -> RateTable {
    rate_table(
        rows,
        Dimension::AgeGroup,
        GroupOrder::Labels(labels(&AGE_GROUPS)),
        &[],
        |row| row.features.age_group.map(str::to_string),
    )
}

pub fn by_tenure_group(rows: &[MergedEmployee<'_>]) -> RateTable {
    rate_table(
        rows,
        Dimension::TenureGroup,
        GroupOrder::Labels(labels(&TENURE_GROUPS)),
        &[Auxiliary::MonthlyIncome],
        |row| row.features.tenure_group.map(str::to_string),
    )
}

pub fn by_salary_quartile(rows: &[MergedEmployee<'_>]) -> RateTable {
    rate_table(
        rows,
        Dimension::SalaryQuartile,
        GroupOrder::Labels(SALARY_QUARTILE_LABELS.to_vec()),
        &[Auxiliary::MonthlyIncome],
        |row| row.features.salary_quartile.map(str::to_string),
    )
}

pub fn by_salary_band(rows: &[MergedEmployee<'_>]) -> RateTable {
    rate_table(
        rows,
        Dimension::SalaryBand,
        GroupOrder::Labels(labels(&SALARY_BANDS)),
        &[Auxiliary::JobSatisfaction, Auxiliary::WorkLifeBalance],
        |row| row.features.salary_band.map(str::to_string),
    )
}

pub fn by_satisfaction_level(rows: &[MergedEmployee<'_>]) -> RateTable {
    rate_table(
        rows,
        Dimension::SatisfactionLevel,
        GroupOrder::Numeric,
        &[],
        |row| Some(level_label(row.employee.job_satisfaction)),
    )
}

pub fn by_performance_rating(rows: &[MergedEmployee<'_>]) -> RateTable {
    rate_table(
        rows,
        Dimension::PerformanceRating,
        GroupOrder::Numeric,
        &[Auxiliary::GoalsMet],
        |row| Some(level_label(row.employee.performance_rating)),
    )
}

pub fn by_performance_category(rows: &[MergedEmployee<'_>]) -> RateTable {
    rate_table(
        rows,
        Dimension::PerformanceCategory,
        GroupOrder::Labels(PERFORMANCE_CATEGORIES.to_vec()),
        &[],
        |row| row.features.performance_category.map(str::to_string),
    )
}

/// Department rates restricted to high performers. Departments without any
/// high performer do not appear.
pub fn high_performer_departments(rows: &[MergedEmployee<'_>]) -> RateTable {
    let high_performers = rows
        .iter()
        .filter(|row| row.employee.performance_rating >= HIGH_PERFORMER_RATING);
    rate_table(
        high_performers,
        Dimension::HighPerformerDepartment,
        GroupOrder::Sorted,
        &[],
        |row| row.employee.department.clone(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverallAttrition {
    pub total: usize,
    pub departed: usize,
    pub current: usize,
    pub attrition_rate: f64,
}

pub fn overall(rows: &[MergedEmployee<'_>]) -> OverallAttrition {
    let total = rows.len();
    let departed = rows.iter().filter(|row| row.employee.is_departed()).count();
    let current = rows.iter().filter(|row| row.employee.is_current()).count();

    OverallAttrition {
        total,
        departed,
        current,
        attrition_rate: stats::percentage(departed, total).unwrap_or(0.0),
    }
}

/// Attrition among employees with at most three years of tenure, or `None`
/// when nobody falls in that window.
pub fn early_tenure_rate(rows: &[MergedEmployee<'_>]) -> Option<f64> {
    let early: Vec<&MergedEmployee<'_>> = rows
        .iter()
        .filter(|row| {
            row.employee
                .years_at_company
                .is_some_and(|years| years <= EARLY_TENURE_YEARS)
        })
        .collect();
    let departed = early.iter().filter(|row| row.employee.is_departed()).count();
    stats::percentage(departed, early.len())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartedHighPerformer {
    pub employee_id: EmployeeId,
    pub name: String,
    pub department: String,
    pub performance_rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_reason: Option<String>,
}

pub fn high_performers_left(rows: &[MergedEmployee<'_>]) -> Vec<DepartedHighPerformer> {
    rows.iter()
        .filter(|row| {
            row.employee.is_departed()
                && row.employee.performance_rating >= HIGH_PERFORMER_RATING
        })
        .map(|row| DepartedHighPerformer {
            employee_id: row.employee.employee_id.clone(),
            name: row.employee.display_name(),
            department: row.employee.department_label().to_string(),
            performance_rating: row.employee.performance_rating,
            exit_reason: row
                .exit_survey
                .and_then(|survey| survey.exit_reason_primary.clone())
                .or_else(|| row.employee.exit_reason.clone()),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExitReasonSummary {
    pub reason: String,
    pub count: usize,
    /// Share of all exit surveys, in percent.
    pub share: f64,
    pub mean_overall_satisfaction: Option<f64>,
    pub mean_compensation_satisfaction: Option<f64>,
    pub mean_growth_opportunities: Option<f64>,
    pub mean_work_life_balance: Option<f64>,
    /// Percentage of answered surveys that would recommend the company.
    pub recommend_share: Option<f64>,
}

/// Exit reasons by descending frequency; ties keep first-seen order.
pub fn exit_reasons(surveys: &[ExitSurvey], limit: usize) -> Vec<ExitReasonSummary> {
    let mut reasons: Vec<(&str, usize)> = Vec::new();
    for reason in surveys
        .iter()
        .filter_map(|survey| survey.exit_reason_primary.as_deref())
    {
        match reasons.iter_mut().find(|(seen, _)| *seen == reason) {
            Some((_, count)) => *count += 1,
            None => reasons.push((reason, 1)),
        }
    }
    reasons.sort_by(|a, b| b.1.cmp(&a.1));

    reasons
        .into_iter()
        .take(limit)
        .map(|(reason, count)| {
            let members: Vec<&ExitSurvey> = surveys
                .iter()
                .filter(|survey| survey.exit_reason_primary.as_deref() == Some(reason))
                .collect();
            let mean_of = |field: fn(&ExitSurvey) -> Option<f64>| {
                let values: Vec<f64> = members.iter().filter_map(|survey| field(survey)).collect();
                stats::mean(&values)
            };
            let answered: Vec<bool> = members
                .iter()
                .filter_map(|survey| survey.would_recommend_company)
                .collect();
            let recommended = answered.iter().filter(|answer| **answer).count();

            ExitReasonSummary {
                reason: reason.to_string(),
                count,
                share: stats::percentage(count, surveys.len()).unwrap_or(0.0),
                mean_overall_satisfaction: mean_of(|survey| survey.overall_satisfaction),
                mean_compensation_satisfaction: mean_of(|survey| survey.compensation_satisfaction),
                mean_growth_opportunities: mean_of(|survey| survey.growth_opportunities),
                mean_work_life_balance: mean_of(|survey| survey.work_life_balance_rating),
                recommend_share: stats::percentage(recommended, answered.len()),
            }
        })
        .collect()
}
