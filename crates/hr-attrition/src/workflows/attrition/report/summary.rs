use super::super::aggregation::{
    self, DepartedHighPerformer, ExitReasonSummary, OverallAttrition, RateTable,
    HIGH_PERFORMER_RATING,
};
use super::super::domain::{Employee, ExitSurvey};
use super::super::features::FeatureTable;
use super::super::merge::MergedEmployee;
use super::super::risk::{DepartmentRisk, RiskAssessment, RiskRanking};
use super::super::stats;
use super::views::{
    CategoryCount, CompensationSummary, DatasetOverview, DatasetSummary, DemographicSummary,
    ExecutiveSummary, PerformanceSummary, Recommendation, TenureSummary,
};
use crate::config::AnalysisConfig;
use chrono::NaiveDate;
use serde::Serialize;

/// Everything the analysis produces, composed once per run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttritionReport {
    pub generated_on: NaiveDate,
    pub overall: OverallAttrition,
    pub departments: RateTable,
    pub genders: RateTable,
    pub age_groups: RateTable,
    pub tenure_groups: RateTable,
    pub salary_quartiles: RateTable,
    pub salary_bands: RateTable,
    pub satisfaction_levels: RateTable,
    pub performance_ratings: RateTable,
    pub performance_categories: RateTable,
    pub high_performer_departments: RateTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub early_tenure_rate: Option<f64>,
    pub high_performers_left: Vec<DepartedHighPerformer>,
    pub exit_surveys: usize,
    pub exit_reasons: Vec<ExitReasonSummary>,
    /// Employees carrying the boolean high-risk feature flag.
    pub flagged_employees: usize,
    /// Current employees at or above the numeric risk threshold.
    pub high_risk_total: usize,
    pub high_risk_employees: Vec<RiskAssessment>,
    pub department_risk: Vec<DepartmentRisk>,
    pub recommendations: Vec<Recommendation>,
    pub executive_summary: ExecutiveSummary,
}

impl AttritionReport {
    pub fn build(
        merged: &[MergedEmployee<'_>],
        exit_surveys: &[ExitSurvey],
        features: &FeatureTable,
        risk: &RiskRanking,
        config: &AnalysisConfig,
        generated_on: NaiveDate,
    ) -> Self {
        let employees: Vec<&Employee> = merged.iter().map(|row| row.employee).collect();

        let overall = aggregation::overall(merged);
        let departments = aggregation::by_department(merged);
        let early_tenure_rate = aggregation::early_tenure_rate(merged);
        let high_performers_left = aggregation::high_performers_left(merged);
        let exit_reasons = aggregation::exit_reasons(exit_surveys, config.top_exit_reasons);

        let recommendations = super::generate_recommendations(
            &departments,
            early_tenure_rate,
            &high_performers_left,
        );
        let executive_summary = super::executive_summary(
            &overall,
            &departments,
            risk.high_risk.len(),
            &exit_reasons,
            &employees,
            config.replacement_cost_ratio,
        );

        Self {
            generated_on,
            overall,
            departments,
            genders: aggregation::by_gender(merged),
            age_groups: aggregation::by_age_group(merged),
            tenure_groups: aggregation::by_tenure_group(merged),
            salary_quartiles: aggregation::by_salary_quartile(merged),
            salary_bands: aggregation::by_salary_band(merged),
            satisfaction_levels: aggregation::by_satisfaction_level(merged),
            performance_ratings: aggregation::by_performance_rating(merged),
            performance_categories: aggregation::by_performance_category(merged),
            high_performer_departments: aggregation::high_performer_departments(merged),
            early_tenure_rate,
            high_performers_left,
            exit_surveys: exit_surveys.len(),
            exit_reasons,
            flagged_employees: features.high_risk_count(),
            high_risk_total: risk.high_risk.len(),
            high_risk_employees: risk.top(config.top_risk_listing).to_vec(),
            department_risk: risk.departments.clone(),
            recommendations,
            executive_summary,
        }
    }
}

impl DatasetSummary {
    pub fn from_employees(employees: &[Employee]) -> Self {
        let ages: Vec<f64> = employees.iter().filter_map(|row| row.age).collect();
        let incomes: Vec<f64> = employees.iter().filter_map(|row| row.monthly_income).collect();
        let tenure: Vec<f64> = employees
            .iter()
            .filter_map(|row| row.years_at_company)
            .collect();
        let ratings: Vec<f64> = employees.iter().map(|row| row.performance_rating).collect();
        let satisfaction: Vec<f64> = employees.iter().map(|row| row.job_satisfaction).collect();
        let balance: Vec<f64> = employees.iter().map(|row| row.work_life_balance).collect();

        let total = employees.len();
        let departed = employees.iter().filter(|row| row.is_departed()).count();
        let rounded = |value: Option<f64>, decimals: i32| {
            value.map(|value| stats::round_to(value, decimals))
        };

        Self {
            overview: DatasetOverview {
                total_employees: total,
                departed_employees: departed,
                current_employees: employees.iter().filter(|row| row.is_current()).count(),
                overall_attrition_rate: stats::percentage(departed, total)
                    .map_or(0.0, |rate| stats::round_to(rate, 2)),
            },
            demographics: DemographicSummary {
                average_age: rounded(stats::mean(&ages), 1),
                min_age: stats::min(&ages),
                max_age: stats::max(&ages),
                gender_distribution: distribution(employees, |row| row.gender.as_deref()),
                department_distribution: distribution(employees, |row| row.department.as_deref()),
                education_distribution: distribution(employees, |row| {
                    row.education_level.as_deref()
                }),
            },
            compensation: CompensationSummary {
                mean_monthly_income: rounded(stats::mean(&incomes), 0),
                median_monthly_income: rounded(stats::median(&incomes), 0),
                min_monthly_income: stats::min(&incomes),
                max_monthly_income: stats::max(&incomes),
                income_std: rounded(stats::sample_std(&incomes), 0),
            },
            performance: PerformanceSummary {
                average_performance_rating: rounded(stats::mean(&ratings), 2),
                average_job_satisfaction: rounded(stats::mean(&satisfaction), 2),
                average_work_life_balance: rounded(stats::mean(&balance), 2),
                high_performers: ratings
                    .iter()
                    .filter(|rating| **rating >= HIGH_PERFORMER_RATING)
                    .count(),
            },
            tenure: TenureSummary {
                average_years_at_company: rounded(stats::mean(&tenure), 1),
                median_years_at_company: rounded(stats::median(&tenure), 1),
                min_years_at_company: stats::min(&tenure),
                max_years_at_company: stats::max(&tenure),
            },
        }
    }
}

/// Value counts, most frequent first; ties keep first-seen order.
fn distribution<F>(employees: &[Employee], value: F) -> Vec<CategoryCount>
where
    F: Fn(&Employee) -> Option<&str>,
{
    let mut counts: Vec<CategoryCount> = Vec::new();
    for category in employees.iter().filter_map(|row| value(row)) {
        match counts.iter_mut().find(|entry| entry.value == category) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                value: category.to_string(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
