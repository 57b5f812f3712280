use super::super::aggregation::{DepartedHighPerformer, ExitReasonSummary, OverallAttrition, RateTable};
use super::super::domain::Employee;
use super::super::stats;
use super::views::{ExecutiveSummary, Priority, Recommendation};

pub(crate) fn generate_recommendations(
    departments: &RateTable,
    early_tenure_rate: Option<f64>,
    high_performers_left: &[DepartedHighPerformer],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if let Some(highest) = departments.highest() {
        recommendations.push(recommendation(
            Priority::High,
            "Department Focus",
            format!(
                "Immediate intervention needed in {} department",
                highest.group
            ),
            format!(
                "Attrition rate of {:.1}% requires urgent attention",
                highest.attrition_rate
            ),
            "0-3 months",
        ));
    }

    let early_details = match early_tenure_rate {
        Some(rate) => format!(
            "Focus on the first 3 years, where attrition currently runs at {rate:.1}%"
        ),
        None => "Focus on first 3 years when attrition risk is highest".to_string(),
    };
    recommendations.push(recommendation(
        Priority::High,
        "Early Career Support",
        "Implement comprehensive onboarding and 1-3 year retention program".to_string(),
        early_details,
        "0-6 months",
    ));

    recommendations.push(recommendation(
        Priority::Medium,
        "Job Satisfaction",
        "Regular satisfaction surveys and manager training".to_string(),
        "Address low satisfaction scores through better management practices".to_string(),
        "3-6 months",
    ));

    if !high_performers_left.is_empty() {
        let count = high_performers_left.len();
        recommendations.push(recommendation(
            Priority::Critical,
            "High Performer Retention",
            "Career development and recognition programs for top performers".to_string(),
            format!(
                "{count} high performer{} already left; prevent further losses through better career pathing",
                if count == 1 { "" } else { "s" }
            ),
            "0-3 months",
        ));
    }

    recommendations.push(recommendation(
        Priority::Medium,
        "Compensation Review",
        "Market salary analysis and adjustment for key roles".to_string(),
        "Ensure competitive compensation especially for high-risk departments".to_string(),
        "3-12 months",
    ));

    recommendations
}

fn recommendation(
    priority: Priority,
    area: &'static str,
    action: String,
    details: String,
    timeline: &'static str,
) -> Recommendation {
    Recommendation {
        priority,
        priority_label: priority.label(),
        area,
        action,
        details,
        timeline,
    }
}

/// Turnover cost is `departed * mean annual salary * replacement_ratio`.
pub(crate) fn executive_summary(
    overall: &OverallAttrition,
    departments: &RateTable,
    high_risk_employees: usize,
    exit_reasons: &[ExitReasonSummary],
    employees: &[&Employee],
    replacement_ratio: f64,
) -> ExecutiveSummary {
    let highest = departments.highest();
    let incomes: Vec<f64> = employees
        .iter()
        .filter_map(|employee| employee.monthly_income)
        .collect();
    let average_annual_salary = stats::mean(&incomes).map(|monthly| monthly * 12.0);
    let replacement_cost_per_employee = average_annual_salary.map(|salary| salary * replacement_ratio);

    ExecutiveSummary {
        overall_attrition_rate: overall.attrition_rate,
        highest_risk_department: highest.map(|row| row.group.clone()),
        highest_risk_department_rate: highest.map(|row| row.attrition_rate),
        high_risk_employees,
        top_exit_reason: exit_reasons.first().map(|reason| reason.reason.clone()),
        average_annual_salary: average_annual_salary.map(|salary| stats::round_to(salary, 2)),
        replacement_cost_per_employee: replacement_cost_per_employee
            .map(|cost| stats::round_to(cost, 2)),
        estimated_turnover_cost: replacement_cost_per_employee
            .map(|cost| stats::round_to(cost * overall.departed as f64, 2)),
    }
}
