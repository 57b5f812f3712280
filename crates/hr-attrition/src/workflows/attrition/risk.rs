//! Integer flight-risk scoring for current employees.
//!
//! Separate from the boolean `high_risk_flag` in [`super::features`]: the two
//! use different weightings and are reported independently.

use super::domain::{Employee, EmployeeId};
use super::stats;
use serde::Serialize;

/// Scores at or above this value are listed as high risk.
pub const HIGH_RISK_THRESHOLD: u8 = 6;

/// Upper bound of the reported score range. The highest reachable total is
/// 10 (3 + 3 + 3 + 1).
pub const MAX_RISK_SCORE: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    JobSatisfaction,
    WorkLifeBalance,
    Tenure,
    HighPerformer,
}

impl RiskFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::JobSatisfaction => "Job Satisfaction",
            Self::WorkLifeBalance => "Work-Life Balance",
            Self::Tenure => "Tenure",
            Self::HighPerformer => "High Performer",
        }
    }
}

/// One contribution to a risk score, kept so the ranking can be audited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskComponent {
    pub factor: RiskFactor,
    pub points: u8,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub employee_id: EmployeeId,
    pub name: String,
    pub department: String,
    pub score: u8,
    pub job_satisfaction: f64,
    pub work_life_balance: f64,
    pub years_at_company: Option<f64>,
    pub components: Vec<RiskComponent>,
}

impl RiskAssessment {
    pub const fn is_high_risk(&self) -> bool {
        self.score >= HIGH_RISK_THRESHOLD
    }
}

pub fn score_components(employee: &Employee) -> Vec<RiskComponent> {
    let mut components = Vec::new();

    let satisfaction = employee.job_satisfaction;
    if satisfaction <= 2.0 {
        components.push(RiskComponent {
            factor: RiskFactor::JobSatisfaction,
            points: 3,
            notes: format!("job satisfaction {satisfaction} is low"),
        });
    } else if satisfaction == 3.0 {
        components.push(RiskComponent {
            factor: RiskFactor::JobSatisfaction,
            points: 2,
            notes: "job satisfaction is neutral".to_string(),
        });
    }

    let balance = employee.work_life_balance;
    if balance <= 2.0 {
        components.push(RiskComponent {
            factor: RiskFactor::WorkLifeBalance,
            points: 3,
            notes: format!("work-life balance {balance} is poor"),
        });
    } else if balance == 3.0 {
        components.push(RiskComponent {
            factor: RiskFactor::WorkLifeBalance,
            points: 2,
            notes: "work-life balance is neutral".to_string(),
        });
    }

    match employee.years_at_company {
        Some(years) if years < 1.0 => components.push(RiskComponent {
            factor: RiskFactor::Tenure,
            points: 3,
            notes: format!("{years} years at company, still onboarding"),
        }),
        Some(years) if (1.0..=3.0).contains(&years) => components.push(RiskComponent {
            factor: RiskFactor::Tenure,
            points: 2,
            notes: format!("{years} years at company, inside the early-tenure window"),
        }),
        _ => {}
    }

    if employee.performance_rating >= 4.0 {
        components.push(RiskComponent {
            factor: RiskFactor::HighPerformer,
            points: 1,
            notes: format!(
                "performance rating {} marks a valuable flight risk",
                employee.performance_rating
            ),
        });
    }

    components
}

/// Integer score in `[0, 12]`.
pub fn risk_score(employee: &Employee) -> u8 {
    score_components(employee)
        .iter()
        .map(|component| component.points)
        .sum()
}

pub fn assess(employee: &Employee) -> RiskAssessment {
    let components = score_components(employee);
    let score = components.iter().map(|component| component.points).sum();

    RiskAssessment {
        employee_id: employee.employee_id.clone(),
        name: employee.display_name(),
        department: employee.department_label().to_string(),
        score,
        job_satisfaction: employee.job_satisfaction,
        work_life_balance: employee.work_life_balance,
        years_at_company: employee.years_at_company,
        components,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn from_mean_score(score: f64) -> Self {
        if score >= 4.0 {
            Self::High
        } else if score >= 2.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentRisk {
    pub department: String,
    pub headcount: usize,
    pub mean_risk_score: f64,
    pub mean_job_satisfaction: f64,
    pub mean_work_life_balance: f64,
    pub level: RiskLevel,
}

/// Risk scores of the currently employed population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskRanking {
    /// Every current employee, in table order.
    pub assessments: Vec<RiskAssessment>,
    /// Score >= threshold, highest first; ties keep table order.
    pub high_risk: Vec<RiskAssessment>,
    pub departments: Vec<DepartmentRisk>,
}

impl RiskRanking {
    pub fn build(employees: &[Employee]) -> Self {
        let current: Vec<&Employee> = employees
            .iter()
            .filter(|employee| employee.is_current())
            .collect();
        let assessments: Vec<RiskAssessment> = current.iter().copied().map(assess).collect();

        let mut high_risk: Vec<RiskAssessment> = assessments
            .iter()
            .filter(|assessment| assessment.is_high_risk())
            .cloned()
            .collect();
        high_risk.sort_by(|a, b| b.score.cmp(&a.score));

        let departments = department_risk(&current, &assessments);

        Self {
            assessments,
            high_risk,
            departments,
        }
    }

    pub fn top(&self, limit: usize) -> &[RiskAssessment] {
        &self.high_risk[..self.high_risk.len().min(limit)]
    }
}

/// Employees without a department are left out, matching the department
/// rate table.
fn department_risk(current: &[&Employee], assessments: &[RiskAssessment]) -> Vec<DepartmentRisk> {
    let keyed: Vec<(&str, &RiskAssessment)> = current
        .iter()
        .zip(assessments)
        .filter_map(|(employee, assessment)| {
            employee
                .department
                .as_deref()
                .map(|department| (department, assessment))
        })
        .collect();

    let mut order: Vec<&str> = Vec::new();
    for &(department, _) in &keyed {
        if !order.contains(&department) {
            order.push(department);
        }
    }

    let mut departments: Vec<DepartmentRisk> = order
        .into_iter()
        .filter_map(|department| {
            let members: Vec<&RiskAssessment> = keyed
                .iter()
                .filter(|(key, _)| *key == department)
                .map(|(_, assessment)| *assessment)
                .collect();
            let scores: Vec<f64> = members.iter().map(|a| f64::from(a.score)).collect();
            let satisfaction: Vec<f64> = members.iter().map(|a| a.job_satisfaction).collect();
            let balance: Vec<f64> = members.iter().map(|a| a.work_life_balance).collect();

            let mean_risk_score = stats::round_to(stats::mean(&scores)?, 2);
            Some(DepartmentRisk {
                department: department.to_string(),
                headcount: members.len(),
                mean_risk_score,
                mean_job_satisfaction: stats::round_to(stats::mean(&satisfaction)?, 2),
                mean_work_life_balance: stats::round_to(stats::mean(&balance)?, 2),
                level: RiskLevel::from_mean_score(mean_risk_score),
            })
        })
        .collect();

    departments.sort_by(|a, b| b.mean_risk_score.total_cmp(&a.mean_risk_score));
    departments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::attrition::domain::AttritionStatus;
    use crate::workflows::attrition::fixtures::employee;

    #[test]
    fn example_employee_scores_nine() {
        let row = employee("1", "IT", 1.0, 1.0, 2.0, 5.0, AttritionStatus::Active);

        let assessment = assess(&row);

        assert_eq!(assessment.score, 9);
        assert!(assessment.is_high_risk());
        assert_eq!(assessment.components.len(), 4);
        assert_eq!(
            assessment
                .components
                .iter()
                .map(|component| (component.factor, component.points))
                .collect::<Vec<_>>(),
            vec![
                (RiskFactor::JobSatisfaction, 3),
                (RiskFactor::WorkLifeBalance, 3),
                (RiskFactor::Tenure, 2),
                (RiskFactor::HighPerformer, 1),
            ]
        );
    }

    #[test]
    fn neutral_ratings_and_new_hires_score_as_expected() {
        let row = employee("2", "Sales", 3.0, 3.0, 0.5, 3.0, AttritionStatus::Active);
        assert_eq!(risk_score(&row), 7);

        let settled = employee("3", "Sales", 4.0, 5.0, 8.0, 3.0, AttritionStatus::Active);
        assert_eq!(risk_score(&settled), 0);
    }

    #[test]
    fn score_never_exceeds_maximum() {
        let row = employee("4", "Sales", 1.0, 1.0, 0.0, 5.0, AttritionStatus::Active);
        assert_eq!(risk_score(&row), 10);

        for satisfaction in 1..=5 {
            for balance in 1..=5 {
                for years in [0.0, 0.5, 1.0, 2.0, 3.0, 3.5, 10.0] {
                    for rating in 1..=5 {
                        let row = employee(
                            "5",
                            "Sales",
                            satisfaction as f64,
                            balance as f64,
                            years,
                            rating as f64,
                            AttritionStatus::Active,
                        );
                        assert!(risk_score(&row) <= MAX_RISK_SCORE);
                    }
                }
            }
        }
    }

    #[test]
    fn ranking_covers_only_current_employees() {
        let rows = vec![
            employee("1", "IT", 1.0, 1.0, 2.0, 5.0, AttritionStatus::Active),
            employee("2", "IT", 1.0, 1.0, 2.0, 5.0, AttritionStatus::Departed),
            employee("3", "IT", 1.0, 1.0, 2.0, 5.0, AttritionStatus::Unknown),
        ];

        let ranking = RiskRanking::build(&rows);

        assert_eq!(ranking.assessments.len(), 1);
        assert_eq!(ranking.high_risk.len(), 1);
        assert_eq!(ranking.high_risk[0].employee_id.as_str(), "1");
    }

    #[test]
    fn high_risk_list_is_sorted_and_stable() {
        let rows = vec![
            employee("a", "IT", 3.0, 3.0, 5.0, 3.0, AttritionStatus::Active),
            employee("b", "IT", 1.0, 1.0, 0.5, 5.0, AttritionStatus::Active),
            employee("c", "HR", 3.0, 3.0, 2.0, 3.0, AttritionStatus::Active),
            employee("d", "HR", 3.0, 3.0, 5.0, 3.0, AttritionStatus::Active),
            employee("e", "HR", 5.0, 5.0, 10.0, 3.0, AttritionStatus::Active),
        ];

        let ranking = RiskRanking::build(&rows);
        let ids: Vec<&str> = ranking
            .high_risk
            .iter()
            .map(|assessment| assessment.employee_id.as_str())
            .collect();

        // a and d tie on 4 points and are excluded; b=10, c=6.
        assert_eq!(ids, vec!["b", "c"]);
        assert_eq!(ranking.top(1).len(), 1);
        assert_eq!(ranking.top(10).len(), 2);
    }

    #[test]
    fn tied_high_risk_scores_keep_table_order() {
        let rows = vec![
            employee("p", "IT", 3.0, 3.0, 2.0, 3.0, AttritionStatus::Active),
            employee("q", "HR", 1.0, 1.0, 5.0, 3.0, AttritionStatus::Active),
            employee("r", "IT", 1.0, 1.0, 0.5, 5.0, AttritionStatus::Active),
            employee("s", "HR", 2.0, 3.0, 2.0, 3.0, AttritionStatus::Active),
            employee("t", "Sales", 3.0, 3.0, 2.0, 3.0, AttritionStatus::Active),
        ];

        let ranking = RiskRanking::build(&rows);
        let ranked: Vec<(&str, u8)> = ranking
            .high_risk
            .iter()
            .map(|assessment| (assessment.employee_id.as_str(), assessment.score))
            .collect();

        assert_eq!(
            ranked,
            vec![("r", 10), ("s", 7), ("p", 6), ("q", 6), ("t", 6)]
        );
    }

    #[test]
    fn department_summary_skips_employees_without_department() {
        let mut unassigned = employee("x", "IT", 1.0, 1.0, 0.5, 5.0, AttritionStatus::Active);
        unassigned.department = None;
        let rows = vec![
            employee("a", "IT", 3.0, 4.0, 5.0, 3.0, AttritionStatus::Active),
            unassigned,
        ];

        let ranking = RiskRanking::build(&rows);

        assert_eq!(ranking.assessments.len(), 2);
        assert_eq!(ranking.high_risk[0].employee_id.as_str(), "x");
        let departments: Vec<(&str, usize)> = ranking
            .departments
            .iter()
            .map(|row| (row.department.as_str(), row.headcount))
            .collect();
        assert_eq!(departments, vec![("IT", 1)]);
    }

    #[test]
    fn department_summary_levels() {
        let rows = vec![
            employee("a", "IT", 1.0, 1.0, 0.5, 5.0, AttritionStatus::Active),
            employee("b", "IT", 3.0, 4.0, 5.0, 3.0, AttritionStatus::Active),
            employee("c", "HR", 5.0, 5.0, 10.0, 3.0, AttritionStatus::Active),
            employee("d", "Sales", 3.0, 5.0, 10.0, 3.0, AttritionStatus::Active),
            employee("e", "Sales", 4.0, 5.0, 10.0, 4.0, AttritionStatus::Active),
            employee("f", "Sales", 3.0, 3.0, 10.0, 3.0, AttritionStatus::Active),
        ];

        let ranking = RiskRanking::build(&rows);
        let summary: Vec<(&str, f64, RiskLevel, usize)> = ranking
            .departments
            .iter()
            .map(|row| (row.department.as_str(), row.mean_risk_score, row.level, row.headcount))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("IT", 6.0, RiskLevel::High, 2),
                ("Sales", 2.33, RiskLevel::Low, 3),
                ("HR", 0.0, RiskLevel::Low, 1),
            ]
        );
    }
}
