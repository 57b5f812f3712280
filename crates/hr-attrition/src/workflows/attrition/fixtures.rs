//! Row builders shared by unit tests across the attrition workflow.

use super::domain::{AttritionStatus, Employee, EmployeeId, ExitSurvey, PerformanceReview};

pub(crate) fn employee(
    id: &str,
    department: &str,
    job_satisfaction: f64,
    work_life_balance: f64,
    years_at_company: f64,
    performance_rating: f64,
    attrition: AttritionStatus,
) -> Employee {
    Employee {
        employee_id: EmployeeId::from(id),
        first_name: Some("Test".to_string()),
        last_name: Some(format!("Employee{id}")),
        age: Some(34.0),
        gender: Some("F".to_string()),
        marital_status: Some("Single".to_string()),
        education_level: Some("Bachelor".to_string()),
        department: Some(department.to_string()),
        job_role: Some("Analyst".to_string()),
        years_at_company: Some(years_at_company),
        monthly_income: Some(5000.0),
        distance_from_home: 10.0,
        overtime: Some(false),
        job_satisfaction,
        work_life_balance,
        performance_rating,
        attrition,
        attrition_date: None,
        exit_reason: None,
        manager_id: None,
    }
}

pub(crate) fn review(id: &str, goals_met: f64) -> PerformanceReview {
    PerformanceReview {
        employee_id: EmployeeId::from(id),
        review_date: None,
        performance_rating: Some(4.0),
        competency_score: Some(4.0),
        leadership_score: Some(3.0),
        teamwork_score: Some(4.0),
        innovation_score: Some(3.0),
        manager_rating: Some(4.0),
        peer_feedback_score: Some(4.0),
        self_assessment_score: Some(4.0),
        goals_met: Some(goals_met),
        promotion_ready: Some(false),
        strengths: None,
        improvement_areas: None,
    }
}

pub(crate) fn exit_survey(id: &str, reason: &str, recommend: bool) -> ExitSurvey {
    ExitSurvey {
        employee_id: EmployeeId::from(id),
        exit_date: None,
        exit_reason_primary: Some(reason.to_string()),
        exit_reason_secondary: None,
        overall_satisfaction: Some(2.0),
        manager_satisfaction: Some(3.0),
        compensation_satisfaction: Some(2.0),
        growth_opportunities: Some(2.0),
        work_life_balance_rating: Some(3.0),
        job_role_clarity: Some(4.0),
        training_adequacy: Some(3.0),
        company_culture_rating: Some(3.0),
        likelihood_to_return: Some(2.0),
        would_recommend_company: Some(recommend),
        feedback_comments: None,
    }
}
