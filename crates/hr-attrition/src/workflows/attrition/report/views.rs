use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub priority_label: &'static str,
    pub area: &'static str,
    pub action: String,
    pub details: String,
    pub timeline: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutiveSummary {
    pub overall_attrition_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_risk_department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_risk_department_rate: Option<f64>,
    pub high_risk_employees: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_exit_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_annual_salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement_cost_per_employee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_turnover_cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub total_employees: usize,
    pub departed_employees: usize,
    pub current_employees: usize,
    pub overall_attrition_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicSummary {
    pub average_age: Option<f64>,
    pub min_age: Option<f64>,
    pub max_age: Option<f64>,
    pub gender_distribution: Vec<CategoryCount>,
    pub department_distribution: Vec<CategoryCount>,
    pub education_distribution: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompensationSummary {
    pub mean_monthly_income: Option<f64>,
    pub median_monthly_income: Option<f64>,
    pub min_monthly_income: Option<f64>,
    pub max_monthly_income: Option<f64>,
    pub income_std: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub average_performance_rating: Option<f64>,
    pub average_job_satisfaction: Option<f64>,
    pub average_work_life_balance: Option<f64>,
    pub high_performers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenureSummary {
    pub average_years_at_company: Option<f64>,
    pub median_years_at_company: Option<f64>,
    pub min_years_at_company: Option<f64>,
    pub max_years_at_company: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub overview: DatasetOverview,
    pub demographics: DemographicSummary,
    pub compensation: CompensationSummary,
    pub performance: PerformanceSummary,
    pub tenure: TenureSummary,
}
