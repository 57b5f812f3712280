use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::fmt;

/// Identifier wrapper shared by all three HR tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Employees,
    PerformanceReviews,
    ExitSurveys,
}

impl TableKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Employees => "employee_data",
            Self::PerformanceReviews => "performance_data",
            Self::ExitSurveys => "exit_survey_data",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Attrition outcome recorded per employee. The source data encodes it as
/// `Yes`/`No`; anything else is kept as `Unknown` rather than guessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttritionStatus {
    Departed,
    Active,
    Unknown,
}

impl AttritionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Departed => "Yes",
            Self::Active => "No",
            Self::Unknown => "Unknown",
        }
    }

    /// Expects an already capitalized value.
    pub(crate) fn from_label(value: &str) -> Self {
        match value {
            "Yes" => Self::Departed,
            "No" => Self::Active,
            _ => Self::Unknown,
        }
    }

    pub const fn is_departed(self) -> bool {
        matches!(self, Self::Departed)
    }
}

impl Serialize for AttritionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// A parsed date column. Values that were present but could not be parsed
/// stay visible as `Unknown` instead of silently becoming missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordDate {
    Known(NaiveDate),
    Unknown,
}

impl RecordDate {
    pub const UNKNOWN_LABEL: &'static str = "unknown";

    pub fn parse(value: &str) -> Self {
        parse_date(value).map_or(Self::Unknown, Self::Known)
    }

    pub const fn known(self) -> Option<NaiveDate> {
        match self {
            Self::Known(date) => Some(date),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Unknown => f.write_str(Self::UNKNOWN_LABEL),
        }
    }
}

impl Serialize for RecordDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }

    ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Cleaned employee row. Column names match the raw export so a cleaned file
/// can be imported again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<f64>,
    pub gender: Option<String>,
    pub marital_status: Option<String>,
    pub education_level: Option<String>,
    pub department: Option<String>,
    pub job_role: Option<String>,
    pub years_at_company: Option<f64>,
    pub monthly_income: Option<f64>,
    pub distance_from_home: f64,
    #[serde(serialize_with = "serialize_yes_no")]
    pub overtime: Option<bool>,
    pub job_satisfaction: f64,
    pub work_life_balance: f64,
    pub performance_rating: f64,
    pub attrition: AttritionStatus,
    pub attrition_date: Option<RecordDate>,
    pub exit_reason: Option<String>,
    pub manager_id: Option<String>,
}

impl Employee {
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            self.employee_id.to_string()
        } else {
            parts.join(" ")
        }
    }

    pub fn department_label(&self) -> &str {
        self.department.as_deref().unwrap_or("Unassigned")
    }

    pub const fn is_departed(&self) -> bool {
        self.attrition.is_departed()
    }

    pub fn is_current(&self) -> bool {
        self.attrition == AttritionStatus::Active
    }
}

/// Cleaned performance review row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceReview {
    pub employee_id: EmployeeId,
    pub review_date: Option<RecordDate>,
    pub performance_rating: Option<f64>,
    pub competency_score: Option<f64>,
    pub leadership_score: Option<f64>,
    pub teamwork_score: Option<f64>,
    pub innovation_score: Option<f64>,
    pub manager_rating: Option<f64>,
    pub peer_feedback_score: Option<f64>,
    pub self_assessment_score: Option<f64>,
    pub goals_met: Option<f64>,
    #[serde(serialize_with = "serialize_yes_no")]
    pub promotion_ready: Option<bool>,
    pub strengths: Option<String>,
    pub improvement_areas: Option<String>,
}

/// Cleaned exit survey row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExitSurvey {
    pub employee_id: EmployeeId,
    pub exit_date: Option<RecordDate>,
    pub exit_reason_primary: Option<String>,
    pub exit_reason_secondary: Option<String>,
    pub overall_satisfaction: Option<f64>,
    pub manager_satisfaction: Option<f64>,
    pub compensation_satisfaction: Option<f64>,
    pub growth_opportunities: Option<f64>,
    pub work_life_balance_rating: Option<f64>,
    pub job_role_clarity: Option<f64>,
    pub training_adequacy: Option<f64>,
    pub company_culture_rating: Option<f64>,
    pub likelihood_to_return: Option<f64>,
    #[serde(serialize_with = "serialize_yes_no")]
    pub would_recommend_company: Option<bool>,
    pub feedback_comments: Option<String>,
}

pub(crate) fn serialize_yes_no<S: Serializer>(
    value: &Option<bool>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(true) => serializer.serialize_str("Yes"),
        Some(false) => serializer.serialize_str("No"),
        None => serializer.serialize_none(),
    }
}
