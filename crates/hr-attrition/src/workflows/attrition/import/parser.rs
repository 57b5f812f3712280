use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Rows as they appear in the export, plus the header row so later stages can
/// tell an absent column apart from an empty cell.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable<T> {
    pub columns: Vec<String>,
    pub rows: Vec<T>,
}

impl<T> RawTable<T> {
    pub fn new(columns: Vec<String>, rows: Vec<T>) -> Self {
        Self { columns, rows }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub(crate) fn parse_table<T, R>(reader: R) -> Result<RawTable<T>, csv::Error>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = csv_reader
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').to_string())
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<T>() {
        rows.push(record?);
    }

    Ok(RawTable { columns, rows })
}

/// Every cell stays textual at this layer; cleaning decides what a value means.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawEmployeeRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub employee_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub marital_status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub education_level: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub job_role: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub years_at_company: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub monthly_income: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub distance_from_home: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub overtime: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub job_satisfaction: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub work_life_balance: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub performance_rating: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub attrition: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub attrition_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub exit_reason: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub manager_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawReviewRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub employee_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub review_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub performance_rating: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub competency_score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub leadership_score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub teamwork_score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub innovation_score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub manager_rating: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub peer_feedback_score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub self_assessment_score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub goals_met: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub promotion_ready: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub strengths: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub improvement_areas: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawExitSurveyRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub employee_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub exit_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub exit_reason_primary: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub exit_reason_secondary: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub overall_satisfaction: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub manager_satisfaction: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub compensation_satisfaction: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub growth_opportunities: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub work_life_balance_rating: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub job_role_clarity: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub training_adequacy: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub company_culture_rating: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub likelihood_to_return: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub would_recommend_company: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub feedback_comments: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
