use super::domain::{Employee, ExitSurvey, PerformanceReview};
use super::features::{EmployeeFeatures, FeatureTable};
use super::store::RecordStore;
use tracing::info;

/// One employee with its derived features and, when present, the first
/// matching performance review and exit survey.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergedEmployee<'a> {
    pub employee: &'a Employee,
    pub features: &'a EmployeeFeatures,
    pub review: Option<&'a PerformanceReview>,
    pub exit_survey: Option<&'a ExitSurvey>,
}

impl MergedEmployee<'_> {
    pub fn goals_met(&self) -> Option<f64> {
        self.review.and_then(|review| review.goals_met)
    }
}

/// Left join of reviews and exit surveys onto the employee table. The result
/// has exactly one entry per employee, in employee order.
pub fn merge<'a>(store: &'a RecordStore, features: &'a FeatureTable) -> Vec<MergedEmployee<'a>> {
    let merged: Vec<MergedEmployee<'a>> = store
        .employees()
        .iter()
        .zip(&features.rows)
        .map(|(employee, features)| MergedEmployee {
            employee,
            features,
            review: store.review_for(&employee.employee_id),
            exit_survey: store.survey_for(&employee.employee_id),
        })
        .collect();

    info!(
        employees = merged.len(),
        with_review = merged.iter().filter(|row| row.review.is_some()).count(),
        with_exit_survey = merged.iter().filter(|row| row.exit_survey.is_some()).count(),
        "merged HR tables"
    );

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::attrition::cleaning::{CleanedDataset, QualityReport};
    use crate::workflows::attrition::domain::AttritionStatus;
    use crate::workflows::attrition::fixtures::{employee, exit_survey, review};

    #[test]
    fn cardinality_matches_employee_table() {
        let store = RecordStore::new(CleanedDataset {
            employees: vec![
                employee("E1", "IT", 3.0, 3.0, 2.0, 3.0, AttritionStatus::Active),
                employee("E2", "HR", 3.0, 3.0, 2.0, 3.0, AttritionStatus::Departed),
                employee("E3", "HR", 4.0, 4.0, 6.0, 4.0, AttritionStatus::Active),
            ],
            reviews: vec![
                review("E2", 70.0),
                review("E2", 20.0),
                review("E1", 90.0),
                review("E9", 50.0),
            ],
            exit_surveys: vec![
                exit_survey("E2", "Better Pay", false),
                exit_survey("E2", "Relocation", true),
            ],
            quality: QualityReport::default(),
        });
        let features = FeatureTable::build(store.employees());

        let merged = merge(&store, &features);

        assert_eq!(merged.len(), store.employees().len());
        let ids: Vec<&str> = merged
            .iter()
            .map(|row| row.employee.employee_id.as_str())
            .collect();
        assert_eq!(ids, vec!["E1", "E2", "E3"]);

        assert_eq!(merged[0].goals_met(), Some(90.0));
        assert_eq!(merged[1].goals_met(), Some(70.0));
        assert_eq!(merged[2].goals_met(), None);
        assert_eq!(
            merged[1]
                .exit_survey
                .and_then(|survey| survey.exit_reason_primary.as_deref()),
            Some("Better Pay")
        );
        assert!(merged[0].exit_survey.is_none());
    }
}
