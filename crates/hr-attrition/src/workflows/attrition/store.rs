use super::cleaning::{CleanedDataset, QualityReport};
use super::domain::{Employee, EmployeeId, ExitSurvey, PerformanceReview};
use std::collections::HashMap;

/// Owns the cleaned tables for one pipeline run and answers lookups by
/// employee identifier. Joined tables may repeat an identifier; lookups
/// return the first row in table order.
#[derive(Debug, Clone)]
pub struct RecordStore {
    employees: Vec<Employee>,
    reviews: Vec<PerformanceReview>,
    exit_surveys: Vec<ExitSurvey>,
    quality: QualityReport,
    employee_index: HashMap<EmployeeId, usize>,
    review_index: HashMap<EmployeeId, usize>,
    survey_index: HashMap<EmployeeId, usize>,
}

impl RecordStore {
    pub fn new(dataset: CleanedDataset) -> Self {
        let CleanedDataset {
            employees,
            reviews,
            exit_surveys,
            quality,
        } = dataset;

        let employee_index = first_positions(employees.iter().map(|row| &row.employee_id));
        let review_index = first_positions(reviews.iter().map(|row| &row.employee_id));
        let survey_index = first_positions(exit_surveys.iter().map(|row| &row.employee_id));

        Self {
            employees,
            reviews,
            exit_surveys,
            quality,
            employee_index,
            review_index,
            survey_index,
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn reviews(&self) -> &[PerformanceReview] {
        &self.reviews
    }

    pub fn exit_surveys(&self) -> &[ExitSurvey] {
        &self.exit_surveys
    }

    pub fn quality(&self) -> &QualityReport {
        &self.quality
    }

    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employee_index.get(id).map(|&index| &self.employees[index])
    }

    pub fn review_for(&self, id: &EmployeeId) -> Option<&PerformanceReview> {
        self.review_index.get(id).map(|&index| &self.reviews[index])
    }

    pub fn survey_for(&self, id: &EmployeeId) -> Option<&ExitSurvey> {
        self.survey_index.get(id).map(|&index| &self.exit_surveys[index])
    }
}

fn first_positions<'a>(ids: impl Iterator<Item = &'a EmployeeId>) -> HashMap<EmployeeId, usize> {
    let mut index = HashMap::new();
    for (position, id) in ids.enumerate() {
        index.entry(id.clone()).or_insert(position);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::attrition::domain::AttritionStatus;
    use crate::workflows::attrition::fixtures::{employee, exit_survey, review};

    fn store() -> RecordStore {
        RecordStore::new(CleanedDataset {
            employees: vec![
                employee("E1", "IT", 3.0, 3.0, 2.0, 3.0, AttritionStatus::Active),
                employee("E2", "HR", 3.0, 3.0, 2.0, 3.0, AttritionStatus::Departed),
            ],
            reviews: vec![review("E1", 80.0), review("E1", 40.0)],
            exit_surveys: vec![exit_survey("E2", "Better Pay", false)],
            quality: QualityReport::default(),
        })
    }

    #[test]
    fn lookups_return_first_match() {
        let store = store();
        let id = EmployeeId::from("E1");

        assert_eq!(store.review_for(&id).and_then(|row| row.goals_met), Some(80.0));
        assert!(store.survey_for(&id).is_none());
        assert_eq!(store.employee(&id).map(|row| row.department_label()), Some("IT"));
    }

    #[test]
    fn unknown_identifier_has_no_records() {
        let store = store();
        let id = EmployeeId::from("E404");

        assert!(store.employee(&id).is_none());
        assert!(store.review_for(&id).is_none());
        assert!(store.survey_for(&id).is_none());
        assert_eq!(store.reviews().len(), 2);
    }
}
