use crate::workflows::attrition::stats;

/// Inclusive valid range for a numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FieldBounds {
    pub const fn new(field: &'static str, min: f64, max: f64) -> Self {
        Self { field, min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamps `value` into range and reports whether it had to move.
    pub fn cap(&self, value: f64) -> (f64, bool) {
        let capped = value.clamp(self.min, self.max);
        (capped, capped != value)
    }
}

pub const AGE: FieldBounds = FieldBounds::new("age", 18.0, 70.0);
pub const MONTHLY_INCOME: FieldBounds = FieldBounds::new("monthly_income", 1000.0, 20000.0);
pub const YEARS_AT_COMPANY: FieldBounds = FieldBounds::new("years_at_company", 0.0, 50.0);
pub const PERFORMANCE_RATING: FieldBounds = FieldBounds::new("performance_rating", 1.0, 5.0);
pub const JOB_SATISFACTION: FieldBounds = FieldBounds::new("job_satisfaction", 1.0, 5.0);
pub const WORK_LIFE_BALANCE: FieldBounds = FieldBounds::new("work_life_balance", 1.0, 5.0);
pub const DISTANCE_FROM_HOME: FieldBounds = FieldBounds::new("distance_from_home", 0.0, 100.0);

/// Valid ranges applied to the employee table, in report order.
pub const EMPLOYEE_BOUNDS: [FieldBounds; 7] = [
    AGE,
    MONTHLY_INCOME,
    YEARS_AT_COMPANY,
    PERFORMANCE_RATING,
    JOB_SATISFACTION,
    WORK_LIFE_BALANCE,
    DISTANCE_FROM_HOME,
];

pub const RATING_SCALE: (f64, f64) = (1.0, 5.0);
pub const GOALS_MET: FieldBounds = FieldBounds::new("goals_met", 0.0, 100.0);

/// Caps every present value in the column, returning how many moved.
pub(crate) fn cap_column(values: &mut [Option<f64>], bounds: &FieldBounds) -> usize {
    let mut capped = 0;
    for value in values.iter_mut().flatten() {
        let (next, moved) = bounds.cap(*value);
        if moved {
            *value = next;
            capped += 1;
        }
    }
    capped
}

/// Fills missing entries with the median of the present ones. Returns the
/// median used and the number of filled cells, or `None` when the column has
/// no values to take a median from.
pub(crate) fn impute_median(values: &mut [Option<f64>]) -> Option<(f64, usize)> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let median = stats::median(&present)?;
    Some((median, fill_missing(values, median)))
}

/// Replaces every missing entry with `fill`, returning how many were filled.
pub(crate) fn fill_missing(values: &mut [Option<f64>], fill: f64) -> usize {
    let mut filled = 0;
    for value in values.iter_mut().filter(|value| value.is_none()) {
        *value = Some(fill);
        filled += 1;
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_reports_movement() {
        assert_eq!(AGE.cap(16.0), (18.0, true));
        assert_eq!(AGE.cap(71.5), (70.0, true));
        assert_eq!(AGE.cap(40.0), (40.0, false));
    }

    #[test]
    fn cap_column_skips_missing_values() {
        let mut values = vec![Some(0.0), None, Some(3.0), Some(9.0)];
        let capped = cap_column(&mut values, &JOB_SATISFACTION);

        assert_eq!(capped, 2);
        assert_eq!(values, vec![Some(1.0), None, Some(3.0), Some(5.0)]);
    }

    #[test]
    fn impute_uses_post_cap_median() {
        let mut values = vec![Some(1.0), Some(5.0), None, Some(4.0)];
        let (median, filled) = impute_median(&mut values).expect("median available");

        assert_eq!(median, 4.0);
        assert_eq!(filled, 1);
        assert_eq!(values[2], Some(4.0));
    }

    #[test]
    fn impute_needs_at_least_one_value() {
        let mut values: Vec<Option<f64>> = vec![None, None];
        assert!(impute_median(&mut values).is_none());
        assert_eq!(values, vec![None, None]);
    }

    #[test]
    fn fill_missing_leaves_present_values() {
        let mut values = vec![None, Some(2.0), None];

        assert_eq!(fill_missing(&mut values, 3.0), 2);
        assert_eq!(values, vec![Some(3.0), Some(2.0), Some(3.0)]);
    }
}
