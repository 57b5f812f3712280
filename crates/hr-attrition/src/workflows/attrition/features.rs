//! Per-employee derived attributes.
//!
//! Everything here is a pure function of one cleaned [`Employee`] plus fixed
//! bucket boundaries. The only dataset-wide input is the set of salary
//! quartile edges, computed once by [`SalaryQuartiles::from_employees`].

use super::domain::Employee;
use super::stats;
use serde::Serialize;

/// A labeled right-inclusive interval `(lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub lower: f64,
    pub upper: f64,
    pub label: &'static str,
}

const fn bucket(lower: f64, upper: f64, label: &'static str) -> Bucket {
    Bucket {
        lower,
        upper,
        label,
    }
}

pub const AGE_GROUPS: [Bucket; 5] = [
    bucket(0.0, 25.0, "Under25"),
    bucket(25.0, 30.0, "25-30"),
    bucket(30.0, 35.0, "31-35"),
    bucket(35.0, 40.0, "36-40"),
    bucket(40.0, 100.0, "Over40"),
];

pub const TENURE_GROUPS: [Bucket; 5] = [
    bucket(0.0, 1.0, "<1 year"),
    bucket(1.0, 3.0, "1-3 years"),
    bucket(3.0, 7.0, "4-7 years"),
    bucket(7.0, 12.0, "8-12 years"),
    bucket(12.0, 100.0, ">12 years"),
];

pub const COMMUTE_CATEGORIES: [Bucket; 4] = [
    bucket(0.0, 10.0, "Close"),
    bucket(10.0, 20.0, "Moderate"),
    bucket(20.0, 30.0, "Far"),
    bucket(30.0, 100.0, "Very_Far"),
];

/// Fixed monthly income bands used by the compensation analysis.
pub const SALARY_BANDS: [Bucket; 4] = [
    bucket(0.0, 4000.0, "<$4K"),
    bucket(4000.0, 5500.0, "$4K-$5.5K"),
    bucket(5500.0, 7000.0, "$5.5K-$7K"),
    bucket(7000.0, 10000.0, ">$7K"),
];

pub const SALARY_QUARTILE_LABELS: [&str; 4] = ["Q1_Low", "Q2_Medium", "Q3_High", "Q4_Top"];

pub const PERFORMANCE_CATEGORIES: [&str; 5] =
    ["Poor", "Below_Average", "Average", "Good", "Excellent"];

/// Returns the label of the interval containing `value`, if any.
pub fn bucketize(value: f64, buckets: &[Bucket]) -> Option<&'static str> {
    buckets
        .iter()
        .find(|bucket| value > bucket.lower && value <= bucket.upper)
        .map(|bucket| bucket.label)
}

pub fn labels(buckets: &[Bucket]) -> Vec<&'static str> {
    buckets.iter().map(|bucket| bucket.label).collect()
}

/// Equal-population income quartiles of the current dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalaryQuartiles {
    pub edges: [f64; 5],
}

impl SalaryQuartiles {
    /// `None` when no employee has an income on record.
    pub fn from_employees(employees: &[Employee]) -> Option<Self> {
        let incomes: Vec<f64> = employees
            .iter()
            .filter_map(|employee| employee.monthly_income)
            .collect();

        let mut edges = [0.0; 5];
        for (index, edge) in edges.iter_mut().enumerate() {
            *edge = stats::quantile(&incomes, index as f64 / 4.0)?;
        }
        Some(Self { edges })
    }

    /// The lowest edge is inclusive so the minimum income lands in `Q1_Low`.
    /// When edges coincide the value goes to the first matching quartile.
    pub fn label(&self, income: f64) -> Option<&'static str> {
        if income < self.edges[0] || income > self.edges[4] {
            return None;
        }
        let index = (1..5).find(|&index| income <= self.edges[index])?;
        Some(SALARY_QUARTILE_LABELS[index - 1])
    }
}

pub fn performance_category(rating: f64) -> Option<&'static str> {
    if rating.fract() != 0.0 || !(1.0..=5.0).contains(&rating) {
        return None;
    }
    Some(PERFORMANCE_CATEGORIES[rating as usize - 1])
}

/// `(5 - satisfaction) * 2 + (5 - work_life_balance) * 1.5`, in `[0, 14.5]`.
pub fn satisfaction_risk_score(employee: &Employee) -> f64 {
    (5.0 - employee.job_satisfaction) * 2.0 + (5.0 - employee.work_life_balance) * 1.5
}

/// Fixed 0.4 / 0.3 / 0.3 blend of satisfaction, balance, and performance.
pub fn engagement_score(employee: &Employee) -> f64 {
    employee.job_satisfaction * 0.4
        + employee.work_life_balance * 0.3
        + employee.performance_rating * 0.3
}

/// Flags dissatisfaction, early tenure, and also strong performers, who are
/// treated as a flight risk worth watching.
pub fn high_risk_flag(employee: &Employee) -> bool {
    employee.job_satisfaction <= 2.0
        || employee.work_life_balance <= 2.0
        || employee
            .years_at_company
            .is_some_and(|years| (1.0..=3.0).contains(&years))
        || employee.performance_rating >= 4.0
}

pub fn leadership_role(employee: &Employee) -> bool {
    const MARKERS: [&str; 4] = ["manager", "lead", "director", "senior"];
    employee.job_role.as_deref().is_some_and(|role| {
        let role = role.to_lowercase();
        MARKERS.iter().any(|marker| role.contains(marker))
    })
}

/// Derived columns for one employee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeFeatures {
    pub age_group: Option<&'static str>,
    pub tenure_group: Option<&'static str>,
    pub salary_quartile: Option<&'static str>,
    pub salary_band: Option<&'static str>,
    pub commute_category: Option<&'static str>,
    pub performance_category: Option<&'static str>,
    pub satisfaction_risk_score: f64,
    pub engagement_score: f64,
    pub high_risk_flag: bool,
    pub leadership_role: bool,
    pub tenure_at_exit: Option<f64>,
}

pub fn derive_features(employee: &Employee, quartiles: Option<&SalaryQuartiles>) -> EmployeeFeatures {
    EmployeeFeatures {
        age_group: employee.age.and_then(|age| bucketize(age, &AGE_GROUPS)),
        tenure_group: employee
            .years_at_company
            .and_then(|years| bucketize(years, &TENURE_GROUPS)),
        salary_quartile: employee
            .monthly_income
            .zip(quartiles)
            .and_then(|(income, quartiles)| quartiles.label(income)),
        salary_band: employee
            .monthly_income
            .and_then(|income| bucketize(income, &SALARY_BANDS)),
        commute_category: bucketize(employee.distance_from_home, &COMMUTE_CATEGORIES),
        performance_category: performance_category(employee.performance_rating),
        satisfaction_risk_score: satisfaction_risk_score(employee),
        engagement_score: engagement_score(employee),
        high_risk_flag: high_risk_flag(employee),
        leadership_role: leadership_role(employee),
        tenure_at_exit: if employee.is_departed() {
            employee.years_at_company
        } else {
            None
        },
    }
}

/// Derived features co-indexed with the employee table they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    pub salary_quartiles: Option<SalaryQuartiles>,
    pub rows: Vec<EmployeeFeatures>,
}

impl FeatureTable {
    pub fn build(employees: &[Employee]) -> Self {
        let salary_quartiles = SalaryQuartiles::from_employees(employees);
        let rows = employees
            .iter()
            .map(|employee| derive_features(employee, salary_quartiles.as_ref()))
            .collect();

        Self {
            salary_quartiles,
            rows,
        }
    }

    pub fn high_risk_count(&self) -> usize {
        self.rows.iter().filter(|row| row.high_risk_flag).count()
    }
}
