use super::*;
use crate::workflows::attrition::import::DatasetImporter;
use chrono::NaiveDate;
use std::io::Cursor;

const EMPLOYEE_HEADER: &str = "employee_id,first_name,last_name,age,gender,department,job_role,years_at_company,monthly_income,distance_from_home,overtime,job_satisfaction,work_life_balance,performance_rating,attrition,attrition_date";

fn employees(rows: &[&str]) -> RawTable<RawEmployeeRow> {
    let csv = format!("{EMPLOYEE_HEADER}\n{}\n", rows.join("\n"));
    DatasetImporter::employees(Cursor::new(csv)).expect("employee csv parses")
}

#[test]
fn removes_duplicates_keeping_first_occurrence() {
    let table = employees(&[
        "E1,ana,lee,30,f,Sales,Analyst,2,5000,5,No,3,3,3,No,",
        "E1,other,person,50,m,IT,Lead,9,9000,9,No,4,4,4,Yes,",
        "E2,bo,kim,41,m,it,Engineer,5,6000,12,Yes,4,2,4,yes,2024-01-15",
    ]);

    let (cleaned, quality) = clean_employees(&table).expect("cleans");

    assert_eq!(cleaned.len(), 2);
    assert_eq!(cleaned[0].first_name.as_deref(), Some("Ana"));
    assert_eq!(cleaned[0].age, Some(30.0));
    assert_eq!(quality.total_records, 3);
    assert_eq!(quality.duplicates_removed, 1);
}

#[test]
fn caps_out_of_range_values_and_counts_them() {
    let table = employees(&[
        "E1,a,b,15,F,Sales,Analyst,60,500,150,No,0,7,3,No,",
        "E2,c,d,75,M,Sales,Analyst,-2,25000,-1,No,3,3,9,No,",
    ]);

    let (cleaned, quality) = clean_employees(&table).expect("cleans");

    assert_eq!(cleaned[0].age, Some(18.0));
    assert_eq!(cleaned[1].age, Some(70.0));
    assert_eq!(cleaned[0].years_at_company, Some(50.0));
    assert_eq!(cleaned[1].years_at_company, Some(0.0));
    assert_eq!(cleaned[0].monthly_income, Some(1000.0));
    assert_eq!(cleaned[1].monthly_income, Some(20000.0));
    assert_eq!(cleaned[0].distance_from_home, 100.0);
    assert_eq!(cleaned[1].distance_from_home, 0.0);
    assert_eq!(cleaned[0].job_satisfaction, 1.0);
    assert_eq!(cleaned[0].work_life_balance, 5.0);
    assert_eq!(cleaned[1].performance_rating, 5.0);

    assert_eq!(quality.outliers_capped.get("age"), Some(&2));
    assert_eq!(quality.outliers_capped.get("monthly_income"), Some(&2));
    assert_eq!(quality.outliers_capped.get("performance_rating"), Some(&1));
    assert_eq!(quality.total_capped(), 11);
}

#[test]
fn every_cleaned_numeric_field_is_within_bounds() {
    let table = employees(&[
        "E1,a,b,-4,F,Sales,Analyst,99,1,1000,No,-3,12,0,No,",
        "E2,c,d,200,M,Sales,Analyst,0.5,999999,40,No,,,,No,",
        "E3,e,f,33,M,Sales,Analyst,,,,No,2,4,5,Yes,",
    ]);

    let (cleaned, _) = clean_employees(&table).expect("cleans");

    for employee in &cleaned {
        let checks = [
            (ranges::AGE, employee.age),
            (ranges::MONTHLY_INCOME, employee.monthly_income),
            (ranges::YEARS_AT_COMPANY, employee.years_at_company),
            (ranges::PERFORMANCE_RATING, Some(employee.performance_rating)),
            (ranges::JOB_SATISFACTION, Some(employee.job_satisfaction)),
            (ranges::WORK_LIFE_BALANCE, Some(employee.work_life_balance)),
            (ranges::DISTANCE_FROM_HOME, Some(employee.distance_from_home)),
        ];
        for (bounds, value) in checks {
            if let Some(value) = value {
                assert!(bounds.contains(value), "{} = {value}", bounds.field);
            }
        }
    }
}

#[test]
fn imputes_missing_ratings_with_post_cap_median() {
    let table = employees(&[
        "E1,a,b,30,F,Sales,Analyst,2,5000,5,No,1,2,3,No,",
        "E2,c,d,30,F,Sales,Analyst,2,5000,,No,9,4,3,No,",
        "E3,e,f,30,F,Sales,Analyst,2,5000,15,No,,4,,No,",
    ]);

    let (cleaned, quality) = clean_employees(&table).expect("cleans");

    // satisfaction 9 is capped to 5 first, so the median of [1, 5] is 3.
    assert_eq!(cleaned[2].job_satisfaction, 3.0);
    assert_eq!(cleaned[2].performance_rating, 3.0);
    assert_eq!(cleaned[1].distance_from_home, 10.0);
    assert_eq!(quality.values_imputed.get("job_satisfaction"), Some(&1));
    assert_eq!(quality.values_imputed.get("distance_from_home"), Some(&1));
    assert_eq!(quality.values_imputed.get("work_life_balance"), None);
    assert_eq!(quality.missing_values.get("job_satisfaction"), Some(&1));
}

#[test]
fn normalizes_text_fields() {
    let table = employees(&[
        "E1,  mARIA ,o'neil,30,f,research & development,senior data scientist,2,5000,5,yes,3,3,3,no,",
        "E2,li,wu,30,m,hr,recruiter,2,5000,5,NO,3,3,3,YES,2023-05-01",
        "E3,sam,ray,30,m,it,engineer,2,5000,5,,3,3,3,maybe,",
    ]);

    let (cleaned, _) = clean_employees(&table).expect("cleans");

    assert_eq!(cleaned[0].first_name.as_deref(), Some("Maria"));
    assert_eq!(cleaned[0].last_name.as_deref(), Some("O'Neil"));
    assert_eq!(cleaned[0].gender.as_deref(), Some("F"));
    assert_eq!(cleaned[0].department.as_deref(), Some("R&D"));
    assert_eq!(cleaned[0].job_role.as_deref(), Some("Senior Data Scientist"));
    assert_eq!(cleaned[0].overtime, Some(true));
    assert_eq!(cleaned[0].attrition, AttritionStatus::Active);
    assert_eq!(cleaned[1].department.as_deref(), Some("HR"));
    assert_eq!(cleaned[1].attrition, AttritionStatus::Departed);
    assert_eq!(cleaned[2].department.as_deref(), Some("IT"));
    assert_eq!(cleaned[2].overtime, None);
    assert_eq!(cleaned[2].attrition, AttritionStatus::Unknown);
}

#[test]
fn unparseable_dates_become_unknown() {
    let table = employees(&[
        "E1,a,b,30,F,Sales,Analyst,2,5000,5,No,3,3,3,Yes,2024-02-30",
        "E2,c,d,30,F,Sales,Analyst,2,5000,5,No,3,3,3,Yes,2024-02-28",
        "E3,e,f,30,F,Sales,Analyst,2,5000,5,No,3,3,3,No,",
    ]);

    let (cleaned, quality) = clean_employees(&table).expect("cleans");

    assert_eq!(cleaned[0].attrition_date, Some(RecordDate::Unknown));
    assert_eq!(
        cleaned[1].attrition_date,
        Some(RecordDate::Known(
            NaiveDate::from_ymd_opt(2024, 2, 28).expect("valid date")
        ))
    );
    assert_eq!(cleaned[2].attrition_date, None);
    assert_eq!(quality.unknown_dates, 1);
}

#[test]
fn unparseable_numbers_are_reported_and_imputed() {
    let table = employees(&["E1,a,b,thirty,F,Sales,Analyst,2,5000,5,No,high,3,3,No,", "E2,c,d,40,F,Sales,Analyst,2,5000,5,No,4,3,3,No,"]);

    let (cleaned, quality) = clean_employees(&table).expect("cleans");

    assert_eq!(cleaned[0].age, None);
    assert_eq!(cleaned[0].job_satisfaction, 4.0);
    assert_eq!(quality.unparseable_values.get("age"), Some(&1));
    assert_eq!(quality.unparseable_values.get("job_satisfaction"), Some(&1));
}

#[test]
fn missing_required_column_is_fatal() {
    let csv = "employee_id,age,department\nE1,30,Sales\n";
    let table = DatasetImporter::employees(Cursor::new(csv)).expect("parses");

    let error = clean_employees(&table).expect_err("missing columns");

    assert_eq!(
        error,
        CleaningError::MissingColumn {
            table: TableKind::Employees,
            column: "years_at_company",
        }
    );
}

#[test]
fn empty_employee_table_is_fatal() {
    let table = employees(&[",a,b,30,F,Sales,Analyst,2,5000,5,No,3,3,3,No,"]);

    let error = clean_employees(&table).expect_err("no usable rows");

    assert_eq!(
        error,
        CleaningError::EmptyTable {
            table: TableKind::Employees
        }
    );
}

#[test]
fn column_without_any_value_falls_back_and_keeps_the_row() {
    let table = employees(&["E1,a,b,30,F,Sales,Analyst,2,5000,,No,,3,3,No,"]);

    let (cleaned, quality) = clean_employees(&table).expect("row survives");

    assert_eq!(cleaned.len(), 1);
    assert_eq!(cleaned[0].job_satisfaction, 3.0);
    assert_eq!(cleaned[0].distance_from_home, 0.0);
    assert_eq!(quality.values_defaulted.get("job_satisfaction"), Some(&1));
    assert_eq!(quality.values_defaulted.get("distance_from_home"), Some(&1));
    assert_eq!(quality.total_defaulted(), 2);
    assert_eq!(quality.total_imputed(), 0);
}

#[test]
fn cleaning_twice_changes_nothing() {
    let table = employees(&[
        "E1,  mARIA ,lee,15,f,it,analyst,0.5,900,5,yes,,1,5,No,",
        "E2,li,wu,45,m,Research & Development,lead engineer,12,12000,,No,4,2,,Yes,not a date",
    ]);
    let (first_pass, _) = clean_employees(&table).expect("cleans");

    let mut writer = csv::Writer::from_writer(Vec::new());
    for employee in &first_pass {
        writer.serialize(employee).expect("serializes");
    }
    let bytes = writer.into_inner().expect("flushes");
    let reloaded = DatasetImporter::employees(Cursor::new(bytes)).expect("reloads");
    let (second_pass, quality) = clean_employees(&reloaded).expect("cleans again");

    assert_eq!(second_pass, first_pass);
    assert_eq!(quality.total_capped(), 0);
    assert_eq!(quality.total_imputed(), 0);
}

#[test]
fn reviews_are_clipped_and_keep_duplicates() {
    let csv = "employee_id,review_date,performance_rating,competency_score,goals_met,promotion_ready,strengths\n\
E1,2024-01-10,6,0,120,yes,  Communication \n\
E1,2024-06-10,4,3,80,No,\n\
,2024-06-10,4,3,80,No,\n";
    let table = DatasetImporter::performance(Cursor::new(csv)).expect("parses");

    let (reviews, quality) = clean_reviews(&table).expect("cleans");

    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].performance_rating, Some(5.0));
    assert_eq!(reviews[0].competency_score, Some(1.0));
    assert_eq!(reviews[0].goals_met, Some(100.0));
    assert_eq!(reviews[0].promotion_ready, Some(true));
    assert_eq!(reviews[0].strengths.as_deref(), Some("Communication"));
    assert_eq!(reviews[1].promotion_ready, Some(false));
    assert_eq!(quality.duplicate_identifiers, 1);
    assert_eq!(quality.missing_identifiers, 1);
    assert_eq!(quality.outliers_capped.get("goals_met"), Some(&1));
}

#[test]
fn exit_surveys_parse_recommendation_flag() {
    let csv = "employee_id,exit_date,exit_reason_primary,overall_satisfaction,would_recommend_company\n\
E7,2024-03-01, Better Compensation ,0,yes\n\
E8,someday,Relocation,4,No\n";
    let table = DatasetImporter::exit_surveys(Cursor::new(csv)).expect("parses");

    let (surveys, quality) = clean_exit_surveys(&table).expect("cleans");

    assert_eq!(
        surveys[0].exit_reason_primary.as_deref(),
        Some("Better Compensation")
    );
    assert_eq!(surveys[0].overall_satisfaction, Some(1.0));
    assert_eq!(surveys[0].would_recommend_company, Some(true));
    assert_eq!(surveys[1].would_recommend_company, Some(false));
    assert_eq!(surveys[1].exit_date, Some(RecordDate::Unknown));
    assert_eq!(quality.unknown_dates, 1);
}

#[test]
fn exit_survey_without_identifier_column_is_fatal() {
    let csv = "id,exit_reason_primary\nE7,Relocation\n";
    let table = DatasetImporter::exit_surveys(Cursor::new(csv)).expect("parses");

    let error = clean_exit_surveys(&table).expect_err("missing key");

    assert_eq!(
        error,
        CleaningError::MissingColumn {
            table: TableKind::ExitSurveys,
            column: "employee_id",
        }
    );
}
