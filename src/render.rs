use hr_attrition::workflows::attrition::report::views::CategoryCount;
use hr_attrition::workflows::attrition::{
    AttritionReport, DatasetSummary, ExportedFiles, QualityReport, RateTable,
};

pub(crate) fn attrition_report(report: &AttritionReport) {
    println!("Employee attrition analysis ({})", report.generated_on);

    let overall = &report.overall;
    println!(
        "\nOverall: {} employees, {} departed, {} current ({:.2}% attrition)",
        overall.total, overall.departed, overall.current, overall.attrition_rate
    );

    rate_table(&report.departments, true);
    rate_table(&report.genders, false);
    rate_table(&report.age_groups, false);
    rate_table(&report.tenure_groups, false);
    if let Some(rate) = report.early_tenure_rate {
        println!("- Critical insight: {rate:.1}% attrition within the first 3 years");
    }
    rate_table(&report.salary_quartiles, false);
    rate_table(&report.salary_bands, false);
    rate_table(&report.satisfaction_levels, false);
    rate_table(&report.performance_ratings, false);
    rate_table(&report.performance_categories, false);
    rate_table(&report.high_performer_departments, true);

    if report.high_performers_left.is_empty() {
        println!("\nHigh performers who left: none");
    } else {
        println!(
            "\nHigh performers who left ({})",
            report.high_performers_left.len()
        );
        for person in &report.high_performers_left {
            println!(
                "- {} - {} - rating {}{}",
                person.name,
                person.department,
                person.performance_rating,
                person
                    .exit_reason
                    .as_deref()
                    .map(|reason| format!(" ({reason})"))
                    .unwrap_or_default()
            );
        }
    }

    if report.exit_reasons.is_empty() {
        println!("\nExit reasons: no surveys");
    } else {
        println!("\nTop exit reasons ({} surveys)", report.exit_surveys);
        for reason in &report.exit_reasons {
            println!(
                "- {}: {} ({:.1}%) | overall {} | growth {} | would recommend {}",
                reason.reason,
                reason.count,
                reason.share,
                optional(reason.mean_overall_satisfaction, 2),
                optional(reason.mean_growth_opportunities, 2),
                reason
                    .recommend_share
                    .map(|share| format!("{share:.1}%"))
                    .unwrap_or_else(|| "n/a".to_string())
            );
        }
    }

    println!(
        "\nHigh-risk current employees: {} (risk score >= 6), {} flagged by engagement features",
        report.high_risk_total, report.flagged_employees
    );
    for assessment in &report.high_risk_employees {
        println!(
            "- {} - {} | score {} | satisfaction {} | tenure {} years",
            assessment.name,
            assessment.department,
            assessment.score,
            assessment.job_satisfaction,
            optional(assessment.years_at_company, 1)
        );
    }

    if !report.department_risk.is_empty() {
        println!("\nDepartment risk (current employees)");
        for department in &report.department_risk {
            println!(
                "- {}: risk score {:.2} ({}) - {} employees",
                department.department,
                department.mean_risk_score,
                department.level.label(),
                department.headcount
            );
        }
    }

    println!("\nRetention recommendations");
    for (index, recommendation) in report.recommendations.iter().enumerate() {
        println!(
            "{}. {} ({} priority)",
            index + 1,
            recommendation.area,
            recommendation.priority_label
        );
        println!("   Action: {}", recommendation.action);
        println!("   Details: {}", recommendation.details);
        println!("   Timeline: {}", recommendation.timeline);
    }

    let summary = &report.executive_summary;
    println!("\nExecutive summary");
    println!("- Overall attrition rate: {:.1}%", summary.overall_attrition_rate);
    if let (Some(department), Some(rate)) = (
        summary.highest_risk_department.as_deref(),
        summary.highest_risk_department_rate,
    ) {
        println!("- Highest risk department: {department} ({rate:.1}%)");
    }
    println!("- High-risk current employees: {}", summary.high_risk_employees);
    if let Some(reason) = summary.top_exit_reason.as_deref() {
        println!("- Top exit reason: {reason}");
    }
    if let Some(cost) = summary.estimated_turnover_cost {
        println!("- Estimated annual turnover cost: ${}", currency(cost));
    }
    if let Some(cost) = summary.replacement_cost_per_employee {
        println!("- Average replacement cost per employee: ${}", currency(cost));
    }
}

fn rate_table(table: &RateTable, ranked: bool) {
    if table.is_empty() {
        println!("\n{}: no data", table.dimension_label);
        return;
    }

    println!("\n{}", table.dimension_label);
    let rows = if ranked {
        table.ranked()
    } else {
        table.rows.iter().collect()
    };
    for row in rows {
        let auxiliary: String = row
            .auxiliary_means
            .iter()
            .filter_map(|entry| {
                entry
                    .mean
                    .map(|mean| format!(" | {}: {mean:.1}", entry.auxiliary.label()))
            })
            .collect();
        println!(
            "- {}: {:.1}% ({}/{}){}",
            row.group, row.attrition_rate, row.departed, row.population, auxiliary
        );
    }
}

pub(crate) fn dataset_summary(summary: &DatasetSummary) {
    println!("HR data preprocessing summary");

    let overview = &summary.overview;
    println!("\nDataset overview");
    println!("- Total employees: {}", overview.total_employees);
    println!("- Departed employees: {}", overview.departed_employees);
    println!("- Current employees: {}", overview.current_employees);
    println!(
        "- Overall attrition rate: {:.2}%",
        overview.overall_attrition_rate
    );

    let demographics = &summary.demographics;
    println!("\nDemographics");
    println!("- Average age: {}", optional(demographics.average_age, 1));
    println!(
        "- Age range: {} - {}",
        optional(demographics.min_age, 0),
        optional(demographics.max_age, 0)
    );
    distribution("Gender", &demographics.gender_distribution);
    distribution("Department", &demographics.department_distribution);
    distribution("Education", &demographics.education_distribution);

    let compensation = &summary.compensation;
    println!("\nCompensation");
    println!(
        "- Mean monthly income: {}",
        optional(compensation.mean_monthly_income, 0)
    );
    println!(
        "- Median monthly income: {}",
        optional(compensation.median_monthly_income, 0)
    );
    println!(
        "- Income range: {} - {}",
        optional(compensation.min_monthly_income, 0),
        optional(compensation.max_monthly_income, 0)
    );
    println!(
        "- Income standard deviation: {}",
        optional(compensation.income_std, 0)
    );

    let performance = &summary.performance;
    println!("\nPerformance");
    println!(
        "- Average rating: {}",
        optional(performance.average_performance_rating, 2)
    );
    println!(
        "- Average job satisfaction: {}",
        optional(performance.average_job_satisfaction, 2)
    );
    println!(
        "- Average work-life balance: {}",
        optional(performance.average_work_life_balance, 2)
    );
    println!("- High performers: {}", performance.high_performers);

    let tenure = &summary.tenure;
    println!("\nTenure");
    println!(
        "- Average years at company: {}",
        optional(tenure.average_years_at_company, 1)
    );
    println!(
        "- Median years at company: {}",
        optional(tenure.median_years_at_company, 1)
    );
    println!(
        "- Tenure range: {} - {} years",
        optional(tenure.min_years_at_company, 1),
        optional(tenure.max_years_at_company, 1)
    );
}

fn distribution(label: &str, counts: &[CategoryCount]) {
    let rendered: Vec<String> = counts
        .iter()
        .map(|entry| format!("{} {}", entry.value, entry.count))
        .collect();
    println!("- {label}: {}", rendered.join(", "));
}

pub(crate) fn quality_report(report: &QualityReport) {
    println!("\nData quality");
    for (table, quality) in report.tables() {
        println!(
            "- {}: {} records, {} duplicates removed, {} missing values, {} capped, {} imputed, {} defaulted, {} unknown dates",
            table,
            quality.total_records,
            quality.duplicates_removed,
            quality.total_missing(),
            quality.total_capped(),
            quality.total_imputed(),
            quality.total_defaulted(),
            quality.unknown_dates
        );
    }
}

pub(crate) fn exported_files(files: &ExportedFiles) {
    println!("\nProcessed files");
    for path in files.paths() {
        println!("- {}", path.display());
    }
}

fn optional(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(value) => format!("{value:.decimals$}"),
        None => "n/a".to_string(),
    }
}

/// Whole dollars with thousands separators.
fn currency(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::new();
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if value < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
