//! End-to-end batch and single prediction with stub models.

use employee_churn::config::BatchConfig;
use employee_churn::{
    predict_single, BatchPredictor, ChurnError, ChurnModel, Dataset, Department, EmployeeRecord,
    Result, SalaryTier, Verdict,
};
use std::path::Path;

/// Returns the same label for every record.
struct ConstantModel(i64);

impl ChurnModel for ConstantModel {
    fn name(&self) -> &str {
        "constant"
    }

    fn predict(&mut self, records: &[EmployeeRecord]) -> Result<Vec<i64>> {
        Ok(vec![self.0; records.len()])
    }
}

/// Flags overworked employees, so each label depends only on its own row.
struct HoursModel;

impl ChurnModel for HoursModel {
    fn name(&self) -> &str {
        "hours"
    }

    fn predict(&mut self, records: &[EmployeeRecord]) -> Result<Vec<i64>> {
        Ok(records
            .iter()
            .map(|r| i64::from(r.average_monthly_hours > 250))
            .collect())
    }
}

/// Fails the test if the batch flow ever asks it for labels.
struct UnreachableModel;

impl ChurnModel for UnreachableModel {
    fn name(&self) -> &str {
        "unreachable"
    }

    fn predict(&mut self, _records: &[EmployeeRecord]) -> Result<Vec<i64>> {
        panic!("model must not be invoked without records");
    }
}

const RAW_HEADER: &str = "emp_id, satisfaction_level ,last_evaluation,number_project,\
                          average_montly_hours,time_spend_company,Work_accident,\
                          promotion_last_5years,Departments ,salary";

fn write_input(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("employees.csv");
    std::fs::write(&path, format!("{RAW_HEADER}\n{body}")).unwrap();
    path
}

#[test]
fn scenario_record_leave_and_stay() {
    let record = EmployeeRecord {
        satisfaction_level: 0.5,
        last_evaluation: 0.5,
        number_project: 5,
        average_monthly_hours: 150,
        time_spent_company: 3,
        work_accident: 0,
        promotion_last_5years: 0,
        departments: Department::Sales,
        salary: SalaryTier::Low,
    };

    let leave = predict_single(record.clone(), 1, || Ok(ConstantModel(1))).unwrap();
    assert_eq!(leave.verdict, Verdict::Leave);
    assert!(leave.verdict.message().contains("leave"));

    let stay = predict_single(record, 1, || Ok(ConstantModel(0))).unwrap();
    assert_eq!(stay.verdict, Verdict::Stay);
    assert!(stay.verdict.message().contains("stay"));
}

#[test]
fn batch_output_matches_deduplicated_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "e1,0.38,0.53,2,157,3,0,0,sales,low\n\
         e2,0.80,0.86,5,262,6,0,0,sales,medium\n\
         e1,0.38,0.53,2,157,3,0,0,sales,low\n\
         e3,0.11,0.88,7,272,4,0,0,RandD,medium\n\
         e4,0.72,0.87,5,223,5,0,0,IT,low\n",
    );
    let output = dir.path().join("processed_data.csv");

    let config = BatchConfig::default();
    let outcome = BatchPredictor::new(&config, 1)
        .run(&input, &output, || Ok(HoursModel))
        .unwrap();

    assert_eq!(outcome.metrics.rows_read, 5);
    assert_eq!(outcome.metrics.duplicates_dropped, 1);
    assert_eq!(outcome.dataset.len(), 4);

    let headers = outcome.dataset.headers();
    assert_eq!(headers[1], "satisfaction_level");
    assert_eq!(headers[8], "departments");
    assert_eq!(headers.last().map(String::as_str), Some("Predicted_target"));

    let hours = outcome.dataset.column_index("average_montly_hours").unwrap();
    let label = outcome.dataset.column_index("Predicted_target").unwrap();
    for row in outcome.dataset.rows() {
        let expected = if row[hours].parse::<i64>().unwrap() > 250 {
            "Leave"
        } else {
            "Stay"
        };
        assert_eq!(row[label], expected);
    }

    // Extra columns pass through untouched
    let ids: Vec<&str> = outcome.dataset.rows().iter().map(|r| r[0].as_str()).collect();
    assert_eq!(ids, vec!["e1", "e2", "e3", "e4"]);
}

#[test]
fn batch_output_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "e1,0.38,0.53,2,157,3,0,0,sales,low\n\
         e2,0.80,0.86,5,262,6,0,0,hr,high\n",
    );
    let output = dir.path().join("processed_data.csv");

    let config = BatchConfig::default();
    let outcome = BatchPredictor::new(&config, 1)
        .run(&input, &output, || Ok(ConstantModel(1)))
        .unwrap();

    let reread = Dataset::read_csv(&output).unwrap();
    assert_eq!(reread, outcome.dataset);
}

#[test]
fn batch_overwrites_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "e1,0.38,0.53,2,157,3,0,0,sales,low\n");
    let output = dir.path().join("processed_data.csv");
    std::fs::write(&output, "stale\n").unwrap();

    let config = BatchConfig::default();
    BatchPredictor::new(&config, 1)
        .run(&input, &output, || Ok(ConstantModel(0)))
        .unwrap();

    let reread = Dataset::read_csv(&output).unwrap();
    assert_eq!(reread.len(), 1);
    assert_eq!(reread.rows()[0].last().map(String::as_str), Some("Stay"));
}

#[test]
fn batch_rerun_on_processed_output_replaces_label_column() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "e1,0.38,0.53,2,157,3,0,0,sales,low\n");
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    let config = BatchConfig::default();
    let predictor = BatchPredictor::new(&config, 1);
    predictor.run(&input, &first, || Ok(ConstantModel(1))).unwrap();
    let outcome = predictor.run(&first, &second, || Ok(ConstantModel(0))).unwrap();

    let labels = outcome
        .dataset
        .headers()
        .iter()
        .filter(|h| *h == "Predicted_target")
        .count();
    assert_eq!(labels, 1);
    assert_eq!(outcome.dataset.rows()[0].last().map(String::as_str), Some("Stay"));
}

#[test]
fn batch_header_only_input_writes_header_only_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "");
    let output = dir.path().join("processed_data.csv");

    let config = BatchConfig::default();
    let outcome = BatchPredictor::new(&config, 1)
        .run(&input, &output, || Ok(UnreachableModel))
        .unwrap();

    assert_eq!(outcome.metrics.rows_predicted, 0);

    let reread = Dataset::read_csv(&output).unwrap();
    assert!(reread.is_empty());
    assert_eq!(reread.headers().len(), 11);
    assert_eq!(reread.headers()[8], "departments");
    assert_eq!(
        reread.headers().last().map(String::as_str),
        Some("Predicted_target")
    );
}

#[test]
fn batch_missing_feature_column_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("employees.csv");
    std::fs::write(&input, "emp_id,satisfaction_level\ne1,0.5\n").unwrap();
    let output = dir.path().join("processed_data.csv");

    let config = BatchConfig::default();
    let err = BatchPredictor::new(&config, 1)
        .run(&input, &output, || Ok(ConstantModel(1)))
        .unwrap_err();

    assert!(matches!(err, ChurnError::MissingColumn { .. }));
    assert!(!output.exists());
}

#[test]
fn batch_unknown_category_is_reported_with_row() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "e1,0.38,0.53,2,157,3,0,0,sales,low\n\
         e2,0.38,0.53,2,157,3,0,0,sales,premium\n",
    );
    let output = dir.path().join("processed_data.csv");

    let config = BatchConfig::default();
    let err = BatchPredictor::new(&config, 1)
        .run(&input, &output, || Ok(ConstantModel(1)))
        .unwrap_err();

    assert!(matches!(
        err,
        ChurnError::InvalidValue { row: 2, ref column, .. } if column == "salary"
    ));
}

#[test]
fn batch_missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = BatchConfig::default();

    let err = BatchPredictor::new(&config, 1)
        .run(
            &dir.path().join("nope.csv"),
            &dir.path().join("out.csv"),
            || Ok(ConstantModel(1)),
        )
        .unwrap_err();

    assert!(matches!(err, ChurnError::CsvRead { .. }));
}
