use super::*;
use crate::filter::{JobFilter, JobFilters};
use crate::test_support::RecordingClient;
use crate::update::FieldSet;
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;

#[tokio::test]
async fn find_all_without_filters_orders_by_title() {
    let client = RecordingClient::new();
    let jobs = JobRepository::find_all(&client, None).await.unwrap();
    assert!(jobs.is_empty());

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].sql,
        "SELECT id, title, salary, equity, company_handle FROM jobs ORDER BY title"
    );
    assert_eq!(calls[0].param_count, 0);
    assert_eq!(calls[0].tag.as_deref(), Some("jobs.find_all"));
}

#[tokio::test]
async fn find_all_appends_filter_clause() {
    let client = RecordingClient::new();
    let filters = JobFilters::new()
        .with(JobFilter::Title("eng".into()))
        .with(JobFilter::HasEquity(true));
    JobRepository::find_all(&client, Some(&filters)).await.unwrap();

    let calls = client.calls();
    assert_eq!(
        calls[0].sql,
        "SELECT id, title, salary, equity, company_handle FROM jobs \
         WHERE LOWER(title) LIKE $1 AND equity > $2 ORDER BY title"
    );
    assert_eq!(calls[0].param_count, 2);
}

#[tokio::test]
async fn get_missing_job_is_not_found_with_id() {
    let client = RecordingClient::new();
    let err = JobRepository::get(&client, 0).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status_code(), 404);
    assert!(err.to_string().contains("No job with id: 0"));
    assert_eq!(client.calls()[0].tag.as_deref(), Some("jobs.get"));
}

#[tokio::test]
async fn update_puts_id_after_set_values() {
    let client = RecordingClient::new();
    let fields = FieldSet::new()
        .set("title", "New")
        .set("salary", None::<i32>);
    let err = JobRepository::update(&client, 9, &fields).await.unwrap_err();
    assert!(err.is_not_found());

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].sql,
        "UPDATE jobs SET \"title\"=$1, \"salary\"=$2 WHERE id = $3 \
         RETURNING id, title, salary, equity, company_handle"
    );
    assert_eq!(calls[0].param_count, 3);
    assert_eq!(calls[0].tag.as_deref(), Some("jobs.update"));
}

#[tokio::test]
async fn update_with_no_fields_issues_no_sql() {
    let client = RecordingClient::new();
    let err = JobRepository::update(&client, 1, &FieldSet::new())
        .await
        .unwrap_err();
    assert!(err.is_bad_request());
    assert_eq!(err.to_string(), "Bad request: No data");
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn update_rejects_identity_and_company() {
    let client = RecordingClient::new();
    for name in ["id", "companyHandle", "company_handle"] {
        let fields = FieldSet::new().set("title", "x").set(name, "c2");
        let err = JobRepository::update(&client, 1, &fields).await.unwrap_err();
        assert!(err.is_bad_request(), "{name} should be rejected");
    }
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn remove_missing_job_is_not_found() {
    let client = RecordingClient::new();
    let err = JobRepository::remove(&client, 42).await.unwrap_err();
    assert!(err.to_string().contains("No job with id: 42"));

    let calls = client.calls();
    assert_eq!(calls[0].sql, "DELETE FROM jobs WHERE id = $1 RETURNING id");
    assert_eq!(calls[0].param_count, 1);
}

#[tokio::test]
async fn create_binds_all_four_columns() {
    let client = RecordingClient::new();
    let new_job = NewJob::new("Engineer", "c1").with_salary(100);
    let _ = JobRepository::create(&client, &new_job).await;

    let calls = client.calls();
    assert!(calls[0].sql.starts_with("INSERT INTO jobs (title, salary, equity, company_handle)"));
    assert!(calls[0].sql.ends_with("RETURNING id, title, salary, equity, company_handle"));
    assert_eq!(calls[0].param_count, 4);
    assert_eq!(calls[0].tag.as_deref(), Some("jobs.create"));
}

#[test]
fn job_serializes_with_client_names() {
    let job = Job {
        id: 1,
        title: "J1".into(),
        salary: Some(1),
        equity: Some(Decimal::from_str("0.1").unwrap()),
        company_handle: "c1".into(),
    };
    assert_eq!(
        serde_json::to_value(&job).unwrap(),
        json!({
            "id": 1,
            "title": "J1",
            "salary": 1,
            "equity": "0.1",
            "companyHandle": "c1",
        })
    );
}

#[test]
fn new_job_accepts_missing_optionals() {
    let new_job: NewJob =
        serde_json::from_value(json!({ "title": "J", "companyHandle": "c1" })).unwrap();
    assert_eq!(new_job, NewJob::new("J", "c1"));
}

#[test]
fn renames_map_company_handle() {
    let renames = job_renames();
    assert_eq!(renames.column_for("companyHandle"), "company_handle");
    assert_eq!(renames.column_for("title"), "title");
}
