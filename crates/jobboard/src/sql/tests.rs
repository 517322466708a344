use super::*;
use crate::test_support::RecordingClient;

#[test]
fn builds_placeholders_in_order() {
    let mut q = sql("SELECT * FROM jobs WHERE salary >= ");
    q.push_bind(1).push(" AND title = ").push_bind("x");

    assert_eq!(
        q.to_sql(),
        "SELECT * FROM jobs WHERE salary >= $1 AND title = $2"
    );
    assert_eq!(q.params_ref().len(), 2);
}

#[test]
fn can_compose_fragments() {
    let mut w = Sql::empty();
    w.push(" WHERE id = ").push_bind(42);

    let mut q = sql("SELECT * FROM jobs WHERE salary > ");
    q.push_bind(0);
    q.push_sql(w);

    assert_eq!(
        q.to_sql(),
        "SELECT * FROM jobs WHERE salary > $1 WHERE id = $2"
    );
    assert_eq!(q.param_count(), 2);
}

#[test]
fn push_sql_inherits_tag_only_when_unset() {
    let mut q = sql("SELECT 1");
    q.push_sql(Sql::empty().tagged("inner"));
    assert_eq!(q.tag(), Some("inner"));

    let mut q = sql("SELECT 1").tagged("outer");
    q.push_sql(Sql::empty().tagged("inner"));
    assert_eq!(q.tag(), Some("outer"));
}

#[test]
fn empty_builder_is_empty() {
    assert!(Sql::empty().is_empty());
    assert!(sql("").is_empty());
    assert!(!sql("SELECT 1").is_empty());
}

#[test]
fn renders_multi_digit_placeholders() {
    let mut q = Sql::empty();
    for i in 0..12 {
        if i > 0 {
            q.push(", ");
        }
        q.push_bind(i);
    }
    assert!(q.to_sql().ends_with("$11, $12"));
}

#[test]
fn query_keeps_sql_and_counts_binds() {
    let q = query("UPDATE jobs SET \"salary\"=$1 WHERE id = $2")
        .bind(1_i32)
        .bind(7_i32);
    assert_eq!(q.sql(), "UPDATE jobs SET \"salary\"=$1 WHERE id = $2");
    assert_eq!(q.param_count(), 2);

    let q = query("SELECT $1, $2, $3").bind_all(vec![1_i32, 2, 3]);
    assert_eq!(q.params_ref().len(), 3);
}

#[test]
fn keyword_detection_skips_comments_and_parens() {
    assert!(starts_with_keyword(
        strip_sql_prefix("  -- note\n/* x */ (select 1)"),
        "SELECT"
    ));
    assert_eq!(strip_sql_prefix("-- only a comment"), "");
    assert!(!starts_with_keyword("DEL", "DELETE"));
}

#[tokio::test]
async fn tagged_sql_reaches_the_client() {
    let client = RecordingClient::new();
    let mut q = sql("SELECT id FROM jobs WHERE salary >= ").tagged("jobs.test");
    q.push_bind(10_i32);

    let rows = q.fetch_all(&client).await.unwrap();
    assert!(rows.is_empty());

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].sql, "SELECT id FROM jobs WHERE salary >= $1");
    assert_eq!(calls[0].param_count, 1);
    assert_eq!(calls[0].tag.as_deref(), Some("jobs.test"));
}

#[tokio::test]
async fn fetch_one_on_zero_rows_is_not_found() {
    let client = RecordingClient::new();
    let err = query("SELECT 1 WHERE FALSE")
        .fetch_one(&client)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let row = query("SELECT 1 WHERE FALSE")
        .fetch_opt(&client)
        .await
        .unwrap();
    assert!(row.is_none());
}

#[tokio::test]
async fn execute_returns_affected_count() {
    let client = RecordingClient::with_affected(3);
    let n = query("DELETE FROM jobs WHERE salary < $1")
        .bind(0_i32)
        .execute(&client)
        .await
        .unwrap();
    assert_eq!(n, 3);
}
