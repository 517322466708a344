use super::*;
use crate::job::JobRepository;
use crate::test_support::RecordingClient;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct CapturingHook {
    seen: Mutex<Vec<QueryContext>>,
    results: Mutex<Vec<QueryResult>>,
    action: Option<HookAction>,
}

impl QueryHook for CapturingHook {
    fn before_query(&self, ctx: &QueryContext) -> HookAction {
        self.seen.lock().unwrap().push(ctx.clone());
        self.action.clone().unwrap_or(HookAction::Continue)
    }

    fn after_query(&self, _ctx: &QueryContext, _duration: Duration, result: &QueryResult) {
        self.results.lock().unwrap().push(result.clone());
    }
}

#[test]
fn query_type_detection() {
    assert_eq!(QueryType::from_sql("SELECT * FROM jobs"), QueryType::Select);
    assert_eq!(QueryType::from_sql("  select id FROM jobs"), QueryType::Select);
    assert_eq!(
        QueryType::from_sql("INSERT INTO jobs (title) VALUES ($1)"),
        QueryType::Insert
    );
    assert_eq!(
        QueryType::from_sql("UPDATE jobs SET \"title\"=$1 WHERE id = $2"),
        QueryType::Update
    );
    assert_eq!(
        QueryType::from_sql("-- cleanup\nDELETE FROM jobs WHERE id = $1"),
        QueryType::Delete
    );
    assert_eq!(
        QueryType::from_sql("CREATE TEMP TABLE jobs (id SERIAL)"),
        QueryType::Other
    );
}

#[test]
fn truncation_respects_char_boundaries() {
    assert_eq!(truncate_sql_bytes("SELECT 1", 100), "SELECT 1");
    assert_eq!(truncate_sql_bytes("SELECT é", 8), "SELECT ");

    let hook = TracingSqlHook::new().max_sql_length(10);
    assert_eq!(hook.truncate_sql("SELECT * FROM jobs"), "SELECT * F...");
    assert_eq!(TracingSqlHook::new().no_truncate().truncate_sql("SELECT 1"), "SELECT 1");
}

#[test]
fn long_errors_are_truncated() {
    let QueryResult::Error(msg) = QueryResult::error("x".repeat(600)) else {
        panic!("expected an error result");
    };
    assert_eq!(msg.len(), 515);
    assert!(msg.ends_with("..."));
}

#[tokio::test]
async fn hook_sees_repository_tags() {
    let hook = Arc::new(CapturingHook::default());
    let client = InstrumentedClient::new(RecordingClient::new()).with_hook_arc(hook.clone());

    JobRepository::find_all(&client, None).await.unwrap();
    let _ = JobRepository::get(&client, 3).await;

    let seen = hook.seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].tag.as_deref(), Some("jobs.find_all"));
    assert_eq!(seen[0].query_type, QueryType::Select);
    assert_eq!(seen[1].tag.as_deref(), Some("jobs.get"));
    assert_eq!(seen[1].param_count, 1);

    let results = hook.results.lock().unwrap();
    assert_eq!(*results, vec![QueryResult::Rows(0), QueryResult::Rows(0)]);
}

#[tokio::test]
async fn abort_skips_the_inner_client() {
    let hook = CapturingHook {
        action: Some(HookAction::Abort("read only".into())),
        ..Default::default()
    };
    let client = InstrumentedClient::new(RecordingClient::new()).with_hook(hook);

    let err = JobRepository::remove(&client, 1).await.unwrap_err();
    assert!(err.to_string().contains("read only"));
    assert!(client.inner().calls().is_empty());
}

#[tokio::test]
async fn modified_sql_is_what_runs() {
    let hook = CapturingHook {
        action: Some(HookAction::ModifySql("SELECT 1".into())),
        ..Default::default()
    };
    let client = InstrumentedClient::new(RecordingClient::with_affected(2)).with_hook(hook);

    let n = crate::sql::query("DELETE FROM jobs")
        .tag("jobs.purge")
        .execute(&client)
        .await
        .unwrap();
    assert_eq!(n, 2);

    let calls = client.inner().calls();
    assert_eq!(calls[0].sql, "SELECT 1");
    assert_eq!(calls[0].tag, None);
}

#[tokio::test]
async fn slow_threshold_does_not_change_results() {
    let client = InstrumentedClient::new(RecordingClient::with_affected(1))
        .with_slow_query_threshold(Duration::ZERO);
    assert_eq!(client.slow_query_threshold(), Some(Duration::ZERO));

    let n = crate::sql::query("DELETE FROM jobs WHERE id = $1")
        .bind(1_i32)
        .execute(&client)
        .await
        .unwrap();
    assert_eq!(n, 1);
}
