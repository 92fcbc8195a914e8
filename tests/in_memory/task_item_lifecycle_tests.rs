//! In-memory integration tests for task item lifecycle operations.

use super::helpers::{TaskItems, item_request, seed_item, task_items};
use http::StatusCode;
use rstest::rstest;
use serde_json::json;
use task_item_store::boundary::task_items::{
    by_task_and_status_response, create_response, delete_response, get_response,
    list_response, transition_response, update_response,
};
use task_item_store::task_item::{domain::TaskItemId, services::TransitionStatusRequest};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_answers_ok_then_see_other_for_same_pdf_name(
    task_items: TaskItems,
) -> eyre::Result<()> {
    let first = create_response(task_items.create(item_request("a.pdf", "pending", "T1")).await);
    let second = create_response(task_items.create(item_request("a.pdf", "done", "T9")).await);

    eyre::ensure!(first.status == StatusCode::OK, "first create: {first:?}");
    eyre::ensure!(first.body == Some(json!({ "message": "Ok" })), "body: {first:?}");
    eyre::ensure!(second.status == StatusCode::SEE_OTHER, "second create: {second:?}");

    let listed = list_response(task_items.list_all().await);
    let count = listed
        .body
        .as_ref()
        .and_then(|body| body.as_array())
        .map(Vec::len);
    eyre::ensure!(count == Some(1), "expected one stored item, got {count:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_with_missing_field_answers_bad_request(task_items: TaskItems) {
    let response = create_response(task_items.create(item_request("a.pdf", "", "T1")).await);

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body.as_ref().map(|body| body["works"].clone()),
        Some(json!(false))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_status_reports_only_changed_items(task_items: TaskItems) -> eyre::Result<()> {
    let a = seed_item(&task_items, "a.pdf", "done", "T1").await?;
    let b = seed_item(&task_items, "b.pdf", "done", "T1").await?;
    let c = seed_item(&task_items, "c.pdf", "pending", "T1").await?;

    let transition = task_items
        .transition_status(TransitionStatusRequest::new([a, b, c], "done"))
        .await?;
    eyre::ensure!(transition.updated == 1, "expected one update, got {transition:?}");

    let all_done = by_task_and_status_response(
        task_items.find_by_task_and_status("T1", "done").await,
    );
    let count = all_done
        .body
        .as_ref()
        .and_then(|body| body.as_array())
        .map(Vec::len);
    eyre::ensure!(count == Some(3), "expected three done items, got {count:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_status_with_nothing_to_change_answers_bad_request(
    task_items: TaskItems,
) -> eyre::Result<()> {
    let done = seed_item(&task_items, "a.pdf", "done", "T1").await?;

    let response = transition_response(
        task_items
            .transition_status(TransitionStatusRequest::new([done], "done"))
            .await,
    );

    eyre::ensure!(response.status == StatusCode::BAD_REQUEST, "{response:?}");
    eyre::ensure!(
        response.body == Some(json!({ "message": "Task items not found" })),
        "{response:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_unknown_id_answers_bad_request(task_items: TaskItems) -> eyre::Result<()> {
    let existing = seed_item(&task_items, "a.pdf", "pending", "T1").await?;
    let before = get_response(task_items.get(existing).await);

    let response = update_response(
        task_items
            .update(TaskItemId::new(), item_request("a.pdf", "done", "T1"))
            .await,
    );
    let after = get_response(task_items.get(existing).await);

    eyre::ensure!(response.status == StatusCode::BAD_REQUEST, "{response:?}");
    eyre::ensure!(
        response.body == Some(json!({ "message": "Task_item not found" })),
        "{response:?}"
    );
    eyre::ensure!(before == after, "existing item changed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_and_status_with_no_rows_answers_bad_request(task_items: TaskItems) {
    let response =
        by_task_and_status_response(task_items.find_by_task_and_status("T1", "pending").await);

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        Some(json!({ "message": "Task items not found for requested task and status." }))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_answers_no_content_then_bad_request(task_items: TaskItems) -> eyre::Result<()> {
    let id = seed_item(&task_items, "a.pdf", "pending", "T1").await?;

    let first = delete_response(task_items.delete(id).await);
    let second = delete_response(task_items.delete(id).await);

    eyre::ensure!(first.status == StatusCode::NO_CONTENT, "{first:?}");
    eyre::ensure!(first.body.is_none(), "204 carries no body");
    eyre::ensure!(second.status == StatusCode::BAD_REQUEST, "{second:?}");
    Ok(())
}
