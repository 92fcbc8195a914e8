//! In-memory integration tests for user accounts.

use super::helpers::{Users, users};
use http::StatusCode;
use rstest::rstest;
use serde_json::json;
use task_item_store::boundary::users::{
    create_response, delete_response, list_response, update_response,
};
use task_item_store::user::services::UserRequest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_crud_round(users: Users) -> eyre::Result<()> {
    let created = create_response(
        users
            .create(UserRequest::new("u-1", "Ada", "ada@example.com"))
            .await,
    );
    eyre::ensure!(
        created.body == Some(json!({ "message": "User created!" })),
        "{created:?}"
    );

    let duplicate = create_response(
        users
            .create(UserRequest::new("u-2", "Imposter", "ada@example.com"))
            .await,
    );
    eyre::ensure!(duplicate.status == StatusCode::OK, "{duplicate:?}");
    eyre::ensure!(
        duplicate.body == Some(json!({ "message": "User already exists", "works": false })),
        "{duplicate:?}"
    );

    let updated = update_response(
        users
            .update(UserRequest::new("u-1", "Ada Lovelace", "ada@example.com"))
            .await,
    );
    eyre::ensure!(
        updated.body == Some(json!({ "message": "Updated" })),
        "{updated:?}"
    );

    let listed = list_response(users.list_all().await);
    eyre::ensure!(
        listed.body
            == Some(json!([{ "id": "u-1", "name": "Ada Lovelace", "email": "ada@example.com" }])),
        "{listed:?}"
    );

    let deleted = delete_response(users.delete("u-1").await);
    let again = delete_response(users.delete("u-1").await);
    eyre::ensure!(deleted.status == StatusCode::NO_CONTENT, "{deleted:?}");
    eyre::ensure!(again.status == StatusCode::BAD_REQUEST, "{again:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_user_answers_error_list(users: Users) {
    let response = create_response(
        users
            .create(UserRequest::new("u-1", "Ada", "not-an-email"))
            .await,
    );

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        Some(json!({ "errors": ["invalid email address 'not-an-email'"] }))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_unknown_user_answers_bad_request(users: Users) {
    let response = update_response(
        users
            .update(UserRequest::new("ghost", "Nobody", "nobody@example.com"))
            .await,
    );

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, Some(json!({ "message": "User not found" })));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_unknown_user_with_taken_email_answers_bad_request(
    users: Users,
) -> eyre::Result<()> {
    users
        .create(UserRequest::new("u-1", "Ada", "ada@example.com"))
        .await?;

    let response = update_response(
        users
            .update(UserRequest::new("ghost", "Nobody", "ada@example.com"))
            .await,
    );

    eyre::ensure!(response.status == StatusCode::BAD_REQUEST, "{response:?}");
    eyre::ensure!(
        response.body == Some(json!({ "message": "User not found" })),
        "{response:?}"
    );
    Ok(())
}
