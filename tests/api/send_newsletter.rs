use serde_json::{json, Value};
use uuid::Uuid;

use crate::helper::{spawn_app, NewContact, TestApp};

async fn three_contacts(app: &TestApp) -> Vec<i64> {
    vec![
        app.insert_contact(NewContact::named("Ada", "ada@mail.com")).await,
        app.insert_contact(NewContact::named("Grace", "grace@mail.com")).await,
        app.insert_contact(NewContact::named("Linus", "linus@mail.com")).await,
    ]
}

#[tokio::test]
async fn send_newsletter_records_the_newsletter_and_its_recipients() {
    let app = spawn_app().await;
    let contact_ids = three_contacts(&app).await;
    assert_eq!(contact_ids, vec![1, 2, 3]);
    app.login_as_user().await;

    let response = app
        .post_send_newsletter(&json!({
            "subject": "Hello",
            "messageBody": "World",
            "contactIds": [1, 2, 3],
        }))
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["recipientCount"], 3);
    let newsletter_id: Uuid = body["newsletterId"].as_str().unwrap().parse().unwrap();

    let saved: (Uuid, String, String, i32) = sqlx::query_as(
        "SELECT user_id, subject, message_body, total_recipients FROM newsletters WHERE id = $1",
    )
    .bind(newsletter_id)
    .fetch_one(&app.db_pool)
    .await
    .expect("The saved newsletter should exist.");
    assert_eq!(saved, (app.user.user_id, "Hello".into(), "World".into(), 3));

    let mut recipients: Vec<i64> = sqlx::query_scalar(
        "SELECT contact_id FROM newsletter_recipients WHERE newsletter_id = $1",
    )
    .bind(newsletter_id)
    .fetch_all(&app.db_pool)
    .await
    .unwrap();
    recipients.sort();
    assert_eq!(recipients, vec![1, 2, 3]);
    assert_eq!(app.newsletter_count().await, 1);
    assert_eq!(app.recipient_count().await, 3);
}

#[tokio::test]
async fn send_newsletter_returns_401_without_a_session() {
    let app = spawn_app().await;
    three_contacts(&app).await;

    let response = app
        .post_send_newsletter(&json!({
            "subject": "Hello",
            "messageBody": "World",
            "contactIds": [1, 2, 3],
        }))
        .await;

    assert_eq!(401, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Unauthorized" }));
    assert_eq!(app.newsletter_count().await, 0);
}

#[tokio::test]
async fn send_newsletter_checks_the_session_before_the_body() {
    let app = spawn_app().await;

    let response = app.post_send_newsletter(&json!({})).await;

    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn send_newsletter_returns_400_when_fields_are_missing() {
    let app = spawn_app().await;
    three_contacts(&app).await;
    app.login_as_user().await;
    let test_cases = [
        (
            json!({ "subject": "Hello", "messageBody": "World", "contactIds": [] }),
            "empty contact ids",
        ),
        (
            json!({ "subject": "Hello", "messageBody": "World" }),
            "missing contact ids",
        ),
        (
            json!({ "messageBody": "World", "contactIds": [1] }),
            "missing subject",
        ),
        (
            json!({ "subject": "", "messageBody": "World", "contactIds": [1] }),
            "empty subject",
        ),
        (
            json!({ "subject": "Hello", "messageBody": "", "contactIds": [1] }),
            "empty message body",
        ),
        (json!({}), "missing everything"),
    ];

    for (body, description) in test_cases {
        let response = app.post_send_newsletter(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 when the payload had {}",
            description
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Missing required fields" }));
    }

    assert_eq!(app.newsletter_count().await, 0);
    assert_eq!(app.recipient_count().await, 0);
}

#[tokio::test]
async fn send_newsletter_returns_500_for_an_unreadable_body() {
    let app = spawn_app().await;
    app.login_as_user().await;

    let response = app
        .post_raw_send_newsletter("application/json", "definitely not json")
        .await;

    assert_eq!(500, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Internal server error" }));
    assert_eq!(app.newsletter_count().await, 0);
}

#[tokio::test]
async fn send_newsletter_rejects_an_unreadable_body_without_a_session_as_unauthorized() {
    let app = spawn_app().await;

    let response = app
        .post_raw_send_newsletter("application/json", "definitely not json")
        .await;

    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn send_newsletter_reads_json_whatever_the_content_type() {
    let app = spawn_app().await;
    let contact_ids = three_contacts(&app).await;
    app.login_as_user().await;

    let response = app
        .post_raw_send_newsletter(
            "text/plain;charset=UTF-8",
            &json!({
                "subject": "Hello",
                "messageBody": "World",
                "contactIds": [contact_ids[0]],
            })
            .to_string(),
        )
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["recipientCount"], 1);
    assert_eq!(app.newsletter_count().await, 1);
    assert_eq!(app.recipient_count().await, 1);
}

#[tokio::test]
async fn a_failed_recipient_batch_leaves_a_newsletter_without_recipients() {
    let app = spawn_app().await;
    let contact_ids = three_contacts(&app).await;
    app.login_as_user().await;

    // The unknown contact id breaks the foreign key of the whole batch.
    let response = app
        .post_send_newsletter(&json!({
            "subject": "Hello",
            "messageBody": "World",
            "contactIds": [contact_ids[0], 999_999],
        }))
        .await;

    assert_eq!(500, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Failed to record recipients" }));

    let total_recipients: i32 = sqlx::query_scalar("SELECT total_recipients FROM newsletters")
        .fetch_one(&app.db_pool)
        .await
        .expect("The newsletter should still exist.");
    assert_eq!(total_recipients, 2);
    assert_eq!(app.recipient_count().await, 0);

    let listing: Value = app.get("/api/newsletters").await.json().await.unwrap();
    assert_eq!(listing["newsletters"][0]["totalRecipients"], 2);
    assert_eq!(listing["newsletters"][0]["attachedRecipients"], 0);
    assert_eq!(listing["newsletters"][0]["incomplete"], true);
}

#[tokio::test]
async fn a_failed_newsletter_insert_records_nothing() {
    let app = spawn_app().await;
    three_contacts(&app).await;
    app.login_as_user().await;
    sqlx::query("ALTER TABLE newsletters DROP COLUMN message_body")
        .execute(&app.db_pool)
        .await
        .unwrap();

    let response = app
        .post_send_newsletter(&json!({
            "subject": "Hello",
            "messageBody": "World",
            "contactIds": [1, 2, 3],
        }))
        .await;

    assert_eq!(500, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Failed to create newsletter" }));
    assert_eq!(app.recipient_count().await, 0);
}

#[tokio::test]
async fn newsletters_are_listed_newest_first_for_their_sender() {
    let app = spawn_app().await;
    three_contacts(&app).await;
    app.login_as_user().await;

    for (subject, ids) in [("First", json!([1])), ("Second", json!([2, 3]))] {
        let response = app
            .post_send_newsletter(&json!({
                "subject": subject,
                "messageBody": "Body",
                "contactIds": ids,
            }))
            .await;
        assert_eq!(200, response.status().as_u16());
    }

    let listing: Value = app.get("/api/newsletters").await.json().await.unwrap();
    let newsletters = listing["newsletters"].as_array().unwrap();
    assert_eq!(newsletters.len(), 2);
    assert_eq!(newsletters[0]["subject"], "Second");
    assert_eq!(newsletters[0]["attachedRecipients"], 2);
    assert_eq!(newsletters[0]["incomplete"], false);
    assert_eq!(newsletters[1]["subject"], "First");
}

#[tokio::test]
async fn listing_newsletters_requires_a_session() {
    let app = spawn_app().await;

    let response = app.get("/api/newsletters").await;

    assert_eq!(401, response.status().as_u16());
}
