mod common;

use axum::http::StatusCode;
use chaotix_core::job::JobState;
use chaotix_worker::store::ImageStore;
use common::{
    body_json, fixed_state_app, get, job_ids_from_location, location, post_form, TestApp,
};

#[tokio::test]
async fn batch_submission_redirects_to_output_view() {
    let app = TestApp::new();

    let response = post_form(
        app.router(),
        "/generate/",
        &[("prompts", "a cat\n\n   \na dog")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = location(&response);
    assert!(location.starts_with("/output/"));
    assert!(location.ends_with('/'));
    assert_eq!(job_ids_from_location(&location).len(), 2);
}

#[tokio::test]
async fn batch_outcomes_follow_submission_order() {
    let app = TestApp::new();

    let response = post_form(
        app.router(),
        "/generate/",
        &[("prompts", "  a cat  \r\na dog\r\n")],
    )
    .await;
    let location = location(&response);
    app.drain().await;

    let response = get(app.router(), &location).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let outcomes = json["data"].as_array().unwrap();
    let ids = job_ids_from_location(&location);
    assert_eq!(outcomes.len(), 2);

    assert_eq!(outcomes[0]["status"], "success");
    assert_eq!(outcomes[0]["job_id"], ids[0]);
    assert_eq!(outcomes[0]["image"]["prompt"], "a cat");
    assert_eq!(outcomes[1]["status"], "success");
    assert_eq!(outcomes[1]["job_id"], ids[1]);
    assert_eq!(outcomes[1]["image"]["prompt"], "a dog");

    let path = outcomes[0]["image"]["image_path"].as_str().unwrap();
    assert!(path.starts_with("generated_images/"));
    assert!(path.ends_with(".png"));
}

#[tokio::test]
async fn duplicate_prompts_each_get_their_own_job() {
    let app = TestApp::new();

    let response = post_form(app.router(), "/generate/", &[("prompts", "same\nsame")]).await;
    let ids = job_ids_from_location(&location(&response));
    app.drain().await;

    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
    assert_eq!(app.store.len(), 2);
}

#[tokio::test]
async fn blank_batch_is_rejected_without_submitting() {
    let app = TestApp::new();

    let response = post_form(app.router(), "/generate/", &[("prompts", " \n\t\n")]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Please provide prompts.");
    assert_eq!(app.queue.in_flight(), 0);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn missing_prompts_field_is_rejected() {
    let app = TestApp::new();

    let response = post_form(app.router(), "/generate/", &[]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Please provide prompts.");
}

#[tokio::test]
async fn overlong_line_fails_only_its_own_job() {
    let app = TestApp::new();
    let prompts = format!("a cat\n{}\na dog", "x".repeat(256));

    let response = post_form(app.router(), "/generate/", &[("prompts", &prompts)]).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = location(&response);
    assert_eq!(job_ids_from_location(&location).len(), 3);
    app.drain().await;

    let json = body_json(get(app.router(), &location).await).await;
    assert_eq!(json["data"][0]["status"], "success");
    assert_eq!(json["data"][1]["status"], "pending");
    assert_eq!(json["data"][2]["status"], "success");
    assert_eq!(app.store.len(), 2);
}

#[tokio::test]
async fn single_submission_redirects_with_one_id() {
    let app = TestApp::new();

    let response = post_form(
        app.router(),
        "/generate/single/",
        &[("prompt", "  a lighthouse at dusk ")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = location(&response);
    assert_eq!(job_ids_from_location(&location).len(), 1);
    app.drain().await;

    let json = body_json(get(app.router(), &location).await).await;
    assert_eq!(json["data"][0]["status"], "success");
    assert_eq!(json["data"][0]["image"]["prompt"], "a lighthouse at dusk");
}

#[tokio::test]
async fn blank_single_prompt_is_rejected() {
    let app = TestApp::new();

    let response = post_form(app.router(), "/generate/single/", &[("prompt", "   ")]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Please provide a prompt.");
}

#[tokio::test]
async fn unfinished_jobs_read_as_pending() {
    let app = TestApp::gated();

    let response = post_form(app.router(), "/generate/", &[("prompts", "slow one\nslow two")]).await;
    let location = location(&response);

    let json = body_json(get(app.router(), &location).await).await;
    for outcome in json["data"].as_array().unwrap() {
        assert_eq!(outcome["status"], "pending");
        assert_eq!(
            outcome["message"],
            "Image is still being generated. Please wait."
        );
    }

    app.release(2);
    app.drain().await;

    let json = body_json(get(app.router(), &location).await).await;
    for outcome in json["data"].as_array().unwrap() {
        assert_eq!(outcome["status"], "success");
    }
}

#[tokio::test]
async fn failed_generation_reads_as_pending() {
    let app = TestApp::new();

    let response = post_form(app.router(), "/generate/", &[("prompts", "fail loudly\na cat")]).await;
    let location = location(&response);
    app.drain().await;

    let json = body_json(get(app.router(), &location).await).await;
    assert_eq!(json["data"][0]["status"], "pending");
    assert_eq!(json["data"][1]["status"], "success");
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn succeeded_job_with_missing_record_reads_as_error() {
    let (router, _store) = fixed_state_app(JobState::Success { result: 999 });
    let id = uuid_like();

    let json = body_json(get(router, &format!("/output/{id}/")).await).await;

    assert_eq!(json["data"][0]["status"], "error");
    assert_eq!(json["data"][0]["job_id"], id);
    assert_eq!(json["data"][0]["message"], "Image not found in database.");
}

#[tokio::test]
async fn succeeded_job_resolves_to_its_record() {
    let (router, store) = fixed_state_app(JobState::Success { result: 1 });
    let record = store.create("a red fox", b"png").await.unwrap();
    assert_eq!(record.id, 1);

    let json = body_json(get(router, &format!("/output/{}/", uuid_like())).await).await;

    assert_eq!(json["data"][0]["status"], "success");
    assert_eq!(json["data"][0]["image"]["id"], 1);
    assert_eq!(json["data"][0]["image"]["prompt"], "a red fox");
}

#[tokio::test]
async fn unknown_job_id_reads_as_pending() {
    let app = TestApp::new();

    let json = body_json(get(app.router(), &format!("/output/{}/", uuid_like())).await).await;

    assert_eq!(json["data"][0]["status"], "pending");
}

#[tokio::test]
async fn malformed_job_id_is_rejected() {
    let app = TestApp::new();

    let response = get(app.router(), "/output/not-a-job/").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

fn uuid_like() -> String {
    chaotix_core::types::JobId::new_v4().to_string()
}
