//! End-to-end tests for login, stage routing, and the reading flow,
//! exercising the real router over real file-backed adapters.

mod common;

use axum::http::StatusCode;
use common::{body_string, build_app, get, location, login, post_form, TestUser};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::ConnectOptions;

use annotation_study_core::domain::Identity;
use annotation_study_core::ports::ProgressStore;

const TWO_PARAGRAPHS: &str = r#"[{"id": 0, "text": "A. B."}, {"id": 1, "text": "C."}]"#;

#[tokio::test]
async fn login_routes_participants_and_admin_to_their_screens() {
    let app = build_app(&[TestUser::new("user_1", "pw1", TWO_PARAGRAPHS)]);

    login(&app.router, "user_1", "pw1", "/stage_select").await;
    login(&app.router, "admin", common::ADMIN_SECRET, "/admin").await;
}

#[tokio::test]
async fn login_failure_is_identical_for_unknown_user_and_wrong_password() {
    let app = build_app(&[TestUser::new("user_1", "pw1", TWO_PARAGRAPHS)]);

    let wrong_password = post_form(
        &app.router,
        "/login",
        "username=user_1&password=nope",
        None,
    )
    .await;
    let unknown_user = post_form(
        &app.router,
        "/login",
        "username=ghost&password=anything",
        None,
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::OK);
    assert_eq!(unknown_user.status(), StatusCode::OK);
    let a = body_string(wrong_password).await;
    let b = body_string(unknown_user).await;
    assert_eq!(a, b);
    assert!(a.contains("Invalid credentials"));
}

#[tokio::test]
async fn protected_routes_redirect_to_login_without_a_session() {
    let app = build_app(&[TestUser::new("user_1", "pw1", TWO_PARAGRAPHS)]);

    for route in ["/reader", "/stage_select", "/go_to_stage?stage=1", "/justification"] {
        let response = get(&app.router, route, None).await;
        assert_eq!(response.status(), StatusCode::FOUND, "route {}", route);
        assert_eq!(location(&response), "/");
    }
}

#[tokio::test]
async fn full_reading_pass_advances_and_completes() {
    let app = build_app(&[TestUser::new("user_1", "pw1", TWO_PARAGRAPHS)]);
    let cookie = login(&app.router, "user_1", "pw1", "/stage_select").await;

    // First paragraph: index 0 of 2, percent 50, split into two sentences.
    let body = body_string(get(&app.router, "/reader", Some(&cookie)).await).await;
    assert!(body.contains("50%"));
    assert!(body.contains("<span class=\"sentence\">A.</span>"));
    assert!(body.contains("<span class=\"sentence\">B.</span>"));

    let response = post_form(
        &app.router,
        "/confirm",
        "selection=x&duration=1.5",
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/reader");

    // Second paragraph: percent is round((1+1)/2*100) = 100.
    let body = body_string(get(&app.router, "/reader", Some(&cookie)).await).await;
    assert!(body.contains("100%"));
    assert!(body.contains("<span class=\"sentence\">C.</span>"));

    post_form(&app.router, "/confirm", "selection=&duration=", Some(&cookie)).await;
    let body = body_string(get(&app.router, "/reader", Some(&cookie)).await).await;
    assert!(body.contains("All paragraphs completed"));
}

#[tokio::test]
async fn confirming_past_the_end_leaves_the_store_unchanged() {
    let app = build_app(&[TestUser::new("user_1", "pw1", TWO_PARAGRAPHS)]);
    let cookie = login(&app.router, "user_1", "pw1", "/stage_select").await;
    let identity = Identity("user_1".to_string());

    for _ in 0..2 {
        post_form(&app.router, "/confirm", "selection=&duration=", Some(&cookie)).await;
    }
    assert_eq!(app.state.progress.current_position(&identity).await.unwrap(), 2);

    // The (N+1)-th confirmation is a no-op, not an error.
    let response =
        post_form(&app.router, "/confirm", "selection=&duration=", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(app.state.progress.current_position(&identity).await.unwrap(), 2);
}

#[tokio::test]
async fn concurrent_confirms_advance_once_each() {
    let app = build_app(&[TestUser::new("user_1", "pw1", TWO_PARAGRAPHS)]);
    let cookie = login(&app.router, "user_1", "pw1", "/stage_select").await;
    let identity = Identity("user_1".to_string());

    // A double-submit: both requests race count-then-insert for the same
    // user. The per-identity guard must serialize them so each appends its
    // own index instead of both recording paragraph 0.
    let (first, second) = tokio::join!(
        post_form(&app.router, "/confirm", "selection=&duration=", Some(&cookie)),
        post_form(&app.router, "/confirm", "selection=&duration=", Some(&cookie)),
    );
    assert_eq!(first.status(), StatusCode::FOUND);
    assert_eq!(second.status(), StatusCode::FOUND);
    assert_eq!(app.state.progress.current_position(&identity).await.unwrap(), 2);

    let mut conn = SqliteConnectOptions::new()
        .filename(app.state.config.store_dir.join("user_1.db"))
        .connect()
        .await
        .unwrap();
    let ids: Vec<i64> = sqlx::query_scalar("SELECT paragraph_id FROM progress ORDER BY id")
        .fetch_all(&mut conn)
        .await
        .unwrap();
    assert_eq!(ids, vec![0, 1]);
}

#[tokio::test]
async fn stage_routing_follows_the_role_partition() {
    let mut expert = TestUser::new("expert_1", "pwe", TWO_PARAGRAPHS);
    expert.expert = true;
    let mut justified = TestUser::new("user_2", "pw2", TWO_PARAGRAPHS);
    justified.justification = Some(r#"[{"text": "A.", "sentence_labels": {"A.": ["x", "y"]}}]"#);
    let app = build_app(&[
        TestUser::new("user_1", "pw1", TWO_PARAGRAPHS),
        justified,
        expert,
    ]);

    let cookie = login(&app.router, "user_1", "pw1", "/stage_select").await;
    let body = body_string(get(&app.router, "/stage_select", Some(&cookie)).await).await;
    for label in ["Annotation", "Justification", "Discussion"] {
        assert!(body.contains(label));
    }

    // Stage 1 opens the reader; stage 2 without a justification dataset
    // and stage 3 are closed.
    let response = get(&app.router, "/go_to_stage?stage=1", Some(&cookie)).await;
    assert_eq!(location(&response), "/reader");
    for uri in ["/go_to_stage?stage=2", "/go_to_stage?stage=3", "/go_to_stage"] {
        let body = body_string(get(&app.router, uri, Some(&cookie)).await).await;
        assert!(body.contains("not yet open"), "uri {}", uri);
    }

    // A justification dataset opens stage 2.
    let cookie = login(&app.router, "user_2", "pw2", "/stage_select").await;
    let response = get(&app.router, "/go_to_stage?stage=2", Some(&cookie)).await;
    assert_eq!(location(&response), "/justification");

    // Experts see only arbitration, and every numbered stage is closed.
    let cookie = login(&app.router, "expert_1", "pwe", "/stage_select").await;
    let body = body_string(get(&app.router, "/stage_select", Some(&cookie)).await).await;
    assert!(body.contains("Arbitration"));
    assert!(!body.contains("Annotation"));
    for stage in 1..=4 {
        let uri = format!("/go_to_stage?stage={}", stage);
        let body = body_string(get(&app.router, &uri, Some(&cookie)).await).await;
        assert!(body.contains("not yet open"), "stage {}", stage);
    }
}

#[tokio::test]
async fn justification_view_lists_label_conflicts() {
    let mut user = TestUser::new("user_1", "pw1", TWO_PARAGRAPHS);
    user.justification = Some(
        r#"[{"text": "A. B.", "sentence_labels": {"A.": ["claim", "evidence"], "B.": ["claim"]}}]"#,
    );
    let app = build_app(&[user, TestUser::new("user_2", "pw2", TWO_PARAGRAPHS)]);

    let cookie = login(&app.router, "user_1", "pw1", "/stage_select").await;
    let body = body_string(get(&app.router, "/justification", Some(&cookie)).await).await;
    assert!(body.contains("A."));
    assert!(body.contains("claim, evidence"));
    assert!(!body.contains("<td>B.</td>"));

    // No justification dataset: the placeholder page, not an error.
    let cookie = login(&app.router, "user_2", "pw2", "/stage_select").await;
    let body = body_string(get(&app.router, "/justification", Some(&cookie)).await).await;
    assert!(body.contains("not yet open"));
}

#[tokio::test]
async fn logout_clears_the_session() {
    let app = build_app(&[TestUser::new("user_1", "pw1", TWO_PARAGRAPHS)]);
    let cookie = login(&app.router, "user_1", "pw1", "/stage_select").await;

    let response = get(&app.router, "/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");

    let response = get(&app.router, "/reader", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");
}
