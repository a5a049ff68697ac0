use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

mod helpers;

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    builder.body(Body::empty()).unwrap()
}

fn post(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_toggle_round_trip_over_http() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let alice = app.token("alice");
    let uri = "/reviews/review-1/reactions";

    let response = app
        .router
        .clone()
        .oneshot(post(uri, Some(&alice), json!({"type": "like"})))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"reactionType": "like", "likeCount": 1, "dislikeCount": 0})
    );

    let response = app
        .router
        .clone()
        .oneshot(post(uri, Some(&alice), json!({"type": "dislike"})))
        .await?;
    assert_eq!(
        json_body(response).await,
        json!({"reactionType": "dislike", "likeCount": 0, "dislikeCount": 1})
    );

    let response = app
        .router
        .clone()
        .oneshot(post(uri, Some(&alice), json!({"type": "dislike"})))
        .await?;
    assert_eq!(
        json_body(response).await,
        json!({"reactionType": null, "likeCount": 0, "dislikeCount": 0})
    );

    Ok(())
}

#[tokio::test]
async fn test_status_depends_on_the_viewer() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let uri = "/reviews/review-1/reactions";

    for (user, reaction) in [("alice", "like"), ("bob", "like"), ("carol", "dislike")] {
        let response = app
            .router
            .clone()
            .oneshot(post(uri, Some(&app.token(user)), json!({"type": reaction})))
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.router.clone().oneshot(get(uri, None)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"reactionType": null, "likeCount": 2, "dislikeCount": 1})
    );

    let response = app
        .router
        .clone()
        .oneshot(get(uri, Some(&app.token("carol"))))
        .await?;
    assert_eq!(
        json_body(response).await,
        json!({"reactionType": "dislike", "likeCount": 2, "dislikeCount": 1})
    );

    let response = app
        .router
        .clone()
        .oneshot(get("/reviews/review-2/reactions", Some(&app.token("carol"))))
        .await?;
    assert_eq!(
        json_body(response).await,
        json!({"reactionType": null, "likeCount": 0, "dislikeCount": 0})
    );

    Ok(())
}

#[tokio::test]
async fn test_toggle_without_token_is_unauthorized() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;

    let response = app
        .router
        .clone()
        .oneshot(post(
            "/reviews/review-1/reactions",
            None,
            json!({"type": "like"}),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert!(body["message"].is_string());

    let rows: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM review_reaction")
        .fetch_one(&app.pool)
        .await?;
    assert_eq!(rows.0, 0);

    Ok(())
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized_even_for_reads() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;

    let response = app
        .router
        .clone()
        .oneshot(get("/reviews/review-1/reactions", Some("not-a-jwt")))
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_unknown_reaction_type_is_unprocessable() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;

    let response = app
        .router
        .clone()
        .oneshot(post(
            "/reviews/review-1/reactions",
            Some(&app.token("alice")),
            json!({"type": "love"}),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json_body(response).await["message"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_overlong_review_id_is_unprocessable() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let uri = format!("/reviews/{}/reactions", "r".repeat(65));

    let response = app
        .router
        .clone()
        .oneshot(post(&uri, Some(&app.token("alice")), json!({"type": "like"})))
        .await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json_body(response).await["message"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_status_for_overlong_review_id_is_unprocessable() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let uri = format!("/reviews/{}/reactions", "r".repeat(65));

    let response = app.router.clone().oneshot(get(&uri, None)).await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json_body(response).await["message"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_health_and_ready() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;

    let response = app.router.clone().oneshot(get("/health", None)).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.router.clone().oneshot(get("/ready", None)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"status": "ready"}));

    Ok(())
}
