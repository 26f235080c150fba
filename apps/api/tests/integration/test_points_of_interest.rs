use super::helpers::{
    CommitFailingGateway, FailingMailService, delete, expect_status, get, point, read_json,
    seeded_store, send, spawn_app, spawn_app_with, spawn_app_with_mail, with_body, with_json,
};
use axum::http::{StatusCode, header};
use city_info_api::domain::city::gateway::CityInfoGateway;
use serde_json::{Value, json};
use std::sync::Arc;

const INTERNAL_ERROR: &str = "A problem happened while handling your request.";
const DESCRIPTION_EQUALS_NAME: &str = "The provided description should be different from the name.";

#[tokio::test]
async fn lists_points_for_a_city() {
    let app = spawn_app();

    let res = expect_status(
        send(&app.app, get("/api/cities/1/pointsofinterest")).await,
        StatusCode::OK,
    )
    .await;
    let body: Value = read_json(res).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let res = expect_status(
        send(&app.app, get("/api/cities/2/pointsofinterest")).await,
        StatusCode::OK,
    )
    .await;
    let body: Value = read_json(res).await;
    assert_eq!(body, json!([]));

    let res = send(&app.app, get("/api/cities/3/pointsofinterest")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn point_lookup_is_scoped_to_its_city() {
    let app = spawn_app();

    let res = expect_status(
        send(&app.app, get("/api/cities/1/pointsofinterest/1")).await,
        StatusCode::OK,
    )
    .await;
    let body: Value = read_json(res).await;
    assert_eq!(
        body,
        json!({"id": 1, "name": "Downtown", "description": "Lots of food"})
    );

    let res = send(&app.app, get("/api/cities/2/pointsofinterest/1")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let res = send(&app.app, get("/api/cities/1/pointsofinterest/42")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_assigns_the_next_global_id() {
    let app = spawn_app();

    let res = expect_status(
        send(
            &app.app,
            with_json(
                "POST",
                "/api/cities/2/pointsofinterest",
                &json!({"name": "Aquarium", "description": "Fish"}),
            ),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    assert_eq!(
        res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some("/api/cities/2/pointsofinterest/3")
    );
    let body: Value = read_json(res).await;
    assert_eq!(body, json!({"id": 3, "name": "Aquarium", "description": "Fish"}));

    let res = expect_status(
        send(
            &app.app,
            with_json(
                "POST",
                "/api/cities/1/pointsofinterest",
                &json!({"name": "Museum", "description": null}),
            ),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let body: Value = read_json(res).await;
    assert_eq!(body["id"], 4);

    let stored = app.gateway.find_point_for_city(2, 3).await.unwrap();
    assert_eq!(stored, Some(point(3, "Aquarium", "Fish", 2)));
}

#[tokio::test]
async fn create_rejects_description_equal_to_name() {
    let app = spawn_app();

    let res = send(
        &app.app,
        with_json(
            "POST",
            "/api/cities/2/pointsofinterest",
            &json!({"name": "Aquarium", "description": "Aquarium"}),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(res).await;
    assert_eq!(body["errors"]["Description"], json!([DESCRIPTION_EQUALS_NAME]));
    assert!(app.gateway.find_points_for_city(2).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_checks_the_body_before_the_city() {
    let app = spawn_app();

    let res = send(
        &app.app,
        with_json(
            "POST",
            "/api/cities/9/pointsofinterest",
            &json!({"name": "Same", "description": "Same"}),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(
        &app.app,
        with_json(
            "POST",
            "/api/cities/9/pointsofinterest",
            &json!({"name": "Aquarium", "description": "Fish"}),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_requires_a_usable_body() {
    let app = spawn_app();

    for body in ["", "null", "{\"name\":", "42"] {
        let res = send(
            &app.app,
            with_body("POST", "/api/cities/2/pointsofinterest", body),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body {:?}", body);
        let json: Value = read_json(res).await;
        assert!(json.get("errors").is_none());
    }
}

#[tokio::test]
async fn create_enforces_field_rules() {
    let app = spawn_app();

    let res = send(
        &app.app,
        with_json(
            "POST",
            "/api/cities/2/pointsofinterest",
            &json!({"description": "No name"}),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(res).await;
    assert_eq!(body["errors"]["Name"], json!(["You should provide a name value."]));

    let res = send(
        &app.app,
        with_json(
            "POST",
            "/api/cities/2/pointsofinterest",
            &json!({"name": "n".repeat(51), "description": "d".repeat(201)}),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(res).await;
    assert!(body["errors"]["Name"].is_array());
    assert!(body["errors"]["Description"].is_array());
}

#[tokio::test]
async fn failed_save_on_create_is_an_internal_error() {
    let app = spawn_app_with(Arc::new(CommitFailingGateway::new(seeded_store())));

    let res = send(
        &app.app,
        with_json(
            "POST",
            "/api/cities/2/pointsofinterest",
            &json!({"name": "Aquarium", "description": "Fish"}),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = read_json(res).await;
    assert_eq!(body["error"], INTERNAL_ERROR);
}

#[tokio::test]
async fn full_update_replaces_name_and_description() {
    let app = spawn_app();

    expect_status(
        send(
            &app.app,
            with_json(
                "PUT",
                "/api/cities/1/pointsofinterest/1",
                &json!({"name": "Old Town", "description": "Cobblestones"}),
            ),
        )
        .await,
        StatusCode::NO_CONTENT,
    )
    .await;

    let stored = app.gateway.find_point_for_city(1, 1).await.unwrap();
    assert_eq!(stored, Some(point(1, "Old Town", "Cobblestones", 1)));
}

#[tokio::test]
async fn full_update_rejects_description_equal_to_name() {
    let app = spawn_app();

    let res = send(
        &app.app,
        with_json(
            "PUT",
            "/api/cities/1/pointsofinterest/1",
            &json!({"name": "X", "description": "X"}),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let stored = app.gateway.find_point_for_city(1, 1).await.unwrap();
    assert_eq!(stored, Some(point(1, "Downtown", "Lots of food", 1)));
}

#[tokio::test]
async fn full_update_of_missing_point_is_not_found() {
    let app = spawn_app();
    let body = json!({"name": "Old Town", "description": "Cobblestones"});

    let res = send(&app.app, with_json("PUT", "/api/cities/9/pointsofinterest/1", &body)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(&app.app, with_json("PUT", "/api/cities/2/pointsofinterest/1", &body)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_city_or_point_wins_over_field_rules() {
    let app = spawn_app();

    let res = send(
        &app.app,
        with_json(
            "POST",
            "/api/cities/9/pointsofinterest",
            &json!({"name": "n".repeat(51), "description": "Fish"}),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(
        &app.app,
        with_json(
            "PUT",
            "/api/cities/1/pointsofinterest/99",
            &json!({"description": "Fish"}),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failed_save_on_update_is_an_internal_error() {
    let app = spawn_app_with(Arc::new(CommitFailingGateway::new(seeded_store())));

    let res = send(
        &app.app,
        with_json(
            "PUT",
            "/api/cities/1/pointsofinterest/1",
            &json!({"name": "Old Town", "description": "Cobblestones"}),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = read_json(res).await;
    assert_eq!(body["error"], INTERNAL_ERROR);
    let stored = app.gateway.find_point_for_city(1, 1).await.unwrap();
    assert_eq!(stored, Some(point(1, "Downtown", "Lots of food", 1)));
}

#[tokio::test]
async fn failed_save_on_patch_is_an_internal_error() {
    let app = spawn_app_with(Arc::new(CommitFailingGateway::new(seeded_store())));

    let res = send(
        &app.app,
        with_json(
            "PATCH",
            "/api/cities/1/pointsofinterest/2",
            &json!([{"op": "replace", "path": "/description", "value": "Totem poles"}]),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = read_json(res).await;
    assert_eq!(body["error"], INTERNAL_ERROR);
    let stored = app.gateway.find_point_for_city(1, 2).await.unwrap();
    assert_eq!(stored, Some(point(2, "Stanley Park", "Lots to do", 1)));
}

#[tokio::test]
async fn patch_updates_only_the_touched_member() {
    let app = spawn_app();

    expect_status(
        send(
            &app.app,
            with_json(
                "PATCH",
                "/api/cities/1/pointsofinterest/2",
                &json!([{"op": "replace", "path": "/name", "value": "Queen Elizabeth Park"}]),
            ),
        )
        .await,
        StatusCode::NO_CONTENT,
    )
    .await;

    let stored = app.gateway.find_point_for_city(1, 2).await.unwrap();
    assert_eq!(stored, Some(point(2, "Queen Elizabeth Park", "Lots to do", 1)));
}

#[tokio::test]
async fn patch_making_name_equal_description_is_rejected() {
    let app = spawn_app();

    let res = send(
        &app.app,
        with_json(
            "PATCH",
            "/api/cities/1/pointsofinterest/1",
            &json!([{"op": "replace", "path": "/name", "value": "Lots of food"}]),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(res).await;
    assert_eq!(body["errors"]["Description"], json!([DESCRIPTION_EQUALS_NAME]));
    let stored = app.gateway.find_point_for_city(1, 1).await.unwrap();
    assert_eq!(stored, Some(point(1, "Downtown", "Lots of food", 1)));
}

#[tokio::test]
async fn patch_with_bad_operations_leaves_the_point_alone() {
    let app = spawn_app();

    let res = send(
        &app.app,
        with_json(
            "PATCH",
            "/api/cities/1/pointsofinterest/1",
            &json!([
                {"op": "replace", "path": "/description", "value": "Night market"},
                {"op": "replace", "path": "/city", "value": "Vancouver"}
            ]),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(
        &app.app,
        with_json(
            "PATCH",
            "/api/cities/1/pointsofinterest/1",
            &json!([{"op": "remove", "path": "/name"}]),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let stored = app.gateway.find_point_for_city(1, 1).await.unwrap();
    assert_eq!(stored, Some(point(1, "Downtown", "Lots of food", 1)));
}

#[tokio::test]
async fn malformed_patch_document_is_a_bad_request() {
    let app = spawn_app();

    for body in ["", "{\"op\":\"replace\"}", "[{\"op\":\"frobnicate\",\"path\":\"/name\"}]"] {
        let res = send(
            &app.app,
            with_body("PATCH", "/api/cities/1/pointsofinterest/1", body),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body {:?}", body);
    }
}

#[tokio::test]
async fn patch_of_missing_point_is_not_found() {
    let app = spawn_app();

    let res = send(
        &app.app,
        with_json(
            "PATCH",
            "/api/cities/2/pointsofinterest/1",
            &json!([{"op": "replace", "path": "/name", "value": "Elsewhere"}]),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_point_and_notifies_once() {
    let app = spawn_app();

    expect_status(
        send(&app.app, delete("/api/cities/1/pointsofinterest/2")).await,
        StatusCode::NO_CONTENT,
    )
    .await;

    let res = send(&app.app, get("/api/cities/1/pointsofinterest/2")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let sent = app.mail.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "Point of interest deleted.");
    assert_eq!(
        sent[0].1,
        "Point of interest Stanley Park with id 2 was deleted."
    );
}

#[tokio::test]
async fn delete_of_missing_point_sends_nothing() {
    let app = spawn_app();

    let res = send(&app.app, delete("/api/cities/2/pointsofinterest/1")).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(app.mail.sent().is_empty());
}

#[tokio::test]
async fn failed_save_on_delete_skips_the_notice() {
    let app = spawn_app_with(Arc::new(CommitFailingGateway::new(seeded_store())));

    let res = send(&app.app, delete("/api/cities/1/pointsofinterest/2")).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app.mail.sent().is_empty());
    assert!(app.gateway.find_point_for_city(1, 2).await.unwrap().is_some());
}

#[tokio::test]
async fn notifier_failure_does_not_fail_the_delete() {
    let app = spawn_app_with_mail(Arc::new(FailingMailService));

    expect_status(
        send(&app, delete("/api/cities/1/pointsofinterest/1")).await,
        StatusCode::NO_CONTENT,
    )
    .await;

    let res = send(&app, get("/api/cities/1/pointsofinterest/1")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn richmond_walkthrough() {
    let app = spawn_app();

    expect_status(
        send(&app.app, get("/api/cities/1/pointsofinterest/1")).await,
        StatusCode::OK,
    )
    .await;

    let res = expect_status(
        send(
            &app.app,
            with_json(
                "POST",
                "/api/cities/2/pointsofinterest",
                &json!({"name": "Aquarium", "description": "Fish"}),
            ),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let created: Value = read_json(res).await;
    assert_eq!(created["id"], 3);

    let res = send(
        &app.app,
        with_json(
            "PUT",
            "/api/cities/1/pointsofinterest/1",
            &json!({"name": "X", "description": "X"}),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(
        &app.app,
        with_json(
            "PATCH",
            "/api/cities/1/pointsofinterest/1",
            &json!([{"op": "replace", "path": "/name", "value": "Lots of food"}]),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    expect_status(
        send(&app.app, delete("/api/cities/1/pointsofinterest/2")).await,
        StatusCode::NO_CONTENT,
    )
    .await;
    let res = send(&app.app, get("/api/cities/1/pointsofinterest/2")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.mail.sent().len(), 1);
}
