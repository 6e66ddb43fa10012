#[macro_use]
mod common;

use actix_web::test;
use httpmock::prelude::*;
use httpmock::Method::PATCH;
use serde_json::{json, Value};
use uuid::Uuid;

use showcase_be::services::post_services::MAX_LIKE_ATTEMPTS;

#[actix_web::test]
async fn post_needs_existing_project() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/projects").query_param("id", "eq.ghost");
            then.status(200).json_body(json!([]));
        })
        .await;
    let insert = server
        .mock_async(|when, then| {
            when.method(POST).path("/rest/v1/posts");
            then.status(201).json_body(json!([]));
        })
        .await;

    let app = test_app!(&server);
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(common::bearer(Uuid::new_v4()))
        .set_json(json!({ "project_id": "ghost", "content": "hello" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    insert.assert_hits_async(0).await;
}

#[actix_web::test]
async fn create_post_returns_camel_case_payload() {
    let server = MockServer::start_async().await;
    let author = Uuid::new_v4();
    let post_id = Uuid::new_v4();

    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/projects").query_param("id", "eq.p-1");
            then.status(200).json_body(json!([common::project_row("p-1", author)]));
        })
        .await;
    let insert = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rest/v1/posts")
                .json_body_partial(json!({ "project_id": "p-1", "likes": 0, "liked_by": [] }).to_string());
            then.status(201)
                .json_body(json!([common::post_row(post_id, "p-1", author, &[], 0, 0)]));
        })
        .await;

    let app = test_app!(&server);
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(common::bearer(author))
        .set_json(json!({
            "project_id": "p-1",
            "content": "first release is out",
            "images": ["https://img.example.com/1.png", "https://img.example.com/2.png"],
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    insert.assert_async().await;

    let data = &body["data"];
    assert_eq!(data["projectId"], "p-1");
    assert_eq!(data["userId"], author.to_string());
    assert_eq!(data["images"][1], "https://img.example.com/2.png");
    assert_eq!(data["likes"], 0);
    assert_eq!(data["likedBy"], json!([]));
    assert_eq!(data["comments"], json!([]));
    assert_eq!(data["isOwnPost"], true);
}

#[actix_web::test]
async fn invalid_post_is_rejected_before_storage() {
    let server = MockServer::start_async().await;
    let lookup = server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/projects");
            then.status(200).json_body(json!([]));
        })
        .await;

    let app = test_app!(&server);
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(common::bearer(Uuid::new_v4()))
        .set_json(json!({ "project_id": "p-1", "content": "x", "images": ["not-a-url"] }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    lookup.assert_hits_async(0).await;
}

#[actix_web::test]
async fn like_writes_counter_and_set_together() {
    let server = MockServer::start_async().await;
    let (author, fan, post_id) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/posts").query_param("id", format!("eq.{}", post_id));
            then.status(200)
                .json_body(json!([common::post_row(post_id, "p-1", author, &[], 0, 2)]));
        })
        .await;
    let write = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/rest/v1/posts")
                .query_param("revision", "eq.2")
                .json_body(json!({ "likes": 1, "liked_by": [fan], "revision": 3 }));
            then.status(200)
                .json_body(json!([common::post_row(post_id, "p-1", author, &[fan], 1, 3)]));
        })
        .await;

    let app = test_app!(&server);
    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/like", post_id))
        .insert_header(common::bearer(fan))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    write.assert_async().await;
    assert_eq!(body["data"]["likes"], 1);
    assert_eq!(body["data"]["liked"], true);
}

#[actix_web::test]
async fn repeated_like_does_not_write() {
    let server = MockServer::start_async().await;
    let (author, fan, post_id) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/posts");
            then.status(200)
                .json_body(json!([common::post_row(post_id, "p-1", author, &[fan], 1, 5)]));
        })
        .await;
    let write = server
        .mock_async(|when, then| {
            when.method(PATCH).path("/rest/v1/posts");
            then.status(200).json_body(json!([]));
        })
        .await;

    let app = test_app!(&server);
    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/like", post_id))
        .insert_header(common::bearer(fan))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["likes"], 1);
    write.assert_hits_async(0).await;
}

#[actix_web::test]
async fn unlike_removes_user() {
    let server = MockServer::start_async().await;
    let (author, fan, other, post_id) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/posts");
            then.status(200)
                .json_body(json!([common::post_row(post_id, "p-1", author, &[fan, other], 2, 7)]));
        })
        .await;
    let write = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/rest/v1/posts")
                .query_param("revision", "eq.7")
                .json_body_partial(json!({ "likes": 1, "liked_by": [other] }).to_string());
            then.status(200)
                .json_body(json!([common::post_row(post_id, "p-1", author, &[other], 1, 8)]));
        })
        .await;

    let app = test_app!(&server);
    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}/like", post_id))
        .insert_header(common::bearer(fan))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    write.assert_async().await;
    assert_eq!(body["data"]["liked"], false);
    assert_eq!(body["data"]["likes"], 1);
}

#[actix_web::test]
async fn lost_like_races_end_in_conflict() {
    let server = MockServer::start_async().await;
    let (author, post_id) = (Uuid::new_v4(), Uuid::new_v4());

    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/posts");
            then.status(200)
                .json_body(json!([common::post_row(post_id, "p-1", author, &[], 0, 1)]));
        })
        .await;
    let write = server
        .mock_async(|when, then| {
            when.method(PATCH).path("/rest/v1/posts");
            then.status(200).json_body(json!([]));
        })
        .await;

    let app = test_app!(&server);
    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/like", post_id))
        .insert_header(common::bearer(Uuid::new_v4()))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
    write.assert_hits_async(MAX_LIKE_ATTEMPTS).await;
}

#[actix_web::test]
async fn feed_reports_consistent_like_counts() {
    let server = MockServer::start_async().await;
    let (author, fan) = (Uuid::new_v4(), Uuid::new_v4());

    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v1/posts")
                .query_param("project_id", "eq.p-1")
                .query_param("limit", "50");
            // stored counter drifted to 5
            then.status(200)
                .json_body(json!([common::post_row(Uuid::new_v4(), "p-1", author, &[fan], 5, 0)]));
        })
        .await;

    let app = test_app!(&server);
    let req = test::TestRequest::get()
        .uri("/api/posts?project_id=p-1")
        .insert_header(common::bearer(fan))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    let post = &body["data"][0];
    assert_eq!(post["likes"], 1);
    assert_eq!(post["likedBy"].as_array().unwrap().len(), 1);
    assert_eq!(post["likedByMe"], true);
}

#[actix_web::test]
async fn blank_comment_is_400() {
    let server = MockServer::start_async().await;
    let app = test_app!(&server);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", Uuid::new_v4()))
        .insert_header(common::bearer(Uuid::new_v4()))
        .set_json(json!({ "content": "   " }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn comment_is_stored_for_existing_post() {
    let server = MockServer::start_async().await;
    let (author, commenter, post_id, comment_id) =
        (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/posts");
            then.status(200)
                .json_body(json!([common::post_row(post_id, "p-1", author, &[], 0, 0)]));
        })
        .await;
    let insert = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rest/v1/comments")
                .json_body_partial(json!({ "post_id": post_id, "content": "great work" }).to_string());
            then.status(201).json_body(json!([{
                "id": comment_id,
                "post_id": post_id,
                "user_id": commenter,
                "content": "great work",
                "created_at": "2024-05-03T12:00:00+00:00",
            }]));
        })
        .await;

    let app = test_app!(&server);
    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post_id))
        .insert_header(common::bearer(commenter))
        .set_json(json!({ "content": " great work " }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    insert.assert_async().await;
    assert_eq!(body["data"]["postId"], post_id.to_string());
    assert_eq!(body["data"]["userId"], commenter.to_string());
}

#[actix_web::test]
async fn non_uuid_post_id_is_404() {
    let server = MockServer::start_async().await;
    let app = test_app!(&server);

    let req = test::TestRequest::get().uri("/api/posts/not-a-uuid").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn feed_survives_negative_stored_counter() {
    let server = MockServer::start_async().await;
    let author = Uuid::new_v4();

    let mut row = common::post_row(Uuid::new_v4(), "p-1", author, &[], 0, 0);
    row["likes"] = json!(-1);
    row["comments"] = Value::Null;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/posts");
            then.status(200).json_body(json!([row]));
        })
        .await;

    let app = test_app!(&server);
    let req = test::TestRequest::get().uri("/api/posts?project_id=p-1").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"][0]["likes"], 0);
    assert_eq!(body["data"][0]["comments"], json!([]));
}

#[actix_web::test]
async fn author_deletes_post() {
    let server = MockServer::start_async().await;
    let (author, post_id) = (Uuid::new_v4(), Uuid::new_v4());

    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/rest/v1/posts")
                .query_param("id", format!("eq.{}", post_id))
                .query_param("user_id", format!("eq.{}", author));
            then.status(200)
                .json_body(json!([common::post_row(post_id, "p-1", author, &[], 0, 0)]));
        })
        .await;

    let app = test_app!(&server);
    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}", post_id))
        .insert_header(common::bearer(author))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    delete.assert_async().await;
    assert_eq!(body["data"], post_id.to_string());
}

#[actix_web::test]
async fn deleting_someone_elses_post_is_404() {
    let server = MockServer::start_async().await;
    let (stranger, post_id) = (Uuid::new_v4(), Uuid::new_v4());

    // the owner filter matches nothing
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/rest/v1/posts")
                .query_param("user_id", format!("eq.{}", stranger));
            then.status(200).json_body(json!([]));
        })
        .await;

    let app = test_app!(&server);
    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}", post_id))
        .insert_header(common::bearer(stranger))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    delete.assert_async().await;
}

#[actix_web::test]
async fn author_deletes_comment() {
    let server = MockServer::start_async().await;
    let (commenter, post_id, comment_id) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/rest/v1/comments")
                .query_param("id", format!("eq.{}", comment_id))
                .query_param("post_id", format!("eq.{}", post_id))
                .query_param("user_id", format!("eq.{}", commenter));
            then.status(200).json_body(json!([{
                "id": comment_id,
                "post_id": post_id,
                "user_id": commenter,
                "content": "great work",
                "created_at": null,
            }]));
        })
        .await;

    let app = test_app!(&server);
    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}/comments/{}", post_id, comment_id))
        .insert_header(common::bearer(commenter))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    delete.assert_async().await;
}

#[actix_web::test]
async fn deleting_someone_elses_comment_is_404() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/rest/v1/comments");
            then.status(200).json_body(json!([]));
        })
        .await;

    let app = test_app!(&server);
    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}/comments/{}", Uuid::new_v4(), Uuid::new_v4()))
        .insert_header(common::bearer(Uuid::new_v4()))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
}

#[actix_web::test]
async fn delete_post_requires_token() {
    let server = MockServer::start_async().await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/rest/v1/posts");
            then.status(200).json_body(json!([]));
        })
        .await;

    let app = test_app!(&server);
    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}", Uuid::new_v4()))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    delete.assert_hits_async(0).await;
}
