mod common;

use common::{Part, body_bytes, empty_request, multipart_request, spawn_app};
use http::{StatusCode, header};
use market_server::image_store::{DEFAULT_IMAGE, image_key};
use tower::ServiceExt;

#[tokio::test]
async fn test_missing_image_serves_default() {
    let app = spawn_app().await;
    tokio::fs::write(app.config.images_dir.join(DEFAULT_IMAGE), b"default")
        .await
        .unwrap();

    let response = app
        .router
        .oneshot(empty_request("GET", "/image/nothing-here.jpg"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/jpeg"
    );
    assert_eq!(body_bytes(response).await, b"default");
}

#[tokio::test]
async fn test_non_jpg_path_is_400() {
    let app = spawn_app().await;
    let response = app
        .router
        .oneshot(empty_request("GET", "/image/notes.txt"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_default_is_404() {
    let app = spawn_app().await;
    let response = app
        .router
        .oneshot(empty_request("GET", "/draft_image/missing.jpg"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_first_upload_wins() {
    let app = spawn_app().await;
    for data in [&b"first"[..], &b"second"[..]] {
        let response = app
            .router
            .clone()
            .oneshot(multipart_request(
                "POST",
                "/items",
                &[
                    Part::Text("name", "cat"),
                    Part::Text("category", "pets"),
                    Part::File("image", "cat.jpg", data),
                ],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let uri = format!("/image/{}.jpg", image_key("cat.jpg"));
    let response = app
        .router
        .oneshot(empty_request("GET", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"first");
}

#[tokio::test]
async fn test_draft_images_are_separate_store() {
    let app = spawn_app().await;
    let response = app
        .router
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/drafts",
            &[
                Part::Text("item_name", "cat"),
                Part::Text("category", "pets"),
                Part::Text("item_state_id", "0"),
                Part::Text("description", ""),
                Part::Text("delivery_id", "0"),
                Part::Text("price", "0"),
                Part::File("image", "cat.jpg", b"draft"),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let name = format!("{}.jpg", image_key("cat.jpg"));
    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", &format!("/draft_image/{name}")))
        .await
        .unwrap();
    assert_eq!(body_bytes(response).await, b"draft");

    let response = app
        .router
        .oneshot(empty_request("GET", &format!("/image/{name}")))
        .await
        .unwrap();
    // no item image and no default in the item store
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_draft_image_non_jpg_is_400() {
    let app = spawn_app().await;
    let response = app
        .router
        .oneshot(empty_request("GET", "/draft_image/x.txt"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dotted_name_serves_default() {
    let app = spawn_app().await;
    tokio::fs::write(app.config.images_dir.join(DEFAULT_IMAGE), b"default")
        .await
        .unwrap();

    let response = app
        .router
        .oneshot(empty_request("GET", "/image/cat..jpg"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"default");
}

#[tokio::test]
async fn test_undecodable_name_is_json_400() {
    let app = spawn_app().await;
    let response = app
        .router
        .oneshot(empty_request("GET", "/image/%FF.jpg"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
}
