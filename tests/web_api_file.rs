//! Web API File/Folder Tests
//!
//! Integration tests for upload, show and index endpoints.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use common::{create_test_app, create_test_app_with_limit, create_user_and_login, encode, TOKEN};
use filevault::{FileId, FileRepository};

/// Upload and return the created record, asserting 201.
async fn upload(server: &TestServer, token: &str, body: Value) -> Value {
    let response = server
        .post("/files")
        .add_header(TOKEN, token.to_string())
        .json(&body)
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

/// Upload expecting a 400 and return the validation reason.
async fn upload_rejected(server: &TestServer, token: &str, body: Value) -> String {
    let response = server
        .post("/files")
        .add_header(TOKEN, token.to_string())
        .json(&body)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    body["error"]["reason"].as_str().unwrap_or_default().to_string()
}

async fn index(server: &TestServer, token: &str, query: &str) -> Vec<Value> {
    let response = server
        .get(&format!("/files{query}"))
        .add_header(TOKEN, token.to_string())
        .await;
    response.assert_status_ok();
    response.json::<Vec<Value>>()
}

// ============================================================================
// Upload Tests
// ============================================================================

#[tokio::test]
async fn test_create_folder() {
    let app = create_test_app().await;
    let token = create_user_and_login(&app, "user@example.com", "secret").await;

    let body = upload(&app.server, &token, json!({"name": "docs", "type": "folder"})).await;

    assert_eq!(body["name"], "docs");
    assert_eq!(body["type"], "folder");
    assert_eq!(body["parentId"], 0);
    assert_eq!(body["isPublic"], false);
    assert!(body["id"].is_i64());
    assert!(body["userId"].is_i64());
    assert!(body.get("localPath").is_none());

    // Folders have no content
    let record = FileRepository::new(app.db.pool())
        .get_by_id(FileId(body["id"].as_i64().unwrap()))
        .await
        .unwrap()
        .unwrap();
    assert!(record.local_path.is_none());
}

#[tokio::test]
async fn test_create_file_stores_decoded_content() {
    let app = create_test_app().await;
    let token = create_user_and_login(&app, "user@example.com", "secret").await;
    let content = b"Hello Webstack!\n";

    let body = upload(
        &app.server,
        &token,
        json!({"name": "hello.txt", "type": "file", "isPublic": true, "data": encode(content)}),
    )
    .await;

    assert_eq!(body["type"], "file");
    assert_eq!(body["isPublic"], true);

    let record = FileRepository::new(app.db.pool())
        .get_by_id(FileId(body["id"].as_i64().unwrap()))
        .await
        .unwrap()
        .unwrap();
    let path = record.local_path.unwrap();
    assert!(path.starts_with(app.storage_dir.path().to_str().unwrap()));
    assert_eq!(std::fs::read(&path).unwrap(), content);
}

#[tokio::test]
async fn test_create_file_accepts_unpadded_and_wrapped_base64() {
    let app = create_test_app().await;
    let token = create_user_and_login(&app, "user@example.com", "secret").await;
    let content: Vec<u8> = (0..120).collect();
    let encoded = encode(&content);
    let wrapped = format!("{}\n{}\n", &encoded[..76], &encoded[76..]);

    let cases = [
        ("hello.txt", "SGVsbG8".to_string(), b"Hello".to_vec()),
        ("spaced.txt", "SGVs bG8=".to_string(), b"Hello".to_vec()),
        ("wrapped.bin", wrapped, content),
    ];
    for (name, data, expected) in cases {
        let body = upload(
            &app.server,
            &token,
            json!({"name": name, "type": "file", "data": data}),
        )
        .await;

        let record = FileRepository::new(app.db.pool())
            .get_by_id(FileId(body["id"].as_i64().unwrap()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(std::fs::read(record.local_path.unwrap()).unwrap(), expected, "{name}");
    }
}

#[tokio::test]
async fn test_create_in_folder_and_parent_must_be_folder() {
    let app = create_test_app().await;
    let token = create_user_and_login(&app, "user@example.com", "secret").await;

    let folder = upload(&app.server, &token, json!({"name": "images", "type": "folder"})).await;
    let image = upload(
        &app.server,
        &token,
        json!({"name": "cat.png", "type": "image", "parentId": folder["id"], "data": encode(b"png")}),
    )
    .await;
    assert_eq!(image["parentId"], folder["id"]);

    // parentId may also be sent as a string
    let nested = upload(
        &app.server,
        &token,
        json!({"name": "sub", "type": "folder", "parentId": folder["id"].to_string()}),
    )
    .await;
    assert_eq!(nested["parentId"], folder["id"]);

    let reason = upload_rejected(
        &app.server,
        &token,
        json!({"name": "x.txt", "type": "file", "parentId": image["id"], "data": encode(b"x")}),
    )
    .await;
    assert_eq!(reason, "ParentNotFolder");
}

#[tokio::test]
async fn test_validation_reasons() {
    let app = create_test_app().await;
    let token = create_user_and_login(&app, "user@example.com", "secret").await;
    let data = encode(b"x");

    let cases = [
        (json!({"type": "folder"}), "MissingField"),
        (json!({"name": "", "type": "folder"}), "MissingField"),
        (json!({"name": "x"}), "InvalidType"),
        (json!({"name": "x", "type": "video"}), "InvalidType"),
        (json!({"name": "x", "type": "file"}), "MissingData"),
        (json!({"name": "x", "type": "image", "data": ""}), "MissingData"),
        (json!({"name": "x", "type": "file", "parentId": 999, "data": data}), "ParentNotFound"),
        (json!({"name": "x", "type": "folder", "parentId": "abc"}), "ParentNotFound"),
        (json!({"name": "x", "type": "file", "data": "***"}), "InvalidData"),
    ];

    for (body, expected) in cases {
        let reason = upload_rejected(&app.server, &token, body.clone()).await;
        assert_eq!(reason, expected, "body: {body}");
    }

    // Nothing was created
    assert!(index(&app.server, &token, "").await.is_empty());
}

#[tokio::test]
async fn test_first_violated_rule_wins() {
    let app = create_test_app().await;
    let token = create_user_and_login(&app, "user@example.com", "secret").await;

    let reason = upload_rejected(
        &app.server,
        &token,
        json!({"name": "", "type": "video", "parentId": 999}),
    )
    .await;
    assert_eq!(reason, "MissingField");

    let reason = upload_rejected(
        &app.server,
        &token,
        json!({"name": "x", "type": "video", "parentId": 999}),
    )
    .await;
    assert_eq!(reason, "InvalidType");

    let reason = upload_rejected(
        &app.server,
        &token,
        json!({"name": "x", "type": "file", "parentId": 999}),
    )
    .await;
    assert_eq!(reason, "MissingData");

    // Fields of the wrong JSON shape are judged by the same rules
    let cases = [
        (json!({"name": "", "type": 5}), "MissingField"),
        (json!({"name": 42, "type": "folder"}), "MissingField"),
        (json!({"name": "x", "type": 5}), "InvalidType"),
        (json!({"name": "x", "type": ["folder"]}), "InvalidType"),
        (json!({"name": "x", "type": "file", "data": 7}), "MissingData"),
        (json!({"name": "x", "type": "folder", "parentId": 1.5}), "ParentNotFound"),
        (json!({"name": "x", "type": "folder", "parentId": true}), "ParentNotFound"),
    ];
    for (body, expected) in cases {
        let reason = upload_rejected(&app.server, &token, body.clone()).await;
        assert_eq!(reason, expected, "body: {body}");
    }
}

#[tokio::test]
async fn test_upload_non_boolean_is_public_is_private() {
    let app = create_test_app().await;
    let token = create_user_and_login(&app, "user@example.com", "secret").await;

    let created = upload(
        &app.server,
        &token,
        json!({"name": "docs", "type": "folder", "isPublic": "true", "parentId": null}),
    )
    .await;

    assert_eq!(created["isPublic"], false);
    assert_eq!(created["parentId"], 0);
}

#[tokio::test]
async fn test_upload_parent_of_other_user_is_not_found() {
    let app = create_test_app().await;
    let alice = create_user_and_login(&app, "alice@example.com", "secret").await;
    let bob = create_user_and_login(&app, "bob@example.com", "secret").await;

    let folder = upload(&app.server, &bob, json!({"name": "bobs", "type": "folder"})).await;

    let reason = upload_rejected(
        &app.server,
        &alice,
        json!({"name": "x", "type": "folder", "parentId": folder["id"]}),
    )
    .await;
    assert_eq!(reason, "ParentNotFound");
}

#[tokio::test]
async fn test_upload_unauthorized() {
    let app = create_test_app().await;

    app.server
        .post("/files")
        .json(&json!({"name": "docs", "type": "folder"}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // Authentication is checked before the body
    app.server
        .post("/files")
        .add_header(TOKEN, "bogus".to_string())
        .json(&json!({"type": 42}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_invalid_json() {
    let app = create_test_app().await;
    let token = create_user_and_login(&app, "user@example.com", "secret").await;

    let response = app
        .server
        .post("/files")
        .add_header(TOKEN, token)
        .text(r#"{"name": "docs", "type": "#)
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"].get("reason").is_none());
}

#[tokio::test]
async fn test_upload_too_large() {
    let app = create_test_app_with_limit(1024).await;
    let token = create_user_and_login(&app, "user@example.com", "secret").await;

    let response = app
        .server
        .post("/files")
        .add_header(TOKEN, token.clone())
        .json(&json!({"name": "big.bin", "type": "file", "data": encode(&[0u8; 4096])}))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");

    // Bodies under the limit still go through
    app.server
        .post("/files")
        .add_header(TOKEN, token)
        .json(&json!({"name": "small.bin", "type": "file", "data": encode(&[0u8; 64])}))
        .await
        .assert_status(StatusCode::CREATED);
}

// ============================================================================
// Show Tests
// ============================================================================

#[tokio::test]
async fn test_show() {
    let app = create_test_app().await;
    let token = create_user_and_login(&app, "user@example.com", "secret").await;
    let created = upload(&app.server, &token, json!({"name": "docs", "type": "folder"})).await;

    let response = app
        .server
        .get(&format!("/files/{}", created["id"]))
        .add_header(TOKEN, token)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), created);
}

#[tokio::test]
async fn test_show_not_found() {
    let app = create_test_app().await;
    let token = create_user_and_login(&app, "user@example.com", "secret").await;

    for id in ["9999", "abc"] {
        app.server
            .get(&format!("/files/{id}"))
            .add_header(TOKEN, token.clone())
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_show_other_users_file_is_not_found() {
    let app = create_test_app().await;
    let alice = create_user_and_login(&app, "alice@example.com", "secret").await;
    let bob = create_user_and_login(&app, "bob@example.com", "secret").await;

    let created = upload(&app.server, &alice, json!({"name": "private", "type": "folder"})).await;

    let response = app
        .server
        .get(&format!("/files/{}", created["id"]))
        .add_header(TOKEN, bob)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_show_unauthorized() {
    let app = create_test_app().await;

    app.server
        .get("/files/1")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Index Tests
// ============================================================================

#[tokio::test]
async fn test_index_root_lists_everything_owned() {
    let app = create_test_app().await;
    let alice = create_user_and_login(&app, "alice@example.com", "secret").await;
    let bob = create_user_and_login(&app, "bob@example.com", "secret").await;

    let folder = upload(&app.server, &alice, json!({"name": "docs", "type": "folder"})).await;
    upload(
        &app.server,
        &alice,
        json!({"name": "a.txt", "type": "file", "parentId": folder["id"], "data": encode(b"a")}),
    )
    .await;
    upload(&app.server, &bob, json!({"name": "theirs", "type": "folder"})).await;

    let root = index(&app.server, &alice, "").await;
    let names: Vec<&str> = root.iter().map(|f| f["name"].as_str().unwrap()).collect();
    assert_eq!(root.len(), 2);
    assert!(names.contains(&"docs"));
    assert!(names.contains(&"a.txt"));

    assert_eq!(index(&app.server, &alice, "?parentId=0").await.len(), 2);
}

#[tokio::test]
async fn test_index_by_parent() {
    let app = create_test_app().await;
    let token = create_user_and_login(&app, "user@example.com", "secret").await;

    let folder = upload(&app.server, &token, json!({"name": "docs", "type": "folder"})).await;
    upload(&app.server, &token, json!({"name": "other", "type": "folder"})).await;
    upload(
        &app.server,
        &token,
        json!({"name": "a.txt", "type": "file", "parentId": folder["id"], "data": encode(b"a")}),
    )
    .await;

    let inside = index(&app.server, &token, &format!("?parentId={}", folder["id"])).await;
    assert_eq!(inside.len(), 1);
    assert_eq!(inside[0]["name"], "a.txt");
    assert_eq!(inside[0]["parentId"], folder["id"]);

    assert!(index(&app.server, &token, "?parentId=abc").await.is_empty());
    assert!(index(&app.server, &token, "?parentId=9999").await.is_empty());
}

#[tokio::test]
async fn test_index_pagination() {
    let app = create_test_app().await;
    let token = create_user_and_login(&app, "user@example.com", "secret").await;
    for i in 0..25 {
        upload(&app.server, &token, json!({"name": format!("f{i}"), "type": "folder"})).await;
    }

    let page0 = index(&app.server, &token, "?page=0").await;
    let page1 = index(&app.server, &token, "?page=1").await;
    let page2 = index(&app.server, &token, "?page=2").await;

    assert_eq!(page0.len(), 20);
    assert_eq!(page1.len(), 5);
    assert!(page2.is_empty());
    assert!(page0
        .iter()
        .all(|a| page1.iter().all(|b| a["id"] != b["id"])));

    // Absent or malformed page means the first page
    assert_eq!(index(&app.server, &token, "").await, page0);
    assert_eq!(index(&app.server, &token, "?page=abc").await, page0);
}

#[tokio::test]
async fn test_index_unauthorized() {
    let app = create_test_app().await;

    app.server
        .get("/files")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
