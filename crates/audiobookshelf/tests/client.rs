use std::collections::HashMap;

use audiobookshelf::{AbsClient, AbsError};
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

const TOKEN: &str = "abs-test-token";

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

fn router() -> Router {
    Router::new()
        .route(
            "/status",
            get(|headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return (StatusCode::UNAUTHORIZED, "Unauthorized".to_string());
                }
                (
                    StatusCode::OK,
                    json!({
                        "success": true,
                        "app": "audiobookshelf",
                        "serverVersion": "2.17.2",
                        "language": "en-us",
                        "isInit": true
                    })
                    .to_string(),
                )
            }),
        )
        .route(
            "/api/libraries",
            get(|| async {
                Json(json!({
                    "libraries": [
                        {"id": "lib_1", "name": "Books", "mediaType": "book",
                         "createdAt": 1, "updatedAt": 2,
                         "folders": [{"id": "fol_1", "fullPath": "/audiobooks"}]},
                        {"id": "lib_2", "name": "Podcasts", "mediaType": "podcast",
                         "lastScan": null}
                    ]
                }))
            }),
        )
        .route(
            "/api/libraries/{id}/items",
            get(|Path(id): Path<String>| async move {
                if id == "lib_1" {
                    (StatusCode::OK, json!({"results": [], "total": 10}).to_string())
                } else {
                    (StatusCode::NOT_FOUND, "Library not found".to_string())
                }
            }),
        )
        .route(
            "/api/libraries/{id}/search",
            get(
                |Path(id): Path<String>, Query(params): Query<HashMap<String, String>>| async move {
                    let q = params.get("q").cloned().unwrap_or_default();
                    Json(json!({
                        "book": [{"libraryItem": {
                            "id": "li_1", "libraryId": id, "relPath": format!("Author/{}", q),
                            "size": 1024, "addedAt": 1700000000000i64,
                            "media": {"metadata": {"title": "Dune", "authorName": "Frank Herbert"}}
                        }}],
                        "podcast": [{"libraryItem": {"id": "li_2", "relPath": "Shows/Daily"}}],
                        "authors": []
                    }))
                },
            ),
        )
        .route(
            "/api/me/listening-stats",
            get(|| async {
                Json(json!({
                    "totalTime": 3600,
                    "recentSessions": [{"id": "ses_1"}, {"id": "ses_2"}]
                }))
            }),
        )
        .route("/api/users", get(|| async { "not json" }))
}

#[tokio::test]
async fn sends_bearer_token_and_decodes_status() {
    let base = serve(router()).await;
    let client = AbsClient::with_client(reqwest::Client::new(), format!("{}/", base), TOKEN);
    assert_eq!(client.base_url(), base);

    let status = client.get_server_status().await.unwrap();
    assert!(status.success);
    assert_eq!(status.server_version, "2.17.2");
    assert_eq!(status.language, "en-us");
}

#[tokio::test]
async fn non_success_status_carries_code_and_body() {
    let base = serve(router()).await;
    let client = AbsClient::with_client(reqwest::Client::new(), base, "wrong-token");

    let err = client.get_server_status().await.unwrap_err();
    match &err {
        AbsError::Api {
            status_code,
            message,
        } => {
            assert_eq!(*status_code, 401);
            assert_eq!(message, "Unauthorized");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn lists_libraries_and_counts_items() {
    let base = serve(router()).await;
    let client = AbsClient::with_client(reqwest::Client::new(), base, TOKEN);

    let libraries = client.get_libraries().await.unwrap();
    assert_eq!(libraries.len(), 2);
    assert_eq!(libraries[0].name, "Books");
    assert_eq!(libraries[0].folders[0].path, "/audiobooks");
    assert_eq!(libraries[1].last_scan, None);

    assert_eq!(client.get_library_items_count("lib_1").await.unwrap(), 10);
    let err = client.get_library_items_count("lib_2").await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn search_merges_book_and_podcast_hits() {
    let base = serve(router()).await;
    let client = AbsClient::with_client(reqwest::Client::new(), base, TOKEN);

    let items = client.search_library("lib_1", "dune").await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].rel_path, "Author/dune");
    assert_eq!(items[0].library_id, "lib_1");
    assert_eq!(
        items[0].metadata().and_then(|m| m.author_name.as_deref()),
        Some("Frank Herbert")
    );
    assert_eq!(items[1].id, "li_2");
    assert!(items[1].metadata().is_none());
}

#[tokio::test]
async fn media_progress_comes_from_recent_sessions() {
    let base = serve(router()).await;
    let client = AbsClient::with_client(reqwest::Client::new(), base, TOKEN);

    let sessions = client.get_media_progress().await.unwrap();
    assert_eq!(sessions.len(), 2);

    let stats = client.get_listening_stats().await.unwrap();
    assert_eq!(stats["totalTime"], 3600);
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let base = serve(router()).await;
    let client = AbsClient::with_client(reqwest::Client::new(), base, TOKEN);

    let err = client.get_users().await.unwrap_err();
    assert!(matches!(err, AbsError::Json { .. }), "got {err:?}");
}

#[tokio::test]
async fn raw_request_returns_body_bytes() {
    let base = serve(router()).await;
    let client = AbsClient::with_client(reqwest::Client::new(), base, TOKEN);

    let body = client
        .request_raw(reqwest::Method::GET, "/api/libraries", None)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["libraries"][1]["id"], "lib_2");
}
