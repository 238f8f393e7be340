use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use audiobookshelf::AbsClient;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use mediaserver::{AudiobookshelfAdapter, ErrorKind, MediaServer};
use serde_json::json;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Three libraries; `lib_2` fails every search, `lib_1` and `lib_3` share one item.
///
/// The first `failed_listings` calls to `/api/libraries` answer 502.
fn router(library_list_hits: Arc<AtomicUsize>, failed_listings: usize) -> Router {
    Router::new()
        .route(
            "/api/libraries",
            get(move || {
                let hits = Arc::clone(&library_list_hits);
                async move {
                    if hits.fetch_add(1, Ordering::SeqCst) < failed_listings {
                        return (StatusCode::BAD_GATEWAY, "upstream blip".to_string());
                    }
                    let body = json!({"libraries": [
                        {"id": "lib_1", "name": "Fiction", "mediaType": "book"},
                        {"id": "lib_2", "name": "Broken", "mediaType": "book"},
                        {"id": "lib_3", "name": "Podcasts", "mediaType": "podcast"}
                    ]});
                    (StatusCode::OK, body.to_string())
                }
            }),
        )
        .route(
            "/api/libraries/{id}/items",
            get(|Path(id): Path<String>| async move {
                match id.as_str() {
                    "lib_1" => (StatusCode::OK, json!({"total": 12}).to_string()),
                    "lib_3" => (StatusCode::OK, json!({"total": 3}).to_string()),
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, "count failed".to_string()),
                }
            }),
        )
        .route(
            "/api/libraries/{id}/search",
            get(|Path(id): Path<String>| async move {
                let body = match id.as_str() {
                    "lib_1" => json!({"book": [
                        {"libraryItem": {
                            "id": "li_1", "libraryId": "lib_1", "relPath": "Herbert/Dune",
                            "media": {"metadata": {"title": "Dune", "authorName": "Frank Herbert"}}
                        }},
                        {"libraryItem": {
                            "id": "li_shared", "libraryId": "lib_1", "relPath": "Shared/Thing"
                        }}
                    ]}),
                    "lib_3" => json!({"podcast": [
                        {"libraryItem": {
                            "id": "li_shared", "libraryId": "lib_3", "relPath": "Shared/Thing",
                            "mediaType": "podcast"
                        }},
                        {"libraryItem": {
                            "id": "li_3", "libraryId": "lib_3", "relPath": "Shows/Dune Talk",
                            "mediaType": "podcast"
                        }}
                    ]}),
                    _ => return (StatusCode::INTERNAL_SERVER_ERROR, "search exploded".to_string()),
                };
                (StatusCode::OK, body.to_string())
            }),
        )
}

async fn adapter(ttl: Duration) -> (AudiobookshelfAdapter, Arc<AtomicUsize>) {
    flaky_adapter(ttl, 0).await
}

async fn flaky_adapter(
    ttl: Duration,
    failed_listings: usize,
) -> (AudiobookshelfAdapter, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = serve(router(Arc::clone(&hits), failed_listings)).await;
    let client = AbsClient::with_client(reqwest::Client::new(), base, "token");
    let adapter = AudiobookshelfAdapter::new(Arc::new(client))
        .with_library_cache_ttl(ttl)
        .with_search_concurrency(2);
    (adapter, hits)
}

#[tokio::test]
async fn search_skips_failed_library_and_dedups() {
    let (adapter, _) = adapter(Duration::from_secs(1800)).await;

    let results = adapter.search("dune").await.unwrap();
    let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();

    // library order, first occurrence of the shared item wins
    assert_eq!(
        ids,
        vec!["lib_1_Herbert/Dune", "lib_1_Shared/Thing", "lib_3_Shows/Dune Talk"]
    );
    assert_eq!(results[0].title, "Dune");
    assert_eq!(results[0].author, "Frank Herbert");
    assert_eq!(results[0].library, "Fiction");
    assert_eq!(results[1].title, "Thing");
    assert_eq!(results[2].library, "Podcasts");
    assert_eq!(results[2].item_type, "podcast");
}

#[tokio::test]
async fn targeted_search_hits_one_library() {
    let (adapter, _) = adapter(Duration::from_secs(1800)).await;

    let results = adapter.search_library("dune", "lib_3").await.unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.library == "Podcasts"));

    let err = adapter.search_library("dune", "lib_2").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn library_counts_survive_a_failed_count() {
    let (adapter, _) = adapter(Duration::from_secs(1800)).await;

    let libraries = adapter.get_libraries().await.unwrap();
    let counts: Vec<_> = libraries.iter().map(|l| (l.id.as_str(), l.item_count)).collect();
    assert_eq!(counts, vec![("lib_1", 12), ("lib_2", 0), ("lib_3", 3)]);
}

#[tokio::test]
async fn search_recovers_after_failed_library_listing() {
    let (adapter, hits) = flaky_adapter(Duration::from_secs(1800), 1).await;

    let first = adapter.search("dune").await.unwrap();
    assert_eq!(first.len(), 3);
    let listed = hits.load(Ordering::SeqCst);
    assert!(listed >= 2);

    // the failed refresh is still stamped, so the second search lists again
    let second = adapter.search("dune").await.unwrap();
    assert_eq!(second.len(), 3);
    assert!(hits.load(Ordering::SeqCst) > listed);
}

#[tokio::test]
async fn library_names_are_cached_within_ttl() {
    let (adapter, hits) = adapter(Duration::from_secs(1800)).await;

    assert_eq!(adapter.get_library_name("lib_3").await.unwrap(), "Podcasts");
    assert_eq!(adapter.get_library_name("lib_1").await.unwrap(), "Fiction");
    adapter.search("dune").await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    let err = adapter.get_library_name("lib_404").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn expired_names_are_refetched() {
    let (adapter, hits) = adapter(Duration::ZERO).await;

    adapter.get_library_name("lib_1").await.unwrap();
    adapter.get_library_name("lib_1").await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
