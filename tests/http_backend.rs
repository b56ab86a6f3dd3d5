//! HttpBackend against a local axum server.

use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use catalog_browser::catalog::{CatalogSource, CatalogStore};
use catalog_browser::domain::{CatalogError, Category, GenerationRequest};
use catalog_browser::infrastructure::{GenerationService, HttpBackend};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use url::Url;

const PRODUCTS: &str = r#"[
  {"productCode": "II", "name": "IntelliJ IDEA", "description": "Java IDE", "iconClass": "icon-idea"},
  {"productCode": "DB", "name": "DataGrip", "iconClass": "icon-datagrip"},
  {"id": 6954, "productCode": "PRAINBOW", "name": "Rainbow Brackets", "icon": "https://plugins.example.com/icon.svg"}
]"#;

async fn products(counter: Arc<AtomicUsize>) -> impl IntoResponse {
    counter.fetch_add(1, Ordering::SeqCst);
    ([(header::CONTENT_TYPE, "application/json")], PRODUCTS)
}

async fn generate(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let Some(assignee) = params.get("assigneeName") else {
        return (StatusCode::BAD_REQUEST, "missing assigneeName".to_string());
    };
    match params.get("productCode").map(String::as_str) {
        Some("EMPTY") => (StatusCode::OK, "  \n".to_string()),
        code => (
            StatusCode::OK,
            format!(
                "{}:{}:{}:{}\n",
                code.unwrap_or("-"),
                params.get("licenseeName").map_or("", String::as_str),
                assignee,
                params.get("expiryDate").map_or("", String::as_str)
            ),
        ),
    }
}

async fn spawn_catalog_server() -> (Url, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let counter = Arc::new(AtomicUsize::new(0));

    let products_counter = Arc::clone(&counter);
    let app = Router::new()
        .route("/svc/api/products", get(move || products(Arc::clone(&products_counter))))
        .route("/svc/api/plugins", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
        .route("/svc/api/generate", get(generate));

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (Url::parse(&format!("http://{addr}/svc/")).expect("url"), counter)
}

fn request(code: Option<&str>) -> GenerationRequest {
    GenerationRequest {
        item_code: code.map(str::to_string),
        licensee_name: "Acme Corp".to_string(),
        assignee_name: "Jane Doe".to_string(),
        expiry_date: "2030-01-31".to_string(),
    }
}

#[tokio::test]
async fn fetches_and_decodes_both_item_shapes() {
    let (base, _) = spawn_catalog_server().await;
    let backend = HttpBackend::new(base, "/api/generate").unwrap();

    let items = backend.fetch(Category::Products).await.unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].code.as_deref(), Some("II"));
    assert_eq!(items[0].icon_ref.as_deref(), Some("icon-idea"));
    assert_eq!(items[2].id.as_deref(), Some("6954"));
    assert_eq!(items[2].icon_ref.as_deref(), Some("https://plugins.example.com/icon.svg"));
}

#[tokio::test]
async fn error_status_is_a_fetch_failure() {
    let (base, _) = spawn_catalog_server().await;
    let backend = HttpBackend::new(base, "/api/generate").unwrap();

    let err = backend.fetch(Category::Plugins).await.unwrap_err();
    assert!(matches!(err, CatalogError::Http(ref message) if message.contains("503")));
}

#[tokio::test]
async fn store_fetches_each_category_once() {
    let (base, counter) = spawn_catalog_server().await;
    let backend = Arc::new(HttpBackend::new(base, "/api/generate").unwrap());
    let store = CatalogStore::new(backend);

    let (a, b) = tokio::join!(
        store.ensure_loaded(Category::Products),
        store.ensure_loaded(Category::Products)
    );
    assert_eq!(a.unwrap().len(), 3);
    assert_eq!(b.unwrap().len(), 3);
    store.ensure_loaded(Category::Products).await.unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    let failure = store.ensure_loaded(Category::Plugins).await.unwrap_err();
    assert_eq!(failure.category, Category::Plugins);
    assert!(store.cached(Category::Plugins).is_none());
}

#[tokio::test]
async fn generation_sends_encoded_query_and_keeps_payload_verbatim() {
    let (base, _) = spawn_catalog_server().await;
    let backend = HttpBackend::new(base, "api/generate").unwrap();

    let payload = backend.generate(&request(Some("DB"))).await.unwrap();
    assert_eq!(payload, "DB:Acme Corp:Jane Doe:2030-01-31\n");

    let without_code = backend.generate(&request(None)).await.unwrap();
    assert!(without_code.starts_with("-:"));
}

#[tokio::test]
async fn empty_payload_is_a_generation_error() {
    let (base, _) = spawn_catalog_server().await;
    let backend = HttpBackend::new(base, "/api/generate").unwrap();

    let err = backend.generate(&request(Some("EMPTY"))).await.unwrap_err();
    assert!(matches!(err, CatalogError::Generation(ref message) if message.contains("empty")));
}

#[tokio::test]
async fn unknown_generate_path_reports_status() {
    let (base, _) = spawn_catalog_server().await;
    let backend = HttpBackend::new(base, "/api/missing").unwrap();

    let err = backend.generate(&request(Some("DB"))).await.unwrap_err();
    assert!(matches!(err, CatalogError::Generation(ref message) if message.contains("404")));
}
