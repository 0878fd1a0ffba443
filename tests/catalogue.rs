//! End-to-end requests against the fully wired router.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use shelf_kernel::settings::Settings;
use tower::ServiceExt;

fn app() -> Router {
    let registry = shelf_app::build_registry();
    shelf_http::build_router(&registry, &Settings::default()).unwrap()
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn snicket() -> Value {
    json!({
        "name": "Daniel Handler",
        "pseudonym": "Lemony Snicket",
        "nationality": "American",
        "birthDate": "1970-02-28"
    })
}

fn book(subtitle: &str, isbn13: &str) -> Value {
    json!({
        "title": "A Series of Unfortunate Events",
        "subtitle": subtitle,
        "authors": [{ "id": 1, "pseudonym": "Lemony Snicket" }],
        "totalPages": 208,
        "publisher": "HarperCollins",
        "publishedDate": "1999-08-25",
        "isbn13": isbn13
    })
}

const SERIES: [(&str, &str); 4] = [
    ("The Bad Beginning", "9780064407663"),
    ("The Reptile Room", "9780064407670"),
    ("The Wide Window", "9780064407687"),
    ("The Miserable Mill", "9780064407694"),
];

async fn seeded() -> Router {
    let app = app();
    let (status, _) = call(&app, Method::POST, "/api/v1/author/save", Some(snicket())).await;
    assert_eq!(status, StatusCode::CREATED);
    for (subtitle, isbn13) in SERIES {
        let (status, _) = call(&app, Method::POST, "/api/v1/book/save", Some(book(subtitle, isbn13))).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    app
}

fn subtitles(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["subtitle"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_check_is_ok() {
    let response = app()
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn find_all_sorted_both_ways_is_reversed() {
    let app = seeded().await;

    let (status, asc) = call(&app, Method::GET, "/api/v1/book/findAll?page=0&size=5&sort=subtitle,asc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(asc["message"], "Found books!");
    assert_eq!(
        subtitles(&asc),
        vec!["The Bad Beginning", "The Miserable Mill", "The Reptile Room", "The Wide Window"]
    );

    let (_, desc) = call(&app, Method::GET, "/api/v1/book/findAll?page=0&size=5&sort=subtitle,desc", None).await;
    let mut reversed = subtitles(&asc);
    reversed.reverse();
    assert_eq!(subtitles(&desc), reversed);

    assert_eq!(
        asc["metadata"],
        json!({
            "pageNumber": 0,
            "pageSize": 5,
            "numberOfElements": 4,
            "totalPages": 1,
            "totalElements": 4
        })
    );
}

#[tokio::test]
async fn pages_respect_size_and_page_count() {
    let app = seeded().await;

    for size in 1..=5u64 {
        let uri = format!("/api/v1/book/findAll?page=1&size={size}");
        let (_, body) = call(&app, Method::GET, &uri, None).await;
        let metadata = &body["metadata"];

        let returned = metadata["numberOfElements"].as_u64().unwrap();
        assert!(returned <= size);
        assert_eq!(returned, body["data"].as_array().unwrap().len() as u64);
        assert_eq!(metadata["totalPages"].as_u64().unwrap(), 4u64.div_ceil(size));
    }
}

#[tokio::test]
async fn default_page_is_five_by_id() {
    let app = seeded().await;
    let (_, body) = call(&app, Method::GET, "/api/v1/book/findAll", None).await;

    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(body["metadata"]["pageSize"], 5);
}

#[tokio::test]
async fn unknown_sort_field_is_bad_request() {
    let app = seeded().await;
    let (status, body) = call(&app, Method::GET, "/api/v1/book/findAll?sort=colour,asc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("colour"));
}

#[tokio::test]
async fn find_book_returns_single_item_with_author() {
    let app = seeded().await;
    let (status, body) = call(&app, Method::GET, "/api/v1/book/find/2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Found book!");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["subtitle"], "The Reptile Room");
    assert_eq!(body["data"][0]["authors"], json!([{ "id": 1, "pseudonym": "Lemony Snicket" }]));
    assert!(body.get("metadata").is_none());
}

#[tokio::test]
async fn missing_book_is_not_found_without_data() {
    let app = seeded().await;
    let (status, body) = call(&app, Method::GET, "/api/v1/book/find/100", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Book not found!" }));
}

#[tokio::test]
async fn text_id_is_internal_server_error() {
    let (status, _) = call(&app(), Method::GET, "/api/v1/book/find/abc", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn duplicate_isbn_is_conflict_and_store_is_unchanged() {
    let app = seeded().await;

    let first = book("The Ostentatious Academy", "9780064408639");
    let (status, saved) = call(&app, Method::POST, "/api/v1/book/save", Some(first)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["message"], "Saved book!");
    assert_eq!(saved["data"][0]["id"], 5);

    let second = book("The Austere Academy", "9780064408639");
    let (status, body) = call(&app, Method::POST, "/api/v1/book/save", Some(second)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "Book already exists!" }));

    let (_, all) = call(&app, Method::GET, "/api/v1/book/findAll?size=10", None).await;
    assert_eq!(all["metadata"]["totalElements"], 5);
}

#[tokio::test]
async fn saved_book_reads_back_equal() {
    let app = seeded().await;
    let payload = book("The Vile Village", "9780064408653");

    let (_, saved) = call(&app, Method::POST, "/api/v1/book/save", Some(payload.clone())).await;
    let id = saved["data"][0]["id"].as_i64().unwrap();

    let (_, found) = call(&app, Method::GET, &format!("/api/v1/book/find/{id}"), None).await;
    let mut record = found["data"][0].clone();
    record.as_object_mut().unwrap().remove("id");
    assert_eq!(record, payload);
}

#[tokio::test]
async fn padded_author_reads_back_as_sent() {
    let app = app();
    let payload = json!({
        "name": "  Daniel Handler",
        "pseudonym": "Lemony Snicket ",
        "nationality": " American",
        "birthDate": "1970-02-28"
    });

    let (status, saved) = call(&app, Method::POST, "/api/v1/author/save", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = saved["data"][0]["id"].as_i64().unwrap();

    let (_, found) = call(&app, Method::GET, &format!("/api/v1/author/find/{id}"), None).await;
    let mut record = found["data"][0].clone();
    record.as_object_mut().unwrap().remove("id");
    assert_eq!(record, payload);
}

#[tokio::test]
async fn padded_book_update_returns_payload_fields() {
    let app = seeded().await;
    let mut payload = book("  The Ersatz Elevator ", "9780064408646");
    payload["publisher"] = json!("HarperCollins ");

    let (status, body) = call(&app, Method::PUT, "/api/v1/book/update/2", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let mut record = body["data"][0].clone();
    record.as_object_mut().unwrap().remove("id");
    assert_eq!(record, payload);
}

#[tokio::test]
async fn unparsable_paging_falls_back_to_defaults() {
    let app = seeded().await;
    let (status, body) = call(&app, Method::GET, "/api/v1/book/findAll?page=abc&size=", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Found books!");
    assert_eq!(body["metadata"]["pageNumber"], 0);
    assert_eq!(body["metadata"]["pageSize"], 5);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let (status, _) = call(&app, Method::GET, "/api/v1/author/findAll?size=big", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn update_keeps_id_and_missing_is_not_found() {
    let app = seeded().await;
    let payload = book("The Austere Academy", "9780064408639");

    let (status, body) = call(&app, Method::PUT, "/api/v1/book/update/4", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Updated book!");
    assert_eq!(body["data"][0]["id"], 4);
    assert_eq!(body["data"][0]["subtitle"], "The Austere Academy");

    let (status, body) = call(&app, Method::PUT, "/api/v1/book/update/40", Some(payload)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Book does not exist!");
}

#[tokio::test]
async fn update_onto_taken_isbn_is_conflict() {
    let app = seeded().await;
    let (status, body) = call(
        &app,
        Method::PUT,
        "/api/v1/book/update/1",
        Some(book("The Bad Beginning", "9780064407670")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Book already exists!");
}

#[tokio::test]
async fn delete_then_find_is_not_found() {
    let app = seeded().await;

    let (status, body) = call(&app, Method::DELETE, "/api/v1/book/delete/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Deleted book!" }));

    let (status, _) = call(&app, Method::GET, "/api/v1/book/find/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(&app, Method::DELETE, "/api/v1/book/delete/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Book does not exist!");
}

#[tokio::test]
async fn book_with_unknown_author_is_not_found() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/book/save",
        Some(book("The Bad Beginning", "9780064407663")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Author not found!");
}

#[tokio::test]
async fn invalid_book_body_is_bad_request() {
    let app = seeded().await;
    let mut payload = book("The Carnivorous Carnival", "978006441012");
    payload["totalPages"] = json!(-1);

    let (status, body) = call(&app, Method::POST, "/api/v1/book/save", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed!");
    let fields: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["totalPages", "isbn13"]);
}

#[tokio::test]
async fn openapi_lists_both_modules() {
    let (status, doc) = call(&app(), Method::GET, "/docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/v1/author/findAll"]["get"].is_object());
    assert!(doc["paths"]["/api/v1/book/update/{id}"]["put"].is_object());
    assert!(doc["components"]["schemas"]["BookEnvelope"].is_object());
}
