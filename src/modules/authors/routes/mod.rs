use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use shelf_http::{send_message, send_one, send_page, AppError, EntityId, Pageable, ValidJson};

use super::models::AuthorRequest;
use super::service::AuthorService;

const FOUND_ALL: &str = "Found authors!";
const FOUND: &str = "Found author!";
const SAVED: &str = "Saved author!";
const UPDATED: &str = "Updated author!";
const DELETED: &str = "Deleted author!";

/// Route table for the author endpoints.
pub fn router(service: Arc<AuthorService>) -> Router {
    Router::new()
        .route("/findAll", get(find_all))
        .route("/find/{id}", get(find_by_id))
        .route("/save", post(save))
        .route("/update/{id}", put(update))
        .route("/delete/{id}", delete(delete_by_id))
        .with_state(service)
}

async fn find_all(
    State(service): State<Arc<AuthorService>>,
    Pageable(request): Pageable,
) -> Result<Response, AppError> {
    let page = service.find_all(&request).await?;

    tracing::info!(
        page = request.page,
        size = request.size,
        sort = %request.sort,
        returned = page.number_of_elements(),
        "authors found"
    );

    Ok(send_page(StatusCode::OK, FOUND_ALL, page))
}

async fn find_by_id(
    State(service): State<Arc<AuthorService>>,
    EntityId(id): EntityId,
) -> Result<Response, AppError> {
    let author = service.find_by_id(id).await?;

    tracing::info!(id, "author found");

    Ok(send_one(StatusCode::OK, FOUND, author))
}

async fn save(
    State(service): State<Arc<AuthorService>>,
    ValidJson(draft): ValidJson<AuthorRequest>,
) -> Result<Response, AppError> {
    let author = service.save(draft).await?;

    tracing::info!(id = author.id, "author saved");

    Ok(send_one(StatusCode::CREATED, SAVED, author))
}

async fn update(
    State(service): State<Arc<AuthorService>>,
    EntityId(id): EntityId,
    ValidJson(draft): ValidJson<AuthorRequest>,
) -> Result<Response, AppError> {
    let author = service.update(id, draft).await?;

    tracing::info!(id, "author updated");

    Ok(send_one(StatusCode::OK, UPDATED, author))
}

async fn delete_by_id(
    State(service): State<Arc<AuthorService>>,
    EntityId(id): EntityId,
) -> Result<Response, AppError> {
    service.delete_by_id(id).await?;

    tracing::info!(id, "author deleted");

    Ok(send_message(StatusCode::OK, DELETED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request},
    };
    use serde_json::{json, Value};
    use shelf_db::MemoryStore;
    use tower::ServiceExt;

    fn app() -> Router {
        router(Arc::new(AuthorService::new(Arc::new(MemoryStore::new()))))
    }

    fn snicket() -> Value {
        json!({
            "name": "Daniel Handler",
            "pseudonym": "Lemony Snicket",
            "nationality": "American",
            "birthDate": "1970-02-28"
        })
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
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn save_returns_created_with_assigned_id() {
        let app = app();
        let (status, body) = call(&app, Method::POST, "/save", Some(snicket())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], SAVED);
        assert_eq!(body["data"][0]["id"], 1);
        assert_eq!(body["data"][0]["pseudonym"], "Lemony Snicket");
        assert!(body.get("metadata").is_none());
    }

    #[tokio::test]
    async fn duplicate_save_is_conflict() {
        let app = app();
        call(&app, Method::POST, "/save", Some(snicket())).await;
        let (status, body) = call(&app, Method::POST, "/save", Some(snicket())).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({ "error": "Author already exists!" }));
    }

    #[tokio::test]
    async fn find_missing_is_not_found() {
        let (status, body) = call(&app(), Method::GET, "/find/7", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Author not found!" }));
    }

    #[tokio::test]
    async fn find_with_text_id_is_server_error() {
        let (status, body) = call(&app(), Method::GET, "/find/one", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn find_all_on_empty_store_is_ok() {
        let (status, body) = call(&app(), Method::GET, "/findAll", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], FOUND_ALL);
        assert_eq!(body["data"], json!([]));
        assert_eq!(
            body["metadata"],
            json!({
                "pageNumber": 0,
                "pageSize": 5,
                "numberOfElements": 0,
                "totalPages": 0,
                "totalElements": 0
            })
        );
    }

    #[tokio::test]
    async fn update_and_delete_round() {
        let app = app();
        call(&app, Method::POST, "/save", Some(snicket())).await;

        let mut changed = snicket();
        changed["nationality"] = json!("United States");
        let (status, body) = call(&app, Method::PUT, "/update/1", Some(changed)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], UPDATED);
        assert_eq!(body["data"][0]["id"], 1);
        assert_eq!(body["data"][0]["nationality"], "United States");

        let (status, body) = call(&app, Method::PUT, "/update/2", Some(snicket())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Author does not exist!");

        let (status, body) = call(&app, Method::DELETE, "/delete/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": DELETED }));

        let (status, _) = call(&app, Method::GET, "/find/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = call(&app, Method::DELETE, "/delete/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Author does not exist!");
    }

    #[tokio::test]
    async fn invalid_body_lists_field_errors() {
        let (status, body) = call(
            &app(),
            Method::POST,
            "/save",
            Some(json!({ "name": "", "pseudonym": "Anon", "nationality": "Unknown" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed!");
        assert_eq!(
            body["data"],
            json!([
                { "field": "name", "message": "must not be blank" },
                { "field": "birthDate", "message": "must not be null" }
            ])
        );
    }
}
