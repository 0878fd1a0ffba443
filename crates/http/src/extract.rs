//! Request extractors that reject with [`AppError`] so every failure keeps the envelope shape.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use shelf_db::{PageRequest, Sort};
use shelf_kernel::settings::PaginationSettings;

use crate::error::AppError;
use crate::validation::Validate;

/// Numeric `{id}` path segment.
///
/// A segment that is not an integer is reported as an internal error (500),
/// not a client error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i64);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(EntityId(id)),
            Err(rejection) => Err(AppError::Internal(anyhow::anyhow!(
                "failed to convert path identifier: {}",
                rejection.body_text()
            ))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    page: Option<String>,
    size: Option<String>,
    sort: Option<String>,
}

fn parse_number(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse().ok())
}

/// `?page&size&sort=field,dir` normalized into a [`PageRequest`].
///
/// Missing or non-numeric values default to page 0, the configured default
/// size and `id,asc`. Negative pages become 0, sizes below 1 become the default
/// and sizes above the configured maximum are capped. Limits come from a [`PaginationSettings`]
/// request extension when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pageable(pub PageRequest);

impl Pageable {
    fn from_query(query: PageQuery, limits: &PaginationSettings) -> Result<Self, AppError> {
        let page = parse_number(query.page.as_deref())
            .unwrap_or(0)
            .clamp(0, i64::from(u32::MAX)) as u32;

        let size = match parse_number(query.size.as_deref()) {
            Some(size) if size >= 1 => size.min(i64::from(limits.max_size)) as u32,
            _ => limits.default_size,
        };

        let sort = match query.sort.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.parse::<Sort>().map_err(AppError::bad_request)?,
            _ => Sort::default(),
        };

        Ok(Pageable(PageRequest::new(page, size, sort)))
    }
}

impl<S> FromRequestParts<S> for Pageable
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PageQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

        let limits = parts
            .extensions
            .get::<PaginationSettings>()
            .cloned()
            .unwrap_or_default();

        Self::from_query(query, &limits)
    }
}

/// JSON body that is deserialized and then validated.
///
/// Malformed JSON is a 400 carrying the parser message; a body that parses but
/// breaks field rules is a 400 listing every field error. Other rejections,
/// such as a missing content type, keep their own status.
pub struct ValidJson<T: Validate>(pub T::Valid);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
    T::Valid: Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                malformed @ (JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_)) => {
                    AppError::bad_request(malformed.body_text())
                }
                other => AppError::rejected(other.status(), other.body_text()),
            })?;

        body.validate().map(ValidJson).map_err(AppError::from)
    }
}
