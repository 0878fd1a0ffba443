//! Router builder for the Shelf HTTP server

use anyhow::Context;
use axum::{
    extract::Request,
    http::{HeaderValue, Method},
    routing::get,
    Extension, Router,
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use uuid::{Timestamp, Uuid};

use shelf_kernel::{settings::PaginationSettings, ModuleRegistry};

/// Prefix every module is mounted under.
pub const API_PREFIX: &str = "/api/v1";

/// Time-ordered request id generator
#[derive(Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}

/// Builder for constructing the main HTTP router.
///
/// Layers wrap the routes present when they are added, so mount routes first.
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Mount a module's router under `/api/v1/{module_name}`
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        let api_path = format!("{}/{}", API_PREFIX, module_name);
        self.router = self.router.nest(&api_path, module_router);
        self
    }

    /// Make page-size limits visible to the `Pageable` extractor
    pub fn with_pagination(mut self, limits: PaginationSettings) -> Self {
        self.router = self.router.layer(Extension(limits));
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// Add CORS middleware; `None` allows any origin
    pub fn with_cors(mut self, origin: Option<&str>) -> anyhow::Result<Self> {
        let allow_origin = match origin {
            Some(origin) => AllowOrigin::exact(
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("invalid CORS origin '{}'", origin))?,
            ),
            None => AllowOrigin::any(),
        };

        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(allow_origin)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers(Any),
        );
        Ok(self)
    }

    /// Add request ID middleware; the id is echoed back as `x-request-id`
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
        self
    }

    /// Add timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::new(Duration::from_millis(timeout_ms)));
        self
    }

    /// Add OpenAPI documentation by collecting specs from all modules
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        let mut openapi_spec = serde_json::json!({
            "openapi": "3.1.0",
            "info": {
                "title": "Shelf API",
                "version": env!("CARGO_PKG_VERSION"),
                "description": "Author and book catalogue"
            },
            "paths": {},
            "components": {
                "schemas": {}
            }
        });

        openapi_spec["components"]["schemas"]["PageMetadata"] = serde_json::json!({
            "type": "object",
            "properties": {
                "pageNumber": { "type": "integer" },
                "pageSize": { "type": "integer" },
                "numberOfElements": { "type": "integer" },
                "totalPages": { "type": "integer" },
                "totalElements": { "type": "integer" }
            },
            "required": ["pageNumber", "pageSize", "numberOfElements", "totalPages", "totalElements"]
        });

        openapi_spec["components"]["schemas"]["ErrorResponse"] = serde_json::json!({
            "type": "object",
            "properties": {
                "error": { "type": "string" },
                "data": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "field": { "type": "string" },
                            "message": { "type": "string" }
                        }
                    }
                }
            },
            "required": ["error"]
        });

        openapi_spec["paths"]["/healthz"] = serde_json::json!({
            "get": {
                "summary": "Health check",
                "responses": {
                    "200": {
                        "description": "OK",
                        "content": {
                            "text/plain": {
                                "schema": {
                                    "type": "string"
                                }
                            }
                        }
                    }
                }
            }
        });

        for module in registry.modules() {
            let Some(module_spec) = module.openapi() else {
                continue;
            };

            if let Some(paths) = module_spec.get("paths").and_then(|p| p.as_object()) {
                for (path, path_item) in paths {
                    let prefixed_path = format!("{}/{}{}", API_PREFIX, module.name(), path);
                    openapi_spec["paths"][prefixed_path] = path_item.clone();
                }
            }

            if let Some(schemas) = module_spec
                .get("components")
                .and_then(|c| c.get("schemas"))
                .and_then(|s| s.as_object())
            {
                for (schema_name, schema_def) in schemas {
                    openapi_spec["components"]["schemas"][schema_name] = schema_def.clone();
                }
            }
        }

        // SwaggerUI needs a typed document; fall back to a bare one if the merge is off-schema
        let openapi_obj: utoipa::openapi::OpenApi = serde_json::from_value(openapi_spec.clone())
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "merged OpenAPI document is not valid, serving a bare one");
                utoipa::openapi::OpenApiBuilder::new()
                    .info(
                        utoipa::openapi::InfoBuilder::new()
                            .title("Shelf API")
                            .version(env!("CARGO_PKG_VERSION"))
                            .build(),
                    )
                    .build()
            });

        self.router = self.router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi_obj),
        );

        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(openapi_spec.clone()) }),
        );

        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
