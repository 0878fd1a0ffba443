//! Project-specific utilities live here.

use serde_json::{json, Value};

fn envelope_ref(description: &str, schema: &str) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": { "$ref": format!("#/components/schemas/{schema}") } } }
    })
}

fn error_ref(description: &str) -> Value {
    envelope_ref(description, "ErrorResponse")
}

fn id_parameter() -> Value {
    json!([{ "name": "id", "in": "path", "required": true, "schema": { "type": "integer", "format": "int64" } }])
}

/// OpenAPI fragment for the five CRUD routes every entity module exposes.
///
/// `entity` is the schema of a stored record, `request` the schema of the
/// save/update body; both are added to the fragment alongside the
/// `{entity}Envelope` wrapper.
pub fn crud_openapi(tag: &str, entity: &str, entity_schema: Value, request: &str, request_schema: Value) -> Value {
    let envelope = format!("{entity}Envelope");
    let body = json!({
        "required": true,
        "content": { "application/json": { "schema": { "$ref": format!("#/components/schemas/{request}") } } }
    });

    json!({
        "paths": {
            "/findAll": {
                "get": {
                    "summary": format!("Page through {tag}"),
                    "tags": [tag],
                    "parameters": [
                        { "name": "page", "in": "query", "schema": { "type": "integer", "default": 0 } },
                        { "name": "size", "in": "query", "schema": { "type": "integer", "default": 5 } },
                        { "name": "sort", "in": "query", "schema": { "type": "string", "default": "id,asc" } }
                    ],
                    "responses": {
                        "200": envelope_ref("Page of records with metadata", &envelope),
                        "400": error_ref("Unknown sort field or malformed query")
                    }
                }
            },
            "/find/{id}": {
                "get": {
                    "summary": format!("Find one of {tag} by id"),
                    "tags": [tag],
                    "parameters": id_parameter(),
                    "responses": {
                        "200": envelope_ref("Single-record list", &envelope),
                        "404": error_ref("No record with this id"),
                        "500": error_ref("Identifier is not numeric")
                    }
                }
            },
            "/save": {
                "post": {
                    "summary": format!("Create one of {tag}"),
                    "tags": [tag],
                    "requestBody": body.clone(),
                    "responses": {
                        "201": envelope_ref("Created record", &envelope),
                        "400": error_ref("Validation failed"),
                        "409": error_ref("Record already exists")
                    }
                }
            },
            "/update/{id}": {
                "put": {
                    "summary": format!("Replace one of {tag}"),
                    "tags": [tag],
                    "parameters": id_parameter(),
                    "requestBody": body,
                    "responses": {
                        "200": envelope_ref("Updated record", &envelope),
                        "400": error_ref("Validation failed"),
                        "404": error_ref("No record with this id"),
                        "409": error_ref("Unique key held by another record")
                    }
                }
            },
            "/delete/{id}": {
                "delete": {
                    "summary": format!("Delete one of {tag}"),
                    "tags": [tag],
                    "parameters": id_parameter(),
                    "responses": {
                        "200": envelope_ref("Deleted", &envelope),
                        "404": error_ref("No record with this id")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                entity: entity_schema,
                request: request_schema,
                envelope.clone(): {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" },
                        "data": { "type": "array", "items": { "$ref": format!("#/components/schemas/{entity}") } },
                        "metadata": { "$ref": "#/components/schemas/PageMetadata" }
                    },
                    "required": ["message"]
                }
            }
        }
    })
}
