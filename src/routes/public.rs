use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub const API_SPEC_PATH: &str = "/apispec.json";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route(API_SPEC_PATH, get(api_spec))
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": format!("API description is available at {API_SPEC_PATH}")
    }))
}

async fn api_spec() -> Json<Value> {
    Json(openapi_document())
}

fn trip_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer" },
            "destination": { "type": "string" },
            "days": { "type": "integer" },
            "price": { "type": "number" },
            "hotel": { "type": "string" },
            "rating": { "type": "number" }
        }
    })
}

fn trip_input_schema(required: bool) -> Value {
    let mut schema = json!({
        "type": "object",
        "properties": {
            "destination": { "type": "string" },
            "days": { "type": "integer" },
            "price": { "type": "number" },
            "hotel": { "type": "string" },
            "rating": { "type": "number" }
        }
    });
    if required {
        schema["required"] = json!(["destination", "days", "price", "hotel", "rating"]);
    }
    schema
}

fn field_stats_schema(bound: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "min": { "type": bound },
            "max": { "type": bound },
            "avg": { "type": "number" }
        }
    })
}

fn body_parameter(create: bool) -> Value {
    json!({
        "in": "body",
        "name": "body",
        "required": true,
        "schema": trip_input_schema(create)
    })
}

fn id_parameter(description: &str) -> Value {
    json!({
        "name": "trip_id",
        "in": "path",
        "type": "integer",
        "required": true,
        "description": description
    })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "schema": {
            "type": "object",
            "properties": { "error": { "type": "string" } }
        }
    })
}

/// Swagger 2.0 description of the trip endpoints.
pub fn openapi_document() -> Value {
    json!({
        "swagger": "2.0",
        "info": {
            "title": "Trips API",
            "version": env!("CARGO_PKG_VERSION")
        },
        "consumes": ["application/json"],
        "produces": ["application/json"],
        "paths": {
            "/trips": collection_path(),
            "/trips/{trip_id}": item_path(),
            "/trips/stats": stats_path()
        }
    })
}

fn collection_path() -> Value {
    let list = json!({
        "summary": "List all trips",
        "parameters": [
            {
                "name": "sort",
                "in": "query",
                "type": "string",
                "required": false,
                "enum": ["id", "destination", "days", "price", "hotel", "rating"],
                "description": "Field to sort by"
            },
            {
                "name": "order",
                "in": "query",
                "type": "string",
                "required": false,
                "enum": ["asc", "desc"],
                "description": "Sort order, ascending unless desc"
            }
        ],
        "responses": {
            "200": {
                "description": "Trips",
                "schema": { "type": "array", "items": trip_schema() }
            }
        }
    });
    let create = json!({
        "summary": "Create a trip",
        "parameters": [body_parameter(true)],
        "responses": {
            "201": { "description": "Trip created", "schema": trip_schema() },
            "400": error_response("Malformed JSON or missing field")
        }
    });
    json!({ "get": list, "post": create })
}

fn item_path() -> Value {
    let fetch = json!({
        "summary": "Get a trip by id",
        "parameters": [id_parameter("Trip id")],
        "responses": {
            "200": { "description": "Trip", "schema": trip_schema() },
            "404": error_response("Trip not found")
        }
    });
    let update = json!({
        "summary": "Update a trip by id",
        "parameters": [id_parameter("Id of the trip to update"), body_parameter(false)],
        "responses": {
            "200": { "description": "Trip updated", "schema": trip_schema() },
            "400": error_response("Malformed JSON"),
            "404": error_response("Trip not found")
        }
    });
    let message = json!({
        "type": "object",
        "properties": { "message": { "type": "string" } }
    });
    let delete = json!({
        "summary": "Delete a trip by id",
        "parameters": [id_parameter("Id of the trip to delete")],
        "responses": {
            "200": { "description": "Trip deleted", "schema": message },
            "404": error_response("Trip not found")
        }
    });
    json!({ "get": fetch, "put": update, "delete": delete })
}

fn stats_path() -> Value {
    let schema = json!({
        "type": "object",
        "properties": {
            "days": field_stats_schema("integer"),
            "price": field_stats_schema("number"),
            "rating": field_stats_schema("number")
        }
    });
    json!({
        "get": {
            "summary": "Minimum, maximum and average of the numeric fields",
            "responses": {
                "200": { "description": "Statistics", "schema": schema },
                "400": error_response("No data")
            }
        }
    })
}
