use crate::routes::index_route::unprocessable_body;
use crate::utils::error::AppError;
use indexmap::IndexMap;
use okapi::openapi3::SchemaObject;
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::RefOr;
use rocket_okapi::okapi::openapi3::{MediaType, Response, Responses};
use rocket_okapi::response::OpenApiResponderInner;
use rocket::http::Status;
use serde_json::Value;

// Document every error status a route can answer with, using the real
// error bodies as examples
impl OpenApiResponderInner for AppError {
    fn responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        let mut responses = Responses::default();

        let mut error_responses: Vec<(&str, u16, Value)> = [
            ("Bad Request", AppError::invalid_field("name", "Name must be between 2 and 50 characters")),
            ("Not Found", AppError::NotFound("Hotel not found".to_string())),
            ("Conflict", AppError::Conflict("Room number already exists in this hotel".to_string())),
            ("Internal Server Error", AppError::DatabaseError("connection refused".to_string())),
        ]
        .into_iter()
        .map(|(description, error)| (description, error.status().code, error.body()))
        .collect();

        // Bodies that do not deserialize are answered by the 422 catcher
        error_responses.push((
            "Unprocessable Entity",
            Status::UnprocessableEntity.code,
            unprocessable_body(),
        ));

        for (description, code, body) in error_responses {
            responses.responses.insert(
                code.to_string(),
                RefOr::Object(Response {
                    description: description.to_string(),
                    content: {
                        let mut content = IndexMap::new();
                        content.insert(
                            "application/json".to_string(),
                            MediaType {
                                schema: Some(SchemaObject::default()),
                                example: Some(body),
                                ..Default::default()
                            },
                        );
                        content
                    },
                    ..Default::default()
                }),
            );
        }

        Ok(responses)
    }
}
