pub mod error;
pub mod models;
pub mod routes;
pub mod service;
pub mod validation;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::Router;
use shelf_db::JsonFileStore;
use shelf_kernel::{settings::StorageSettings, InitCtx, Module};

use service::BookService;

/// Books module: the CRUD resource over the collection document
pub struct BooksModule {
    service: Arc<BookService>,
}

impl BooksModule {
    pub fn new(storage: &StorageSettings) -> Self {
        let store = JsonFileStore::new(storage.data_file.clone());
        Self {
            service: Arc::new(BookService::new(store)),
        }
    }

    pub fn service(&self) -> &Arc<BookService> {
        &self.service
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let storage = &ctx.settings.storage;
        let count = self
            .service
            .prepare(storage.create_if_missing)
            .with_context(|| {
                format!(
                    "book collection at {} is not usable",
                    self.service.store().path().display()
                )
            })?;

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            path = %self.service.store().path().display(),
            books = count,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(storage: &StorageSettings) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(storage))
}

fn fail_response(description: &str) -> serde_json::Value {
    serde_json::json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/FailEnvelope" }
            }
        }
    })
}

fn success_response(description: &str, data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": {
                        "status": { "type": "string", "enum": ["success"] },
                        "message": { "type": "string" },
                        "data": data
                    },
                    "required": ["status"]
                }
            }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let id_param = serde_json::json!([{
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    }]);
    let payload_body = serde_json::json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookPayload" }
            }
        }
    });
    let book_data = serde_json::json!({
        "type": "object",
        "properties": { "book": { "$ref": "#/components/schemas/Book" } }
    });

    serde_json::json!({
        "paths": {
            "/books": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "responses": {
                        "200": success_response("Summaries of every book", serde_json::json!({
                            "type": "object",
                            "properties": {
                                "books": {
                                    "type": "array",
                                    "items": { "$ref": "#/components/schemas/BookSummary" }
                                }
                            }
                        })),
                        "500": fail_response("Storage failure")
                    }
                },
                "post": {
                    "summary": "Add a book",
                    "tags": ["Books"],
                    "requestBody": payload_body.clone(),
                    "responses": {
                        "200": success_response("Book added", serde_json::json!({
                            "type": "object",
                            "properties": { "bookId": { "type": "string" } }
                        })),
                        "400": fail_response("Missing title, readPage above pageCount, or malformed body"),
                        "500": fail_response("Storage failure")
                    }
                }
            },
            "/books/{id}": {
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "parameters": id_param.clone(),
                    "responses": {
                        "200": success_response("The book", book_data.clone()),
                        "404": fail_response("Book not found")
                    }
                },
                "put": {
                    "summary": "Update a book",
                    "tags": ["Books"],
                    "parameters": id_param.clone(),
                    "requestBody": payload_body,
                    "responses": {
                        "200": success_response("Updated book", book_data),
                        "400": fail_response("Invalid merged values or malformed body"),
                        "404": fail_response("Book not found"),
                        "500": fail_response("Storage failure")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": id_param,
                    "responses": {
                        "200": success_response("Book deleted", serde_json::json!({})),
                        "404": fail_response("Book not found"),
                        "500": fail_response("Storage failure")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "additionalProperties": true,
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "publisher": { "type": "string" },
                        "pageCount": { "type": "integer", "minimum": 0 },
                        "readPage": { "type": "integer", "minimum": 0 },
                        "finished": { "type": "boolean" },
                        "insertedAt": { "type": "string", "format": "date-time" },
                        "updatedAt": { "type": "string", "format": "date-time" }
                    },
                    "required": ["id", "name", "pageCount", "readPage", "finished", "insertedAt", "updatedAt"]
                },
                "BookPayload": {
                    "type": "object",
                    "additionalProperties": true,
                    "properties": {
                        "name": { "type": "string" },
                        "publisher": { "type": "string" },
                        "pageCount": { "type": "integer", "minimum": 0 },
                        "readPage": { "type": "integer", "minimum": 0 }
                    }
                },
                "BookSummary": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "publisher": { "type": "string" }
                    },
                    "required": ["id", "name"]
                }
            }
        }
    })
}
