//! API handlers for the book catalog REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header::CONTENT_TYPE, request::Parts},
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// JSON body extractor whose rejections are reported as `AppError`
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.headers().contains_key(CONTENT_TYPE) {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            return Ok(JsonBody(value));
        }

        // A body sent without any content type is still read as JSON
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(JsonBody(value))
    }
}

/// Query string extractor whose rejections are reported as `AppError`.
///
/// Parameters are deserialized as strings; a repeated key keeps its last value.
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state).await?;
        let params: Map<String, Value> = pairs
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        let value = serde_json::from_value(Value::Object(params))
            .map_err(|e| AppError::Validation(format!("Invalid query parameters: {}", e)))?;
        Ok(QueryParams(value))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        .route("/", get(health::root))
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}


#[cfg(test)]
mod tests {
    use axum::{
        http::{Method, StatusCode},
        routing::get,
        Router,
    };
    use serde::Deserialize;

    use super::{test_support::send, QueryParams};

    #[derive(Deserialize)]
    struct Search {
        q: String,
    }

    fn search_app() -> Router {
        Router::new().route(
            "/search",
            get(|QueryParams(search): QueryParams<Search>| async move {
                axum::Json(serde_json::json!({ "q": search.q }))
            }),
        )
    }

    #[tokio::test]
    async fn test_query_params_last_value_wins() {
        let (status, body) = send(&search_app(), Method::GET, "/search?q=first&q=second", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["q"], "second");
    }

    #[tokio::test]
    async fn test_query_params_missing_field_is_json_error() {
        let (status, body) = send(&search_app(), Method::GET, "/search?other=1", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "BadValue");
        assert!(body["message"].as_str().unwrap().contains("Invalid query parameters"));
    }
}
