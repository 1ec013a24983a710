use crate::core::engine::CardEngine;
use crate::domain::ports::{Clock, ServerSettings};
use crate::utils::error::{AppError, CardError, Result};
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as CorsAny, CorsLayer};
use tower_http::trace::TraceLayer;

pub const VALIDATE_PATH: &str = "/api/validate";
pub const HEALTH_PATH: &str = "/api/health";

const CARD_NUMBER_FIELD: &str = "cardNumber";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for CardError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.is_client_error() {
            tracing::warn!("Rejected validation request: {}", self);
        } else {
            tracing::error!("Validation request failed: {}", self);
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// What a request body says about `cardNumber`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardNumberField {
    /// No usable body, or the key is not there.
    Missing,
    /// The key is there with a `null` value.
    Absent,
    Present(String),
}

/// Pulls `cardNumber` out of a request body.
///
/// An empty or unparsable body, a non-object and a missing key all count as
/// [`CardNumberField::Missing`]. A value of a non-string type other than
/// `null` is an internal error.
pub fn extract_card_number(body: &[u8]) -> std::result::Result<CardNumberField, CardError> {
    let payload: Value = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::debug!("Request body is not JSON: {}", e);
            return Ok(CardNumberField::Missing);
        }
    };

    match payload.get(CARD_NUMBER_FIELD) {
        None => Ok(CardNumberField::Missing),
        Some(Value::Null) => Ok(CardNumberField::Absent),
        Some(Value::String(number)) => Ok(CardNumberField::Present(number.clone())),
        Some(other) => Err(CardError::internal(format!(
            "{} must be a string, got {}",
            CARD_NUMBER_FIELD,
            json_type_name(other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Body that could not be read, e.g. over the size limit, in the same
/// `{"error": ...}` shape as every other failure.
fn rejection_response(rejection: BytesRejection) -> Response {
    tracing::warn!("Rejected request body: {}", rejection.body_text());
    (
        rejection.status(),
        Json(ErrorBody {
            error: rejection.body_text(),
        }),
    )
        .into_response()
}

async fn validate_card<C: Clock + 'static>(
    State(engine): State<Arc<CardEngine<C>>>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };

    let result = match extract_card_number(&body) {
        Ok(CardNumberField::Missing) => Err(CardError::MissingInput),
        Ok(CardNumberField::Absent) => engine.validate(None),
        Ok(CardNumberField::Present(number)) => engine.validate(Some(&number)),
        Err(e) => Err(e),
    };

    match result {
        Ok(details) => Json(details).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn health_check<C: Clock + 'static>(State(engine): State<Arc<CardEngine<C>>>) -> Response {
    Json(engine.health()).into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unexpected failure".to_string()
    };

    CardError::internal(message).into_response()
}

/// CORS policy: any origin unless an explicit list is configured.
pub fn cors_layer(settings: &dyn ServerSettings) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods(CorsAny)
        .allow_headers(CorsAny);

    if settings.allows_any_origin() {
        return Ok(layer.allow_origin(CorsAny));
    }

    let origins = settings
        .allowed_origins()
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| AppError::InvalidConfigValueError {
                field: "cors.allowed_origins".to_string(),
                value: origin.clone(),
                reason: format!("Not a valid header value: {}", e),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

pub fn router<C: Clock + 'static>(engine: Arc<CardEngine<C>>, cors: CorsLayer) -> Router {
    Router::new()
        .route(VALIDATE_PATH, post(validate_card::<C>))
        .route(HEALTH_PATH, get(health_check::<C>))
        .with_state(engine)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn bind(settings: &dyn ServerSettings) -> Result<TcpListener> {
    let address = settings.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| AppError::BindError {
            address: address.clone(),
            source,
        })?;

    tracing::info!("🚀 Listening on http://{}", listener.local_addr()?);
    Ok(listener)
}

/// Serves `app` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use tower::ServiceExt;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn test_router() -> Router {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap());
        router(
            Arc::new(CardEngine::new(clock)),
            CorsLayer::new().allow_origin(CorsAny),
        )
    }

    #[test]
    fn test_extract_card_number() {
        assert_eq!(
            extract_card_number(br#"{"cardNumber": "4111 1111 1111 1111"}"#),
            Ok(CardNumberField::Present("4111 1111 1111 1111".to_string()))
        );
        assert_eq!(
            extract_card_number(br#"{"cardNumber": ""}"#),
            Ok(CardNumberField::Present(String::new()))
        );
    }

    #[test]
    fn test_extract_card_number_null() {
        assert_eq!(
            extract_card_number(br#"{"cardNumber": null}"#),
            Ok(CardNumberField::Absent)
        );
    }

    #[test]
    fn test_extract_card_number_missing() {
        assert_eq!(extract_card_number(b""), Ok(CardNumberField::Missing));
        assert_eq!(extract_card_number(b"not json"), Ok(CardNumberField::Missing));
        assert_eq!(extract_card_number(b"{}"), Ok(CardNumberField::Missing));
        assert_eq!(extract_card_number(b"[]"), Ok(CardNumberField::Missing));
        assert_eq!(
            extract_card_number(br#"{"number": "4111"}"#),
            Ok(CardNumberField::Missing)
        );
    }

    #[test]
    fn test_extract_card_number_wrong_type() {
        let err = extract_card_number(br#"{"cardNumber": 4111111111111111}"#).unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert_eq!(
            err.to_string(),
            "An error occurred: cardNumber must be a string, got number"
        );
    }

    #[tokio::test]
    async fn test_panic_maps_to_internal_error() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "An error occurred: boom" })
        );

        let response = handle_panic(Box::new(String::from("clock went backwards")));
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "An error occurred: clock went backwards" })
        );
    }

    #[tokio::test]
    async fn test_oversized_body_gets_json_error() {
        let request = Request::builder()
            .method("POST")
            .uri(VALIDATE_PATH)
            .header("content-type", "application/json")
            .body(Body::from(vec![b'1'; 3 * 1024 * 1024]))
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = body_json(response).await;
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_null_card_number_fails_format_check() {
        let request = Request::builder()
            .method("POST")
            .uri(VALIDATE_PATH)
            .header("content-type", "application/json")
            .body(Body::from(r#"{"cardNumber": null}"#))
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Card number must contain only digits" })
        );
    }
}
