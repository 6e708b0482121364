//! HTTP binding for the dispatcher.
//!
//! Every path is served by the same handler, so the endpoint works both at
//! `/` and behind a prefix such as `/api`.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use gateway::Gateway;
use serde::Serialize;

use crate::dispatch::{Dispatcher, Failure, Operation, Outcome, SubmitRequest};

/// Build the router for a shared dispatcher.
pub fn router<G>(dispatcher: Arc<Dispatcher<G>>) -> Router
where
    G: Gateway + 'static,
{
    Router::new()
        .fallback(handle::<G>)
        .with_state(dispatcher)
}

async fn handle<G>(
    State(dispatcher): State<Arc<Dispatcher<G>>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response
where
    G: Gateway + 'static,
{
    let response = match method {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::GET => dispatcher.dispatch(Operation::Probe).await.into_response(),
        Method::POST => match read_body(body).and_then(|body| SubmitRequest::from_body(&body)) {
            Ok(request) => dispatcher
                .dispatch(Operation::Submit(request))
                .await
                .into_response(),
            Err(failure) => failure.into_response(),
        },
        _ => Failure::MethodNotAllowed.into_response(),
    };
    with_cors(response)
}

/// Unreadable bodies (over the size limit, broken stream) are caller errors.
fn read_body(body: Result<Bytes, BytesRejection>) -> Result<Bytes, Failure> {
    body.map_err(|rejection| {
        Failure::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    })
}

/// Attach the cross-origin headers every response carries.
fn with_cors(mut response: Response<Body>) -> Response<Body> {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

#[derive(Serialize)]
struct FailureBody<'a> {
    success: bool,
    error: &'a str,
}

#[derive(Serialize)]
struct MethodNotAllowedBody<'a> {
    error: &'a str,
}

impl Failure {
    pub fn status(&self) -> StatusCode {
        match self {
            Failure::BadRequest(_) => StatusCode::BAD_REQUEST,
            Failure::ServerMisconfiguration(_) | Failure::UpstreamError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Failure::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        match self {
            Failure::MethodNotAllowed => {
                (status, Json(MethodNotAllowedBody { error: &message })).into_response()
            }
            _ => (
                status,
                Json(FailureBody {
                    success: false,
                    error: &message,
                }),
            )
                .into_response(),
        }
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Probed(report) => (StatusCode::OK, Json(report)).into_response(),
            Outcome::Generated(generated) => (StatusCode::OK, Json(generated)).into_response(),
            Outcome::Failed(failure) => failure.into_response(),
        }
    }
}
