use std::process::{ExitCode, Termination};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::{AttachmentKind, FrameKind, Report};
use serde_json::json;

use kernel::KernelError;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl ErrorStatus {
    /// Most recent printable attachment above the current context,
    /// falling back to the context's own description.
    fn message(&self) -> String {
        self.0
            .frames()
            .take_while(|frame| !matches!(frame.kind(), FrameKind::Context(_)))
            .find_map(|frame| match frame.kind() {
                FrameKind::Attachment(AttachmentKind::Printable(printable)) => {
                    Some(printable.to_string())
                }
                _ => None,
            })
            .unwrap_or_else(|| self.0.current_context().to_string())
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0.current_context() {
            KernelError::Validation => StatusCode::BAD_REQUEST,
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Conflict => StatusCode::CONFLICT,
            KernelError::Unauthenticated => StatusCode::UNAUTHORIZED,
            KernelError::Forbidden => StatusCode::FORBIDDEN,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("{:?}", self.0);
            "Internal server error".to_string()
        } else {
            tracing::debug!(%status, "{:?}", self.0);
            self.message()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;
    use serde_json::Value;

    use kernel::KernelError;

    use super::ErrorStatus;

    async fn render(report: Report<KernelError>) -> (StatusCode, Value) {
        let response = ErrorStatus::from(report).into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn maps_kinds_to_status() {
        let cases = [
            (KernelError::Validation, StatusCode::BAD_REQUEST),
            (KernelError::NotFound, StatusCode::NOT_FOUND),
            (KernelError::Conflict, StatusCode::CONFLICT),
            (KernelError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (KernelError::Forbidden, StatusCode::FORBIDDEN),
            (KernelError::Timeout, StatusCode::REQUEST_TIMEOUT),
            (KernelError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (kind, expected) in cases {
            let (status, _) = render(Report::new(kind)).await;
            assert_eq!(status, expected);
        }
    }

    #[tokio::test]
    async fn body_carries_latest_message() {
        let report = Report::new(KernelError::Validation)
            .attach_printable("title is required")
            .attach_printable(format!("rating must be between {} and {}", 1, 5));
        let (_, body) = render(report).await;
        assert_eq!(body["error"], "rating must be between 1 and 5");

        let (_, body) = render(Report::new(KernelError::NotFound)).await;
        assert_eq!(body["error"], KernelError::NotFound.to_string());
    }

    #[tokio::test]
    async fn ignores_messages_below_a_context_change() {
        let report = Report::new(KernelError::Validation)
            .attach_printable("email is invalid")
            .change_context(KernelError::Unauthenticated);
        let (status, body) = render(report).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], KernelError::Unauthenticated.to_string());
    }

    #[tokio::test]
    async fn hides_internal_details() {
        let report = Report::new(KernelError::Internal).attach_printable("connection refused");
        let (_, body) = render(report).await;
        assert_eq!(body["error"], "Internal server error");
    }
}
