use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Template rendering error: {0}")]
    Template(#[from] tera::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self, "Request failed");

        let body = Html(
            r#"<!DOCTYPE html>
<html>
<head><title>Error 500</title></head>
<body style="font-family: Arial, sans-serif; padding: 10px;">
  <h1>Error 500</h1>
  <p>Internal server error</p>
  <a href="/">Back to the status page</a>
</body>
</html>"#,
        );

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
