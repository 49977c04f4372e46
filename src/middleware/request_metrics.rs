use axum::{extract::Request, middleware::Next, response::Response};

use crate::services::metrics::HTTP_REQUESTS_COUNTER;

/// Counts every request by method and final status code.
pub async fn count_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let response = next.run(req).await;
    HTTP_REQUESTS_COUNTER
        .with_label_values(&[method.as_str(), response.status().as_str()])
        .inc();
    response
}
