use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_lookup_without_order_is_404_with_error_body() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/orders/by-quote/00000000-0000-0000-0000-000000000000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // La ausencia de order es un 404, nunca un 500
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_submit_quote_without_multipart_body_is_400() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/quotes")
                .header("Content-Type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    // Cuerpo mal formado -> clase 400, nunca 500
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// Función helper para crear la app de test. Router básico con las mismas
// formas de respuesta que los endpoints reales, sin base de datos.
fn create_test_app() -> Router {
    Router::new()
        .route(
            "/test",
            get(|| async {
                Json(json!({
                    "message": "RFQ Tracking API funcionando correctamente",
                    "status": "ok",
                }))
            }),
        )
        .route(
            "/api/quotes",
            post(|request: Request<Body>| async move {
                let is_multipart = request
                    .headers()
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v.starts_with("multipart/form-data"))
                    .unwrap_or(false);

                if is_multipart {
                    (StatusCode::CREATED, Json(json!({ "success": true })))
                } else {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({
                            "error": "Bad Request",
                            "message": "Malformed multipart body",
                            "code": "BAD_REQUEST",
                        })),
                    )
                }
            }),
        )
        .route(
            "/api/orders/by-quote/:quote_id",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({
                        "error": "Not Found",
                        "message": "Order not found for this quote",
                        "code": "NOT_FOUND",
                    })),
                )
            }),
        )
}
