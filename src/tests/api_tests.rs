#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        middleware::from_fn,
        routing::get,
        Json, Router,
    };
    use http_body_util::BodyExt; // for .collect()
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::error::{AppError, AppResult};
    use crate::middleware::api::{json_unauthorized, require_json, ApiResponse};

    async fn echo() -> ApiResponse<Value> {
        ApiResponse(json!({ "value": 42 }))
    }

    async fn conflict() -> AppResult<ApiResponse<Value>> {
        Err(AppError::api(StatusCode::CONFLICT, "entry exists"))
    }

    async fn bad_value() -> AppResult<ApiResponse<Value>> {
        Err(AppError::BadRequest("value out of range".to_string()))
    }

    fn api_router() -> Router {
        Router::new()
            .route("/echo", get(echo).post(echo))
            .route("/conflict", get(conflict))
            .route("/bad", get(bad_value))
            .layer(from_fn(require_json))
    }

    async fn body_json(res: axum::response::Response) -> Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_get_wraps_data_in_ok_envelope() {
        let res = api_router()
            .oneshot(Request::builder().uri("/echo").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["data"]["value"], 42);
    }

    #[tokio::test]
    async fn test_post_without_json_body_is_rejected() {
        let res = api_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/echo")
                    .header(header::CONTENT_TYPE, "text/plain")
                    .body(Body::from("hello"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["reason"], "Not in JSON format");
    }

    #[tokio::test]
    async fn test_post_with_non_object_json_is_rejected() {
        let res = api_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/echo")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("[1, 2, 3]"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_post_with_json_object_passes_through() {
        let res = api_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/echo")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name": "test"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_explicit_api_error_passes_status_and_reason() {
        let res = api_router()
            .oneshot(Request::builder().uri("/conflict").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body = body_json(res).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["reason"], "entry exists");
    }

    #[tokio::test]
    async fn test_bad_request_maps_to_400_envelope() {
        let res = api_router()
            .oneshot(Request::builder().uri("/bad").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["reason"], "Bad Request: value out of range");
    }

    #[tokio::test]
    async fn test_plain_401_is_rewritten_to_envelope() {
        let router = Router::new()
            .route("/denied", get(|| async { StatusCode::UNAUTHORIZED }))
            .layer(from_fn(json_unauthorized));
        let res = router
            .oneshot(Request::builder().uri("/denied").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(res).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["reason"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_json_401_passes_verbatim() {
        let router = Router::new()
            .route(
                "/denied",
                get(|| async {
                    (StatusCode::UNAUTHORIZED, Json(json!({ "custom": true })))
                }),
            )
            .layer(from_fn(json_unauthorized));
        let res = router
            .oneshot(Request::builder().uri("/denied").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(res).await;
        assert_eq!(body["custom"], true);
    }

    #[tokio::test]
    async fn test_non_401_untouched_by_rewrite_layer() {
        let router = Router::new()
            .route("/teapot", get(|| async { StatusCode::IM_A_TEAPOT }))
            .layer(from_fn(json_unauthorized));
        let res = router
            .oneshot(Request::builder().uri("/teapot").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::IM_A_TEAPOT);
    }
}
