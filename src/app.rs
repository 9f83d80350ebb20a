use axum::Router;
use axum::http::Request;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features::{health, qrcode, static_files};
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub fn compression_predicate() -> impl tower_http::compression::predicate::Predicate {
    use tower_http::compression::predicate::{NotForContentType, Predicate, SizeAbove};

    // 二维码 PNG 本身已压缩，仅对 HTML/CSS/JS/JSON 等文本响应启用压缩
    SizeAbove::default()
        .and(NotForContentType::GRPC)
        .and(NotForContentType::IMAGES)
        .and(NotForContentType::SSE)
        .and(NotForContentType::const_new("application/octet-stream"))
}

/// 组装完整路由：业务接口、静态资源、文档与全局中间件
pub fn build_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .merge(health::create_health_router())
        .merge(qrcode::create_qrcode_router())
        .merge(static_files::create_static_router())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new().compress_when(compression_predicate()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(axum::middleware::from_fn(
            crate::request_id::request_id_middleware,
        ))
}

#[cfg(test)]
mod compression_predicate_tests {
    use super::compression_predicate;
    use axum::body::Body;
    use axum::http::{Response as HttpResponse, header};
    use tower_http::compression::predicate::Predicate;

    fn should_compress_for(ct: &str) -> bool {
        // 命中 SizeAbove（默认 32B），避免因为 body 太小导致测试不稳定。
        let body_bytes = vec![b'x'; 2048];
        let resp = HttpResponse::builder()
            .header(header::CONTENT_TYPE, ct)
            .body(Body::from(body_bytes))
            .unwrap();
        compression_predicate().should_compress(&resp)
    }

    #[test]
    fn png_responses_are_not_compressed() {
        assert!(!should_compress_for("image/png"));
        assert!(!should_compress_for("image/jpeg"));
    }

    #[test]
    fn text_assets_are_compressed() {
        assert!(should_compress_for("text/html; charset=utf-8"));
        assert!(should_compress_for("text/css; charset=utf-8"));
        assert!(should_compress_for("application/javascript; charset=utf-8"));
        assert!(should_compress_for("application/json"));
    }

    #[test]
    fn octet_stream_is_not_compressed() {
        assert!(!should_compress_for("application/octet-stream"));
    }
}
