use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, Uri, header},
    response::IntoResponse,
    routing::get,
};
use std::time::Instant;

use crate::{
    error::{AppError, ErrorBody},
    state::AppState,
};

use super::models::GenerateQuery;
use super::params::resolve_request;
use super::service::generate_png;

#[utoipa::path(
    get,
    path = "/api/generate",
    summary = "生成二维码 PNG",
    description = "将 URL-safe base64 编码的文本生成二维码图片。可指定纠错等级、边长与前景色，背景固定为白色。",
    params(GenerateQuery),
    responses(
        (status = 200, description = "PNG 图片字节（image/png）"),
        (status = 400, description = "参数校验失败", body = ErrorBody),
        (status = 500, description = "二维码生成或编码失败", body = ErrorBody)
    ),
    tag = "QRCode"
)]
pub async fn generate_qrcode(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<impl IntoResponse, AppError> {
    let t_total = Instant::now();
    // 按键值对解析，重复参数取第一次出现的值
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&uri)
        .map_err(|_| AppError::InvalidEncoding("query"))?;
    let q = GenerateQuery::from_pairs(pairs);
    let req = resolve_request(&q, &state.generate)?;

    // CPU 密集：放到阻塞线程池，避免占用异步 worker
    let encoder = state.encoder.clone();
    let image = tokio::task::spawn_blocking(move || generate_png(encoder.as_ref(), &req))
        .await
        .map_err(|e| AppError::Internal(format!("二维码生成任务异常: {e}")))??;

    tracing::debug!(
        target: "qr_backend::generate",
        "二维码请求完成，耗时: {}ms",
        t_total.elapsed().as_millis()
    );

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, image.content_type)],
        image.bytes,
    ))
}

pub fn create_qrcode_router() -> Router<AppState> {
    Router::new().route("/api/generate", get(generate_qrcode))
}
