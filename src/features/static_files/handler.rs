use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{error::AppError, startup::StaticAsset, state::AppState};

fn asset_response(asset: &StaticAsset) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, asset.content_type)],
        asset.content.clone(),
    )
        .into_response()
}

/// 首页（预加载的 index 资源）
pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let asset = state.assets.get(&state.index_path).ok_or_else(|| {
        AppError::Internal(format!("Failed to load {}", state.index_path))
    })?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        asset.content.clone(),
    )
        .into_response())
}

/// 静态文件（仅匹配资源根目录下的一级路径）
pub async fn static_file(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Response, AppError> {
    state
        .assets
        .get(&file)
        .map(asset_response)
        .ok_or_else(|| AppError::NotFound("File not found".to_string()))
}

pub fn create_static_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/static/:file", get(static_file))
}
