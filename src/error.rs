use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::features::qrcode::color::ColorError;

/// 应用统一错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 缺少必需参数
    #[error("{0} parameter is required")]
    MissingParameter(&'static str),

    /// 参数编码无效（base64 解码失败或解码结果非 UTF-8）
    #[error("invalid {0} parameter")]
    InvalidEncoding(&'static str),

    /// 尺寸参数非法（非整数或超出 [1, max]）
    #[error("invalid size parameter (max {max})")]
    InvalidSize { max: u32 },

    /// 颜色参数非法
    #[error(transparent)]
    InvalidColor(#[from] ColorError),

    /// 二维码生成或 PNG 编码失败
    #[error("{0}")]
    EncodingFailure(String),

    /// 资源不存在
    #[error("{0}")]
    NotFound(String),

    /// 内部服务器错误
    #[error("{0}")]
    Internal(String),
}

/// 错误响应体：`error` 字段为人类可读信息，`code` 为稳定的错误码。
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// 错误描述
    #[schema(example = "invalid size parameter (max 2048)")]
    pub error: String,

    /// 稳定的错误码，用于程序化处理。
    #[schema(example = "INVALID_SIZE")]
    pub code: String,

    /// 可选：请求追踪 ID（由 request-id 中间件注入）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameter(_)
            | AppError::InvalidEncoding(_)
            | AppError::InvalidSize { .. }
            | AppError::InvalidColor(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::EncodingFailure(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn stable_code(&self) -> &'static str {
        match self {
            AppError::MissingParameter(_) => "MISSING_PARAMETER",
            AppError::InvalidEncoding(_) => "INVALID_ENCODING",
            AppError::InvalidSize { .. } => "INVALID_SIZE",
            AppError::InvalidColor(_) => "INVALID_COLOR",
            AppError::EncodingFailure(_) => "ENCODING_FAILURE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::warn!(code = self.stable_code(), "请求处理失败: {}", self);
        }

        let body = ErrorBody {
            error: self.to_string(),
            code: self.stable_code().to_string(),
            request_id: crate::request_id::current_request_id(),
        };

        (status, Json(body)).into_response()
    }
}
