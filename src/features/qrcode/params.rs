use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;

use crate::config::GenerateConfig;
use crate::error::AppError;

use super::color::parse_hex_color;
use super::models::{EcLevel, GenerateQuery, GenerationRequest, Rgb8};

/// 未传 color 时使用的前景色
const DEFAULT_COLOR: &str = "000000";

/// 将原始查询参数解析为校验完成的 [`GenerationRequest`]。
///
/// 校验顺序：url -> size -> color；level 不会失败。
pub fn resolve_request(
    query: &GenerateQuery,
    limits: &GenerateConfig,
) -> Result<GenerationRequest, AppError> {
    let encoded = query
        .url
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(AppError::MissingParameter("url"))?;
    let text = decode_text(encoded)?;

    let level = query
        .level
        .as_deref()
        .map(EcLevel::from_letter)
        .unwrap_or_default();

    let size = match query.size.as_deref() {
        Some(raw) => parse_size(raw, limits.effective_max_size())?,
        None => limits.effective_default_size(),
    };

    let foreground = parse_hex_color(query.color.as_deref().unwrap_or(DEFAULT_COLOR))?;

    Ok(GenerationRequest {
        text,
        level,
        size,
        foreground,
        background: Rgb8::WHITE,
    })
}

/// URL-safe base64（要求规范填充）解码为 UTF-8 文本
fn decode_text(encoded: &str) -> Result<String, AppError> {
    let bytes = URL_SAFE
        .decode(encoded)
        .map_err(|_| AppError::InvalidEncoding("url"))?;
    let text = String::from_utf8(bytes).map_err(|_| AppError::InvalidEncoding("url"))?;
    if text.is_empty() {
        return Err(AppError::MissingParameter("url"));
    }
    Ok(text)
}

/// 解析边长：必须是 [1, max] 内的十进制整数
fn parse_size(raw: &str, max: u32) -> Result<u32, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|v| (1..=i64::from(max)).contains(v))
        .and_then(|v| u32::try_from(v).ok())
        .ok_or(AppError::InvalidSize { max })
}
