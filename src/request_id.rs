use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// 请求追踪头
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

tokio::task_local! {
    /// 当前请求绑定的 request_id，供错误响应体读取。
    static CURRENT_REQUEST_ID: String;
}

/// 获取当前请求上下文中的 request_id（不在中间件作用域内时为 None）。
pub fn current_request_id() -> Option<String> {
    CURRENT_REQUEST_ID.try_with(Clone::clone).ok()
}

/// 客户端传入值只接受 1..=128 个 `[A-Za-z0-9._-]` 字符
fn accept_client_id(raw: &str) -> Option<&str> {
    let v = raw.trim();
    let ok = !v.is_empty()
        && v.len() <= 128
        && v
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));
    ok.then_some(v)
}

fn new_request_id() -> String {
    format!("req_{}", Uuid::new_v4().simple())
}

/// request_id 中间件：
/// - 透传合法的 `X-Request-Id`，否则生成新值
/// - 在 tracing span 与 task-local 中携带，便于日志关联和错误回显
/// - 回写到响应头
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(accept_client_id)
        .map(str::to_string)
        .unwrap_or_else(new_request_id);

    let span = tracing::info_span!("request", request_id = %request_id);
    let mut res = CURRENT_REQUEST_ID
        .scope(request_id.clone(), next.run(req).instrument(span))
        .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        res.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_safe_client_ids() {
        assert_eq!(accept_client_id("req-123_abc.def"), Some("req-123_abc.def"));
        assert_eq!(accept_client_id("  padded  "), Some("padded"));
    }

    #[test]
    fn rejects_empty_long_and_unsafe_ids() {
        assert_eq!(accept_client_id(""), None);
        assert_eq!(accept_client_id("bad id"), None);
        assert_eq!(accept_client_id("bad/xx"), None);
        assert_eq!(accept_client_id(&"a".repeat(129)), None);
    }

    #[test]
    fn generated_ids_are_prefixed_and_unique() {
        let a = new_request_id();
        let b = new_request_id();
        assert!(a.starts_with("req_"));
        assert_eq!(a.len(), 4 + 32);
        assert_ne!(a, b);
    }

    #[test]
    fn no_request_id_outside_scope() {
        assert_eq!(current_request_id(), None);
    }
}
