use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::features::health::handler::health_check,
        crate::features::qrcode::handler::generate_qrcode,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::features::health::handler::HealthResponse,
    )),
    tags(
        (name = "QRCode", description = "QR code generation APIs"),
        (name = "Health", description = "Health APIs"),
    ),
    info(
        title = "QR Backend API",
        version = "0.1.0",
        description = "QR code PNG generation service (Axum)"
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn openapi_lists_generate_endpoint_with_query_params() {
        let doc = serde_json::to_value(ApiDoc::openapi()).expect("serialize openapi");
        let params = doc["paths"]["/api/generate"]["get"]["parameters"]
            .as_array()
            .expect("parameters");
        let names: Vec<&str> = params.iter().filter_map(|p| p["name"].as_str()).collect();
        assert_eq!(names, vec!["url", "level", "size", "color"]);
        assert!(doc["paths"]["/health"]["get"].is_object());
    }
}
