use crate::error::AppError;

use super::encoder::MatrixEncoder;
use super::models::GenerationRequest;
use super::raster::{self, PNG_CONTENT_TYPE};

/// 生成结果：图片字节与其 Content-Type
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// 矩阵编码 -> 栅格化 -> PNG 编码。
///
/// 纯 CPU 计算且无共享状态，可任意并发调用。
pub fn generate_png(
    encoder: &dyn MatrixEncoder,
    req: &GenerationRequest,
) -> Result<GeneratedImage, AppError> {
    let matrix = encoder.encode(&req.text, req.level).map_err(|e| {
        tracing::warn!("QR generation failed: {}", e);
        AppError::EncodingFailure("failed to generate QR code".to_string())
    })?;

    let img = raster::rasterize(&matrix, req.size, req.foreground, req.background);

    let bytes = raster::encode_png(&img).map_err(|e| {
        tracing::warn!("QR encoding failed: {}", e);
        AppError::EncodingFailure("failed to encode QR code".to_string())
    })?;

    tracing::debug!(
        level = ?req.level,
        modules = matrix.width(),
        side = img.width(),
        bytes = bytes.len(),
        "二维码生成完成"
    );

    Ok(GeneratedImage {
        bytes,
        content_type: PNG_CONTENT_TYPE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::qrcode::encoder::{CodeMatrix, EncodeError, QrcodeEncoder};
    use crate::features::qrcode::models::{EcLevel, Rgb8};

    struct FailingEncoder;

    impl MatrixEncoder for FailingEncoder {
        fn encode(&self, _text: &str, _level: EcLevel) -> Result<CodeMatrix, EncodeError> {
            Err(EncodeError("data too long".to_string()))
        }
    }

    fn request(text: &str, level: EcLevel, size: u32) -> GenerationRequest {
        GenerationRequest {
            text: text.to_string(),
            level,
            size,
            foreground: Rgb8::BLACK,
            background: Rgb8::WHITE,
        }
    }

    #[test]
    fn every_level_produces_png() {
        for level in [
            EcLevel::Low,
            EcLevel::Medium,
            EcLevel::Quartile,
            EcLevel::Highest,
        ] {
            let out = generate_png(&QrcodeEncoder, &request("hello 世界", level, 128))
                .expect("generate");
            assert_eq!(out.content_type, "image/png");
            assert!(!out.bytes.is_empty());
            let img = image::load_from_memory(&out.bytes).expect("decode");
            assert_eq!((img.width(), img.height()), (128, 128));
        }
    }

    #[test]
    fn foreground_color_is_applied() {
        let mut req = request("color", EcLevel::Low, 200);
        req.foreground = Rgb8::new(0xFF, 0x00, 0x00);
        let out = generate_png(&QrcodeEncoder, &req).unwrap();
        let img = image::load_from_memory(&out.bytes).unwrap().to_rgb8();
        assert!(img.pixels().any(|p| p.0 == [0xFF, 0x00, 0x00]));
        assert!(img.pixels().any(|p| p.0 == [0xFF, 0xFF, 0xFF]));
        assert!(!img.pixels().any(|p| p.0 == [0x00, 0x00, 0x00]));
    }

    #[test]
    fn encoder_failure_is_reported() {
        let err = generate_png(&FailingEncoder, &request("x", EcLevel::Low, 64)).unwrap_err();
        assert!(matches!(err, AppError::EncodingFailure(_)));
        assert_eq!(err.to_string(), "failed to generate QR code");
    }

    #[test]
    fn capacity_overflow_is_encoding_failure() {
        let text = "x".repeat(3000);
        let err = generate_png(&QrcodeEncoder, &request(&text, EcLevel::Low, 64)).unwrap_err();
        assert!(matches!(err, AppError::EncodingFailure(_)));
    }
}
