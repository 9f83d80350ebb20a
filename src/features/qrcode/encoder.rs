use qrcode::{Color, QrCode};
use thiserror::Error;

use super::models::EcLevel;

/// 标准二维码四周的静区宽度（模块数）
pub const QUIET_ZONE: usize = 4;

/// 矩阵编码失败（通常是文本超出该纠错等级的容量）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct EncodeError(pub String);

/// 编码器输出的正方形布尔矩阵（行优先，`true` 表示深色模块）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeMatrix {
    width: usize,
    modules: Vec<bool>,
}

impl CodeMatrix {
    /// 由行优先的模块数组构造；长度必须等于 `width * width`。
    pub fn new(width: usize, modules: Vec<bool>) -> Result<Self, EncodeError> {
        if width == 0 || width.checked_mul(width) != Some(modules.len()) {
            return Err(EncodeError(format!(
                "matrix size mismatch: width={width}, modules={}",
                modules.len()
            )));
        }
        Ok(Self { width, modules })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// 第 `y` 行第 `x` 列是否为深色模块
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.width + x]
    }

    /// 在四周加上 `margin` 个浅色模块
    pub fn with_margin(self, margin: usize) -> Self {
        if margin == 0 {
            return self;
        }
        let width = self.width + margin * 2;
        let mut modules = vec![false; width * width];
        for y in 0..self.width {
            let src = &self.modules[y * self.width..(y + 1) * self.width];
            let start = (y + margin) * width + margin;
            modules[start..start + self.width].copy_from_slice(src);
        }
        Self { width, modules }
    }
}

/// 文本 + 纠错等级 -> 布尔矩阵 的编码边界。
///
/// 生成流程只依赖该 trait，测试可替换为固定矩阵或必然失败的实现。
pub trait MatrixEncoder: Send + Sync {
    fn encode(&self, text: &str, level: EcLevel) -> Result<CodeMatrix, EncodeError>;
}

/// 基于 `qrcode` crate 的默认编码器（输出含静区）
#[derive(Debug, Clone, Copy, Default)]
pub struct QrcodeEncoder;

impl MatrixEncoder for QrcodeEncoder {
    fn encode(&self, text: &str, level: EcLevel) -> Result<CodeMatrix, EncodeError> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), level.into())
            .map_err(|e| EncodeError(e.to_string()))?;
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect();
        Ok(CodeMatrix::new(code.width(), modules)?.with_margin(QUIET_ZONE))
    }
}
