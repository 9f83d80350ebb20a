/// 二维码纠错等级（冗余度从低到高）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EcLevel {
    /// 约 7% 码字可恢复
    #[default]
    Low,
    /// 约 15%
    Medium,
    /// 约 25%
    Quartile,
    /// 约 30%
    Highest,
}

impl EcLevel {
    /// 按字母解析纠错等级（不区分大小写）。
    ///
    /// 无法识别的取值一律回落到 [`EcLevel::Low`]，不报错。
    pub fn from_letter(letter: &str) -> Self {
        match letter.to_ascii_uppercase().as_str() {
            "M" => EcLevel::Medium,
            "Q" => EcLevel::Quartile,
            "H" => EcLevel::Highest,
            _ => EcLevel::Low,
        }
    }
}

impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::Low => qrcode::EcLevel::L,
            EcLevel::Medium => qrcode::EcLevel::M,
            EcLevel::Quartile => qrcode::EcLevel::Q,
            EcLevel::Highest => qrcode::EcLevel::H,
        }
    }
}

/// 8 位 RGB 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8 { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb8 = Rgb8 {
        r: 0xFF,
        g: 0xFF,
        b: 0xFF,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// 校验完成的生成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// 待编码文本（已完成 base64 解码，非空）
    pub text: String,
    pub level: EcLevel,
    /// 目标边长（像素），位于 [1, max_size]
    pub size: u32,
    pub foreground: Rgb8,
    /// 背景色，固定为白色
    pub background: Rgb8,
}

/// `/api/generate` 的原始查询参数（均为字符串，校验由 params 模块完成）
#[derive(Debug, Clone, Default, PartialEq, Eq, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GenerateQuery {
    /// URL-safe base64（带填充）编码后的文本
    #[param(example = "aHR0cHM6Ly9leGFtcGxlLmNvbQ==")]
    pub url: Option<String>,
    /// 纠错等级：L | M | Q | H（默认 L，无法识别时按 L 处理）
    #[param(example = "M")]
    pub level: Option<String>,
    /// 边长像素：1-2048（默认 256）
    #[param(example = "256")]
    pub size: Option<String>,
    /// 前景色：3 或 6 位十六进制，可带 `#`（默认 000000）
    #[param(example = "1e90ff")]
    pub color: Option<String>,
}

impl GenerateQuery {
    /// 由查询串键值对构造；同名参数只取第一次出现的值，未知参数忽略
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "url" => &mut query.url,
                "level" => &mut query.level,
                "size" => &mut query.size,
                "color" => &mut query.color,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}
