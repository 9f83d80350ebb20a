use thiserror::Error;

use super::models::Rgb8;

/// 颜色解析错误
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid color format, expected 3 or 6 characters")]
    InvalidLength,
    #[error("invalid red component")]
    InvalidRedComponent,
    #[error("invalid green component")]
    InvalidGreenComponent,
    #[error("invalid blue component")]
    InvalidBlueComponent,
}

impl ColorError {
    fn for_component(index: usize) -> Self {
        match index {
            0 => ColorError::InvalidRedComponent,
            1 => ColorError::InvalidGreenComponent,
            _ => ColorError::InvalidBlueComponent,
        }
    }
}

/// 解析十六进制颜色（`abc` / `aabbcc`，可带前导 `#`）。
///
/// 三位写法按位复制展开：`abc` 等价于 `aabbcc`。
pub fn parse_hex_color(raw: &str) -> Result<Rgb8, ColorError> {
    let digits = raw.strip_prefix('#').unwrap_or(raw).as_bytes();

    let expanded: [u8; 6] = match digits.len() {
        3 => [
            digits[0], digits[0], digits[1], digits[1], digits[2], digits[2],
        ],
        6 => [
            digits[0], digits[1], digits[2], digits[3], digits[4], digits[5],
        ],
        _ => return Err(ColorError::InvalidLength),
    };

    let mut channels = [0u8; 3];
    // 按 R -> G -> B 顺序逐个分量解码，首个非法分量决定错误类型
    for (i, pair) in expanded.chunks_exact(2).enumerate() {
        hex::decode_to_slice(pair, &mut channels[i..=i])
            .map_err(|_| ColorError::for_component(i))?;
    }

    let [r, g, b] = channels;
    Ok(Rgb8::new(r, g, b))
}
