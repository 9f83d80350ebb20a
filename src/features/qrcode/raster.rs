use image::{Rgb, RgbImage};

use super::encoder::CodeMatrix;
use super::models::Rgb8;

/// PNG 响应的 Content-Type
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// 将模块矩阵栅格化为 RGB 图像（最近邻采样）。
///
/// 输出边长为 `max(size, 矩阵宽度)`：请求尺寸不小于矩阵宽度时严格为 `size × size`，
/// 否则放大到每个模块至少占 1 像素。
pub fn rasterize(matrix: &CodeMatrix, size: u32, foreground: Rgb8, background: Rgb8) -> RgbImage {
    let modules = matrix.width() as u64;
    let side = size.max(matrix.width() as u32);
    let side64 = u64::from(side);

    let fg = Rgb(foreground.to_array());
    let bg = Rgb(background.to_array());

    // 每行/列只需计算一次模块索引
    let index: Vec<usize> = (0..side64)
        .map(|p| (p * modules / side64) as usize)
        .collect();

    RgbImage::from_fn(side, side, |x, y| {
        if matrix.is_dark(index[x as usize], index[y as usize]) {
            fg
        } else {
            bg
        }
    })
}

/// 使用 png crate 编码为 8 位 RGB PNG
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, png::EncodingError> {
    let (width, height) = img.dimensions();
    let mut out = Vec::with_capacity((width as usize * height as usize) / 8 + 1024);
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        encoder.set_filter(png::FilterType::Paeth);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(img.as_raw())?;
        writer.finish()?;
    }
    Ok(out)
}
