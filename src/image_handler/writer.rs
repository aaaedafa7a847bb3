//! # 输出写入模块
//!
//! ## 设计思路
//!
//! 负责把灰度图编码并写到磁盘，编码格式只由输出路径的扩展名决定。
//! 扩展名解析先于任何文件操作，不支持的格式不会留下空文件。
//!
//! ## 实现思路
//!
//! - PNG 无损；JPEG 使用编码器默认质量，不对外暴露质量参数。
//! - 文件句柄只存活在单次写入调用内，成功或失败返回前都会被关闭。
//! - 编码到 `BufWriter` 后显式 `flush`，刷盘失败同样作为编码错误上报。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};

use super::source::{GrayscaleImage, OutputFormat, OutputTarget};
use super::ImageError;

/// 按输出路径扩展名编码并写入灰度图。
///
/// # 示例
/// ```rust,no_run
/// use image::{DynamicImage, RgbaImage};
/// use imagene::image_handler::{to_grayscale, write_grayscale};
///
/// let gray = to_grayscale(&DynamicImage::ImageRgba8(RgbaImage::new(4, 4)));
/// write_grayscale(&gray, "out.png")?;
/// # Ok::<(), imagene::image_handler::ImageError>(())
/// ```
pub fn write_grayscale(image: &GrayscaleImage, output: impl AsRef<Path>) -> Result<(), ImageError> {
    let target = OutputTarget::parse(output)?;
    write_to_target(image, &target)
}

/// 写入已解析好的输出目标（创建或截断文件）。
pub fn write_to_target(image: &GrayscaleImage, target: &OutputTarget) -> Result<(), ImageError> {
    let file = File::create(target.path()).map_err(|e| {
        ImageError::OutputPath(format!("{}（{}）", target.path().display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    encode(image, target.format(), &mut writer)?;
    writer
        .flush()
        .map_err(|e| ImageError::Encode(format!("写入文件失败：{}", e)))?;

    log::debug!(
        "💾 已写入 {} - {}x{} -> {}",
        target.format().as_str(),
        image.width(),
        image.height(),
        target.path().display()
    );

    Ok(())
}

/// 将灰度像素编码为指定格式写入任意输出流。
pub fn encode<W: Write>(
    image: &GrayscaleImage,
    format: OutputFormat,
    writer: W,
) -> Result<(), ImageError> {
    let pixels = image.as_luma8();
    let (width, height) = pixels.dimensions();

    let result = match format {
        OutputFormat::Png => {
            PngEncoder::new(writer).write_image(pixels.as_raw(), width, height, ColorType::L8.into())
        }
        OutputFormat::Jpeg => {
            JpegEncoder::new(writer).write_image(pixels.as_raw(), width, height, ColorType::L8.into())
        }
    };

    result.map_err(|e| ImageError::Encode(format!("{} 编码失败：{}", format.as_str(), e)))
}
