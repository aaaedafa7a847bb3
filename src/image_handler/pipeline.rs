//! # 解码与灰度变换流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → 灰度”的过程集中管理，并在关键节点增加资源上限控制。
//! 优先做尺寸检查，再进行完整解码，降低恶意输入触发高内存开销的风险。
//!
//! 灰度变换是纯函数：不做 I/O，只分配一块输出缓冲，像素之间互不依赖。
//!
//! ## 实现思路
//!
//! 1. 猜测格式并读取 header 尺寸
//! 2. 设置了像素上限时快速拒绝
//! 3. 完整解码
//! 4. 逐像素按 BT.601 系数计算亮度，输出边界与输入完全一致

use image::{DynamicImage, GenericImageView, GrayImage, ImageFormat, Luma, Rgba};
use std::io::Cursor;

use super::source::{Bounds, GrayscaleImage, RawImageData};
use super::{ImageConfig, ImageError, ImageHandler};

impl ImageHandler {
    /// 将原始字节按自动识别的格式解码为图像。
    pub(crate) fn decode(&self, raw: RawImageData) -> Result<DynamicImage, ImageError> {
        let format: ImageFormat = image::guess_format(&raw.bytes)
            .map_err(|e| ImageError::UnsupportedFormat(e.to_string()))?;

        let (header_width, header_height) = Self::inspect_dimensions_from_memory(&raw.bytes)?;
        Self::validate_pixel_limits(&self.config, header_width, header_height)?;

        let decoded = image::load_from_memory_with_format(&raw.bytes, format)
            .map_err(map_image_error)?;

        let (width, height) = decoded.dimensions();
        log::info!(
            "✅ 图片解码成功 - 来源: {} 格式: {:?} 尺寸: {}x{}",
            raw.source_hint,
            format,
            width,
            height
        );

        Ok(decoded)
    }

    /// 仅通过内存中的图片头信息读取宽高。
    ///
    /// 用于在完整解码前做像素限制检查。
    fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), ImageError> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ImageError::UnsupportedFormat(format!("无法识别图片格式：{}", e)))?;

        reader.into_dimensions().map_err(map_image_error)
    }

    /// 校验像素数量是否超过配置上限（未设置上限时直接通过）。
    fn validate_pixel_limits(
        config: &ImageConfig,
        width: u32,
        height: u32,
    ) -> Result<(), ImageError> {
        let Some(limit) = config.max_decoded_pixels else {
            return Ok(());
        };
        let pixels = u64::from(width) * u64::from(height);

        if pixels > limit {
            return Err(ImageError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, limit
            )));
        }

        Ok(())
    }
}

fn map_image_error(error: image::ImageError) -> ImageError {
    match error {
        image::ImageError::Unsupported(e) => ImageError::UnsupportedFormat(e.to_string()),
        other => ImageError::Decode(other.to_string()),
    }
}

/// 将任意 RGBA 图像视图转换为 8 位灰度图。
///
/// 输出边界与输入边界完全一致；同一颜色在任意坐标得到相同亮度。
///
/// # 示例
/// ```rust
/// use image::{DynamicImage, Rgba, RgbaImage};
/// use imagene::image_handler::to_grayscale;
///
/// let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 2, Rgba([90, 90, 90, 255])));
/// let gray = to_grayscale(&img);
/// assert_eq!((gray.width(), gray.height()), (3, 2));
/// assert_eq!(gray.luminance(2, 1), Some(90));
/// ```
pub fn to_grayscale<I>(image: &I) -> GrayscaleImage
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let bounds = Bounds::of(image);
    let pixels = GrayImage::from_fn(bounds.width, bounds.height, |x, y| {
        Luma([luminance(image.get_pixel(x, y))])
    });

    GrayscaleImage::new(bounds, pixels)
}

/// 单像素亮度。
///
/// 通道先扩展到 16 位并按 alpha 预乘，再用 BT.601 整数系数
/// `(19595·R + 38470·G + 7471·B + 2^15) >> 24` 折算为 8 位。
/// 不透明像素满足 `R = G = B = v` 时结果恰为 `v`。
pub fn luminance(Rgba([r, g, b, a]): Rgba<u8>) -> u8 {
    let alpha = u32::from(a) * 0x101;
    let premultiply = |c: u8| u32::from(c) * 0x101 * alpha / 0xffff;

    let y = (19595 * premultiply(r) + 38470 * premultiply(g) + 7471 * premultiply(b) + (1 << 15))
        >> 24;
    y as u8
}
