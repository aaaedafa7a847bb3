//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“外部输入类型”和“流水线中间结果”解耦：
//! - `ImageSource` 表示外部来源语义（本地路径 / 网络地址，二选一）
//! - `RawImageData` 表示已加载但未解码的字节
//! - `GrayscaleImage` 表示灰度转换后的单通道像素，附带源图边界
//! - `OutputTarget` 表示输出路径以及由扩展名决定的编码格式

use std::fmt;
use std::path::{Path, PathBuf};

use image::{GenericImageView, GrayImage};

use super::ImageError;

/// 图片输入来源。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// 本地文件路径来源。
    LocalPath(String),
    /// 网络地址来源。
    RemoteUrl(String),
}

impl ImageSource {
    /// 从命令行的两个可选参数构造来源。
    ///
    /// 空字符串视为未提供；两者都缺失或同时提供都会被拒绝，且不会触发任何 I/O。
    ///
    /// # 示例
    /// ```rust
    /// use imagene::image_handler::ImageSource;
    ///
    /// let source = ImageSource::from_options(Some("in.png".into()), None)?;
    /// assert_eq!(source, ImageSource::LocalPath("in.png".into()));
    /// # Ok::<(), imagene::image_handler::ImageError>(())
    /// ```
    pub fn from_options(local: Option<String>, url: Option<String>) -> Result<Self, ImageError> {
        let local = local.filter(|value| !value.trim().is_empty());
        let url = url.filter(|value| !value.trim().is_empty());

        match (local, url) {
            (Some(_), Some(_)) => Err(ImageError::AmbiguousSource),
            (Some(path), None) => Ok(Self::LocalPath(path)),
            (None, Some(url)) => Ok(Self::RemoteUrl(url)),
            (None, None) => Err(ImageError::NoSourceProvided),
        }
    }

    /// 来源提示（用于日志）。
    pub(crate) fn hint(&self) -> &'static str {
        match self {
            Self::LocalPath(_) => "file",
            Self::RemoteUrl(_) => "url",
        }
    }
}

/// 加载阶段输出：原始字节与来源标识。
pub(crate) struct RawImageData {
    /// 原始图片字节。
    pub(crate) bytes: Vec<u8>,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: &'static str,
}

/// 图像边界：`[x, x + width) × [y, y + height)` 半开矩形。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    /// 读取图像视图的边界。`image` 的视图坐标总是从 `(0, 0)` 开始。
    pub fn of<I: GenericImageView>(image: &I) -> Self {
        let (width, height) = image.dimensions();
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub fn min(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    /// 右下角（不含）。坐标超出 `u32` 时饱和到 `u32::MAX`。
    pub fn max(&self) -> (u32, u32) {
        (
            self.x.saturating_add(self.width),
            self.y.saturating_add(self.height),
        )
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        let (max_x, max_y) = self.max();
        x >= self.x && x < max_x && y >= self.y && y < max_y
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (max_x, max_y) = self.max();
        write!(f, "({},{})-({},{})", self.x, self.y, max_x, max_y)
    }
}

/// 灰度转换结果：8 位单通道亮度像素 + 源图边界。
///
/// 只由 `to_grayscale` 创建，创建后不可变。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscaleImage {
    bounds: Bounds,
    pixels: GrayImage,
}

impl GrayscaleImage {
    pub(crate) fn new(bounds: Bounds, pixels: GrayImage) -> Self {
        debug_assert_eq!(pixels.dimensions(), (bounds.width, bounds.height));
        Self { bounds, pixels }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> u32 {
        self.bounds.width
    }

    pub fn height(&self) -> u32 {
        self.bounds.height
    }

    /// 按边界内的绝对坐标读取亮度，越界返回 `None`。
    pub fn luminance(&self, x: u32, y: u32) -> Option<u8> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        Some(self.pixels.get_pixel(x - self.bounds.x, y - self.bounds.y).0[0])
    }

    /// 底层像素缓冲（左上角为 `(0, 0)`）。
    pub fn as_luma8(&self) -> &GrayImage {
        &self.pixels
    }
}

/// 输出编码格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// 从扩展名解析格式（区分大小写）。
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }
}

/// 输出目标：文件路径 + 由扩展名决定的编码格式。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    path: PathBuf,
    format: OutputFormat,
}

impl OutputTarget {
    /// 解析输出路径。
    ///
    /// 扩展名取整个路径字符串中最后一个 `.` 之后的部分；没有 `.`、
    /// 或扩展名不是 `png` / `jpg` / `jpeg` 时返回 `UnsupportedOutputFormat`。
    ///
    /// # 示例
    /// ```rust
    /// use imagene::image_handler::{OutputFormat, OutputTarget};
    ///
    /// let target = OutputTarget::parse("out.jpeg")?;
    /// assert_eq!(target.format(), OutputFormat::Jpeg);
    /// # Ok::<(), imagene::image_handler::ImageError>(())
    /// ```
    pub fn parse(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let text = path.to_str().ok_or_else(|| {
            ImageError::UnsupportedOutputFormat(path.to_string_lossy().into_owned())
        })?;

        let (_, extension) = text
            .rsplit_once('.')
            .ok_or_else(|| ImageError::UnsupportedOutputFormat(format!("{text}（缺少扩展名）")))?;

        let format = OutputFormat::from_extension(extension)
            .ok_or_else(|| ImageError::UnsupportedOutputFormat(extension.to_string()))?;

        Ok(Self {
            path: path.to_path_buf(),
            format,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}
