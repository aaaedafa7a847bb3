//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ImageHandler` 只负责流程编排与配置持有，不直接与命令行绑定。
//! 处理链路固定为：
//! 1. 解析输出目标（扩展名不支持时不做任何 I/O）
//! 2. 按来源加载原始字节并解码
//! 3. 灰度转换
//! 4. 编码写盘
//!
//! ## 实现思路
//!
//! - 各阶段严格串行，前一阶段完成后才进入下一阶段。
//! - 任一阶段出错立即返回，不重试、不降级。
//! - 记录 `load/convert/write/total` 阶段耗时，便于性能诊断。

use std::path::{Path, PathBuf};
use std::time::Instant;

use image::DynamicImage;

use super::source::{Bounds, OutputFormat, OutputTarget};
use super::{to_grayscale, write_to_target, ImageConfig, ImageError, ImageSource};

/// 图片处理器。
pub struct ImageHandler {
    pub(super) config: ImageConfig,
}

/// 单次处理结果摘要。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub bounds: Bounds,
    pub format: OutputFormat,
    pub output: PathBuf,
}

impl ImageHandler {
    /// 根据配置创建处理器，配置不合法时直接拒绝。
    ///
    /// # 示例
    /// ```rust
    /// use imagene::image_handler::{ImageConfig, ImageHandler};
    ///
    /// let handler = ImageHandler::new(ImageConfig::default())?;
    /// # Ok::<(), imagene::image_handler::ImageError>(())
    /// ```
    pub fn new(config: ImageConfig) -> Result<Self, ImageError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 从本地路径或 URL 加载并解码图片。
    pub fn resolve(&self, source: &ImageSource) -> Result<DynamicImage, ImageError> {
        let raw = match source {
            ImageSource::LocalPath(path) => self.load_from_file(path)?,
            ImageSource::RemoteUrl(url) => self.load_from_url(url)?,
        };

        self.decode(raw)
    }

    /// 处理主入口：加载 → 灰度 → 写盘。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use imagene::image_handler::{ImageConfig, ImageHandler, ImageSource};
    ///
    /// let handler = ImageHandler::new(ImageConfig::default())?;
    /// let report = handler.process(&ImageSource::LocalPath("in.jpg".into()), "out.png")?;
    /// println!("{}", report.output.display());
    /// # Ok::<(), imagene::image_handler::ImageError>(())
    /// ```
    pub fn process(
        &self,
        source: &ImageSource,
        output: impl AsRef<Path>,
    ) -> Result<ProcessReport, ImageError> {
        let target = OutputTarget::parse(output)?;
        let total_start = Instant::now();

        let load_start = Instant::now();
        let decoded = self.resolve(source)?;
        let load_elapsed = load_start.elapsed();

        let convert_start = Instant::now();
        let gray = to_grayscale(&decoded);
        drop(decoded);
        let convert_elapsed = convert_start.elapsed();

        let write_start = Instant::now();
        write_to_target(&gray, &target)?;
        let write_elapsed = write_start.elapsed();

        log::info!(
            "✅ 图片处理完成 - 来源: {} 边界: {} load={}ms convert={}ms write={}ms total={}ms",
            source.hint(),
            gray.bounds(),
            load_elapsed.as_millis(),
            convert_elapsed.as_millis(),
            write_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(ProcessReport {
            bounds: gray.bounds(),
            format: target.format(),
            output: target.path().to_path_buf(),
        })
    }
}
