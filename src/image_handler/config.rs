//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `ImageConfig`，保证运行时行为可观测、可调整、可测试。
//! 单次调用只处理一张图片，因此配置在构造 `ImageHandler` 时一次性确定，不支持运行时切换。
//!
//! ## 实现思路
//!
//! - `Default` 不设体积与像素上限，网络超时沿用 HTTP 客户端默认值。
//! - 上限只在调用方显式设置时生效（命令行 `--max-file-size` / `--max-pixels`）。
//! - `with_download_timeout` 供命令行 `--timeout` 覆盖，只作用于网络下载阶段。
//! - `validate` 在处理器构造前拦截明显不合理的参数。

use super::ImageError;

const DEFAULT_USER_AGENT: &str = concat!("imagene/", env!("CARGO_PKG_VERSION"));

/// 图片处理配置。
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// 下载/读取原始字节时允许的最大文件体积（字节）。`None` 表示不限制。
    pub max_file_size: Option<u64>,
    /// 解码后的像素上限（`width * height`）。`None` 表示不限制。
    pub max_decoded_pixels: Option<u64>,
    /// 网络下载截止时间（秒）。`None` 表示使用 HTTP 客户端默认值。
    pub download_timeout: Option<u64>,
    /// 发起 HTTP 请求时携带的 User-Agent。
    pub user_agent: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_file_size: None,
            max_decoded_pixels: None,
            download_timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ImageConfig {
    /// 覆盖网络下载截止时间。
    ///
    /// # 示例
    /// ```rust
    /// use imagene::image_handler::ImageConfig;
    ///
    /// let config = ImageConfig::default().with_download_timeout(Some(10));
    /// assert_eq!(config.download_timeout, Some(10));
    /// ```
    pub fn with_download_timeout(mut self, seconds: Option<u64>) -> Self {
        self.download_timeout = seconds;
        self
    }

    /// 设置原始字节与解码像素上限，`None` 保持不限制。
    ///
    /// # 示例
    /// ```rust
    /// use imagene::image_handler::ImageConfig;
    ///
    /// let config = ImageConfig::default().with_limits(Some(1024), None);
    /// assert_eq!(config.max_file_size, Some(1024));
    /// assert_eq!(config.max_decoded_pixels, None);
    /// ```
    pub fn with_limits(mut self, max_file_size: Option<u64>, max_decoded_pixels: Option<u64>) -> Self {
        self.max_file_size = max_file_size;
        self.max_decoded_pixels = max_decoded_pixels;
        self
    }

    /// 校验配置取值范围。
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.max_file_size == Some(0) {
            return Err(ImageError::ResourceLimit("max_file_size 必须大于 0".to_string()));
        }
        if self.max_decoded_pixels == Some(0) {
            return Err(ImageError::ResourceLimit(
                "max_decoded_pixels 必须大于 0".to_string(),
            ));
        }
        if let Some(timeout) = self.download_timeout {
            if !(1..=3_600).contains(&timeout) {
                return Err(ImageError::ResourceLimit(
                    "download_timeout 必须在 1~3600 秒之间".to_string(),
                ));
            }
        }
        Ok(())
    }
}
