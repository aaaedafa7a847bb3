//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 统一处理两种来源（本地文件 / URL）的原始字节加载，并在“尽可能早”的阶段执行输入校验。
//! 目标是尽快失败，减少不必要内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! - 文件：metadata（存在性 / 目录 / 可选体积限制）+ 读取。
//! - URL：协议校验 + 阻塞 GET + 状态码必须为 200 + 读取响应体（设置上限时限长读取）。
//! - 最后统一做文件签名（magic bytes）校验，拒绝非图片内容。
//! - 不做任何重试，第一个错误直接返回给上层。

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use super::source::RawImageData;
use super::{ImageConfig, ImageError, ImageHandler};

fn too_large(actual: u64, limit: u64) -> ImageError {
    ImageError::ResourceLimit(format!(
        "文件过大：{:.2} MB（限制：{:.2} MB）",
        actual as f64 / 1024.0 / 1024.0,
        limit as f64 / 1024.0 / 1024.0
    ))
}

impl ImageHandler {
    /// 从本地路径加载图片原始字节。
    pub(super) fn load_from_file(&self, path: &str) -> Result<RawImageData, ImageError> {
        log::info!("📁 开始读取本地图片 - 路径: {}", path);

        let file_path = Path::new(path);
        let metadata = std::fs::metadata(file_path)
            .map_err(|e| ImageError::InvalidLocalPath(format!("{}（{}）", path, e)))?;

        if metadata.is_dir() {
            return Err(ImageError::InvalidLocalPath(format!("{}（是一个目录）", path)));
        }

        if let Some(limit) = self.config.max_file_size {
            if metadata.len() > limit {
                return Err(too_large(metadata.len(), limit));
            }
        }

        let bytes = std::fs::read(file_path)
            .map_err(|e| ImageError::InvalidLocalPath(format!("{}（{}）", path, e)))?;
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            source_hint: "file",
        })
    }

    /// 从 URL 下载图片原始字节。
    ///
    /// 阻塞当前线程直到响应体读取完毕或失败。
    pub(super) fn load_from_url(&self, url: &str) -> Result<RawImageData, ImageError> {
        log::info!("🌐 开始下载图片 - URL: {}", Self::redact_url_for_log(url));

        let parsed = reqwest::Url::parse(url)
            .map_err(|e| ImageError::InvalidUrl(format!("URL 格式错误：{}", e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ImageError::InvalidUrl(format!(
                "仅支持 HTTP/HTTPS：{}",
                parsed.scheme()
            )));
        }

        let client = Self::build_http_client(&self.config)?;
        let response = client
            .get(parsed)
            .send()
            .map_err(|e| Self::map_reqwest_error(e, url))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ImageError::InvalidUrl(format!(
                "HTTP {}: {}",
                status.as_u16(),
                Self::status_message(status.as_u16())
            )));
        }

        if let (Some(length), Some(limit)) =
            (response.content_length(), self.config.max_file_size)
        {
            if length > limit {
                return Err(too_large(length, limit));
            }
        }

        let bytes = Self::read_body_with_limit(response, self.config.max_file_size)?;
        log::debug!("✅ 下载完成 - {} bytes", bytes.len());
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            source_hint: "url",
        })
    }

    fn build_http_client(config: &ImageConfig) -> Result<reqwest::blocking::Client, ImageError> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(seconds) = config.download_timeout {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        builder
            .build()
            .map_err(|e| ImageError::InvalidUrl(format!("无法创建 HTTP 客户端：{}", e)))
    }

    /// 读取响应体；设置了上限时超过上限立即中止。
    fn read_body_with_limit(
        mut reader: impl Read,
        max_file_size: Option<u64>,
    ) -> Result<Vec<u8>, ImageError> {
        let mut buffer = Vec::new();
        let read = match max_file_size {
            Some(limit) => reader.take(limit.saturating_add(1)).read_to_end(&mut buffer),
            None => reader.read_to_end(&mut buffer),
        };
        read.map_err(|e| ImageError::InvalidUrl(format!("下载失败：{}", e)))?;

        if let Some(limit) = max_file_size {
            if buffer.len() as u64 > limit {
                return Err(ImageError::ResourceLimit("下载后文件超过大小限制".to_string()));
            }
        }

        Ok(buffer)
    }

    /// 统一映射 reqwest 错误到业务错误。
    fn map_reqwest_error(e: reqwest::Error, url: &str) -> ImageError {
        let redacted = Self::redact_url_for_log(url);
        let err_msg = e.to_string().replace(url, &redacted);

        if e.is_timeout() {
            ImageError::InvalidUrl(format!("下载超时：{}", err_msg))
        } else if e.is_connect() {
            ImageError::InvalidUrl(format!("无法连接：{}", err_msg))
        } else {
            ImageError::InvalidUrl(format!("请求失败：{}", err_msg))
        }
    }

    /// 日志中去掉 query 与 fragment，避免泄露 token。
    fn redact_url_for_log(url: &str) -> String {
        let Ok(parsed) = reqwest::Url::parse(url) else {
            return "<invalid-url>".to_string();
        };

        let host = parsed.host_str().unwrap_or("<unknown-host>");
        let port = parsed.port().map(|p| format!(":{}", p)).unwrap_or_default();

        format!("{}://{}{}{}", parsed.scheme(), host, port, parsed.path())
    }

    /// 常见 HTTP 状态码文案。
    fn status_message(code: u16) -> &'static str {
        match code {
            404 => "未找到",
            403 => "访问被拒绝",
            500..=599 => "服务器错误",
            _ => "状态码不是 200 OK",
        }
    }

    /// 通过文件签名（magic bytes）校验输入是否为图片。
    fn validate_image_signature(bytes: &[u8]) -> Result<(), ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::UnsupportedFormat("图片内容为空".to_string()));
        }

        let kind = infer::get(bytes)
            .ok_or_else(|| ImageError::UnsupportedFormat("无法识别图片类型".to_string()))?;

        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(ImageError::UnsupportedFormat(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        Ok(())
    }
}
