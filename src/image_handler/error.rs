//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载“来源解析 → 解码 → 灰度转换 → 编码写盘”链路中的所有错误来源，
//! 避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! 每个分支都带有稳定的 `code()` 与所属阶段 `stage()`，供命令行层渲染与日志检索。

/// 图片处理统一错误类型。
///
/// 该类型会在二进制入口被上转为 `AppError`，最终由命令行层输出给用户。
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("未提供图片来源，请使用 --local 或 --url 指定")]
    NoSourceProvided,

    #[error("--local 与 --url 只能二选一")]
    AmbiguousSource,

    #[error("本地图片路径无效：{0}")]
    InvalidLocalPath(String),

    #[error("图片 URL 无效：{0}")]
    InvalidUrl(String),

    #[error("不支持的图片格式：{0}")]
    UnsupportedFormat(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("不支持的输出格式：{0}（可选：png / jpg / jpeg）")]
    UnsupportedOutputFormat(String),

    #[error("无法创建输出文件：{0}")]
    OutputPath(String),

    #[error("编码错误：{0}")]
    Encode(String),
}

impl ImageError {
    /// 稳定错误码，便于脚本按码匹配。
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoSourceProvided => "no_source_provided",
            Self::AmbiguousSource => "ambiguous_source",
            Self::InvalidLocalPath(_) => "invalid_local_path",
            Self::InvalidUrl(_) => "invalid_url",
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::Decode(_) => "decode_error",
            Self::ResourceLimit(_) => "resource_limit",
            Self::UnsupportedOutputFormat(_) => "unsupported_output_format",
            Self::OutputPath(_) => "output_path_error",
            Self::Encode(_) => "encode_error",
        }
    }

    /// 错误发生的流水线阶段。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::NoSourceProvided
            | Self::AmbiguousSource
            | Self::InvalidLocalPath(_)
            | Self::InvalidUrl(_) => "source",
            Self::UnsupportedFormat(_) | Self::Decode(_) | Self::ResourceLimit(_) => "decode",
            Self::UnsupportedOutputFormat(_) | Self::OutputPath(_) | Self::Encode(_) => "encode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ImageError;

    #[test]
    fn codes_are_distinct_per_variant() {
        let errors = [
            ImageError::NoSourceProvided,
            ImageError::AmbiguousSource,
            ImageError::InvalidLocalPath(String::new()),
            ImageError::InvalidUrl(String::new()),
            ImageError::UnsupportedFormat(String::new()),
            ImageError::Decode(String::new()),
            ImageError::ResourceLimit(String::new()),
            ImageError::UnsupportedOutputFormat(String::new()),
            ImageError::OutputPath(String::new()),
            ImageError::Encode(String::new()),
        ];

        let mut codes: Vec<&str> = errors.iter().map(ImageError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn stage_groups_follow_pipeline_order() {
        assert_eq!(ImageError::InvalidUrl("x".into()).stage(), "source");
        assert_eq!(ImageError::Decode("x".into()).stage(), "decode");
        assert_eq!(ImageError::UnsupportedOutputFormat("gif".into()).stage(), "encode");
    }

    #[test]
    fn unsupported_output_message_names_extension() {
        let message = ImageError::UnsupportedOutputFormat("gif".into()).to_string();
        assert!(message.contains("gif"));
    }
}
