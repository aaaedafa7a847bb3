//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义入口级统一的 `AppError` 枚举，图片链路错误与进程初始化错误都在这里汇合，
//! 由 `main` 作为唯一出口渲染成人类可读的提示。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ImageError` 与日志初始化错误提供 `From` 转换，无需手动 map。

use crate::image_handler::ImageError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图片处理流水线错误（加载 / 解码 / 编码）
    #[error("{0}")]
    Image(#[from] ImageError),

    /// 日志系统重复初始化
    #[error("日志初始化失败: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl AppError {
    /// 稳定错误码，日志中与阶段一起输出。
    pub fn code(&self) -> &'static str {
        match self {
            Self::Image(err) => err.code(),
            Self::Logger(_) => "logger_init",
        }
    }

    /// 出错阶段；初始化错误归入 `startup`。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Image(err) => err.stage(),
            Self::Logger(_) => "startup",
        }
    }
}
