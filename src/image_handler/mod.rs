//! # 图片处理模块（image_handler）
//!
//! ## 设计思路
//!
//! 该模块将“来源解析 → 加载校验 → 解码 → 灰度转换 → 编码写盘 → 命令行暴露”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `commands`：仅做命令行入参/出参适配（薄封装）
//! - `handler`：编排整条处理流水线
//! - `loader`：负责 URL/文件加载与签名校验
//! - `pipeline`：负责解码、像素限制、灰度转换
//! - `writer`：负责按扩展名编码并写盘
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 新同事快速上手
//!
//! 可以按下面顺序理解调用链：
//!
//! ```text
//! main.rs（日志初始化 + 参数解析）
//!    ↓
//! commands.rs（参数适配，构造 ImageSource / ImageConfig）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（来源加载 + 体积/签名校验）
//!    ├─ pipeline.rs（解码 + 像素限制 + 灰度转换）
//!    └─ writer.rs（扩展名分派 + 编码写盘）
//!    ↓
//! 返回 ImageError 给入口，由入口统一渲染
//! ```

pub mod commands;
mod config;
mod error;
mod handler;
mod loader;
mod pipeline;
mod source;
mod writer;

#[cfg(test)]
mod test_support;

pub use config::ImageConfig;
pub use error::ImageError;
pub use handler::{ImageHandler, ProcessReport};
pub use pipeline::{luminance, to_grayscale};
pub use source::{Bounds, GrayscaleImage, ImageSource, OutputFormat, OutputTarget};
pub use writer::{encode, write_grayscale, write_to_target};
