//! # imagene — 图片灰度转换工具库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  main.rs   日志初始化 · clap 参数解析 · 退出码             │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ Result<ProcessReport, AppError>
//! ┌───────┼──────────────────────────────────────────────────┐
//! │  ┌─ error ────── AppError (入口统一错误类型)               │
//! │  │                                                       │
//! │  └─ image_handler                                        │
//! │      ├─ loader     本地文件 / HTTP 下载                   │
//! │      ├─ pipeline   解码 · 灰度转换                        │
//! │      └─ writer     PNG / JPEG 编码写盘                    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 入口统一错误类型 `AppError` |
//! | [`image_handler`] | 从 URL/文件加载图片、转换为灰度并按扩展名写盘 |

pub mod error;
pub mod image_handler;
