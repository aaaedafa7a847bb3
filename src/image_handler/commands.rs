//! # 命令行命令层
//!
//! ## 设计思路
//!
//! 命令层仅做参数接收与结果返回，不承载业务逻辑。
//! 命令表由 `Cli` 结构体在程序入口显式构造，不依赖任何全局注册。
//! 实际处理交由 `ImageHandler`，保持命令函数薄、稳定、易测试。

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::{ImageConfig, ImageError, ImageHandler, ImageSource, ProcessReport};

/// 命令行入口参数。
#[derive(Debug, Parser)]
#[command(name = "imagene", version, about = "图片处理命令行工具")]
pub struct Cli {
    /// 输出调试日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 将图片转换为灰度图
    Grayscale(GrayscaleArgs),
}

#[derive(Debug, Args)]
pub struct GrayscaleArgs {
    /// 本地图片路径
    #[arg(long, value_name = "PATH", conflicts_with = "url")]
    pub local: Option<String>,

    /// 网络图片地址
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// 输出文件路径，扩展名决定格式（png / jpg / jpeg）
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,

    /// 网络下载超时（秒），默认沿用 HTTP 客户端设置
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// 原始文件体积上限（字节），默认不限制
    #[arg(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// 解码像素上限（宽 × 高），默认不限制
    #[arg(long, value_name = "PIXELS")]
    pub max_pixels: Option<u64>,
}

/// `grayscale` 子命令。
pub fn grayscale(args: GrayscaleArgs) -> Result<ProcessReport, ImageError> {
    let source = ImageSource::from_options(args.local, args.url)?;
    let config = ImageConfig::default()
        .with_download_timeout(args.timeout)
        .with_limits(args.max_file_size, args.max_pixels);

    ImageHandler::new(config)?.process(&source, &args.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(argv: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(argv)
    }

    #[test]
    fn command_table_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn grayscale_parses_local_and_output() {
        let cli = parse(&["imagene", "grayscale", "--local", "in.png", "-o", "out.jpg"])
            .expect("parse failed");

        let Command::Grayscale(args) = cli.command;
        assert_eq!(args.local.as_deref(), Some("in.png"));
        assert_eq!(args.url, None);
        assert_eq!(args.output, PathBuf::from("out.jpg"));
        assert_eq!(args.max_file_size, None);
        assert_eq!(args.max_pixels, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn limit_options_parse() {
        let cli = parse(&[
            "imagene",
            "grayscale",
            "--url",
            "https://example.com/in.png",
            "-o",
            "out.png",
            "--max-file-size",
            "1048576",
            "--max-pixels",
            "40000000",
        ])
        .expect("parse failed");

        let Command::Grayscale(args) = cli.command;
        assert_eq!(args.max_file_size, Some(1_048_576));
        assert_eq!(args.max_pixels, Some(40_000_000));
    }

    #[test]
    fn zero_pixel_limit_is_rejected_as_resource_limit() {
        let cli = parse(&[
            "imagene", "grayscale", "--local", "in.png", "-o", "out.png", "--max-pixels", "0",
        ])
        .expect("parse failed");
        let Command::Grayscale(args) = cli.command;

        assert!(matches!(grayscale(args), Err(ImageError::ResourceLimit(_))));
    }

    #[test]
    fn local_and_url_conflict() {
        let err = parse(&[
            "imagene",
            "grayscale",
            "--local",
            "in.png",
            "--url",
            "https://example.com/in.png",
            "-o",
            "out.png",
        ])
        .expect_err("conflicting sources must be rejected");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn output_is_required() {
        let err = parse(&["imagene", "grayscale", "--local", "in.png"])
            .expect_err("missing output must be rejected");

        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn grayscale_without_source_reports_no_source() {
        let cli = parse(&["imagene", "grayscale", "-o", "out.png"]).expect("parse failed");
        let Command::Grayscale(args) = cli.command;

        assert!(matches!(grayscale(args), Err(ImageError::NoSourceProvided)));
    }

    #[test]
    fn grayscale_rejects_unknown_output_extension_first() {
        let cli = parse(&["imagene", "grayscale", "--local", "missing.png", "-o", "out.gif"])
            .expect("parse failed");
        let Command::Grayscale(args) = cli.command;

        assert!(matches!(
            grayscale(args),
            Err(ImageError::UnsupportedOutputFormat(_))
        ));
    }
}
