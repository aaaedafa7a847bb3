//! # imagene — 命令行入口
//!
//! 本文件仅负责日志初始化、参数解析与结果渲染。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::process::ExitCode;

use clap::Parser;
use imagene::error::AppError;
use imagene::image_handler::ProcessReport;
use imagene::image_handler::commands::{self, Cli, Command};

fn init_logger(verbose: bool) -> Result<(), AppError> {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).try_init()?;
    Ok(())
}

fn run(cli: Cli) -> Result<ProcessReport, AppError> {
    init_logger(cli.verbose)?;

    let report = match cli.command {
        Command::Grayscale(args) => commands::grayscale(args)?,
    };
    Ok(report)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(report) => {
            println!(
                "图片已成功转换为灰度 ✅ {}x{} -> {}",
                report.bounds.width,
                report.bounds.height,
                report.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::debug!("处理失败 - stage={} code={}", err.stage(), err.code());
            eprintln!("发生错误：{}", err);
            ExitCode::FAILURE
        }
    }
}
