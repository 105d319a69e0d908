use anyhow::Result;
use clap::Parser;
use tracing::{Level, debug};

use sat_downloader::cli::Cli;
use sat_downloader::common::logger::PrettyLogger;
use sat_downloader::downloader::SatelliteDownloader;

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let args = Cli::parse();

    // 初始化日志
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = args.into_config()?;
    debug!("运行配置: zoom={}, workers={}", config.zoom, config.max_workers);
    PrettyLogger::file_info("数据集", config.dataset_root.display().to_string());

    let downloader = SatelliteDownloader::new(config)?;
    let results = downloader.run().await;

    let summary = results
        .iter()
        .zip(&downloader.config().sequences)
        .map(|(result, sequence)| match result {
            Ok(report) => format!(
                "{}: 新下载 {}, 失败 {}, 已存在 {}",
                sequence,
                report.succeeded,
                report.failed(),
                report.skipped
            ),
            Err(e) => format!("{}: 未完成 ({})", sequence, e),
        })
        .collect::<Vec<_>>();
    PrettyLogger::completion_summary(summary);

    Ok(())
}
