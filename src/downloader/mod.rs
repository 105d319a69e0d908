use self::core::DownloadCore;
use error::{BatchError, DownloadError};
use models::{DownloadOutcome, DownloadTask, SequenceReport};
use tracing::{debug, info};

use crate::common::client::TileClient;
use crate::common::config::SatelliteConfig;
use crate::parser::{self, errors::ParseError};
use crate::{log_complete, log_error, log_info, log_step, log_success, log_warning};

pub mod core;
pub mod error;
pub mod models;

/// 一个序列中需要下载的任务
#[derive(Debug)]
pub struct SequencePlan {
    pub tasks: Vec<DownloadTask>,
    /// 输出文件已存在而跳过的帧数
    pub skipped: usize,
}

pub struct SatelliteDownloader {
    config: SatelliteConfig,
    client: TileClient,
}

impl SatelliteDownloader {
    pub fn new(config: SatelliteConfig) -> Result<Self, DownloadError> {
        let client = TileClient::new(&config)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SatelliteConfig {
        &self.config
    }

    /// 依次处理所有序列，单个序列出错不影响后续序列
    pub async fn run(&self) -> Vec<Result<SequenceReport, BatchError>> {
        let mut results = Vec::with_capacity(self.config.sequences.len());

        for sequence in &self.config.sequences {
            log_step!("开始处理序列: {}", sequence);

            let result = self.process_sequence(sequence).await;
            match &result {
                Ok(report) if report.planned == 0 => {
                    log_info!("序列 {} 的所有文件均已下载，跳过", sequence);
                }
                Ok(report) => {
                    log_complete!(
                        "序列 {} 处理完毕: 成功 {}, 失败 {}",
                        sequence,
                        report.succeeded,
                        report.failed()
                    );
                }
                Err(BatchError::Parse(e @ ParseError::MissingDirectory(_)))
                | Err(BatchError::Parse(e @ ParseError::EmptyDirectory(_))) => {
                    log_error!("序列 {}: {}", sequence, e);
                }
                Err(e) => {
                    log_error!("序列 {} 处理中止: {}", sequence, e);
                }
            }
            results.push(result);
        }

        log_success!("所有指定序列均已处理完毕!");
        results
    }

    /// 下载单个序列；目录缺失或日志格式错误时返回错误
    pub async fn process_sequence(&self, sequence: &str) -> Result<SequenceReport, BatchError> {
        let plan = self.plan_sequence(sequence).await?;

        let mut report = SequenceReport {
            planned: plan.tasks.len(),
            skipped: plan.skipped,
            ..Default::default()
        };
        if plan.tasks.is_empty() {
            return Ok(report);
        }

        log_info!(
            "在序列 {} 中找到 {} 个新文件需要下载",
            sequence,
            plan.tasks.len()
        );

        // 每个序列单独一个工作池，跑完再进入下一个序列
        let core = DownloadCore::new(
            self.config.max_workers,
            self.client.clone(),
            self.config.credentials(),
            self.config.show_progress,
        );
        for outcome in core.run(plan.tasks, sequence).await {
            match outcome {
                DownloadOutcome::Saved(_) => report.succeeded += 1,
                DownloadOutcome::Failed(msg) => report.failures.push(msg),
            }
        }

        if !report.failures.is_empty() {
            log_warning!("序列 {} 有 {} 个瓦片下载失败", sequence, report.failed());
        }
        info!(
            "序列 {}: 计划 {}, 跳过 {}, 成功 {}, 失败 {}",
            sequence,
            report.planned,
            report.skipped,
            report.succeeded,
            report.failed()
        );
        Ok(report)
    }

    /// 扫描 oxts 日志并生成任务列表，已存在的输出会被跳过
    pub async fn plan_sequence(&self, sequence: &str) -> Result<SequencePlan, BatchError> {
        let oxts_dir = self.config.oxts_dir(sequence);
        let output_dir = self.config.output_dir(sequence);

        let log_files = parser::list_log_files(&oxts_dir).await?;

        tokio::fs::create_dir_all(&output_dir)
            .await
            .map_err(|source| BatchError::OutputDir {
                path: output_dir.clone(),
                source,
            })?;

        let mut tasks = Vec::new();
        let mut skipped = 0usize;
        for log_file in log_files {
            let index = parser::frame_index(&log_file)?;
            let output_path = output_dir.join(parser::output_file_name(index));

            // 无法判断是否存在时中止该序列，避免覆盖已有文件
            let exists = tokio::fs::try_exists(&output_path)
                .await
                .map_err(|source| ParseError::Io {
                    path: output_path.clone(),
                    source,
                })?;
            if exists {
                skipped += 1;
                continue;
            }

            let coordinate = parser::read_coordinate(&log_file).await?;
            tasks.push(DownloadTask::new(coordinate, self.config.zoom, output_path));
        }

        debug!(
            "序列 {}: {} 个新任务, {} 个已存在",
            sequence,
            tasks.len(),
            skipped
        );
        Ok(SequencePlan { tasks, skipped })
    }
}
