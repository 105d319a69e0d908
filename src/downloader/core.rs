use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::common::client::TileClient;
use crate::common::config::Credentials;
use crate::downloader::models::{DownloadOutcome, DownloadTask};

const PROGRESS_TEMPLATE: &str =
    "{msg} {spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})";

/// 固定宽度的下载工作池，一个序列使用一个实例
pub struct DownloadCore {
    semaphore: Arc<Semaphore>, // 控制并发数
    client: TileClient,
    credentials: Arc<Credentials>,
    show_progress: bool,
}

impl DownloadCore {
    pub fn new(
        max_concurrent: usize,
        client: TileClient,
        credentials: Credentials,
        show_progress: bool,
    ) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            client,
            credentials: Arc::new(credentials),
            show_progress,
        }
    }

    /// 提交全部任务并等待完成，按完成顺序返回每个任务的结果
    ///
    /// 失败在到达时立即打印；单个任务失败不会影响其余任务。
    pub async fn run(&self, tasks: Vec<DownloadTask>, label: &str) -> Vec<DownloadOutcome> {
        let total = tasks.len();
        let pb = self.create_progress_bar(total as u64, label);

        let mut workers = JoinSet::new();
        for task in tasks {
            let semaphore = Arc::clone(&self.semaphore);
            let client = self.client.clone();
            let credentials = Arc::clone(&self.credentials);

            workers.spawn(async move {
                // 信号量在整个运行期间不会关闭
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return DownloadOutcome::Failed(format!(
                        "工作池已关闭，未执行: {}",
                        task.get_output_path().display()
                    ));
                };
                client
                    .fetch(
                        task.coordinate,
                        task.zoom,
                        &credentials,
                        task.get_output_path(),
                    )
                    .await
            });
        }

        let mut outcomes = Vec::with_capacity(total);
        while let Some(joined) = workers.join_next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("下载任务异常退出: {}", e);
                    DownloadOutcome::Failed(format!("一个下载任务发生严重错误: {}", e))
                }
            };

            if let DownloadOutcome::Failed(msg) = &outcome {
                // 隐藏的进度条不会输出 println
                if pb.is_hidden() {
                    warn!("{}", msg);
                } else {
                    pb.println(msg);
                }
            }
            pb.inc(1);
            outcomes.push(outcome);
        }

        pb.finish_and_clear();
        debug!("{}: {} 个任务全部结束", label, outcomes.len());
        outcomes
    }

    fn create_progress_bar(&self, total: u64, label: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::with_template(PROGRESS_TEMPLATE) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message(format!("下载 {}", label));
        pb
    }
}
