use std::fmt;
use std::path::{Path, PathBuf};

/// 单帧 GPS 日志中的经纬度
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// 一个瓦片下载任务，创建后不再修改
#[derive(Debug, Clone)]
pub struct DownloadTask {
    pub coordinate: Coordinate,
    pub zoom: u8,
    pub output_path: PathBuf,
}

impl DownloadTask {
    pub fn new(coordinate: Coordinate, zoom: u8, output_path: PathBuf) -> Self {
        Self {
            coordinate,
            zoom,
            output_path,
        }
    }

    pub fn get_output_path(&self) -> &Path {
        &self.output_path
    }
}

// --------------------------------------------------------------------
/// 单个任务的结果：成功时带输出路径，失败时带可读的错误信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved(PathBuf),
    Failed(String),
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Saved(_))
    }
}

/// 一个序列处理完成后的统计
#[derive(Debug, Clone, Default)]
pub struct SequenceReport {
    pub planned: usize,
    pub skipped: usize,
    pub succeeded: usize,
    pub failures: Vec<String>,
}

impl SequenceReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}
