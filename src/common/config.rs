use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/staticmap";
pub const DEFAULT_IMAGE_SIZE: &str = "512x512";
/// 约 0.19 米/像素
pub const DEFAULT_ZOOM: u8 = 19;
pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_OXTS_SUBDIR: &str = "oxts/data";

/// KITTI-360 中带 oxts 数据的全部序列
pub const DEFAULT_SEQUENCES: [&str; 9] = [
    "2013_05_28_drive_0000_sync",
    "2013_05_28_drive_0002_sync",
    "2013_05_28_drive_0003_sync",
    "2013_05_28_drive_0004_sync",
    "2013_05_28_drive_0005_sync",
    "2013_05_28_drive_0006_sync",
    "2013_05_28_drive_0007_sync",
    "2013_05_28_drive_0009_sync",
    "2013_05_28_drive_0010_sync",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置文件 {path} 失败: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("配置文件格式错误: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("缺少必填配置: {0}")]
    Missing(&'static str),
    #[error("并发数必须大于0")]
    ZeroWorkers,
}

/// API 密钥和 URL 签名密钥
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub signing_secret: String,
}

/// 一次运行的全部配置，启动时构造后显式传给下载器
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SatelliteConfig {
    pub api_key: String,
    pub signing_secret: String,
    pub dataset_root: PathBuf,
    pub sequences: Vec<String>,
    pub zoom: u8,
    pub max_workers: usize,
    /// 形如 `http://127.0.0.1:7890`，为空时直连
    pub proxy: Option<String>,
    pub image_size: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    /// 相对序列目录的 oxts 日志子目录
    pub oxts_subdir: PathBuf,
    pub show_progress: bool,
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            signing_secret: String::new(),
            dataset_root: PathBuf::new(),
            sequences: DEFAULT_SEQUENCES.iter().map(|s| s.to_string()).collect(),
            zoom: DEFAULT_ZOOM,
            max_workers: DEFAULT_WORKERS,
            proxy: None,
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            oxts_subdir: PathBuf::from(DEFAULT_OXTS_SUBDIR),
            show_progress: true,
        }
    }
}

impl SatelliteConfig {
    /// 从 TOML 文件加载配置，未出现的字段使用默认值
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// 检查必填项
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::Missing("api_key"));
        }
        if self.signing_secret.is_empty() {
            return Err(ConfigError::Missing("signing_secret"));
        }
        if self.dataset_root.as_os_str().is_empty() {
            return Err(ConfigError::Missing("dataset_root"));
        }
        if self.max_workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            api_key: self.api_key.clone(),
            signing_secret: self.signing_secret.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn oxts_dir(&self, sequence: &str) -> PathBuf {
        self.dataset_root.join(sequence).join(&self.oxts_subdir)
    }

    pub fn output_dir(&self, sequence: &str) -> PathBuf {
        self.dataset_root.join(sequence).join(format!(
            "data_2d_satellite_zoom={}_{}",
            self.zoom, self.image_size
        ))
    }
}
