use clap::Parser;
use std::path::PathBuf;

use crate::common::config::{
    ConfigError, DEFAULT_ENDPOINT, DEFAULT_IMAGE_SIZE, DEFAULT_OXTS_SUBDIR, DEFAULT_TIMEOUT_SECS,
    DEFAULT_WORKERS, DEFAULT_ZOOM, SatelliteConfig,
};

/// 驾驶数据集卫星影像下载器
#[derive(Parser, Debug)]
#[command(name = "satdl")]
#[command(version = "1.0")]
#[command(about = "按 oxts 日志中的坐标批量下载 Google 静态卫星图", long_about = None)]
pub struct Cli {
    /// TOML 配置文件 (提供时其余参数被忽略)
    #[arg(long, value_name = "FILE")]
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// 数据集根目录 (KITTI-360)
    #[arg(long, value_name = "DIR")]
    #[arg(value_hint = clap::ValueHint::DirPath)]
    #[arg(required_unless_present = "config")]
    pub dataset_root: Option<PathBuf>,

    /// Google Maps API 密钥
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// URL 签名密钥 (URL-safe base64)
    #[arg(long, env = "GOOGLE_MAPS_URL_SIGNING_SECRET", hide_env_values = true)]
    pub signing_secret: Option<String>,

    /// 要处理的序列，可重复指定；缺省时处理全部序列
    #[arg(long = "sequence", value_name = "NAME")]
    pub sequences: Vec<String>,

    /// 缩放级别
    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: u8,

    /// 并发下载数
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    #[arg(help = "并发下载数，网络或代理不稳定时可适当调低")]
    pub workers: usize,

    /// HTTP 代理，如 http://127.0.0.1:7890
    #[arg(long, value_name = "URL")]
    #[arg(value_hint = clap::ValueHint::Url)]
    pub proxy: Option<String>,

    /// 瓦片尺寸
    #[arg(long, value_name = "WxH", default_value = DEFAULT_IMAGE_SIZE)]
    pub size: String,

    /// 静态地图接口地址
    #[arg(long, value_name = "URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// 单次请求超时 (秒)
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// 序列目录下的 oxts 日志子目录
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OXTS_SUBDIR)]
    pub oxts_subdir: PathBuf,

    #[arg(long, help = "不显示进度条")]
    pub no_progress: bool,

    #[arg(short, long, help = "输出调试日志")]
    pub verbose: bool,
}

impl Cli {
    /// 生成本次运行的配置
    pub fn into_config(self) -> Result<SatelliteConfig, ConfigError> {
        let config = match &self.config {
            Some(path) => SatelliteConfig::from_file(path)?,
            None => {
                let mut config = SatelliteConfig {
                    api_key: self.api_key.unwrap_or_default(),
                    signing_secret: self.signing_secret.unwrap_or_default(),
                    dataset_root: self.dataset_root.unwrap_or_default(),
                    zoom: self.zoom,
                    max_workers: self.workers,
                    proxy: self.proxy,
                    image_size: self.size,
                    endpoint: self.endpoint,
                    timeout_secs: self.timeout,
                    oxts_subdir: self.oxts_subdir,
                    show_progress: !self.no_progress,
                    ..Default::default()
                };
                if !self.sequences.is_empty() {
                    config.sequences = self.sequences;
                }
                config
            }
        };

        config.validate()?;
        Ok(config)
    }
}
