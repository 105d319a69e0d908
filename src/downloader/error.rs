use std::error::Error as _;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::common::signer::SignError;
use crate::parser::errors::ParseError;

/// 单个瓦片下载中可能出现的错误，在任务边界转换为 `DownloadOutcome::Failed`
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("无法对URL进行签名: {0}")]
    SignError(#[from] SignError),

    #[error("状态码: {status}. 响应内容: {body}")]
    StatusError { status: StatusCode, body: String },

    #[error("网络错误: {}", describe_http_error(.0))]
    HttpError(#[source] reqwest::Error),

    #[error("IO错误: {0}")]
    IoError(#[from] std::io::Error),
}

// 去掉URL，避免签名和 API 密钥出现在日志里
impl From<reqwest::Error> for DownloadError {
    fn from(err: reqwest::Error) -> Self {
        DownloadError::HttpError(err.without_url())
    }
}

/// 拼接 reqwest 错误及其完整的 source 链，并标注超时/连接失败
fn describe_http_error(err: &reqwest::Error) -> String {
    let mut message = if err.is_timeout() {
        format!("[超时] {}", err)
    } else if err.is_connect() {
        format!("[连接失败] {}", err)
    } else {
        err.to_string()
    };

    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// 序列级别的错误，只中止当前序列
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("解析oxts数据失败: {0}")]
    Parse(#[from] ParseError),

    #[error("无法创建输出目录 {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}
