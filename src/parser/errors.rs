use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("找不到oxts文件夹: {0}")]
    MissingDirectory(PathBuf),
    #[error("oxts文件夹为空: {0}")]
    EmptyDirectory(PathBuf),
    #[error("无效的帧编号: {0}")]
    InvalidFrameIndex(String),
    #[error("字段不足，至少需要纬度和经度: {0:?}")]
    MissingField(String),
    #[error("无效的数值 {value:?}: {source}")]
    InvalidNumber {
        value: String,
        source: ParseFloatError,
    },
    #[error("读取 {path} 失败: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<ParseIntError> for ParseError {
    fn from(err: ParseIntError) -> Self {
        ParseError::InvalidFrameIndex(err.to_string())
    }
}
