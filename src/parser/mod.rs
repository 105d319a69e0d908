pub mod errors;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use errors::ParseError;
use tracing::debug;

use crate::downloader::models::Coordinate;

/// oxts 日志文件的扩展名
pub const LOG_EXTENSION: &str = "txt";
/// 输出图像的扩展名
pub const IMAGE_EXTENSION: &str = "png";

/// 列出目录下所有 `.txt` 日志文件，按文件名排序
pub async fn list_log_files(dir: &Path) -> Result<Vec<PathBuf>, ParseError> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ParseError::MissingDirectory(dir.to_path_buf()));
        }
        Err(source) => {
            return Err(ParseError::Io {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    let mut total = 0usize;
    let mut files = Vec::new();
    loop {
        let entry = entries.next_entry().await.map_err(|source| ParseError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let Some(entry) = entry else { break };
        total += 1;

        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some(LOG_EXTENSION) {
            files.push(path);
        }
    }

    if total == 0 {
        return Err(ParseError::EmptyDirectory(dir.to_path_buf()));
    }

    files.sort();
    debug!("{:?} 中共有 {} 个条目, {} 个日志文件", dir, total, files.len());
    Ok(files)
}

/// 把文件名(不含扩展名)解析为帧编号，如 `0000000005.txt` -> 5
pub fn frame_index(path: &Path) -> Result<u64, ParseError> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ParseError::InvalidFrameIndex(path.display().to_string()))?;
    Ok(stem.parse::<u64>()?)
}

/// 帧编号对应的输出文件名，补零到10位
pub fn output_file_name(index: u64) -> String {
    format!("{:010}.{}", index, IMAGE_EXTENSION)
}

/// 取一行中前两个空白分隔的字段作为纬度和经度，其余字段忽略
pub fn parse_coordinate_line(line: &str) -> Result<Coordinate, ParseError> {
    let mut fields = line.split_whitespace();
    let (Some(lat), Some(lon)) = (fields.next(), fields.next()) else {
        return Err(ParseError::MissingField(line.to_string()));
    };

    Ok(Coordinate::new(parse_number(lat)?, parse_number(lon)?))
}

fn parse_number(value: &str) -> Result<f64, ParseError> {
    value.parse::<f64>().map_err(|source| ParseError::InvalidNumber {
        value: value.to_string(),
        source,
    })
}

/// 读取日志文件的第一行并解析坐标
pub async fn read_coordinate(path: &Path) -> Result<Coordinate, ParseError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let first_line = content.lines().next().unwrap_or("");
    parse_coordinate_line(first_line)
}
