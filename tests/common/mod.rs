#![allow(dead_code)]

pub mod tile_server;

use std::fs;
use std::path::Path;

use sat_downloader::common::config::SatelliteConfig;

/// 一个 20 字节的签名密钥 (0x00..=0x13)
pub const TEST_SECRET: &str = "AAECAwQFBgcICQoLDA0ODxAREhM=";

/// 在 `root/<sequence>/oxts/data` 下写入帧日志，`lines[i]` 作为第 i 帧的内容
pub fn write_sequence(root: &Path, sequence: &str, lines: &[&str]) {
    let dir = root.join(sequence).join("oxts").join("data");
    fs::create_dir_all(&dir).unwrap();
    for (index, line) in lines.iter().enumerate() {
        fs::write(dir.join(format!("{:010}.txt", index)), format!("{}\n", line)).unwrap();
    }
}

pub fn test_config(root: &Path, endpoint: &str, sequences: &[&str]) -> SatelliteConfig {
    SatelliteConfig {
        api_key: "test-key".to_string(),
        signing_secret: TEST_SECRET.to_string(),
        dataset_root: root.to_path_buf(),
        sequences: sequences.iter().map(|s| s.to_string()).collect(),
        max_workers: 4,
        endpoint: endpoint.to_string(),
        timeout_secs: 5,
        show_progress: false,
        ..Default::default()
    }
}
