use std::path::Path;

use reqwest::{Client, ClientBuilder, Proxy, StatusCode};
use tracing::debug;

use crate::common::config::{Credentials, SatelliteConfig};
use crate::common::signer::UrlSigner;
use crate::downloader::error::DownloadError;
use crate::downloader::models::{Coordinate, DownloadOutcome};

/// 地图类型固定为卫星图
pub const MAP_TYPE: &str = "satellite";

// 静态地图瓦片客户端，内部的 reqwest::Client 自带连接池，可在任务间共享
#[derive(Debug, Clone)]
pub struct TileClient {
    inner: Client,
    endpoint: String,
    image_size: String,
}

impl TileClient {
    pub fn new(config: &SatelliteConfig) -> Result<Self, DownloadError> {
        let mut builder = ClientBuilder::new().timeout(config.timeout());
        match config.proxy.as_deref().filter(|p| !p.is_empty()) {
            Some(proxy) => {
                debug!("使用代理: {}", proxy);
                builder = builder.proxy(Proxy::all(proxy)?);
            }
            // 未配置代理时直连，不读取 HTTP_PROXY 等环境变量
            None => builder = builder.no_proxy(),
        }

        Ok(Self {
            inner: builder.build()?,
            endpoint: config.endpoint.clone(),
            image_size: config.image_size.clone(),
        })
    }

    /// 构建未签名的瓦片请求URL
    pub fn tile_url(&self, coordinate: Coordinate, zoom: u8, api_key: &str) -> String {
        format!(
            "{}?center={},{}&zoom={}&size={}&maptype={}&key={}",
            self.endpoint,
            coordinate.latitude,
            coordinate.longitude,
            zoom,
            self.image_size,
            MAP_TYPE,
            api_key
        )
    }

    /// 下载一个瓦片并写入 `destination`，任何错误都转换为失败结果
    pub async fn fetch(
        &self,
        coordinate: Coordinate,
        zoom: u8,
        credentials: &Credentials,
        destination: &Path,
    ) -> DownloadOutcome {
        match self.try_fetch(coordinate, zoom, credentials, destination).await {
            Ok(()) => DownloadOutcome::Saved(destination.to_path_buf()),
            Err(e @ DownloadError::SignError(_)) => DownloadOutcome::Failed(format!(
                "{}，跳过下载: {}",
                e,
                destination.display()
            )),
            Err(e) => DownloadOutcome::Failed(format!(
                "下载失败: {}. {}",
                destination.display(),
                e
            )),
        }
    }

    async fn try_fetch(
        &self,
        coordinate: Coordinate,
        zoom: u8,
        credentials: &Credentials,
        destination: &Path,
    ) -> Result<(), DownloadError> {
        let url = self.tile_url(coordinate, zoom, &credentials.api_key);
        let signed_url = UrlSigner::sign(&url, &credentials.signing_secret)?;

        debug!("请求瓦片: {} -> {:?}", coordinate, destination);
        let response = self.inner.get(&signed_url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => format!("<响应内容不可读: {}>", e.without_url()),
            };
            return Err(DownloadError::StatusError { status, body });
        }

        let bytes = response.bytes().await?;
        tokio::fs::write(destination, &bytes).await?;
        Ok(())
    }
}
