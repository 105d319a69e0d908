use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use thiserror::Error;
use url::Url;

type HmacSha1 = Hmac<Sha1>;

// 控制台复制出来的密钥有时会丢掉结尾的 '='，解码时不强制补齐
const SECRET_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Error)]
pub enum SignError {
    #[error("签名密钥不是合法的 URL-safe base64: {0}")]
    InvalidSecret(#[from] base64::DecodeError),

    #[error("无法解析待签名的URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("无效的签名密钥长度")]
    InvalidKey,
}

/// Google Maps Platform 的 URL 签名工具
pub struct UrlSigner;

impl UrlSigner {
    /// 对请求URL签名，返回追加了 `signature` 参数的完整URL
    ///
    /// 签名内容只包含路径和查询串 (`path?query`)，不包含协议与主机名。
    pub fn sign(url: &str, secret: &str) -> Result<String, SignError> {
        let key = SECRET_ENGINE.decode(secret.trim())?;

        let parsed = Url::parse(url)?;
        let payload = format!("{}?{}", parsed.path(), parsed.query().unwrap_or(""));

        let mut mac = HmacSha1::new_from_slice(&key).map_err(|_| SignError::InvalidKey)?;
        mac.update(payload.as_bytes());
        let signature = URL_SAFE.encode(mac.finalize().into_bytes());

        let separator = if parsed.query().is_some() { '&' } else { '?' };
        Ok(format!("{}{}signature={}", url, separator, signature))
    }
}
