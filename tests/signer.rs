use sat_downloader::common::signer::{SignError, UrlSigner};

const SECRET: &str = "AAECAwQFBgcICQoLDA0ODxAREhM=";

#[test]
fn test_sign_matches_published_example() {
    // Google Maps Platform 文档中的签名示例
    let url = "https://maps.googleapis.com/maps/api/geocode/json?address=New+York&client=clientID";
    let signed = UrlSigner::sign(url, "vNIXE0xscrmjlyV-12Nj_BvUPaw=").unwrap();

    assert_eq!(
        signed,
        format!("{}&signature=chaRF2hTJKOScPr-RQCEhZbSzIE=", url)
    );
}

#[test]
fn test_sign_static_map_url() {
    let url = "https://maps.googleapis.com/maps/api/staticmap?center=48.1,11.5&zoom=19&size=512x512&maptype=satellite&key=test-key";
    let signed = UrlSigner::sign(url, SECRET).unwrap();

    assert!(signed.starts_with(url));
    assert!(signed.ends_with("&signature=9z9thvZ92YcpvLi6LES4HlE0JVc="));
    assert_eq!(signed.matches("signature=").count(), 1);
}

#[test]
fn test_sign_is_deterministic() {
    let url = "https://example.com/maps/api/staticmap?center=1,2&key=k";
    let first = UrlSigner::sign(url, SECRET).unwrap();
    let second = UrlSigner::sign(url, SECRET).unwrap();
    assert_eq!(first, second);

    // 主机不参与签名
    let other_host = UrlSigner::sign("http://127.0.0.1:8080/maps/api/staticmap?center=1,2&key=k", SECRET)
        .unwrap();
    let sig = |s: &str| s.rsplit("signature=").next().unwrap().to_string();
    assert_eq!(sig(&first), sig(&other_host));

    // 查询串变化时签名随之变化
    let changed = UrlSigner::sign("https://example.com/maps/api/staticmap?center=1,3&key=k", SECRET)
        .unwrap();
    assert_ne!(sig(&first), sig(&changed));
}

#[test]
fn test_sign_accepts_unpadded_secret() {
    let url = "https://example.com/maps/api/staticmap?center=1,2&key=k";
    let padded = UrlSigner::sign(url, SECRET).unwrap();
    let unpadded = UrlSigner::sign(url, SECRET.trim_end_matches('=')).unwrap();
    assert_eq!(padded, unpadded);
}

#[test]
fn test_sign_rejects_invalid_secret() {
    let url = "https://example.com/maps/api/staticmap?center=1,2&key=k";
    let result = UrlSigner::sign(url, "YOUR_URL_SIGNING_SECRET!");
    assert!(matches!(result, Err(SignError::InvalidSecret(_))));
}

#[test]
fn test_sign_rejects_invalid_url() {
    let result = UrlSigner::sign("not a url", SECRET);
    assert!(matches!(result, Err(SignError::InvalidUrl(_))));
}

#[test]
fn test_sign_url_without_query() {
    let signed = UrlSigner::sign("https://example.com/tile", SECRET).unwrap();
    assert!(signed.starts_with("https://example.com/tile?signature="));
}
