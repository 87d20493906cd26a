use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Compute the access token for a cache path.
///
/// Without a signing key the cache is addressed with the literal `unsafe`
/// token. With one, the token is the URL-safe base64 (with padding) of the
/// HMAC-SHA1 of the cache path, matching the signed-URL contract of the
/// downstream image cache byte for byte.
pub fn access_token(cache_path: &str, signing_key: Option<&str>) -> String {
    match signing_key {
        None => "unsafe".to_string(),
        Some(key) => {
            let mut mac =
                HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
            mac.update(cache_path.as_bytes());
            URL_SAFE.encode(mac.finalize().into_bytes())
        }
    }
}
