use std::fs;

use base64::Engine;
use url::Url;

use crate::error::LoadError;

/// Moves the bytes of one resource. Runs on loader worker threads.
pub trait Transport: Send + Sync + 'static {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, LoadError>;
}

/// Serves `data:` and `file:` urls, plus `http`/`https` when built with the
/// `http` feature.
#[derive(Default, Clone)]
pub struct DefaultTransport {
    #[cfg(feature = "http")]
    client: reqwest::blocking::Client,
}

impl DefaultTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for DefaultTransport {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, LoadError> {
        match url.scheme() {
            "data" => decode_data_url(url.as_str()),
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| LoadError::UnsupportedScheme(url.to_string()))?;
                fs::read(&path).map_err(|source| LoadError::Io { path, source })
            }
            #[cfg(feature = "http")]
            "http" | "https" => {
                let response = self.client.get(url.clone()).send()?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status(status.as_u16()));
                }
                Ok(response.bytes()?.to_vec())
            }
            scheme => Err(LoadError::UnsupportedScheme(scheme.to_owned())),
        }
    }
}

/// Decodes the payload of a `data:` url, base64 or percent encoded.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, LoadError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| LoadError::DataUrl("missing `data:` prefix".to_owned()))?;
    let (metadata, data) = rest
        .split_once(',')
        .ok_or_else(|| LoadError::DataUrl("missing comma".to_owned()))?;

    let is_base64 = metadata
        .split(';')
        .any(|param| param.trim().eq_ignore_ascii_case("base64"));

    if is_base64 {
        let data: String = percent_decode(data)?
            .into_iter()
            .filter(|byte| !byte.is_ascii_whitespace())
            .map(char::from)
            .collect();
        base64::engine::general_purpose::STANDARD
            .decode(data.as_bytes())
            .map_err(|error| LoadError::DataUrl(error.to_string()))
    } else {
        percent_decode(data)
    }
}

fn percent_decode(input: &str) -> Result<Vec<u8>, LoadError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .and_then(|hex| std::str::from_utf8(hex).ok())
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(|| LoadError::DataUrl(format!("bad escape at byte {i}")))?;
            out.push(hex);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Ok(out)
}
