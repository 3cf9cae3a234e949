// src/tools/codec.rs
use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Decoded bytes are not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("URL decode error: {0}")]
    Url(String),

    #[error("Unknown codec mode: {0}")]
    UnknownMode(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodecMode {
    #[serde(rename = "b64")]
    Base64,
    #[serde(rename = "url")]
    Url,
}

impl fmt::Display for CodecMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecMode::Base64 => write!(f, "base64"),
            CodecMode::Url => write!(f, "url"),
        }
    }
}

impl FromStr for CodecMode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "b64" | "base64" => Ok(CodecMode::Base64),
            "url" | "uri" => Ok(CodecMode::Url),
            other => Err(CodecError::UnknownMode(other.to_string())),
        }
    }
}

pub fn encode(mode: CodecMode, input: &str) -> String {
    match mode {
        CodecMode::Base64 => STANDARD.encode(input.as_bytes()),
        CodecMode::Url => urlencoding::encode(input).into_owned(),
    }
}

pub fn decode(mode: CodecMode, input: &str) -> Result<String> {
    match mode {
        CodecMode::Base64 => {
            let bytes = STANDARD.decode(input.trim().as_bytes())?;
            Ok(String::from_utf8(bytes)?)
        }
        CodecMode::Url => urlencoding::decode(input)
            .map(|decoded| decoded.into_owned())
            .map_err(|e| CodecError::Url(e.to_string())),
    }
}
