//! Text decoding options for env files.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Character encoding used to decode file contents.
///
/// Serialized names are the short lowercase forms (`utf8`, `latin1`, `ascii`,
/// `utf16le`); common aliases are accepted when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextEncoding {
    /// UTF-8. Invalid sequences are a decode error.
    #[default]
    #[serde(rename = "utf8", alias = "utf-8")]
    Utf8,
    /// ISO-8859-1: every byte maps to the code point of the same value.
    #[serde(rename = "latin1", alias = "binary")]
    Latin1,
    /// 7-bit ASCII: the high bit of every byte is cleared.
    #[serde(rename = "ascii")]
    Ascii,
    /// Little-endian UTF-16.
    #[serde(rename = "utf16le", alias = "utf-16le", alias = "ucs2")]
    Utf16Le,
}

impl TextEncoding {
    /// Decode raw file bytes, returning `None` if they are not valid in this
    /// encoding.
    pub fn decode(self, bytes: Vec<u8>) -> Option<String> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes).ok(),
            TextEncoding::Latin1 => Some(bytes.into_iter().map(char::from).collect()),
            TextEncoding::Ascii => Some(bytes.into_iter().map(|b| char::from(b & 0x7f)).collect()),
            TextEncoding::Utf16Le => {
                if bytes.len() % 2 != 0 {
                    return None;
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).ok()
            }
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextEncoding::Utf8 => "utf8",
            TextEncoding::Latin1 => "latin1",
            TextEncoding::Ascii => "ascii",
            TextEncoding::Utf16Le => "utf16le",
        };
        f.write_str(name)
    }
}

/// Options controlling how env files are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOptions {
    /// Encoding used to decode file contents.
    pub encoding: TextEncoding,
}

impl FileOptions {
    /// Options decoding files with the given encoding.
    pub fn with_encoding(encoding: TextEncoding) -> Self {
        Self { encoding }
    }
}
