//! Reading and writing ODF text on disk
//!
//! Archive files are ISO-8859-1: every byte maps to the code point of the
//! same value, so files round-trip byte for byte, 0x80..0x9F included.
//! UTF-8 input is accepted as well; output is always written as Latin-1.
//! Characters above U+00FF fall back to their Windows-1252 byte where one
//! exists and to a numeric character reference otherwise.

use crate::error::Result;
use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, warn};

pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            debug!("Input is not UTF-8, decoding as Latin-1");
            Cow::Owned(bytes.iter().map(|&b| b as char).collect())
        }
    }
}

pub fn encode(text: &str) -> Cow<'_, [u8]> {
    if text.is_ascii() {
        return Cow::Borrowed(text.as_bytes());
    }

    let mut bytes = Vec::with_capacity(text.len());
    let mut unmappable = false;
    for c in text.chars() {
        match u8::try_from(u32::from(c)) {
            Ok(byte) => bytes.push(byte),
            Err(_) => {
                let mut buffer = [0u8; 4];
                let (encoded, _, replaced) = WINDOWS_1252.encode(c.encode_utf8(&mut buffer));
                unmappable |= replaced;
                bytes.extend_from_slice(&encoded);
            }
        }
    }

    if unmappable {
        warn!("Characters outside Latin-1 were written as numeric character references");
    }
    Cow::Owned(bytes)
}

pub fn read_odf_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode(&bytes).into_owned())
}

pub fn write_odf_file(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, encode(text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_latin1() {
        let bytes = b"STATION_NAME = 'Baie des Chaleurs \xe9t\xe9'";
        assert_eq!(decode(bytes), "STATION_NAME = 'Baie des Chaleurs \u{e9}t\u{e9}'");
    }

    #[test]
    fn test_decode_utf8_passthrough() {
        let text = "EVENT_COMMENTS = '\u{ce}le d''Anticosti'";
        assert!(matches!(decode(text.as_bytes()), Cow::Borrowed(_)));
    }

    #[test]
    fn test_encode_writes_latin1() {
        assert_eq!(encode("\u{e9}t\u{e9}").as_ref(), b"\xe9t\xe9");
        assert_eq!(encode("plain").as_ref(), b"plain");
    }

    #[test]
    fn test_c1_bytes_round_trip_unchanged() {
        let bytes = b"COMMENTS = 'a\x85b\x80c\x9f'";
        let text = decode(bytes);
        assert!(text.contains('\u{85}'));
        assert!(!text.contains('\u{2026}'));
        assert_eq!(encode(&text).as_ref(), bytes);
    }

    #[test]
    fn test_encode_beyond_latin1() {
        assert_eq!(encode("\u{20ac}5").as_ref(), b"\x805");
        assert_eq!(encode("\u{3c0}").as_ref(), b"&#960;");
    }
}
