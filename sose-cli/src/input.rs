//! `key=` / `iv=` / payload input files.
//!
//! ```text
//! key=000102030405060708090a0b0c0d0e0f
//! iv=a0a1a2a3a4a5a6a7a8a9aaabacadaeaf
//! plaintext=Hello from Sose-like simulator (EDU)!
//! ```

use std::path::PathBuf;

use crate::errors::{CliError, CliResult};

/// Data to encrypt or decrypt, as found in the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Plaintext(Vec<u8>),
    CiphertextHex(Vec<u8>),
    CiphertextFile(PathBuf),
}

/// Parsed input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    pub key: Vec<u8>,
    pub iv: Vec<u8>,
    pub payload: Payload,
}

/// Which payload line the caller expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encrypt,
    Decrypt,
}

/// Parse the contents of an input file. Unknown lines are ignored and later
/// lines override earlier ones.
pub fn parse_params(text: &str, mode: Mode) -> CliResult<Params> {
    let mut key = None;
    let mut iv = None;
    let mut payload = None;

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        let Some((name, value)) = line.split_once('=') else {
            continue;
        };
        match (name.trim(), mode) {
            ("key", _) => key = Some(decode_hex("key", value)?),
            ("iv", _) => iv = Some(decode_hex("iv", value)?),
            ("plaintext", Mode::Encrypt) => payload = Some(Payload::Plaintext(text_or_hex(value))),
            ("ciphertext", Mode::Decrypt) => {
                payload = Some(Payload::CiphertextHex(decode_hex("ciphertext", value)?));
            }
            ("ciphertext_file", Mode::Decrypt) => {
                payload = Some(Payload::CiphertextFile(PathBuf::from(value.trim())));
            }
            _ => {}
        }
    }

    let payload_field = match mode {
        Mode::Encrypt => "plaintext",
        Mode::Decrypt => "ciphertext",
    };
    Ok(Params {
        key: key.ok_or(CliError::MissingField("key"))?,
        iv: iv.ok_or(CliError::MissingField("iv"))?,
        payload: payload.ok_or(CliError::MissingField(payload_field))?,
    })
}

/// Decode a hex field, ignoring surrounding and embedded whitespace.
pub fn decode_hex(field: &'static str, value: &str) -> CliResult<Vec<u8>> {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(compact).map_err(|source| CliError::Hex { field, source })
}

/// A plaintext is read as hex when it is a non-empty, even-length run of hex
/// digits, and as text otherwise.
pub fn text_or_hex(value: &str) -> Vec<u8> {
    let is_hex = !value.is_empty()
        && value.len() % 2 == 0
        && value.bytes().all(|b| b.is_ascii_hexdigit());
    if is_hex {
        if let Ok(bytes) = hex::decode(value) {
            return bytes;
        }
    }
    value.as_bytes().to_vec()
}

/// Render bytes for the terminal, escaping anything that is not printable.
pub fn printable(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            b' '..=b'~' => char::from(b).to_string(),
            _ => format!("\\x{b:02X}"),
        })
        .collect()
}
