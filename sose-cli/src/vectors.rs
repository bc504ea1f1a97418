//! Test vector generation and verification.
//!
//! Input lines have the form `plaintext|key_hex|iv_hex`; blank lines and lines
//! starting with `#` are skipped. Every vector is written as a block of
//! `name=value` lines terminated by `---`, and vector files are read back in
//! the same format.

use std::fmt;
use std::path::Path;

use crate::errors::{CliError, CliResult};
use crate::input::decode_hex;

/// One line of the vector input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorInput {
    pub plaintext: String,
    pub key_hex: String,
    pub iv_hex: String,
}

pub fn parse_vector_inputs(text: &str) -> CliResult<Vec<VectorInput>> {
    let mut inputs = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.splitn(3, '|');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(plaintext), Some(key), Some(iv)) => inputs.push(VectorInput {
                plaintext: plaintext.to_owned(),
                key_hex: key.trim().to_owned(),
                iv_hex: iv.trim().to_owned(),
            }),
            _ => return Err(CliError::MalformedVectorLine { line: idx + 1 }),
        }
    }
    Ok(inputs)
}

/// Encrypt the plaintext of `input` and render the resulting vector block.
pub fn render_vector(input: &VectorInput) -> CliResult<String> {
    let key = decode_hex("key", &input.key_hex)?;
    let iv = decode_hex("iv", &input.iv_hex)?;
    let plaintext = input.plaintext.as_bytes();

    let mut state = sose::initialize(&key, &iv)?;
    let keystream = sose::generate_keystream(&mut state, plaintext.len());
    let ciphertext = sose::xor_encrypt(plaintext, &keystream)?;

    Ok(format!(
        "plaintext={plaintext}\n\
         key={key}\n\
         iv={iv}\n\
         keystream={keystream}\n\
         expected_ciphertext={ciphertext}\n\
         expected_recovered={plaintext}\n\
         ---\n",
        plaintext = input.plaintext,
        key = input.key_hex,
        iv = input.iv_hex,
        keystream = hex::encode(&keystream),
        ciphertext = hex::encode(&ciphertext),
    ))
}

/// Comment header of a generated vector file.
pub fn render_header(source: &Path) -> String {
    format!(
        "# Test vectors for the sose stream cipher\n\
         # Format: field=value, separated by --- for each test case\n\
         # Auto-generated from input file: {}\n\n",
        source.display()
    )
}

/// One vector read back from a generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorRecord {
    pub plaintext: String,
    pub key: Vec<u8>,
    pub iv: Vec<u8>,
    pub keystream: Vec<u8>,
    pub expected_ciphertext: Vec<u8>,
    pub expected_recovered: String,
}

#[derive(Default)]
struct PendingRecord {
    plaintext: Option<String>,
    key: Option<Vec<u8>>,
    iv: Option<Vec<u8>>,
    keystream: Option<Vec<u8>>,
    expected_ciphertext: Option<Vec<u8>>,
    expected_recovered: Option<String>,
}

impl PendingRecord {
    fn is_empty(&self) -> bool {
        self.plaintext.is_none()
            && self.key.is_none()
            && self.iv.is_none()
            && self.keystream.is_none()
            && self.expected_ciphertext.is_none()
            && self.expected_recovered.is_none()
    }

    fn finish(self) -> CliResult<VectorRecord> {
        Ok(VectorRecord {
            plaintext: self.plaintext.ok_or(CliError::MissingField("plaintext"))?,
            key: self.key.ok_or(CliError::MissingField("key"))?,
            iv: self.iv.ok_or(CliError::MissingField("iv"))?,
            keystream: self.keystream.ok_or(CliError::MissingField("keystream"))?,
            expected_ciphertext: self
                .expected_ciphertext
                .ok_or(CliError::MissingField("expected_ciphertext"))?,
            expected_recovered: self
                .expected_recovered
                .ok_or(CliError::MissingField("expected_recovered"))?,
        })
    }
}

/// Parse the `---` separated blocks of a vector file. A last block without a
/// closing `---` is accepted.
pub fn parse_vector_records(text: &str) -> CliResult<Vec<VectorRecord>> {
    let mut records = Vec::new();
    let mut pending = PendingRecord::default();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        if line.trim() == "---" {
            records.push(std::mem::take(&mut pending).finish()?);
            continue;
        }
        let Some((name, value)) = line.split_once('=') else {
            return Err(CliError::MalformedVectorBlock { line: idx + 1 });
        };
        match name.trim() {
            "plaintext" => pending.plaintext = Some(value.to_owned()),
            "key" => pending.key = Some(decode_hex("key", value)?),
            "iv" => pending.iv = Some(decode_hex("iv", value)?),
            "keystream" => pending.keystream = Some(decode_hex("keystream", value)?),
            "expected_ciphertext" => {
                pending.expected_ciphertext = Some(decode_hex("expected_ciphertext", value)?);
            }
            "expected_recovered" => pending.expected_recovered = Some(value.to_owned()),
            _ => return Err(CliError::MalformedVectorBlock { line: idx + 1 }),
        }
    }

    if !pending.is_empty() {
        records.push(pending.finish()?);
    }
    Ok(records)
}

/// Outcome of the three checks run on a vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub keystream: bool,
    pub ciphertext: bool,
    pub recovered: bool,
}

impl Verdict {
    pub fn passed(&self) -> bool {
        self.keystream && self.ciphertext && self.recovered
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return f.write_str("PASS");
        }
        let failed: Vec<&str> = [
            (self.keystream, "keystream"),
            (self.ciphertext, "ciphertext"),
            (self.recovered, "recovered plaintext"),
        ]
        .into_iter()
        .filter_map(|(ok, name)| (!ok).then_some(name))
        .collect();
        write!(f, "FAIL ({} mismatch)", failed.join(", "))
    }
}

/// Recompute `record` from its key, IV and plaintext.
///
/// The recovered plaintext is obtained by decrypting the stored ciphertext, so
/// it must match both the plaintext and `expected_recovered`.
pub fn check_vector(record: &VectorRecord) -> CliResult<Verdict> {
    let plaintext = record.plaintext.as_bytes();
    let mut state = sose::initialize(&record.key, &record.iv)?;
    let keystream = sose::generate_keystream(&mut state, plaintext.len());
    let ciphertext = sose::xor_encrypt(plaintext, &keystream)?;
    let recovered = sose::xor_encrypt(&record.expected_ciphertext, &keystream).ok();

    Ok(Verdict {
        keystream: keystream == record.keystream,
        ciphertext: ciphertext == record.expected_ciphertext,
        recovered: recovered.as_deref() == Some(plaintext)
            && record.expected_recovered.as_bytes() == plaintext,
    })
}
