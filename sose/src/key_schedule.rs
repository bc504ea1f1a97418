//! Key schedule: a key of 1 to 32 bytes expanded into 100 words.

use crate::{
    Error,
    consts::{KEY_MAX_LEN, PHI, SCHEDULE_WORDS},
    sbox::bitslice_sbox,
};

#[cfg(feature = "zeroize")]
use cipher::zeroize::Zeroize;

/// Expanded key material used to seed the LFSR and the FSM.
pub(crate) struct KeySchedule {
    pub(crate) words: [u32; SCHEDULE_WORDS],
}

impl KeySchedule {
    /// Expand a key that already fills the whole 32-byte buffer.
    pub(crate) fn from_padded(padded: &[u8; KEY_MAX_LEN]) -> Self {
        let mut words = [0u32; SCHEDULE_WORDS];

        for (word, chunk) in words.iter_mut().zip(padded.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        for (i, round) in (8..SCHEDULE_WORDS).zip(0u32..) {
            words[i] = (words[i - 8] ^ words[i - 5] ^ words[i - 3] ^ words[i - 1] ^ PHI ^ round)
                .rotate_left(11);
        }

        // whitening, the raw recurrence output must not reach the state
        for group in words.chunks_exact_mut(4) {
            let out = bitslice_sbox([group[0], group[1], group[2], group[3]]);
            group.copy_from_slice(&out);
        }

        Self { words }
    }
}

#[cfg(feature = "zeroize")]
impl Drop for KeySchedule {
    fn drop(&mut self) {
        self.words.zeroize();
    }
}

/// Pad `key` to 32 bytes: a single `0x80` byte marks the end of a short key,
/// the rest is zero.
pub(crate) fn pad_key(key: &[u8]) -> Result<[u8; KEY_MAX_LEN], Error> {
    if key.is_empty() || key.len() > KEY_MAX_LEN {
        return Err(Error::InvalidKeyLength);
    }

    let mut padded = [0u8; KEY_MAX_LEN];
    padded[..key.len()].copy_from_slice(key);
    if key.len() < KEY_MAX_LEN {
        padded[key.len()] = 0x80;
    }
    Ok(padded)
}
