//! LFSR and FSM registers, the step function and the keystream batches.

use crate::{
    Error,
    alpha::{div_alpha, mul_alpha},
    consts::{BATCH_LEN, IV_LEN, KEY_MAX_LEN, LFSR_LEN, TRANS_MULTIPLIER, WARMUP_STEPS},
    key_schedule::{KeySchedule, pad_key},
    sbox::bitslice_sbox,
};

#[cfg(feature = "zeroize")]
use cipher::zeroize::Zeroize;

/// Output of one step of the cipher.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepOutput {
    /// FSM output word.
    pub f: u32,
    /// LFSR word shifted out by the step.
    pub dropped: u32,
}

/// Internal state of the cipher: 10 LFSR words, the two FSM registers and
/// the unread part of the last keystream batch.
#[derive(Clone)]
pub struct CipherState {
    lfsr: [u32; LFSR_LEN],
    fsm1: u32,
    fsm2: u32,
    batch: [u8; BATCH_LEN],
    /// Read position in `batch`; `BATCH_LEN` when nothing is buffered.
    pos: usize,
}

impl CipherState {
    /// Set up a new state from a key of 1 to 32 bytes and a 16-byte IV.
    ///
    /// # Errors
    /// [`Error::InvalidKeyLength`] or [`Error::InvalidIvLength`]; the key is
    /// checked first.
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self, Error> {
        let key = pad_key(key)?;
        let iv: &[u8; IV_LEN] = iv.try_into().map_err(|_| Error::InvalidIvLength)?;
        Ok(Self::from_full_key(&key, iv))
    }

    /// Set up a new state from a key already padded to 32 bytes.
    pub(crate) fn from_full_key(key: &[u8; KEY_MAX_LEN], iv: &[u8; IV_LEN]) -> Self {
        Self::from_schedule(&KeySchedule::from_padded(key), iv)
    }

    fn from_schedule(schedule: &KeySchedule, iv: &[u8; IV_LEN]) -> Self {
        let w = &schedule.words;

        let mut lfsr = [0u32; LFSR_LEN];
        lfsr.copy_from_slice(&w[..LFSR_LEN]);
        for (reg, chunk) in lfsr.iter_mut().zip(iv.chunks_exact(4)) {
            *reg ^= u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        let mut state = Self {
            lfsr,
            fsm1: w[10] ^ w[11],
            fsm2: w[12] ^ w[13],
            batch: [0; BATCH_LEN],
            pos: BATCH_LEN,
        };

        for _ in 0..WARMUP_STEPS {
            state.step();
        }

        state
    }

    /// Advance the LFSR and the FSM by one step.
    ///
    /// Keystream bytes already buffered by [`CipherState::fill_keystream`]
    /// are not affected and are still returned first by the next call.
    pub fn step(&mut self) -> StepOutput {
        let s0 = self.lfsr[0];
        let s3 = self.lfsr[3];
        let s9 = self.lfsr[9];

        // lfsr[8] enters only when fsm1 is odd
        let mask = 0u32.wrapping_sub(self.fsm1 & 1);
        let r1 = self.fsm2.wrapping_add(self.lfsr[1] ^ (self.lfsr[8] & mask));
        let r2 = trans(self.fsm1);
        let f = s9.wrapping_add(r1) ^ r2;

        self.lfsr.copy_within(1.., 0);
        self.lfsr[LFSR_LEN - 1] = s9 ^ div_alpha(s3) ^ mul_alpha(s0);
        self.fsm1 = r1;
        self.fsm2 = r2;

        StepOutput { f, dropped: s0 }
    }

    /// Run four steps and return the next four keystream words.
    pub(crate) fn next_batch(&mut self) -> [u32; 4] {
        let mut f = [0u32; 4];
        let mut dropped = [0u32; 4];
        for i in 0..4 {
            let out = self.step();
            f[i] = out.f;
            dropped[i] = out.dropped;
        }

        let mut z = bitslice_sbox([f[3], f[2], f[1], f[0]]);
        for (z, d) in z.iter_mut().zip(dropped) {
            *z ^= d;
        }
        z
    }

    /// Write the next `buf.len()` keystream bytes into `buf`.
    pub fn fill_keystream(&mut self, buf: &mut [u8]) {
        let buffered = (BATCH_LEN - self.pos).min(buf.len());
        let (head, tail) = buf.split_at_mut(buffered);
        head.copy_from_slice(&self.batch[self.pos..self.pos + buffered]);
        self.pos += buffered;

        let mut chunks = tail.chunks_exact_mut(BATCH_LEN);
        for chunk in &mut chunks {
            write_batch(chunk, self.next_batch());
        }

        let rem = chunks.into_remainder();
        if !rem.is_empty() {
            let words = self.next_batch();
            write_batch(&mut self.batch, words);
            rem.copy_from_slice(&self.batch[..rem.len()]);
            self.pos = rem.len();
        }
    }

    /// XOR the next `data.len()` keystream bytes into `data`.
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        let mut block = [0u8; BATCH_LEN];
        for chunk in data.chunks_mut(BATCH_LEN) {
            let ks = &mut block[..chunk.len()];
            self.fill_keystream(ks);
            for (b, k) in chunk.iter_mut().zip(ks.iter()) {
                *b ^= k;
            }
        }
    }
}

impl core::fmt::Debug for CipherState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("CipherState { ... }")
    }
}

#[cfg(feature = "zeroize")]
impl Drop for CipherState {
    fn drop(&mut self) {
        self.lfsr.zeroize();
        self.fsm1.zeroize();
        self.fsm2.zeroize();
        self.batch.zeroize();
        self.pos.zeroize();
    }
}

/// `Trans(z) = (z * 0x54655307 mod 2^32) <<< 7`.
#[inline(always)]
fn trans(z: u32) -> u32 {
    z.wrapping_mul(TRANS_MULTIPLIER).rotate_left(7)
}

/// Serialize four keystream words little-endian into `out`.
#[inline(always)]
pub(crate) fn write_batch(out: &mut [u8], words: [u32; 4]) {
    for (chunk, word) in out.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
}
