//! Implementation of a [Sosemanuk]-family stream cipher.
//!
//! The keystream generator combines a 10-word LFSR over GF(2^32), a two
//! register FSM and the Serpent S-box S2 evaluated in bitslice form. Keys of
//! 1 to 32 bytes and 16-byte IVs are supported.
//!
//! The cipher can be driven directly through [`CipherState`] and the free
//! functions [`initialize`], [`step`], [`generate_keystream`] and
//! [`xor_encrypt`], or through the traits of the re-exported [`cipher`]
//! crate with [`Sose`].
//!
//! # ⚠️ Security Warning: Hazmat!
//!
//! This crate does not ensure ciphertexts are authentic! Thus ciphertext integrity
//! is not verified, which can lead to serious vulnerabilities!
//!
//! USE AT YOUR OWN RISK!
//!
//! # Example
//! ```
//! use sose::{generate_keystream, initialize, xor_encrypt};
//!
//! let key: [u8; 16] = core::array::from_fn(|i| i as u8);
//! let iv: [u8; 16] = core::array::from_fn(|i| 0xA0 + i as u8);
//! let plaintext = b"Hello from Sose-like simulator (EDU)!";
//!
//! let mut state = initialize(&key, &iv).unwrap();
//! let keystream = generate_keystream(&mut state, plaintext.len());
//! let ciphertext = xor_encrypt(plaintext, &keystream).unwrap();
//!
//! // decrypt with a fresh state set up from the same key and IV
//! let mut state = initialize(&key, &iv).unwrap();
//! let keystream = generate_keystream(&mut state, ciphertext.len());
//! assert_eq!(xor_encrypt(&ciphertext, &keystream).unwrap(), plaintext);
//! ```
//!
//! With the `cipher` traits:
//! ```
//! use sose::Sose;
//! use sose::cipher::{KeyIvInit, StreamCipher};
//!
//! let key = [0x42; 32];
//! let iv = [0x24; 16];
//! let plaintext = *b"stream ciphers are self-inverse";
//!
//! let mut cipher = Sose::new(&key.into(), &iv.into());
//! let mut buffer = plaintext;
//! cipher.apply_keystream(&mut buffer);
//!
//! // stream ciphers can be used with streaming messages
//! let mut cipher = Sose::new(&key.into(), &iv.into());
//! for chunk in buffer.chunks_mut(3) {
//!     cipher.apply_keystream(chunk);
//! }
//! assert_eq!(buffer, plaintext);
//! ```
//!
//! [Sosemanuk]: https://www.ecrypt.eu.org/stream/e2-sosemanuk.html

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

extern crate alloc;

pub use cipher;

mod alpha;
mod consts;
mod errors;
mod key_schedule;
mod sbox;
mod state;

pub use alpha::{div_alpha, mul_alpha};
pub use errors::Error;
pub use sbox::bitslice_sbox;
pub use state::{CipherState, StepOutput};

use alloc::{vec, vec::Vec};
use cipher::{
    Block, BlockSizeUser, IvSizeUser, KeyIvInit, KeySizeUser, ParBlocksSizeUser,
    StreamCipherBackend, StreamCipherClosure, StreamCipherCore, StreamCipherCoreWrapper,
    consts::{U1, U16, U32},
};

#[cfg(feature = "zeroize")]
use cipher::zeroize::ZeroizeOnDrop;

/// Key of the [`Sose`] cipher (full 32-byte length).
pub type Key = cipher::Key<SoseCore>;

/// Initialization vector of the [`Sose`] cipher.
pub type Iv = cipher::Iv<SoseCore>;

/// The stream cipher, with block buffering provided by the `cipher` crate.
pub type Sose = StreamCipherCoreWrapper<SoseCore>;

type BlockSize = U16;

/// Set up a cipher state from a key of 1 to 32 bytes and a 16-byte IV.
///
/// # Errors
/// [`Error::InvalidKeyLength`] or [`Error::InvalidIvLength`].
pub fn initialize(key: &[u8], iv: &[u8]) -> Result<CipherState, Error> {
    CipherState::new(key, iv)
}

/// Advance `state` by one step.
pub fn step(state: &mut CipherState) -> StepOutput {
    state.step()
}

/// Return the next `length` keystream bytes of `state`.
///
/// Successive calls continue the keystream where the previous call stopped.
/// A zero `length` leaves the state untouched.
#[must_use]
pub fn generate_keystream(state: &mut CipherState, length: usize) -> Vec<u8> {
    let mut out = vec![0u8; length];
    state.fill_keystream(&mut out);
    out
}

/// XOR `data` with the first `data.len()` bytes of `keystream`.
///
/// # Errors
/// [`Error::InsufficientKeystream`] if `keystream` is shorter than `data`.
pub fn xor_encrypt(data: &[u8], keystream: &[u8]) -> Result<Vec<u8>, Error> {
    if keystream.len() < data.len() {
        return Err(Error::InsufficientKeystream);
    }
    Ok(data.iter().zip(keystream).map(|(d, k)| d ^ k).collect())
}

/// Core of the stream cipher, producing 16 keystream bytes per block.
pub struct SoseCore {
    state: CipherState,
}

impl SoseCore {
    /// Create a new core from a key of 1 to 32 bytes and a 16-byte IV.
    ///
    /// # Errors
    /// [`Error::InvalidKeyLength`] or [`Error::InvalidIvLength`].
    pub fn new_from_key_iv(key: &[u8], iv: &[u8]) -> Result<Self, Error> {
        Ok(Self {
            state: CipherState::new(key, iv)?,
        })
    }
}

impl core::fmt::Debug for SoseCore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SoseCore { ... }")
    }
}

impl KeySizeUser for SoseCore {
    type KeySize = U32;
}

impl IvSizeUser for SoseCore {
    type IvSize = U16;
}

impl KeyIvInit for SoseCore {
    fn new(key: &Key, iv: &Iv) -> Self {
        Self {
            state: CipherState::from_full_key(&(*key).into(), &(*iv).into()),
        }
    }
}

impl BlockSizeUser for SoseCore {
    type BlockSize = BlockSize;
}

impl StreamCipherCore for SoseCore {
    #[inline(always)]
    fn remaining_blocks(&self) -> Option<usize> {
        // the keystream has no defined end and the core does not implement
        // the seeking traits
        None
    }

    fn process_with_backend(&mut self, f: impl StreamCipherClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut Backend(&mut self.state));
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for SoseCore {}

struct Backend<'a>(&'a mut CipherState);

impl BlockSizeUser for Backend<'_> {
    type BlockSize = BlockSize;
}

impl ParBlocksSizeUser for Backend<'_> {
    type ParBlocksSize = U1;
}

impl StreamCipherBackend for Backend<'_> {
    #[inline(always)]
    fn gen_ks_block(&mut self, block: &mut Block<Self>) {
        let words = self.0.next_batch();
        state::write_batch(block, words);
    }
}
