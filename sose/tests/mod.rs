use cipher::{KeyIvInit, StreamCipher};
use hex_literal::hex;
use sose::{
    CipherState, Error, Sose, SoseCore, generate_keystream, initialize, step, xor_encrypt,
};

const KEY: [u8; 16] = hex!("000102030405060708090A0B0C0D0E0F");
const IV: [u8; 16] = hex!("A0A1A2A3A4A5A6A7A8A9AAABACADAEAF");
const PLAINTEXT: &[u8] = b"Hello from Sose-like simulator (EDU)!";

// (key, iv, first keystream bytes)
const KEYSTREAMS: [(&[u8], [u8; 16], [u8; 48]); 3] = [
    (
        &KEY,
        IV,
        hex!(
            "2599f12414fced9505d545467b77c3dd"
            "8e45a407a4d984e910cfd7d51ccb3dda"
            "cc643b9b342b09d264654a0db229dc3e"
        ),
    ),
    (
        &hex!("000102030405060708090A0B0C0D0E0F101112131415161718191A1B1C1D1E1F"),
        [0; 16],
        hex!(
            "2278b1d12b7b7cf812d071f8024bb2b7"
            "02d1472823cb9bf41382994d462d9456"
            "7b726f3dc477070c4cfae7f09610e73a"
        ),
    ),
    (
        &[0x42],
        [0; 16],
        hex!(
            "7532997d395f6db35998e607e19c6ee7"
            "9c221a19157bcf2160ea5d4534b2acc5"
            "2d65d6cbb4cac243b57bcdd49bde0141"
        ),
    ),
];

#[test]
fn known_keystreams() {
    for (key, iv, ks) in KEYSTREAMS.iter() {
        let mut state = initialize(key, iv).unwrap();
        assert_eq!(generate_keystream(&mut state, ks.len()), ks);
    }
}

#[test]
fn known_ciphertext() {
    const CIPHERTEXT: [u8; 37] = hex!(
        "6dfc9d487bdc8be76ab865151404a6f0"
        "e22ccf6284aaed8465a3b6a173b91df2"
        "89206eb215"
    );

    let mut state = initialize(&KEY, &IV).unwrap();
    let keystream = generate_keystream(&mut state, PLAINTEXT.len());
    let ciphertext = xor_encrypt(PLAINTEXT, &keystream).unwrap();
    assert_eq!(ciphertext, CIPHERTEXT);

    let mut state = initialize(&KEY, &IV).unwrap();
    let keystream = generate_keystream(&mut state, ciphertext.len());
    let recovered = xor_encrypt(&ciphertext, &keystream).unwrap();
    assert_eq!(recovered, PLAINTEXT);
}

#[test]
fn self_inverse() {
    let plaintext: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    for key_len in [1, 5, 16, 31, 32] {
        let key: Vec<u8> = (0..key_len as u8).map(|b| b.wrapping_mul(37)).collect();

        let mut enc = initialize(&key, &IV).unwrap();
        let ks1 = generate_keystream(&mut enc, plaintext.len());
        let ciphertext = xor_encrypt(&plaintext, &ks1).unwrap();
        assert_ne!(ciphertext, plaintext);

        let mut dec = initialize(&key, &IV).unwrap();
        let ks2 = generate_keystream(&mut dec, ciphertext.len());
        assert_eq!(xor_encrypt(&ciphertext, &ks2).unwrap(), plaintext);
    }
}

#[test]
fn streaming_equivalence() {
    let expected = generate_keystream(&mut initialize(&KEY, &IV).unwrap(), 100);
    for a in 0..=50 {
        for b in [0, 1, 3, 15, 16, 17, 50] {
            let mut state = initialize(&KEY, &IV).unwrap();
            let mut got = generate_keystream(&mut state, a);
            got.extend(generate_keystream(&mut state, b));
            assert_eq!(got, expected[..a + b], "split {a} + {b}");
        }
    }
}

#[test]
fn many_small_calls() {
    let expected = generate_keystream(&mut initialize(&KEY, &IV).unwrap(), 256);
    for n in 1..40 {
        let mut state = initialize(&KEY, &IV).unwrap();
        let mut got = Vec::new();
        while got.len() < expected.len() {
            let take = n.min(expected.len() - got.len());
            got.extend(generate_keystream(&mut state, take));
        }
        assert_eq!(got, expected, "chunk size {n}");
    }
}

#[test]
fn zero_length_does_not_advance() {
    let mut state = initialize(&KEY, &IV).unwrap();
    let mut reference = state.clone();

    assert!(generate_keystream(&mut state, 0).is_empty());
    assert_eq!(step(&mut state), step(&mut reference));
}

#[test]
fn deterministic_across_instances() {
    let mut a = initialize(&KEY, &IV).unwrap();
    let mut other = initialize(&[0xFF; 7], &[0x11; 16]).unwrap();
    let mut b = initialize(&KEY, &IV).unwrap();

    let ka = generate_keystream(&mut a, 64);
    let _ = generate_keystream(&mut other, 64);
    let kb = generate_keystream(&mut b, 64);
    assert_eq!(ka, kb);
}

#[test]
fn different_ivs_differ() {
    let mut a = initialize(&KEY, &IV).unwrap();
    let mut iv = IV;
    iv[15] ^= 1;
    let mut b = initialize(&KEY, &iv).unwrap();
    assert_ne!(generate_keystream(&mut a, 32), generate_keystream(&mut b, 32));
}

#[test]
fn parallel_instances() {
    let expected = generate_keystream(&mut initialize(&KEY, &IV).unwrap(), 4096);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                let mut state = initialize(&KEY, &IV).unwrap();
                generate_keystream(&mut state, 4096)
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn invalid_input() {
    assert_eq!(initialize(&[], &IV).unwrap_err(), Error::InvalidKeyLength);
    assert_eq!(initialize(&[0; 33], &IV).unwrap_err(), Error::InvalidKeyLength);
    assert_eq!(initialize(&KEY, &IV[..15]).unwrap_err(), Error::InvalidIvLength);
    assert_eq!(initialize(&KEY, &[0; 17]).unwrap_err(), Error::InvalidIvLength);
    // the key is checked first
    assert_eq!(initialize(&[], &[]).unwrap_err(), Error::InvalidKeyLength);

    assert_eq!(
        xor_encrypt(b"abc", &[1, 2]).unwrap_err(),
        Error::InsufficientKeystream
    );
    assert_eq!(xor_encrypt(b"abc", &[1, 2, 3, 4]).unwrap(), [0x60, 0x60, 0x60]);
    assert!(xor_encrypt(&[], &[]).unwrap().is_empty());
}

#[test]
fn apply_keystream_in_place() {
    let mut state = initialize(&KEY, &IV).unwrap();
    let mut buf = PLAINTEXT.to_vec();
    for chunk in buf.chunks_mut(5) {
        state.apply_keystream(chunk);
    }

    let mut state = initialize(&KEY, &IV).unwrap();
    let keystream = generate_keystream(&mut state, PLAINTEXT.len());
    assert_eq!(buf, xor_encrypt(PLAINTEXT, &keystream).unwrap());
}

#[test]
fn cipher_traits_match_core_api() {
    let (key, iv, ks) = &KEYSTREAMS[1];
    let key: [u8; 32] = (*key).try_into().unwrap();

    for n in 1..ks.len() {
        let mut cipher = Sose::new(&key.into(), &(*iv).into());
        let mut d = *ks;
        for chunk in d.chunks_mut(n) {
            cipher.apply_keystream(chunk);
        }
        assert!(d.iter().all(|&v| v == 0));
    }
}

#[test]
fn cipher_traits_short_key() {
    for (key, iv, ks) in KEYSTREAMS.iter() {
        let core = SoseCore::new_from_key_iv(key, iv).unwrap();
        let mut cipher = Sose::from_core(core);
        let mut d = *ks;
        cipher.apply_keystream(&mut d);
        assert!(d.iter().all(|&v| v == 0));
    }
    assert_eq!(
        SoseCore::new_from_key_iv(&KEY, &[0; 8]).unwrap_err(),
        Error::InvalidIvLength
    );
}

#[test]
fn state_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CipherState>();
    assert_send_sync::<Sose>();
}
