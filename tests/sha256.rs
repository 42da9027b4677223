use saltcore::hash::{Sha256, sha256};
use saltcore::mac::{HmacSha256, hmac_sha256};

use hmac::{Hmac, Mac};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::Digest;

fn hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

fn expect_sha256_eq(input: &[u8], expected: &str) {
    let got = sha256(input);

    assert_eq!(
        got.to_vec(),
        hex(expected),
        "Digest mismatch for input of {} bytes",
        input.len(),
    );
}

fn reference_sha256(input: &[u8]) -> Vec<u8> {
    sha2::Sha256::digest(input).to_vec()
}

fn reference_hmac(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = Hmac::<sha2::Sha256>::new_from_slice(key).unwrap();
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

// -------------------------------------------------------
// 1. OFFICIAL SHA-256 VECTORS
// -------------------------------------------------------

#[test]
fn sha256_empty_vector() {
    expect_sha256_eq(
        b"",
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
    );
}

#[test]
fn sha256_abc_vector() {
    expect_sha256_eq(
        b"abc",
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
    );
}

#[test]
fn sha256_two_block_vector() {
    expect_sha256_eq(
        b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
        "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1",
    );
}

#[test]
fn sha256_million_a() {
    let mut ctx = Sha256::new();
    let chunk = [b'a'; 1000];
    for _ in 0..1000 {
        ctx.update(&chunk);
    }

    assert_eq!(
        ctx.finalize().to_vec(),
        hex("cdc76e5c9914fb9281a1c7e284d73e67f1809a48a497200e046d39ccc7112cd0")
    );
}

// -------------------------------------------------------
// 2. PADDING BOUNDARIES
// -------------------------------------------------------

#[test]
fn sha256_padding_boundaries_match_reference() {
    for len in [0, 1, 54, 55, 56, 57, 63, 64, 65, 119, 120, 127, 128, 129] {
        let input: Vec<u8> = (0..len).map(|i| i as u8).collect();

        assert_eq!(
            sha256(&input).to_vec(),
            reference_sha256(&input),
            "length {len}"
        );
    }
}

// -------------------------------------------------------
// 3. STREAMING
// -------------------------------------------------------

#[test]
fn sha256_chunking_is_invisible() {
    let mut rng = StdRng::seed_from_u64(0x5a17);

    for _ in 0..64 {
        let len = rng.gen_range(0..600);
        let mut input = vec![0u8; len];
        rng.fill(&mut input[..]);

        let mut ctx = Sha256::new();
        let mut rest = &input[..];
        while !rest.is_empty() {
            let take = rng.gen_range(0..=rest.len().min(150));
            ctx.update(&rest[..take]);
            rest = &rest[take..];
        }

        assert_eq!(ctx.finalize(), sha256(&input));
    }
}

#[test]
fn sha256_zero_length_updates_are_ignored() {
    let mut ctx = Sha256::new();
    ctx.update(b"");
    ctx.update(b"ab");
    ctx.update(b"");
    ctx.update(b"c");

    assert_eq!(ctx.finalize(), sha256(b"abc"));
}

#[test]
fn sha256_clone_is_independent() {
    let mut base = Sha256::new();
    base.update(b"common prefix that is longer than nothing");

    let mut left = base.clone();
    let mut right = base.clone();
    left.update(b"left");
    right.update(b"right");

    assert_ne!(left.finalize(), right.finalize());
    assert_eq!(
        base.finalize(),
        sha256(b"common prefix that is longer than nothing")
    );
}

#[test]
fn sha256_finalize_resets_context() {
    let mut ctx = Sha256::new();
    ctx.update(b"first message");
    let _ = ctx.finalize();

    ctx.update(b"abc");
    assert_eq!(ctx.finalize(), sha256(b"abc"));
}

// -------------------------------------------------------
// 4. HMAC-SHA256 (RFC 4231)
// -------------------------------------------------------

#[test]
fn hmac_rfc4231_case_1() {
    let key = [0x0bu8; 20];

    assert_eq!(
        hmac_sha256(&key, b"Hi There").to_vec(),
        hex("b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7")
    );
}

#[test]
fn hmac_rfc4231_case_2() {
    assert_eq!(
        hmac_sha256(b"Jefe", b"what do ya want for nothing?").to_vec(),
        hex("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
    );
}

#[test]
fn hmac_rfc4231_case_6_long_key() {
    let key = [0xaau8; 131];

    assert_eq!(
        hmac_sha256(
            &key,
            b"Test Using Larger Than Block-Size Key - Hash Key First"
        )
        .to_vec(),
        hex("60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54")
    );
}

#[test]
fn hmac_matches_reference_across_key_sizes() {
    let mut rng = StdRng::seed_from_u64(4231);

    for key_len in [0, 1, 31, 32, 63, 64, 65, 200] {
        let mut key = vec![0u8; key_len];
        rng.fill(&mut key[..]);
        let mut data = vec![0u8; rng.gen_range(0..300)];
        rng.fill(&mut data[..]);

        assert_eq!(
            hmac_sha256(&key, &data).to_vec(),
            reference_hmac(&key, &data),
            "key length {key_len}"
        );
    }
}

#[test]
fn hmac_forked_context_matches_fresh_one() {
    let mut prefix = HmacSha256::new(b"key");
    prefix.update(b"salt");

    let mut forked = prefix.clone();
    forked.update(&1u32.to_be_bytes());

    let mut fresh = HmacSha256::new(b"key");
    fresh.update(b"salt\x00\x00\x00\x01");

    assert_eq!(forked.finalize(), fresh.finalize());
}
