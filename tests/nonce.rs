use saltcore::Error;
use saltcore::nonce::{
    NONCE_BYTES, Nonce, advance, advance_evenly, advance_oddly, calculate_delta, calculate_nonce,
    delta_from_parts,
};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn lanes(nonce: &[u8]) -> [u64; 3] {
    let mut out = [0u64; 3];
    for (lane, chunk) in out.iter_mut().zip(nonce.chunks_exact(8)) {
        *lane = u64::from_le_bytes(chunk.try_into().unwrap());
    }
    out
}

fn random_nonce(rng: &mut StdRng) -> [u8; NONCE_BYTES] {
    let mut n = [0u8; NONCE_BYTES];
    rng.fill(&mut n[..]);
    n
}

// -------------------------------------------------------
// 1. ADVANCE
// -------------------------------------------------------

#[test]
fn advance_adds_to_every_lane() {
    let mut n = [0u8; NONCE_BYTES];
    advance(&mut n, 5).unwrap();

    assert_eq!(lanes(&n), [5, 5, 5]);
}

#[test]
fn advance_repeated_equals_single_step() {
    let mut rng = StdRng::seed_from_u64(24);

    for delta in [1u32, 2, 17, 128, 255] {
        let start = random_nonce(&mut rng);

        let mut stepped = start;
        for _ in 0..delta {
            advance(&mut stepped, 1).unwrap();
        }

        let mut jumped = start;
        advance(&mut jumped, delta).unwrap();

        assert_eq!(stepped, jumped, "delta {delta}");
    }
}

#[test]
fn lanes_wrap_without_carrying() {
    let mut n = [0u8; NONCE_BYTES];
    n[..8].copy_from_slice(&u64::MAX.to_le_bytes());
    n[8..16].copy_from_slice(&(u64::MAX - 1).to_le_bytes());

    advance(&mut n, 3).unwrap();

    assert_eq!(lanes(&n), [2, 1, 3]);
}

#[test]
fn advance_rejects_out_of_range_delta() {
    let mut n = [0u8; NONCE_BYTES];

    assert_eq!(advance(&mut n, 0), Err(Error::DeltaOutOfRange(0)));
    assert_eq!(advance(&mut n, 256), Err(Error::DeltaOutOfRange(256)));
    assert_eq!(n, [0u8; NONCE_BYTES]);
}

#[test]
fn advance_rejects_wrong_length() {
    let mut short = [0u8; 23];

    assert_eq!(
        advance(&mut short, 1),
        Err(Error::InvalidLength {
            what: "nonce",
            expected: 24,
            actual: 23
        })
    );
}

#[test]
fn odd_and_even_steps() {
    let mut n = [0u8; NONCE_BYTES];
    advance_oddly(&mut n).unwrap();
    assert_eq!(lanes(&n), [1, 1, 1]);

    advance_evenly(&mut n).unwrap();
    assert_eq!(lanes(&n), [3, 3, 3]);
}

// -------------------------------------------------------
// 2. DERIVE AND DIFF
// -------------------------------------------------------

#[test]
fn calculate_nonce_leaves_input_untouched() {
    let initial = [9u8; NONCE_BYTES];
    let next = calculate_nonce(&initial, 1000).unwrap();

    assert_eq!(initial, [9u8; NONCE_BYTES]);
    assert_eq!(calculate_delta(&initial, &next).unwrap(), Some(1000));
}

#[test]
fn calculate_nonce_accepts_large_deltas() {
    let delta = delta_from_parts(0xdead_beef, 0x0bad_f00d);
    let next = calculate_nonce(&[0u8; NONCE_BYTES], delta).unwrap();

    assert_eq!(lanes(&next), [delta; 3]);
}

#[test]
fn delta_round_trip() {
    let mut rng = StdRng::seed_from_u64(2424);

    for _ in 0..256 {
        let n = random_nonce(&mut rng);
        let d: u64 = rng.r#gen();

        let m = calculate_nonce(&n, d).unwrap();
        assert_eq!(calculate_delta(&n, &m).unwrap(), Some(d));
    }
}

#[test]
fn calculate_nonce_matches_advance() {
    let mut rng = StdRng::seed_from_u64(7);
    let n = random_nonce(&mut rng);

    let mut advanced = n;
    advance(&mut advanced, 200).unwrap();

    assert_eq!(calculate_nonce(&n, 200).unwrap(), advanced);
}

#[test]
fn unrelated_nonces_have_no_delta() {
    let a = [0u8; NONCE_BYTES];
    let mut b = calculate_nonce(&a, 5).unwrap();
    b[20] ^= 1;

    assert_eq!(calculate_delta(&a, &b).unwrap(), None);
}

#[test]
fn calculate_delta_checks_lengths() {
    assert!(calculate_delta(&[0u8; 24], &[0u8; 16]).is_err());
    assert!(calculate_nonce(&[0u8; 25], 1).is_err());
}

// -------------------------------------------------------
// 3. NONCE TYPE
// -------------------------------------------------------

#[test]
fn nonce_type_mirrors_free_functions() {
    let mut rng = StdRng::seed_from_u64(99);
    let bytes = random_nonce(&mut rng);
    let mut n = Nonce::new(bytes);

    n.advance(7).unwrap();
    n.advance_oddly();
    n.advance_evenly();

    assert_eq!(n.as_bytes(), &calculate_nonce(&bytes, 10).unwrap());
    assert_eq!(Nonce::from(bytes).delta_to(&n), Some(10));
    assert_eq!(Nonce::from(bytes).offset(10), n);

    assert!(Nonce::try_from(&bytes[..23]).is_err());
    assert_eq!(Nonce::try_from(&bytes[..]).unwrap().as_ref(), &bytes[..]);
}
