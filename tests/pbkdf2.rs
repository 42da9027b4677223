use saltcore::Error;
use saltcore::derivation::{Pbkdf2ParamError, Pbkdf2Params, pbkdf2_sha256, pbkdf2_sha256_into};
use saltcore::pool::with_local_factory;

fn hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

#[test]
fn pbkdf2_one_iteration() {
    let out = pbkdf2_sha256(b"password", b"salt", 1, 32).unwrap();

    assert_eq!(
        out,
        hex("120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b")
    );
}

#[test]
fn pbkdf2_two_iterations() {
    let out = pbkdf2_sha256(b"password", b"salt", 2, 32).unwrap();

    assert_eq!(
        out,
        hex("ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43")
    );
}

#[test]
fn pbkdf2_4096_iterations() {
    let out = pbkdf2_sha256(b"password", b"salt", 4096, 32).unwrap();

    assert_eq!(
        out,
        hex("c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a")
    );
}

#[test]
fn pbkdf2_truncated_second_block() {
    let out = pbkdf2_sha256(
        b"passwordPASSWORDpassword",
        b"saltSALTsaltSALTsaltSALTsaltSALTsalt",
        4096,
        40,
    )
    .unwrap();

    assert_eq!(
        out,
        hex("348c89dbcbd32b2f32d814b8116e84cf2b17347ebc1800181c4e2a1fb8dd53e1c635518c7dac47e9")
    );
}

#[test]
fn pbkdf2_shorter_output_is_prefix() {
    let long = pbkdf2_sha256(b"pw", b"na", 3, 100).unwrap();
    let short = pbkdf2_sha256(b"pw", b"na", 3, 45).unwrap();

    assert_eq!(long.len(), 100);
    assert_eq!(&long[..45], &short[..]);
}

#[test]
fn pbkdf2_into_matches_allocating_form() {
    let mut out = [0u8; 64];
    pbkdf2_sha256_into(b"password", b"salt", 2, &mut out).unwrap();

    assert_eq!(
        out.to_vec(),
        pbkdf2_sha256(b"password", b"salt", 2, 64).unwrap()
    );
}

#[test]
fn pbkdf2_params_derive() {
    let params = Pbkdf2Params::new(1, 32);

    assert_eq!(
        params.derive(b"password", b"salt").unwrap(),
        hex("120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b")
    );
}

#[test]
fn pbkdf2_rejects_zero_iterations() {
    assert_eq!(
        pbkdf2_sha256(b"password", b"salt", 0, 32),
        Err(Error::Pbkdf2Params(Pbkdf2ParamError::TooFewIterations))
    );
}

#[test]
fn pbkdf2_rejects_empty_output() {
    let mut out = [0u8; 0];

    assert_eq!(
        pbkdf2_sha256_into(b"password", b"salt", 1, &mut out),
        Err(Error::Pbkdf2Params(Pbkdf2ParamError::EmptyOutput))
    );
}

#[test]
fn pbkdf2_default_params_are_valid() {
    let params = Pbkdf2Params::default();

    assert_eq!(params.iterations, 100_000);
    assert_eq!(params.output_len, 32);
    assert!(params.validate().is_ok());
}

#[test]
fn pbkdf2_into_pooled_buffer_inside_local_factory() {
    let expected = pbkdf2_sha256(b"password", b"salt", 1, 32).unwrap();

    with_local_factory(|factory| {
        let mut out: Vec<u8> = factory.get(32);
        pbkdf2_sha256_into(b"password", b"salt", 1, &mut out).unwrap();
        assert_eq!(out, expected);

        let derived = Pbkdf2Params::new(1, 32).derive(b"password", b"salt").unwrap();
        assert_eq!(derived, expected);

        factory.recycle(out).unwrap();
    });
}
