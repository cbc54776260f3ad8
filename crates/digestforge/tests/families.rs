//! Behavior of the generated families against published test vectors.

use std::io::{Cursor, ErrorKind, Write};
use std::path::Path;

use digestforge::{ByteSource, ReadSettings};
use proptest::prelude::*;
use tempfile::NamedTempFile;
use test_case::test_case;

const JEFE_DATA: &str = "what do ya want for nothing?";
const JEFE_SHA1: &str = "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79";
const JEFE_SHA256: &str = "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843";

fn temp_file(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

// ============================================================================
// Known answers
// ============================================================================

#[test_case("", "d41d8cd98f00b204e9800998ecf8427e"; "empty")]
#[test_case("abc", "900150983cd24fb0d6963f7d28e17f72"; "abc")]
fn md5_vectors(input: &str, expected: &str) {
    assert_eq!(digestforge::md5(input), expected);
}

#[test_case("", "da39a3ee5e6b4b0d3255bfef95601890afd80709"; "empty")]
#[test_case("abc", "a9993e364706816aba3e25717850c26c9cd0d89d"; "abc")]
fn sha1_vectors(input: &str, expected: &str) {
    assert_eq!(digestforge::sha1(input), expected);
}

#[test_case("", "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"; "empty")]
#[test_case("abc", "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"; "abc")]
fn sha256_vectors(input: &str, expected: &str) {
    assert_eq!(digestforge::sha256(input), expected);
}

#[test]
fn sha512_vector() {
    assert_eq!(
        digestforge::sha512("abc"),
        "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
         2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
    );
}

#[test]
fn blake3_vector() {
    assert_eq!(
        digestforge::blake3(""),
        "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
    );
}

#[test]
fn hmac_vectors() {
    assert_eq!(digestforge::sha1_hmac(JEFE_DATA, "Jefe").unwrap(), JEFE_SHA1);
    assert_eq!(digestforge::sha256_hmac(JEFE_DATA, "Jefe").unwrap(), JEFE_SHA256);
}

// ============================================================================
// Encodings
// ============================================================================

#[test]
fn encodings_agree() {
    let text = digestforge::sha256("abc");
    let bytes = digestforge::sha256_bytes("abc");
    let native = digestforge::sha256_raw("abc");

    assert_eq!(bytes.len(), 32);
    assert_eq!(hex::decode(&text).unwrap(), bytes);
    assert_eq!(native.as_slice(), bytes.as_slice());
}

#[test]
fn native_types_are_the_algorithm_crates() {
    let md5: md5::Digest = digestforge::md5_raw("abc");
    assert_eq!(format!("{md5:x}"), digestforge::md5("abc"));

    let blake3: blake3::Hash = digestforge::blake3_raw("abc");
    assert_eq!(blake3.to_hex().as_str(), digestforge::blake3("abc"));

    let mac = digestforge::sha1_hmac_raw(JEFE_DATA, "Jefe").unwrap();
    assert_eq!(hex::encode(mac), JEFE_SHA1);
}

#[test]
fn text_hashes_as_utf8() {
    assert_eq!(digestforge::sha1("héllo"), digestforge::sha1("héllo".as_bytes()));
    assert_eq!(digestforge::md5(String::from("abc")), digestforge::md5(b"abc"));
    assert_eq!(
        digestforge::sha256(bytes::Bytes::from_static(b"abc")),
        digestforge::sha256(vec![b'a', b'b', b'c'])
    );
}

#[test]
fn repeated_calls_are_identical() {
    let first = digestforge::sha512_bytes(JEFE_DATA);
    let second = digestforge::sha512_bytes(JEFE_DATA);
    assert_eq!(first, second);
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn file_digest_matches_direct_digest() {
    let contents = b"The quick brown fox jumps over the lazy dog";
    let file = temp_file(contents);

    assert_eq!(digestforge::md5_file(file.path()).unwrap(), digestforge::md5(contents));
    assert_eq!(
        digestforge::sha256_file_bytes(file.path()).unwrap(),
        digestforge::sha256_bytes(contents)
    );
    assert_eq!(
        digestforge::blake3_file_raw(file.path()).unwrap(),
        digestforge::blake3_raw(contents)
    );
}

#[test]
fn file_path_may_be_text() {
    let file = temp_file(b"abc");
    let path = file.path().to_str().unwrap().to_string();

    assert_eq!(
        digestforge::sha1_file(path.as_str()).unwrap(),
        "a9993e364706816aba3e25717850c26c9cd0d89d"
    );
    assert_eq!(digestforge::sha1_file(path).unwrap(), digestforge::sha1("abc"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.bin");

    let err = digestforge::sha256_file(missing.as_path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn hmac_file_matches_direct_hmac() {
    let file = temp_file(JEFE_DATA.as_bytes());
    assert_eq!(
        digestforge::sha256_hmac_file(file.path(), "Jefe").unwrap(),
        JEFE_SHA256
    );
    assert_eq!(
        digestforge::sha1_hmac_file_bytes(file.path(), b"Jefe").unwrap(),
        digestforge::sha1_hmac_bytes(JEFE_DATA, b"Jefe").unwrap()
    );
}

// ============================================================================
// Keys
// ============================================================================

#[test]
fn key_sources_are_equivalent() {
    let key_file = temp_file(b"Jefe");

    let from_text = digestforge::sha256_hmac(JEFE_DATA, "Jefe").unwrap();
    let from_bytes = digestforge::sha256_hmac(JEFE_DATA, b"Jefe".to_vec()).unwrap();
    let from_path = digestforge::sha256_hmac(JEFE_DATA, key_file.path()).unwrap();
    let from_stream =
        digestforge::sha256_hmac(JEFE_DATA, ByteSource::stream(Cursor::new(b"Jefe"))).unwrap();
    let from_file =
        digestforge::sha256_hmac(JEFE_DATA, std::fs::File::open(key_file.path()).unwrap())
            .unwrap();

    for mac in [from_text, from_bytes, from_path, from_stream, from_file] {
        assert_eq!(mac, JEFE_SHA256);
    }
}

#[test]
fn borrowed_keys_match_direct_inputs() {
    let key_file = temp_file(b"Jefe");
    let key_text = String::from("Jefe");
    let key_bytes = b"Jefe".to_vec();
    let key_path = key_file.path().to_path_buf();

    assert_eq!(digestforge::sha256_hmac(JEFE_DATA, &key_text).unwrap(), JEFE_SHA256);
    assert_eq!(digestforge::sha256_hmac(JEFE_DATA, &key_bytes).unwrap(), JEFE_SHA256);
    assert_eq!(digestforge::sha256_hmac(JEFE_DATA, &key_path).unwrap(), JEFE_SHA256);
    assert_eq!(digestforge::sha1(&key_text), digestforge::sha1(&key_bytes));
}

#[test]
fn long_keys_are_accepted() {
    let key = vec![0xaa; 131];
    let data = "Test Using Larger Than Block-Size Key - Hash Key First";
    let mac = digestforge::sha256_hmac_bytes(data, key).unwrap();
    assert_eq!(
        hex::encode(mac),
        "60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54"
    );
}

#[test]
fn missing_key_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("key");

    let err = digestforge::sha256_hmac(JEFE_DATA, missing.as_path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ============================================================================
// Absent inputs
// ============================================================================

#[test]
fn absent_inputs_yield_none() {
    assert_eq!(digestforge::md5(None::<&str>), None);
    assert_eq!(digestforge::sha256_bytes(None::<Vec<u8>>), None);
    assert!(digestforge::blake3_raw(None::<&[u8]>).is_none());
    assert_eq!(digestforge::sha1_file(None::<&Path>).unwrap(), None);
}

#[test]
fn present_options_behave_like_plain_inputs() {
    assert_eq!(digestforge::md5(Some("abc")), Some(digestforge::md5("abc")));
    assert_eq!(
        digestforge::sha256_hmac(Some(JEFE_DATA), "Jefe").unwrap(),
        Some(JEFE_SHA256.to_string())
    );
}

#[test]
fn absent_input_never_reads_the_key() {
    let dir = tempfile::tempdir().unwrap();
    let missing_key = dir.path().join("no-such-key");

    let mac = digestforge::sha256_hmac(None::<&str>, missing_key.as_path()).unwrap();
    assert_eq!(mac, None);

    let mac = digestforge::sha512_hmac_file(None::<&Path>, missing_key.as_path()).unwrap();
    assert_eq!(mac, None);
}

// ============================================================================
// Read settings
// ============================================================================

#[test_case(1)]
#[test_case(13)]
#[test_case(2048)]
#[test_case(1 << 20)]
fn buffer_size_does_not_change_file_digests(buffer_size: usize) {
    let contents: Vec<u8> = (0..10_000u32).map(|i| (i * 31 % 251) as u8).collect();
    let file = temp_file(&contents);
    let settings = ReadSettings::with_buffer_size(buffer_size).unwrap();

    let digest = settings
        .scope(|| digestforge::sha512_file(file.path()))
        .unwrap();
    assert_eq!(digest, digestforge::sha512(contents.as_slice()));
    assert_eq!(ReadSettings::current().buffer_size(), digestforge::DEFAULT_BUFFER_SIZE);
}

#[test]
fn zero_buffer_size_is_rejected() {
    assert!(ReadSettings::with_buffer_size(0).is_err());
}

// ============================================================================
// Surface
// ============================================================================

#[test]
fn authenticating_family_has_twelve_members() {
    let _ = digestforge::sha256::<&str>;
    let _ = digestforge::sha256_bytes::<&str>;
    let _ = digestforge::sha256_raw::<&str>;
    let _ = digestforge::sha256_file::<&Path>;
    let _ = digestforge::sha256_file_bytes::<&Path>;
    let _ = digestforge::sha256_file_raw::<&Path>;
    let _ = digestforge::sha256_hmac::<&str, &str>;
    let _ = digestforge::sha256_hmac_bytes::<&str, &str>;
    let _ = digestforge::sha256_hmac_raw::<&str, &str>;
    let _ = digestforge::sha256_hmac_file::<&Path, &str>;
    let _ = digestforge::sha256_hmac_file_bytes::<&Path, &str>;
    let _ = digestforge::sha256_hmac_file_raw::<&Path, &str>;
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_text_equals_utf8_bytes(text in ".*") {
        prop_assert_eq!(digestforge::sha256(text.as_str()), digestforge::sha256(text.as_bytes()));
    }

    #[test]
    fn prop_hex_round_trips(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let text = digestforge::sha1(data.as_slice());
        prop_assert_eq!(hex::decode(&text).unwrap(), digestforge::sha1_bytes(data.as_slice()));
    }

    #[test]
    fn prop_file_digest_ignores_buffer_size(
        data in proptest::collection::vec(any::<u8>(), 0..4096),
        buffer_size in 1usize..5000,
    ) {
        let file = temp_file(&data);
        let settings = ReadSettings::with_buffer_size(buffer_size).unwrap();
        let digest = settings.scope(|| digestforge::md5_file_bytes(file.path())).unwrap();
        prop_assert_eq!(digest, digestforge::md5_bytes(data.as_slice()));
    }
}
