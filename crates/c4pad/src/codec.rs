//! The text encoding used in PlantUML server URLs.
//!
//! Text is compressed with raw DEFLATE (no zlib header or checksum) at the
//! highest level, then packed six bits at a time into a 64-character
//! URL-safe alphabet. Every three input bytes become four characters; a
//! trailing partial group is zero-padded, so the output length is always a
//! multiple of four.

use std::io::{self, Read, Write};

use flate2::{Compression, read::DeflateDecoder, write::DeflateEncoder};
use log::trace;
use thiserror::Error;

/// The packing alphabet, indexed by 6-bit value.
pub const ALPHABET: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

/// Why an encoded string could not be turned back into text.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid character `{character}` at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("encoded length {0} is not a multiple of 4")]
    InvalidLength(usize),

    #[error("corrupt compressed data: {0}")]
    Inflate(#[from] io::Error),
}

/// Encode `text` for use in a PlantUML server URL.
///
/// # Example
///
/// ```
/// # use c4pad::codec::{encode, ALPHABET};
/// let encoded = encode("Bob -> Alice : hello");
/// assert_eq!(encoded.len() % 4, 0);
/// assert!(encoded.bytes().all(|b| ALPHABET.contains(&b)));
/// ```
pub fn encode(text: &str) -> String {
    let compressed = deflate(text.as_bytes());
    trace!(input = text.len(), compressed = compressed.len(); "Deflated diagram text");
    pack(&compressed)
}

/// Decode a string produced by [`encode`].
///
/// # Errors
///
/// Returns an error if `encoded` contains characters outside [`ALPHABET`],
/// has a length that is not a multiple of four, or does not inflate to UTF-8.
pub fn decode(encoded: &str) -> Result<String, DecodeError> {
    let compressed = unpack(encoded)?;
    let mut text = String::new();
    DeflateDecoder::new(compressed.as_slice()).read_to_string(&mut text)?;
    Ok(text)
}

fn deflate(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::with_capacity(bytes.len() / 2), Compression::best());
    encoder
        .write_all(bytes)
        .expect("in-memory deflate write cannot fail");
    encoder
        .finish()
        .expect("in-memory deflate finish cannot fail")
}

/// Pack bytes into the 6-bit alphabet, three bytes to four characters.
///
/// ```
/// # use c4pad::codec::pack;
/// assert_eq!(pack(b"Man"), "JM5k");
/// assert_eq!(pack(&[0x01]), "0G00");
/// ```
pub fn pack(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);

    for chunk in bytes.chunks(3) {
        let b1 = chunk[0];
        let b2 = chunk.get(1).copied().unwrap_or(0);
        let b3 = chunk.get(2).copied().unwrap_or(0);

        let sextets = [
            b1 >> 2,
            ((b1 & 0x3) << 4) | (b2 >> 4),
            ((b2 & 0xF) << 2) | (b3 >> 6),
            b3 & 0x3F,
        ];
        out.extend(sextets.iter().map(|&s| char::from(ALPHABET[usize::from(s)])));
    }

    out
}

/// Reverse of [`pack`]. Padding bytes from a partial group are kept.
fn unpack(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    if encoded.len() % 4 != 0 {
        return Err(DecodeError::InvalidLength(encoded.len()));
    }

    let sextets = encoded
        .chars()
        .enumerate()
        .map(|(position, character)| {
            sextet(character).ok_or(DecodeError::InvalidCharacter {
                character,
                position,
            })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    let mut bytes = Vec::with_capacity(sextets.len() / 4 * 3);
    for group in sextets.chunks_exact(4) {
        bytes.push((group[0] << 2) | (group[1] >> 4));
        bytes.push((group[1] << 4) | (group[2] >> 2));
        bytes.push((group[2] << 6) | group[3]);
    }
    Ok(bytes)
}

fn sextet(character: char) -> Option<u8> {
    let value = match character {
        '0'..='9' => character as u8 - b'0',
        'A'..='Z' => character as u8 - b'A' + 10,
        'a'..='z' => character as u8 - b'a' + 36,
        '-' => 62,
        '_' => 63,
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_known_groups() {
        assert_eq!(pack(&[]), "");
        assert_eq!(pack(&[0, 0, 0]), "0000");
        assert_eq!(pack(&[0xFF, 0xFF, 0xFF]), "____");
        assert_eq!(pack(b"Man"), "JM5k");
        assert_eq!(pack(&[0x01]), "0G00");
    }

    #[test]
    fn test_sextet_matches_alphabet() {
        for (value, &byte) in ALPHABET.iter().enumerate() {
            assert_eq!(sextet(char::from(byte)), Some(value as u8));
        }
        assert_eq!(sextet('+'), None);
        assert_eq!(sextet('='), None);
    }

    #[test]
    fn test_unpack_reverses_pack() {
        assert_eq!(unpack("JM5k").unwrap(), b"Man");
        assert_eq!(unpack("0G00").unwrap(), [0x01, 0, 0]);
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert!(matches!(decode("abc"), Err(DecodeError::InvalidLength(3))));
        assert!(matches!(
            decode("ab+d"),
            Err(DecodeError::InvalidCharacter {
                character: '+',
                position: 2
            })
        ));
    }

    #[test]
    fn test_encode_decode() {
        let text = "@startuml\nPerson(u, \"Пользователь\")\n@enduml";
        let encoded = encode(text);
        assert_eq!(decode(&encoded).unwrap(), text);
    }

    #[test]
    fn test_known_server_encoding() {
        assert_eq!(encode("Bob -> Alice : hello"), "SyfFKj2rKt3CoKnELR1Io4ZDoSa70000");
        assert_eq!(encode("A"), "SmG0");
    }

    #[test]
    fn test_empty_text_still_encodes() {
        let encoded = encode("");
        assert!(!encoded.is_empty());
        assert_eq!(decode(&encoded).unwrap(), "");
    }
}

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn prop_output_is_url_safe(text in "\\PC{0,300}") {
            let encoded = encode(&text);
            prop_assert_eq!(encoded.len() % 4, 0);
            prop_assert!(encoded.bytes().all(|b| ALPHABET.contains(&b)));
        }

        #[test]
        fn prop_encode_is_deterministic(text in "\\PC{0,300}") {
            prop_assert_eq!(encode(&text), encode(&text));
        }

        #[test]
        fn prop_decode_recovers_text(text in "\\PC{0,300}") {
            prop_assert_eq!(decode(&encode(&text)).unwrap(), text);
        }

        #[test]
        fn prop_pack_length(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(pack(&bytes).len(), bytes.len().div_ceil(3) * 4);
        }
    }
}
