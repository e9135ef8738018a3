use std::borrow::Cow;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, WINDOWS_1252};

/// Number of leading bytes inspected when guessing a file's encoding.
pub const DEFAULT_PREFIX_LEN: usize = 10_000;

/// How the encoding of a file was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingSource {
    /// A byte-order mark at the start of the file.
    Bom,
    /// Statistical detection over the prefix.
    Detected,
    /// Nothing to go on; the fallback encoding was substituted.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingGuess {
    pub encoding: &'static Encoding,
    pub source: EncodingSource,
}

impl EncodingGuess {
    pub fn fallback() -> Self {
        Self {
            encoding: WINDOWS_1252,
            source: EncodingSource::Fallback,
        }
    }

    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }
}

/// Guess the text encoding of a file from its first bytes.
///
/// Never fails: an empty prefix, or a detector answer that cannot be used to
/// decode text (UTF-16 without a BOM, the replacement encoding), resolves to
/// windows-1252, the single-byte Western encoding that maps every byte to a
/// character.
pub fn detect_encoding(prefix: &[u8]) -> EncodingGuess {
    if prefix.is_empty() {
        return EncodingGuess::fallback();
    }

    if let Some((encoding, _bom_len)) = Encoding::for_bom(prefix) {
        return EncodingGuess {
            encoding,
            source: EncodingSource::Bom,
        };
    }

    // A prefix cut from a larger file may end mid-character, so it is not
    // fed as the last chunk.
    let mut detector = EncodingDetector::new();
    detector.feed(prefix, false);
    let encoding = detector.guess(None, true);

    if !encoding.is_ascii_compatible() || encoding == encoding_rs::REPLACEMENT {
        return EncodingGuess::fallback();
    }

    EncodingGuess {
        encoding,
        source: EncodingSource::Detected,
    }
}

/// Decode a whole file with the guessed encoding. A BOM, if present, takes
/// precedence and is stripped.
pub fn decode<'a>(bytes: &'a [u8], guess: &EncodingGuess) -> Cow<'a, str> {
    let (text, used, had_errors) = guess.encoding.decode(bytes);
    if had_errors {
        log::warn!(
            "decoding as {} replaced malformed byte sequences",
            used.name()
        );
    }
    text
}
