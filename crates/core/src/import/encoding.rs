//! Byte-encoding detection for text-based imports.
//!
//! CSV and plain-text uploads arrive in whatever encoding the source system
//! produced, so the raw bytes are sniffed before decoding.

use chardetng::EncodingDetector;

/// Detect the byte encoding of `bytes` and decode them to a string.
///
/// Undecodable sequences are replaced rather than rejected; a genuinely
/// malformed row will fail later with a row-level error.
pub(crate) fn decode(bytes: &[u8]) -> String {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}
