//! Unicode normalization for label and query comparisons.
//!
//! Vietnamese text may arrive precomposed ("ó") or decomposed ("o" + U+0301); labels
//! are compared in NFC so both spellings match.

use std::borrow::Cow;

use unicode_normalization::{IsNormalized, UnicodeNormalization, is_nfc_quick};

/// NFC form of `s`, borrowed when it is already composed.
pub(crate) fn nfc(s: &str) -> Cow<'_, str> {
    match is_nfc_quick(s.chars()) {
        IsNormalized::Yes => Cow::Borrowed(s),
        IsNormalized::No | IsNormalized::Maybe => Cow::Owned(s.nfc().collect()),
    }
}
