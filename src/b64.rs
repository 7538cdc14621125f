//! Base64 — the other out-of-scope collaborator from `spec.md` §1
//! ("Base64 and hex encoders"), implemented with the `base64` crate
//! rather than hand-rolled.
//!
//! `spec.md` §4.5 describes the byte-vector base64 field as encoding "in
//! chunks sized to a multiple of four output bytes (exactly three input
//! bytes per four output bytes, with the final chunk padded)" so the
//! emitter never has to materialize the whole encoded string before
//! flushing. [`chunk_input_len`] picks that chunk boundary; the actual
//! encode call is a thin wrapper so [`crate::fields`] can drive the
//! reserve/flush loop itself.

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;

/// Which base64 alphabet to use. Both are padded, matching §6 ("Byte
/// vectors MAY appear as base64 strings").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// RFC 4648 standard alphabet (`+`, `/`), padded.
    Standard,
    /// RFC 4648 URL-safe alphabet (`-`, `_`), padded.
    UrlSafe,
}

impl Mode {
    fn encode_into(self, input: &[u8], out: &mut String) {
        match self {
            Mode::Standard => STANDARD.encode_string(input, out),
            Mode::UrlSafe => URL_SAFE.encode_string(input, out),
        }
    }
}

/// How many bytes of `remaining` input to feed into the next encode call
/// given `out_capacity` bytes of headroom in the output buffer.
///
/// Picks the largest multiple of 3 whose 4-byte-per-3-byte encoding fits
/// in `out_capacity`, unless that would consume the *entire* remainder —
/// in that case the whole remainder is taken (even if not a multiple of
/// 3) so the final, possibly-padded chunk is produced in one call.
pub fn chunk_input_len(remaining: usize, out_capacity: usize) -> usize {
    let max_full_groups = (out_capacity / 4) * 3;
    if remaining <= max_full_groups {
        remaining
    } else {
        max_full_groups
    }
}

/// Base64-encode exactly `input` (one chunk, per [`chunk_input_len`])
/// into a freshly allocated `String`. Padding, if any, appears only when
/// `input`'s length isn't a multiple of 3 — i.e. only ever on the final
/// chunk of a vector, by construction of [`chunk_input_len`].
pub fn encode_chunk(input: &[u8], mode: Mode) -> String {
    let mut out = String::with_capacity((input.len() + 2) / 3 * 4);
    mode.encode_into(input, &mut out);
    out
}
