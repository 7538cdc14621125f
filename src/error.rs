//! Sticky error type shared by every [`Context`](crate::context::Context).
//!
//! `spec.md` models errors as a one-per-context, sticky code
//! (`bad_input` / `deep_recursion` / `overflow`) that a root driver turns
//! into a `-1` return. This module keeps that taxonomy but gives each
//! variant enough context (field id, offset, depth) to be useful on its
//! own, the way `no_proto`'s `NP_Error` wraps a message and the
//! `reifydb-reifydb` crates wrap structured causes with `thiserror`.

use thiserror::Error;

/// Everything that can sticky-fail a [`Context`](crate::context::Context).
///
/// Once a `Context` holds an `Error` it never clears it on its own:
/// subsequent primitives keep writing best-effort output, and only the
/// root drivers in [`crate::root`] convert the stored error into a `-1` /
/// `Result::Err` return. See `spec.md` §7.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Header too short, file-identifier mismatch, or a union field name
    /// too long to append `_type` within [`crate::NAME_LEN_MAX`].
    #[error("bad input: {0}")]
    BadInput(&'static str),

    /// Table nesting exceeded the configured [`crate::MAX_LEVELS`].
    #[error("recursion exceeded the configured depth limit")]
    DeepRecursion,

    /// The fixed-buffer sink ran out of room, or the growable sink failed
    /// to grow.
    #[error("output sink overflowed")]
    Overflow,
}

/// Crate-wide result alias; root drivers collapse this to `usize` / `-1`.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        assert_eq!(Error::BadInput("short header").to_string(), "bad input: short header");
        assert_eq!(Error::DeepRecursion.to_string(), "recursion exceeded the configured depth limit");
        assert_eq!(Error::Overflow.to_string(), "output sink overflowed");
    }
}
