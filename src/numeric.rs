//! Numeric-to-string formatting — the collaborator `spec.md` §1 lists as
//! out of scope for the core ("Numeric-to-string formatters for integers
//! and floating-point values (including any fast float-shortest
//! algorithm)").
//!
//! Implemented here with `itoa` (integers) and `ryu` (the float-shortest
//! algorithm spec.md names explicitly) rather than hand-rolled, matching
//! how `serde_json` itself is built on these two crates. Schema-generated
//! code never calls `itoa`/`ryu` directly — it only ever sees the
//! `<T>_field` primitives in [`crate::fields`], which call through
//! [`Format::write_into`].

/// A wire scalar that can render itself as a JSON number.
pub trait Format: Copy {
    /// Write the JSON-number rendering of `self` into `out` and return
    /// the written slice's length. `out` is guaranteed by callers to be
    /// at least [`crate::RESERVE`] bytes, enough for the longest
    /// rendering of any scalar type including a hex-float.
    fn write_into(self, out: &mut [u8]) -> usize;
}

macro_rules! impl_format_int {
    ($t:ty) => {
        impl Format for $t {
            #[inline]
            fn write_into(self, out: &mut [u8]) -> usize {
                let mut buf = itoa::Buffer::new();
                let s = buf.format(self);
                out[..s.len()].copy_from_slice(s.as_bytes());
                s.len()
            }
        }
    };
}

impl_format_int!(u8);
impl_format_int!(u16);
impl_format_int!(u32);
impl_format_int!(u64);
impl_format_int!(i8);
impl_format_int!(i16);
impl_format_int!(i32);
impl_format_int!(i64);

impl Format for bool {
    #[inline]
    fn write_into(self, out: &mut [u8]) -> usize {
        let s: &[u8] = if self { b"true" } else { b"false" };
        out[..s.len()].copy_from_slice(s);
        s.len()
    }
}

impl Format for f32 {
    #[inline]
    fn write_into(self, out: &mut [u8]) -> usize {
        if self.is_nan() || self.is_infinite() {
            return write_non_finite(self as f64, out);
        }
        let mut buf = ryu::Buffer::new();
        let s = buf.format(self);
        out[..s.len()].copy_from_slice(s.as_bytes());
        s.len()
    }
}

impl Format for f64 {
    #[inline]
    fn write_into(self, out: &mut [u8]) -> usize {
        if self.is_nan() || self.is_infinite() {
            return write_non_finite(self, out);
        }
        let mut buf = ryu::Buffer::new();
        let s = buf.format(self);
        out[..s.len()].copy_from_slice(s.as_bytes());
        s.len()
    }
}

/// RFC 8259 has no token for NaN/Infinity; flatc's JSON printer emits
/// them as bare identifiers so the text stays parseable by permissive
/// readers. `ryu` never produces these, so they're handled up front.
fn write_non_finite(v: f64, out: &mut [u8]) -> usize {
    let s: &[u8] = if v.is_nan() {
        b"NaN"
    } else if v > 0.0 {
        b"Infinity"
    } else {
        b"-Infinity"
    };
    out[..s.len()].copy_from_slice(s);
    s.len()
}
