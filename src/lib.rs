//! `vtable_json` walks a FlatBuffers-layout wire buffer and emits JSON
//! directly, without ever deserializing the buffer into an intermediate
//! object graph. It is the runtime half of a schema-aware JSON printer:
//! schema-generated code supplies one [`table::TablePrinter`] or
//! [`table::StructPrinter`] impl per table/struct type, calling the
//! field primitives in [`fields`] in declaration order, and this crate
//! supplies everything else — vtable/offset resolution, the
//! reserve/flush buffering discipline that keeps emission to a handful
//! of bounds checks per field, JSON escaping, number/base64 rendering,
//! and the three output sinks a caller can choose from.
//!
//! # Output sinks
//!
//! - [`root::to_writer`] streams through any [`std::io::Write`],
//!   draining its internal buffer every [`FLUSH_SIZE`] bytes.
//! - [`root::to_slice`] writes into a caller-owned `&mut [u8]` and fails
//!   with [`Error::Overflow`] if it doesn't fit.
//! - [`root::to_vec`] grows an owned buffer geometrically and hands back
//!   an exactly-sized `Vec<u8>`.
//!
//! # Example
//!
//! ```
//! use vtable_json::{fields::i32_field, table::{FieldCursor, TablePrinter}, Context, Options};
//!
//! struct Point;
//! impl TablePrinter for Point {
//!     fn fields(&self, ctx: &mut Context, buf: &[u8], table: &vtable_json::wire::Table, cursor: &mut FieldCursor) -> vtable_json::Result<()> {
//!         i32_field(ctx, buf, table, 0, "x", 0, cursor)?;
//!         i32_field(ctx, buf, table, 1, "y", 0, cursor)
//!     }
//! }
//!
//! // buf: root uoffset -> table -> vtable, encoding { x: 1, y: 2 }
//! let buf: Vec<u8> = encode_example_point(1, 2);
//! let json = vtable_json::root::to_vec(&buf, Options::default(), None, None, &Point).unwrap();
//! assert_eq!(String::from_utf8(json).unwrap(), "{\"x\":1,\"y\":2}\n");
//!
//! # fn encode_example_point(x: i32, y: i32) -> Vec<u8> {
//! #     // root uoffset -> table at 4; table: soffset(-12) -> vtable at 16
//! #     let mut buf = Vec::new();
//! #     buf.extend_from_slice(&4u32.to_le_bytes());
//! #     buf.extend_from_slice(&(-12i32).to_le_bytes());
//! #     buf.extend_from_slice(&x.to_le_bytes());
//! #     buf.extend_from_slice(&y.to_le_bytes());
//! #     buf.extend_from_slice(&8u16.to_le_bytes());
//! #     buf.extend_from_slice(&12u16.to_le_bytes());
//! #     buf.extend_from_slice(&4u16.to_le_bytes());
//! #     buf.extend_from_slice(&8u16.to_le_bytes());
//! #     buf
//! # }
//! ```

pub mod b64;
pub mod context;
pub mod endian;
pub mod error;
pub mod fields;
pub mod json;
pub mod numeric;
pub mod options;
pub mod root;
pub mod table;
pub mod wire;

pub use context::Context;
pub use error::{Error, Result};
pub use options::Options;

/// Bytes guaranteed writable without a space check after any flush, or
/// after any prior write that left `p <= pflush` (`spec.md` §3 invariant
/// 1, §4.1). Sized to cover one indentation run at [`MAX_LEVELS`] deep
/// with a generous per-level indent, plus the longest scalar rendering
/// (a full-width hex float or `i64::MIN`).
pub const RESERVE: usize = 4096;

/// Total size of the stream sink's internal buffer (`spec.md` §4.7).
pub const BUFFER_SIZE: usize = 65536;

/// Bytes drained per partial flush of the stream sink; also the fixed
/// buffer and growable buffer sinks' initial flush threshold
/// (`size - RESERVE`).
pub const FLUSH_SIZE: usize = BUFFER_SIZE - RESERVE;

/// Maximum table/struct nesting depth before emission fails with
/// [`Error::DeepRecursion`] (`spec.md` §4.6, §7). A compile-time
/// constant, not a runtime [`Options`] field, so every caller shares the
/// same recursion budget regardless of input.
pub const MAX_LEVELS: u16 = 64;

/// Longest field name this crate will append `_type` to for a union
/// discriminator field (`spec.md` §4.5 "union field", §1).
pub const NAME_LEN_MAX: usize = 256;

/// Byte width of a FlatBuffers file identifier (`spec.md` §4.6 step 2).
pub const IDENTIFIER_SIZE: usize = 4;

#[cfg(feature = "tracing")]
pub(crate) fn log_error(err: &Error) {
    tracing::warn!(error = %err, "emission failed");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn log_error(_err: &Error) {}
