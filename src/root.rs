//! Root drivers (`spec.md` §4.6, component C6): header validation,
//! dispatch into a schema-generated printer, and the three
//! sink-specific ways to run the whole thing end to end.
//!
//! [`table_as_root`] / [`struct_as_root`] are what a generated
//! `ns_MyTable_print_json` function calls after it has already built a
//! [`Context`] for the sink its caller asked for; [`to_writer`],
//! [`to_slice`] and [`to_vec`] are the convenience drivers most callers
//! actually reach for, bundling context construction and finalization
//! around that call the way `no_proto`'s `NP_Factory::open_buffer` style
//! constructors bundle setup around a lower-level operation.

use std::io::Write;

use crate::context::Context;
use crate::endian::read_uoffset;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::table::{print_struct_object, print_table_object, StructPrinter, TablePrinter};
use crate::IDENTIFIER_SIZE;

/// §4.6 step 2: the buffer must hold at least the root `uoffset`, and if
/// `identifier` is given, the 4 bytes right after it must match.
///
/// Also reused by [`crate::fields::table_as_nested_root`] and
/// [`crate::fields::struct_as_nested_root`] to validate a nested
/// buffer's own header instead of trusting its byte-vector length
/// prefix blindly (`spec.md` §4.5).
pub(crate) fn validate_header(buf: &[u8], identifier: Option<&[u8; 4]>) -> Result<()> {
    if buf.len() < 4 {
        return Err(Error::BadInput("buffer shorter than the root offset"));
    }
    if let Some(expected) = identifier {
        if buf.len() < 4 + IDENTIFIER_SIZE {
            return Err(Error::BadInput("buffer too short to hold a file identifier"));
        }
        if &buf[4..4 + IDENTIFIER_SIZE] != expected {
            return Err(Error::BadInput("file identifier mismatch"));
        }
    }
    Ok(())
}

/// Validate the header, resolve the root table, and print it — no
/// finalization. Mirrors the generated-code call site in a schema's
/// `print_json` wrapper.
pub fn table_as_root<P: TablePrinter>(ctx: &mut Context, buf: &[u8], identifier: Option<&[u8; 4]>, printer: &P) -> Result<()> {
    if let Err(e) = validate_header(buf, identifier) {
        ctx.set_error(e.clone());
        return Err(e);
    }
    let root_addr = read_uoffset(buf, 0);
    print_table_object(ctx, buf, root_addr, printer)
}

/// As [`table_as_root`], for a schema whose root type is a struct.
pub fn struct_as_root<P: StructPrinter>(ctx: &mut Context, buf: &[u8], identifier: Option<&[u8; 4]>, printer: &P) -> Result<()> {
    if let Err(e) = validate_header(buf, identifier) {
        ctx.set_error(e.clone());
        return Err(e);
    }
    let root_addr = read_uoffset(buf, 0);
    print_struct_object(ctx, buf, root_addr, printer)
}

/// Print `buf`'s root table as JSON to `writer` (§4.7 stream sink).
pub fn to_writer<P: TablePrinter>(
    writer: &mut dyn Write,
    buf: &[u8],
    options: Options,
    identifier: Option<&[u8; 4]>,
    printer: &P,
) -> Result<usize> {
    let mut ctx = Context::new_stream(writer, options);
    table_as_root(&mut ctx, buf, identifier, printer)?;
    ctx.finish()
}

/// Print `buf`'s root table as JSON into the caller-owned `out` slice
/// (§4.7 fixed buffer sink), returning the number of bytes written.
pub fn to_slice<P: TablePrinter>(
    out: &mut [u8],
    buf: &[u8],
    options: Options,
    identifier: Option<&[u8; 4]>,
    printer: &P,
) -> Result<usize> {
    let mut ctx = Context::new_fixed(out, options);
    table_as_root(&mut ctx, buf, identifier, printer)?;
    ctx.finish()
}

/// Print `buf`'s root table as JSON into a freshly allocated, exactly
/// sized `Vec<u8>` (§4.7 growable buffer sink).
pub fn to_vec<P: TablePrinter>(buf: &[u8], options: Options, capacity: Option<usize>, identifier: Option<&[u8; 4]>, printer: &P) -> Result<Vec<u8>> {
    let mut ctx = Context::new_growable(capacity, options);
    table_as_root(&mut ctx, buf, identifier, printer)?;
    ctx.finalize_dynamic_buffer()
}
