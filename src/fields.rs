//! Field primitives (`spec.md` §4.5, component C5) — the largest part
//! of the runtime surface. Schema-generated code calls exactly one of
//! these per declared field, in declaration order; each primitive reads
//! the vtable, decides (via [`crate::options::Options`] and presence)
//! whether it has anything to print, and if so asks its
//! [`crate::table::FieldCursor`] for the separating comma before writing
//! `"name": value`.
//!
//! Scalar and vector families are macro-stamped per wire type, the way
//! `no_proto`'s pointer module stamps one impl per `NP_TypeKeys` variant
//! — one macro body, ten invocations, rather than ten hand-copied
//! functions that drift apart over time.

use crate::b64::{self, Mode};
use crate::context::Context;
use crate::endian::{read_uoffset, Endian};
use crate::error::{Error, Result};
use crate::numeric::Format;
use crate::table::{print_struct_object, FieldCursor, StructPrinter};
use crate::table::{print_table_object, TablePrinter};
use crate::wire::{string_bytes, Table, Vector};
use crate::NAME_LEN_MAX;

macro_rules! impl_scalar_field {
    ($fn_name:ident, $t:ty) => {
        /// Scalar field of wire type
        #[doc = stringify!($t)]
        /// (`spec.md` §4.5 "scalar field").
        pub fn $fn_name(
            ctx: &mut Context,
            buf: &[u8],
            table: &Table,
            id: u16,
            name: &str,
            default: $t,
            cursor: &mut FieldCursor,
        ) -> Result<()> {
            let value = match table.scalar::<$t>(buf, id) {
                Some(v) => v,
                None => {
                    if !ctx.options().force_default {
                        return Ok(());
                    }
                    default
                }
            };
            if ctx.options().skip_default && value == default {
                return Ok(());
            }
            cursor.before_field(ctx)?;
            ctx.write_identifier(name)?;
            ctx.write_colon()?;
            ctx.write_number(value)
        }
    };
}

impl_scalar_field!(i8_field, i8);
impl_scalar_field!(u8_field, u8);
impl_scalar_field!(i16_field, i16);
impl_scalar_field!(u16_field, u16);
impl_scalar_field!(i32_field, i32);
impl_scalar_field!(u32_field, u32);
impl_scalar_field!(i64_field, i64);
impl_scalar_field!(u64_field, u64);
impl_scalar_field!(f32_field, f32);
impl_scalar_field!(f64_field, f64);
impl_scalar_field!(bool_field, bool);

macro_rules! impl_vector_field {
    ($fn_name:ident, $t:ty) => {
        /// Vector-of-
        #[doc = stringify!($t)]
        /// field (`spec.md` §4.5 "vector field"): absent vectors are
        /// omitted outright, never printed as `default` or `null`.
        pub fn $fn_name(ctx: &mut Context, buf: &[u8], table: &Table, id: u16, name: &str, cursor: &mut FieldCursor) -> Result<()> {
            let slot = match table.field_ptr(buf, id) {
                Some(s) => s,
                None => return Ok(()),
            };
            let vec_addr = read_uoffset(buf, slot);
            let vector = Vector::at(buf, vec_addr);
            cursor.before_field(ctx)?;
            ctx.write_identifier(name)?;
            ctx.write_colon()?;
            ctx.write_punct(b'[')?;
            ctx.enter_level();
            for i in 0..vector.count {
                if i > 0 {
                    ctx.write_punct(b',')?;
                }
                ctx.write_indent()?;
                let elem_addr = vector.elem_addr(i, <$t as Endian>::WIDTH);
                let value = <$t>::read_le(&buf[elem_addr..]);
                ctx.write_number(value)?;
            }
            ctx.exit_level();
            if vector.count > 0 {
                ctx.write_indent()?;
            }
            ctx.write_punct(b']')
        }
    };
}

impl_vector_field!(i8_vector_field, i8);
impl_vector_field!(u8_vector_field, u8);
impl_vector_field!(i16_vector_field, i16);
impl_vector_field!(u16_vector_field, u16);
impl_vector_field!(i32_vector_field, i32);
impl_vector_field!(u32_vector_field, u32);
impl_vector_field!(i64_vector_field, i64);
impl_vector_field!(u64_vector_field, u64);
impl_vector_field!(f32_vector_field, f32);
impl_vector_field!(f64_vector_field, f64);
impl_vector_field!(bool_vector_field, bool);

/// A schema enum's symbol table: one `(wire value, symbol name)` pair
/// per declared member, in declaration order.
pub type EnumSymbols<'a, T> = &'a [(T, &'a str)];

/// Enum field (`spec.md` §4.5 "enum field"): prints the matching symbol
/// name unless `noenum` is set or the value has no matching symbol, in
/// which case it falls back to the raw number — the same fallback a
/// reader needs for forward compatibility with enum values added after
/// this schema was generated.
pub fn enum_field<T: Endian + Format + PartialEq + Copy>(
    ctx: &mut Context,
    buf: &[u8],
    table: &Table,
    id: u16,
    name: &str,
    default: T,
    symbols: EnumSymbols<T>,
    cursor: &mut FieldCursor,
) -> Result<()> {
    let value = match table.scalar::<T>(buf, id) {
        Some(v) => v,
        None => {
            if !ctx.options().force_default {
                return Ok(());
            }
            default
        }
    };
    if ctx.options().skip_default && value == default {
        return Ok(());
    }
    cursor.before_field(ctx)?;
    ctx.write_identifier(name)?;
    ctx.write_colon()?;
    write_enum_value(ctx, value, symbols)
}

fn write_enum_value<T: Format + PartialEq + Copy>(ctx: &mut Context, value: T, symbols: EnumSymbols<T>) -> Result<()> {
    if ctx.options().noenum {
        return ctx.write_number(value);
    }
    match symbols.iter().find(|(v, _)| *v == value) {
        Some((_, symbol)) => ctx.write_identifier(symbol),
        None => ctx.write_number(value),
    }
}

/// A bit-flag enum field printed as a quoted, `|`-joined list of symbol
/// names (`spec.md` §4.5 "enum field", §9 open question (c) on the
/// always-quote-flags override).
pub fn enum_flags_field<T>(
    ctx: &mut Context,
    buf: &[u8],
    table: &Table,
    id: u16,
    name: &str,
    default: T,
    flags: EnumSymbols<T>,
    cursor: &mut FieldCursor,
) -> Result<()>
where
    T: Endian + Format + PartialEq + Copy + std::ops::BitAnd<Output = T> + Default,
{
    let value = match table.scalar::<T>(buf, id) {
        Some(v) => v,
        None => {
            if !ctx.options().force_default {
                return Ok(());
            }
            default
        }
    };
    if ctx.options().skip_default && value == default {
        return Ok(());
    }
    cursor.before_field(ctx)?;
    ctx.write_identifier(name)?;
    ctx.write_colon()?;
    if ctx.options().noenum {
        return ctx.write_number(value);
    }
    delimit_enum_flags(ctx, value, flags)
}

/// Render `value` as the `|`-joined set of `flags` it matches, quoted
/// unless `unquote` is set and more than one flag is always quoted when
/// `always_quote_flags` is set (`spec.md` §9 open question (c)).
fn delimit_enum_flags<T>(ctx: &mut Context, value: T, flags: EnumSymbols<T>) -> Result<()>
where
    T: Format + PartialEq + Copy + std::ops::BitAnd<Output = T> + Default,
{
    let matched: Vec<&str> = flags
        .iter()
        .filter(|(bit, _)| *bit != T::default() && (value & *bit) == *bit)
        .map(|(_, name)| *name)
        .collect();
    let joined = matched.join("|");
    let force_quote = ctx.options().always_quote_flags && matched.len() > 1;
    let quote = force_quote || !ctx.options().unquote;
    if quote {
        ctx.write_byte(b'"');
        ctx.checkpoint()?;
    }
    ctx.write_unbounded(joined.as_bytes())?;
    if quote {
        ctx.write_byte(b'"');
    }
    ctx.checkpoint()
}

/// String field (`spec.md` §4.5 "string field"): length-prefixed UTF-8,
/// escaped per [`Context::write_escaped_string`]. Absent strings are
/// omitted, never printed as `""` or `null`.
pub fn string_field(ctx: &mut Context, buf: &[u8], table: &Table, id: u16, name: &str, cursor: &mut FieldCursor) -> Result<()> {
    let slot = match table.field_ptr(buf, id) {
        Some(s) => s,
        None => return Ok(()),
    };
    let addr = read_uoffset(buf, slot);
    let bytes = string_bytes(buf, addr);
    cursor.before_field(ctx)?;
    ctx.write_identifier(name)?;
    ctx.write_colon()?;
    ctx.write_escaped_string(bytes)
}

/// Vector-of-strings field (`spec.md` §4.5 "Vector-of-strings...
/// follow the obvious element emissions"): each element is itself an
/// indirect offset to a length-prefixed string.
pub fn string_vector_field(ctx: &mut Context, buf: &[u8], table: &Table, id: u16, name: &str, cursor: &mut FieldCursor) -> Result<()> {
    let slot = match table.field_ptr(buf, id) {
        Some(s) => s,
        None => return Ok(()),
    };
    let vec_addr = read_uoffset(buf, slot);
    let vector = Vector::at(buf, vec_addr);
    cursor.before_field(ctx)?;
    ctx.write_identifier(name)?;
    ctx.write_colon()?;
    ctx.write_punct(b'[')?;
    ctx.enter_level();
    for i in 0..vector.count {
        if i > 0 {
            ctx.write_punct(b',')?;
        }
        ctx.write_indent()?;
        let elem_slot = vector.elem_addr(i, 4);
        let str_addr = read_uoffset(buf, elem_slot);
        ctx.write_escaped_string(string_bytes(buf, str_addr))?;
    }
    ctx.exit_level();
    if vector.count > 0 {
        ctx.write_indent()?;
    }
    ctx.write_punct(b']')
}

/// Vector-of-tables field: each element is an indirect offset to a
/// nested table, recursing through the same `printer` for every
/// element (`spec.md` §4.5).
pub fn table_vector_field<P: TablePrinter>(
    ctx: &mut Context,
    buf: &[u8],
    table: &Table,
    id: u16,
    name: &str,
    printer: &P,
    cursor: &mut FieldCursor,
) -> Result<()> {
    let slot = match table.field_ptr(buf, id) {
        Some(s) => s,
        None => return Ok(()),
    };
    let vec_addr = read_uoffset(buf, slot);
    let vector = Vector::at(buf, vec_addr);
    cursor.before_field(ctx)?;
    ctx.write_identifier(name)?;
    ctx.write_colon()?;
    ctx.write_punct(b'[')?;
    ctx.enter_level();
    for i in 0..vector.count {
        if i > 0 {
            ctx.write_punct(b',')?;
        }
        ctx.write_indent()?;
        let elem_slot = vector.elem_addr(i, 4);
        let elem_addr = read_uoffset(buf, elem_slot);
        print_table_object(ctx, buf, elem_addr, printer)?;
    }
    ctx.exit_level();
    if vector.count > 0 {
        ctx.write_indent()?;
    }
    ctx.write_punct(b']')
}

/// Vector-of-enums field: as the scalar vector family, but each element
/// renders through the symbol table unless `noenum` is set (`spec.md`
/// §4.5 "enum vector field").
pub fn enum_vector_field<T: Endian + Format + PartialEq + Copy>(
    ctx: &mut Context,
    buf: &[u8],
    table: &Table,
    id: u16,
    name: &str,
    symbols: EnumSymbols<T>,
    cursor: &mut FieldCursor,
) -> Result<()> {
    let slot = match table.field_ptr(buf, id) {
        Some(s) => s,
        None => return Ok(()),
    };
    let vec_addr = read_uoffset(buf, slot);
    let vector = Vector::at(buf, vec_addr);
    cursor.before_field(ctx)?;
    ctx.write_identifier(name)?;
    ctx.write_colon()?;
    ctx.write_punct(b'[')?;
    ctx.enter_level();
    for i in 0..vector.count {
        if i > 0 {
            ctx.write_punct(b',')?;
        }
        ctx.write_indent()?;
        let elem_addr = vector.elem_addr(i, <T as Endian>::WIDTH);
        let value = T::read_le(&buf[elem_addr..]);
        write_enum_value(ctx, value, symbols)?;
    }
    ctx.exit_level();
    if vector.count > 0 {
        ctx.write_indent()?;
    }
    ctx.write_punct(b']')
}

/// Nested table field (`spec.md` §4.5 "table field"): resolves the
/// indirect offset and recurses into [`print_table_object`].
pub fn table_field<P: TablePrinter>(
    ctx: &mut Context,
    buf: &[u8],
    table: &Table,
    id: u16,
    name: &str,
    printer: &P,
    cursor: &mut FieldCursor,
) -> Result<()> {
    let slot = match table.field_ptr(buf, id) {
        Some(s) => s,
        None => return Ok(()),
    };
    let addr = read_uoffset(buf, slot);
    cursor.before_field(ctx)?;
    ctx.write_identifier(name)?;
    ctx.write_colon()?;
    print_table_object(ctx, buf, addr, printer)
}

/// Struct field (`spec.md` §4.5 "struct field"): structs are embedded
/// inline (no vtable indirection), so the field offset *is* the
/// struct's base address.
pub fn struct_field<P: StructPrinter>(
    ctx: &mut Context,
    buf: &[u8],
    table: &Table,
    id: u16,
    name: &str,
    printer: &P,
    cursor: &mut FieldCursor,
) -> Result<()> {
    let base = match table.field_ptr(buf, id) {
        Some(a) => a,
        None => return Ok(()),
    };
    cursor.before_field(ctx)?;
    ctx.write_identifier(name)?;
    ctx.write_colon()?;
    print_struct_object(ctx, buf, base, printer)
}

/// A struct member read directly at `base + offset`, with no presence
/// bitmap — struct fields are always printed (`spec.md` §3 "Struct").
pub fn struct_scalar_field<T: Endian + Format>(
    ctx: &mut Context,
    buf: &[u8],
    base: usize,
    offset: usize,
    name: &str,
    cursor: &mut FieldCursor,
) -> Result<()> {
    let value = T::read_le(&buf[base + offset..]);
    cursor.before_field(ctx)?;
    ctx.write_identifier(name)?;
    ctx.write_colon()?;
    ctx.write_number(value)
}

/// Build `<name>_type` into `scratch` and return it as a `&str`. `name`
/// is valid UTF-8 and `_type` is plain ASCII, so the concatenation is
/// always valid UTF-8 too.
fn type_suffixed_name<'a>(scratch: &'a mut [u8; NAME_LEN_MAX], name: &str) -> &'a str {
    let n = name.len();
    scratch[..n].copy_from_slice(name.as_bytes());
    scratch[n..n + 5].copy_from_slice(b"_type");
    std::str::from_utf8(&scratch[..n + 5]).expect("name + \"_type\" is valid UTF-8")
}

/// Union field (`spec.md` §4.5 "union field", §8 property 6). Always
/// emits `<name>_type` first — the discriminator at `id`, rendered as an
/// enum symbol or a raw number exactly like [`enum_field`] — then, if the
/// discriminator is nonzero and resolves to a known variant, the value at
/// `(id + 1)`'s offset under `name` itself. A `NONE`-valued discriminator
/// (wire value `0`) or an unknown one omits only the value, never the
/// `_type` field.
pub fn union_field<T, P>(
    ctx: &mut Context,
    buf: &[u8],
    table: &Table,
    id: u16,
    name: &str,
    symbols: EnumSymbols<T>,
    variant_for: impl FnOnce(T) -> Option<P>,
    cursor: &mut FieldCursor,
) -> Result<()>
where
    T: Endian + Format + PartialEq + Copy + Default,
    P: TablePrinter,
{
    if name.len() + 5 > NAME_LEN_MAX {
        ctx.set_error(Error::BadInput("union field name too long for _type suffix"));
        return Err(Error::BadInput("union field name too long for _type suffix"));
    }
    let discriminator = table.scalar::<T>(buf, id).unwrap_or_default();
    let mut scratch = [0u8; NAME_LEN_MAX];
    let type_name = type_suffixed_name(&mut scratch, name);
    cursor.before_field(ctx)?;
    ctx.write_identifier(type_name)?;
    ctx.write_colon()?;
    write_enum_value(ctx, discriminator, symbols)?;

    if discriminator == T::default() {
        return Ok(());
    }
    let slot = match table.field_ptr(buf, id + 1) {
        Some(s) => s,
        None => return Ok(()),
    };
    let addr = read_uoffset(buf, slot);
    match variant_for(discriminator) {
        Some(printer) => {
            cursor.before_field(ctx)?;
            ctx.write_identifier(name)?;
            ctx.write_colon()?;
            print_table_object(ctx, buf, addr, &printer)
        }
        None => Ok(()), // unknown discriminator: forward-compatible skip of the value only
    }
}

/// Vector-of-unions field (`spec.md` §4.5 "vector-of-unions", §6, §8
/// property 6): a parallel pair of vectors, the type-discriminator
/// vector at `id` emitted under `<name>_type` and the value vector at
/// `(id + 1)` emitted under `name`. Positions where the discriminator is
/// `0`, or resolves to no known variant, render as `null` in the value
/// array rather than shifting the remaining elements.
pub fn union_vector_field<T, P>(
    ctx: &mut Context,
    buf: &[u8],
    table: &Table,
    id: u16,
    name: &str,
    symbols: EnumSymbols<T>,
    variant_for: impl Fn(T) -> Option<P>,
    cursor: &mut FieldCursor,
) -> Result<()>
where
    T: Endian + Format + PartialEq + Copy + Default,
    P: TablePrinter,
{
    if name.len() + 5 > NAME_LEN_MAX {
        ctx.set_error(Error::BadInput("union vector field name too long for _type suffix"));
        return Err(Error::BadInput("union vector field name too long for _type suffix"));
    }
    let (type_slot, value_slot) = match (table.field_ptr(buf, id), table.field_ptr(buf, id + 1)) {
        (Some(t), Some(v)) => (t, v),
        _ => return Ok(()),
    };
    let type_vector = Vector::at(buf, read_uoffset(buf, type_slot));
    let value_vector = Vector::at(buf, read_uoffset(buf, value_slot));

    let mut scratch = [0u8; NAME_LEN_MAX];
    let type_name = type_suffixed_name(&mut scratch, name);
    cursor.before_field(ctx)?;
    ctx.write_identifier(type_name)?;
    ctx.write_colon()?;
    ctx.write_punct(b'[')?;
    ctx.enter_level();
    for i in 0..type_vector.count {
        if i > 0 {
            ctx.write_punct(b',')?;
        }
        ctx.write_indent()?;
        let elem_addr = type_vector.elem_addr(i, <T as Endian>::WIDTH);
        write_enum_value(ctx, T::read_le(&buf[elem_addr..]), symbols)?;
    }
    ctx.exit_level();
    if type_vector.count > 0 {
        ctx.write_indent()?;
    }
    ctx.write_punct(b']')?;

    cursor.before_field(ctx)?;
    ctx.write_identifier(name)?;
    ctx.write_colon()?;
    ctx.write_punct(b'[')?;
    ctx.enter_level();
    for i in 0..value_vector.count {
        if i > 0 {
            ctx.write_punct(b',')?;
        }
        ctx.write_indent()?;
        let discriminator = if i < type_vector.count {
            T::read_le(&buf[type_vector.elem_addr(i, <T as Endian>::WIDTH)..])
        } else {
            T::default()
        };
        if discriminator == T::default() {
            ctx.write_null()?;
        } else {
            match variant_for(discriminator) {
                Some(printer) => {
                    let elem_addr = read_uoffset(buf, value_vector.elem_addr(i, 4));
                    print_table_object(ctx, buf, elem_addr, &printer)?;
                }
                None => ctx.write_null()?,
            }
        }
    }
    ctx.exit_level();
    if value_vector.count > 0 {
        ctx.write_indent()?;
    }
    ctx.write_punct(b']')
}

/// Vector-of-structs field (`spec.md` §4.5 "vector-of-structs", §6):
/// each element is an inline record of fixed `stride` bytes, not an
/// indirect offset — distinct from [`table_vector_field`], whose
/// elements are offsets to out-of-line tables.
pub fn struct_vector_field<P: StructPrinter>(
    ctx: &mut Context,
    buf: &[u8],
    table: &Table,
    id: u16,
    name: &str,
    stride: usize,
    printer: &P,
    cursor: &mut FieldCursor,
) -> Result<()> {
    let slot = match table.field_ptr(buf, id) {
        Some(s) => s,
        None => return Ok(()),
    };
    let vec_addr = read_uoffset(buf, slot);
    let vector = Vector::at(buf, vec_addr);
    cursor.before_field(ctx)?;
    ctx.write_identifier(name)?;
    ctx.write_colon()?;
    ctx.write_punct(b'[')?;
    ctx.enter_level();
    for i in 0..vector.count {
        if i > 0 {
            ctx.write_punct(b',')?;
        }
        ctx.write_indent()?;
        print_struct_object(ctx, buf, vector.elem_addr(i, stride), printer)?;
    }
    ctx.exit_level();
    if vector.count > 0 {
        ctx.write_indent()?;
    }
    ctx.write_punct(b']')
}

/// Byte-vector field rendered as base64 text (`spec.md` §4.5
/// "byte-vector base64 field", §6). Encodes in bounded chunks via
/// [`crate::b64`] rather than materializing the whole encoded string.
pub fn uint8_vector_base64_field(
    ctx: &mut Context,
    buf: &[u8],
    table: &Table,
    id: u16,
    name: &str,
    mode: Mode,
    cursor: &mut FieldCursor,
) -> Result<()> {
    let slot = match table.field_ptr(buf, id) {
        Some(s) => s,
        None => return Ok(()),
    };
    let vec_addr = read_uoffset(buf, slot);
    let vector = Vector::at(buf, vec_addr);
    let bytes = &buf[vector.first..vector.first + vector.count as usize];

    cursor.before_field(ctx)?;
    ctx.write_identifier(name)?;
    ctx.write_colon()?;
    ctx.write_byte(b'"');
    ctx.checkpoint()?;
    let mut offset = 0;
    while offset < bytes.len() {
        let room = ctx.room().saturating_sub(2); // leave slack for the closing quote
        if room < 4 {
            ctx.make_room()?;
            continue;
        }
        let take = b64::chunk_input_len(bytes.len() - offset, room);
        if take == 0 {
            ctx.make_room()?;
            continue;
        }
        let encoded = b64::encode_chunk(&bytes[offset..offset + take], mode);
        ctx.write_unbounded(encoded.as_bytes())?;
        offset += take;
    }
    ctx.write_byte(b'"');
    ctx.checkpoint()
}

/// Nested root (`spec.md` §4.5 "table_as_nested_root"): a byte-vector
/// field whose contents are themselves a complete root buffer,
/// FlatBuffers' `nested_flatbuffer` attribute. Reuses the vector's
/// bytes as a fresh wire buffer and prints its root table without any
/// header validation — the nested buffer shares the outer buffer's
/// trust boundary.
pub fn table_as_nested_root<P: TablePrinter>(
    ctx: &mut Context,
    buf: &[u8],
    table: &Table,
    id: u16,
    name: &str,
    printer: &P,
    cursor: &mut FieldCursor,
) -> Result<()> {
    let slot = match table.field_ptr(buf, id) {
        Some(s) => s,
        None => return Ok(()),
    };
    let vec_addr = read_uoffset(buf, slot);
    let nested = Vector::at(buf, vec_addr);
    let nested_buf = &buf[nested.first..nested.first + nested.count as usize];
    if let Err(e) = crate::root::validate_header(nested_buf, None) {
        ctx.set_error(e.clone());
        return Err(e);
    }
    let root_addr = read_uoffset(nested_buf, 0);
    cursor.before_field(ctx)?;
    ctx.write_identifier(name)?;
    ctx.write_colon()?;
    print_table_object(ctx, nested_buf, root_addr, printer)
}

/// Nested root (`spec.md` §4.5 "struct_as_nested_root"): same as
/// [`table_as_nested_root`] but the nested buffer's root is a struct,
/// embedded inline at the front of the nested bytes.
pub fn struct_as_nested_root<P: StructPrinter>(
    ctx: &mut Context,
    buf: &[u8],
    table: &Table,
    id: u16,
    name: &str,
    printer: &P,
    cursor: &mut FieldCursor,
) -> Result<()> {
    let slot = match table.field_ptr(buf, id) {
        Some(s) => s,
        None => return Ok(()),
    };
    let vec_addr = read_uoffset(buf, slot);
    let nested = Vector::at(buf, vec_addr);
    let nested_buf = &buf[nested.first..nested.first + nested.count as usize];
    if let Err(e) = crate::root::validate_header(nested_buf, None) {
        ctx.set_error(e.clone());
        return Err(e);
    }
    cursor.before_field(ctx)?;
    ctx.write_identifier(name)?;
    ctx.write_colon()?;
    print_struct_object(ctx, nested_buf, 0, printer)
}
