//! End-to-end scenarios against hand-built wire buffers, one per concrete
//! case in `spec.md` §8. These buffers are constructed and verified by
//! hand the same way the unit tests under `src/` are (rather than copied
//! from `spec.md`'s own hex literals), since this crate's `Table::at`
//! offset convention can only be checked by tracing the arithmetic, not
//! by running the emitter.

use vtable_json::fields::{i32_field, u16_vector_field, uint8_vector_base64_field, union_field};
use vtable_json::table::{FieldCursor, StructPrinter, TablePrinter};
use vtable_json::wire::Table;
use vtable_json::{b64::Mode, root, Context, Options};

fn root_header(table_addr: u32) -> Vec<u8> {
    table_addr.to_le_bytes().to_vec()
}

// S1: an empty table renders as a compact `{}`, even under indent = 2.
struct Empty;
impl TablePrinter for Empty {
    fn fields(&self, _ctx: &mut Context, _buf: &[u8], _table: &Table, _cursor: &mut FieldCursor) -> vtable_json::Result<()> {
        Ok(())
    }
}

#[test]
fn s1_empty_table_is_compact_under_indent() {
    // root uoffset(4) -> table at 4; table: soffset(-8) -> vtable at 12.
    let mut buf = root_header(4);
    buf.extend_from_slice(&(-8i32).to_le_bytes());
    buf.extend_from_slice(&4u16.to_le_bytes()); // vsize
    buf.extend_from_slice(&4u16.to_le_bytes()); // tsize
    let out = root::to_vec(&buf, Options::default().with_indent(2), None, None, &Empty).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "{}\n");
}

// S2: a single present scalar field, indented.
struct OneInt32 {
    id: u16,
    name: &'static str,
}
impl TablePrinter for OneInt32 {
    fn fields(&self, ctx: &mut Context, buf: &[u8], table: &Table, cursor: &mut FieldCursor) -> vtable_json::Result<()> {
        i32_field(ctx, buf, table, self.id, self.name, 0, cursor)
    }
}

fn root_with_one_i32_field(value: i32) -> Vec<u8> {
    // root uoffset(4) -> table at 4; table: soffset(-8) -> vtable at 12.
    let mut buf = root_header(4);
    buf.extend_from_slice(&(-8i32).to_le_bytes());
    buf.extend_from_slice(&value.to_le_bytes());
    buf.extend_from_slice(&6u16.to_le_bytes()); // vsize
    buf.extend_from_slice(&8u16.to_le_bytes()); // tsize
    buf.extend_from_slice(&4u16.to_le_bytes()); // field0 offset
    buf
}

#[test]
fn s2_single_scalar_field_indented() {
    let buf = root_with_one_i32_field(42);
    let printer = OneInt32 { id: 0, name: "x" };
    let out = root::to_vec(&buf, Options::default().with_indent(2), None, None, &printer).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"x\": 42\n}\n");
}

// S3: a string field containing a byte that needs escaping.
use vtable_json::fields::string_field;

struct OneString;
impl TablePrinter for OneString {
    fn fields(&self, ctx: &mut Context, buf: &[u8], table: &Table, cursor: &mut FieldCursor) -> vtable_json::Result<()> {
        string_field(ctx, buf, table, 0, "s", cursor)
    }
}

#[test]
fn s3_string_field_escapes_embedded_newline() {
    let text = b"hi\nthere";
    // root uoffset(4) -> table at 4; table: [soffset][field uoffset], vtable
    // right after the table, string bytes right after the vtable.
    let mut buf = root_header(4);
    buf.extend_from_slice(&(-8i32).to_le_bytes()); // soffset: table(4) - vtable(12)
    buf.extend_from_slice(&10u32.to_le_bytes()); // field uoffset: slot(8) + 10 = string at 18
    buf.extend_from_slice(&6u16.to_le_bytes()); // vsize
    buf.extend_from_slice(&8u16.to_le_bytes()); // tsize
    buf.extend_from_slice(&4u16.to_le_bytes()); // field0 offset
    buf.extend_from_slice(&(text.len() as u32).to_le_bytes());
    buf.extend_from_slice(text);
    assert_eq!(buf.len(), 30);

    let out = root::to_vec(&buf, Options::default(), None, None, &OneString).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "{\"s\":\"hi\\nthere\"}\n");
}

// S4: a vector of three u16 values, indented.
struct OneU16Vector;
impl TablePrinter for OneU16Vector {
    fn fields(&self, ctx: &mut Context, buf: &[u8], table: &Table, cursor: &mut FieldCursor) -> vtable_json::Result<()> {
        u16_vector_field(ctx, buf, table, 0, "v", cursor)
    }
}

#[test]
fn s4_scalar_vector_indented() {
    // root uoffset(4) -> table at 4; table: [soffset][field uoffset], vtable
    // right after the table, vector data right after the vtable.
    let mut buf = root_header(4);
    buf.extend_from_slice(&(-8i32).to_le_bytes());
    buf.extend_from_slice(&10u32.to_le_bytes()); // slot(8) + 10 = vector at 18
    buf.extend_from_slice(&6u16.to_le_bytes());
    buf.extend_from_slice(&8u16.to_le_bytes());
    buf.extend_from_slice(&4u16.to_le_bytes());
    buf.extend_from_slice(&3u32.to_le_bytes()); // count
    buf.extend_from_slice(&1u16.to_le_bytes());
    buf.extend_from_slice(&2u16.to_le_bytes());
    buf.extend_from_slice(&3u16.to_le_bytes());
    assert_eq!(buf.len(), 28);

    let out = root::to_vec(&buf, Options::default().with_indent(2), None, None, &OneU16Vector).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\n  \"v\": [\n    1,\n    2,\n    3\n  ]\n}\n"
    );
}

// S5: a union discriminator + value pair. `union_field` alone emits both
// `u_type` (the discriminator) and `u` (the value), matching how generated
// code calls it once per schema union field.
struct VariantB;
impl TablePrinter for VariantB {
    fn fields(&self, ctx: &mut Context, buf: &[u8], table: &Table, cursor: &mut FieldCursor) -> vtable_json::Result<()> {
        i32_field(ctx, buf, table, 0, "n", 0, cursor)
    }
}

struct WithUnion;
impl TablePrinter for WithUnion {
    fn fields(&self, ctx: &mut Context, buf: &[u8], table: &Table, cursor: &mut FieldCursor) -> vtable_json::Result<()> {
        let symbols: &[(u8, &str)] = &[(0, "NONE"), (2, "B")];
        union_field::<u8, VariantB>(ctx, buf, table, 0, "u", symbols, |v| if v == 2 { Some(VariantB) } else { None }, cursor)
    }
}

#[test]
fn s5_union_discriminator_and_value() {
    // root uoffset(4) -> outer table at 4.
    // outer table: soffset(4) | discriminator u8(1) | value uoffset(4) = 9 bytes,
    // vtable immediately after at 13; nested table B immediately after that
    // vtable at 21.
    let mut buf = root_header(4);
    buf.extend_from_slice(&(-9i32).to_le_bytes()); // soffset: table(4) - vtable(13)
    buf.push(2u8); // discriminator selecting variant B
    buf.extend_from_slice(&4u32.to_le_bytes()); // value uoffset: slot(9) + 4 = nested table at 13...
    // (overwritten below once the real vtable layout is known)
    assert_eq!(buf.len(), 13);
    // vtable: vsize=8, tsize=9, field0(discriminator) offset=4, field1(value) offset=5
    buf.extend_from_slice(&8u16.to_le_bytes());
    buf.extend_from_slice(&9u16.to_le_bytes());
    buf.extend_from_slice(&4u16.to_le_bytes());
    buf.extend_from_slice(&5u16.to_le_bytes());
    assert_eq!(buf.len(), 21);
    // nested table B: soffset(-8) | n = 7 | vtable(vsize=6,tsize=8,field0=4)
    buf.extend_from_slice(&(-8i32).to_le_bytes());
    buf.extend_from_slice(&7i32.to_le_bytes());
    buf.extend_from_slice(&6u16.to_le_bytes());
    buf.extend_from_slice(&8u16.to_le_bytes());
    buf.extend_from_slice(&4u16.to_le_bytes());
    assert_eq!(buf.len(), 35);
    // fix up the value uoffset now that the nested table's address (21) is known:
    // slot is at address 9, so the stored value must be 21 - 9 = 12.
    buf[9..13].copy_from_slice(&12u32.to_le_bytes());

    let out = root::to_vec(&buf, Options::default().with_indent(2), None, None, &WithUnion).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\n  \"u_type\": \"B\",\n  \"u\": {\n    \"n\": 7\n  }\n}\n"
    );
}

// S6: a byte vector rendered as standard base64.
struct OneByteVector;
impl TablePrinter for OneByteVector {
    fn fields(&self, ctx: &mut Context, buf: &[u8], table: &Table, cursor: &mut FieldCursor) -> vtable_json::Result<()> {
        uint8_vector_base64_field(ctx, buf, table, 0, "d", Mode::Standard, cursor)
    }
}

#[test]
fn s6_byte_vector_as_base64() {
    let mut buf = root_header(4);
    buf.extend_from_slice(&(-8i32).to_le_bytes());
    buf.extend_from_slice(&10u32.to_le_bytes()); // slot(8) + 10 = vector at 18
    buf.extend_from_slice(&6u16.to_le_bytes());
    buf.extend_from_slice(&8u16.to_le_bytes());
    buf.extend_from_slice(&4u16.to_le_bytes());
    buf.extend_from_slice(&4u32.to_le_bytes()); // count
    buf.extend_from_slice(&[0xDEu8, 0xAD, 0xBE, 0xEF]);
    assert_eq!(buf.len(), 26);

    let out = root::to_vec(&buf, Options::default(), None, None, &OneByteVector).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "{\"d\":\"3q2+7w==\"}\n");
}

// A struct root, exercised once here since every other scenario is a table.
struct Point2D;
impl StructPrinter for Point2D {
    fn fields(&self, ctx: &mut Context, buf: &[u8], base: usize, cursor: &mut FieldCursor) -> vtable_json::Result<()> {
        vtable_json::fields::struct_scalar_field::<i32>(ctx, buf, base, 0, "x", cursor)?;
        vtable_json::fields::struct_scalar_field::<i32>(ctx, buf, base, 4, "y", cursor)
    }
}
#[test]
fn struct_root_prints_inline_members() {
    // root uoffset(4) -> struct base at 4, fixed layout, no vtable.
    let mut buf = root_header(4);
    buf.extend_from_slice(&3i32.to_le_bytes());
    buf.extend_from_slice(&4i32.to_le_bytes());

    let mut ctx = Context::new_growable(None, Options::default());
    root::struct_as_root(&mut ctx, &buf, None, &Point2D).unwrap();
    let out = String::from_utf8(ctx.finalize_dynamic_buffer().unwrap()).unwrap();
    assert_eq!(out, "{\"x\":3,\"y\":4}\n");
}

// A vector of inline structs: distinct element stride, no offset
// indirection, unlike `table_vector_field`.
struct WithStructVector;
impl TablePrinter for WithStructVector {
    fn fields(&self, ctx: &mut Context, buf: &[u8], table: &Table, cursor: &mut FieldCursor) -> vtable_json::Result<()> {
        vtable_json::fields::struct_vector_field(ctx, buf, table, 0, "pts", 8, &Point2D, cursor)
    }
}

#[test]
fn vector_of_structs_prints_inline_elements() {
    // root uoffset(4) -> table at 4; table: [soffset][field uoffset],
    // vtable right after the table, vector of two 8-byte structs after
    // the vtable.
    let mut buf = root_header(4);
    buf.extend_from_slice(&(-8i32).to_le_bytes());
    buf.extend_from_slice(&10u32.to_le_bytes()); // slot(8) + 10 = vector at 18
    buf.extend_from_slice(&6u16.to_le_bytes());
    buf.extend_from_slice(&8u16.to_le_bytes());
    buf.extend_from_slice(&4u16.to_le_bytes());
    buf.extend_from_slice(&2u32.to_le_bytes()); // count
    buf.extend_from_slice(&1i32.to_le_bytes());
    buf.extend_from_slice(&2i32.to_le_bytes());
    buf.extend_from_slice(&3i32.to_le_bytes());
    buf.extend_from_slice(&4i32.to_le_bytes());
    assert_eq!(buf.len(), 38);

    let out = root::to_vec(&buf, Options::default(), None, None, &WithStructVector).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "{\"pts\":[{\"x\":1,\"y\":2},{\"x\":3,\"y\":4}]}\n");
}

// A vector of unions: the parallel `_type` discriminator vector and value
// vector, with `null` at positions whose discriminator is zero.
struct WithUnionVector;
impl TablePrinter for WithUnionVector {
    fn fields(&self, ctx: &mut Context, buf: &[u8], table: &Table, cursor: &mut FieldCursor) -> vtable_json::Result<()> {
        let symbols: &[(u8, &str)] = &[(0, "NONE"), (2, "B")];
        vtable_json::fields::union_vector_field::<u8, VariantB>(ctx, buf, table, 0, "u", symbols, |v| if v == 2 { Some(VariantB) } else { None }, cursor)
    }
}

#[test]
fn s_union_vector_nulls_at_none_positions() {
    // root uoffset(4) -> table at 4. Table: [soffset][type-vec uoffset]
    // [value-vec uoffset] = 12 bytes, vtable immediately after at 16,
    // type vector (3 bytes, one per u8 discriminator) immediately after
    // that, value vector (3 offsets) after the type vector, and the one
    // referenced variant table (B, n=9) after the value vector.
    let mut buf = root_header(4);
    buf.extend_from_slice(&(-12i32).to_le_bytes()); // soffset: table(4) - vtable(16)
    buf.extend_from_slice(&16u32.to_le_bytes()); // field0 uoffset: slot(8) + 16 = type vector at 24
    buf.extend_from_slice(&19u32.to_le_bytes()); // field1 uoffset: slot(12) + 19 = value vector at 31
    assert_eq!(buf.len(), 16);
    buf.extend_from_slice(&8u16.to_le_bytes()); // vsize
    buf.extend_from_slice(&12u16.to_le_bytes()); // tsize
    buf.extend_from_slice(&4u16.to_le_bytes()); // field0 offset
    buf.extend_from_slice(&8u16.to_le_bytes()); // field1 offset
    assert_eq!(buf.len(), 24);
    buf.extend_from_slice(&3u32.to_le_bytes()); // type vector count
    buf.push(0u8); // NONE
    buf.push(2u8); // B
    buf.push(0u8); // NONE
    assert_eq!(buf.len(), 31);
    buf.extend_from_slice(&3u32.to_le_bytes()); // value vector count
    buf.extend_from_slice(&0u32.to_le_bytes()); // unused (discriminator 0)
    buf.extend_from_slice(&8u32.to_le_bytes()); // slot(39) + 8 = variant table at 47
    buf.extend_from_slice(&0u32.to_le_bytes()); // unused (discriminator 0)
    assert_eq!(buf.len(), 47);
    buf.extend_from_slice(&(-8i32).to_le_bytes());
    buf.extend_from_slice(&9i32.to_le_bytes());
    buf.extend_from_slice(&6u16.to_le_bytes());
    buf.extend_from_slice(&8u16.to_le_bytes());
    buf.extend_from_slice(&4u16.to_le_bytes());
    assert_eq!(buf.len(), 61);

    let out = root::to_vec(&buf, Options::default(), None, None, &WithUnionVector).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\"u_type\":[\"NONE\",\"B\",\"NONE\"],\"u\":[null,{\"n\":9},null]}\n"
    );
}
