//! Table traversal engine (`spec.md` §4.6, component C4): the generic
//! `{ ... }` wrapper that every schema-generated table printer runs
//! inside, including the depth bound and the per-level comma bookkeeping
//! every field primitive in [`crate::fields`] depends on.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::wire::Table;
use crate::MAX_LEVELS;

/// Tracks whether the next field at the current nesting level needs a
/// leading comma (`spec.md` §4.3: "a comma precedes every field after
/// the first one actually printed at that level").
///
/// Separate from `Context` because printing is recursive: each nested
/// table gets its own cursor, while `Context::level` tracks depth for
/// the recursion bound.
pub struct FieldCursor {
    first: bool,
}

impl FieldCursor {
    pub fn new() -> Self {
        FieldCursor { first: true }
    }

    /// Call immediately before writing a field's name. Emits the
    /// separating comma (if this isn't the first field actually
    /// printed) and the indent run, then marks the cursor non-first.
    pub fn before_field(&mut self, ctx: &mut Context) -> Result<()> {
        if !self.first {
            ctx.write_punct(b',')?;
        }
        self.first = false;
        ctx.write_indent()
    }

    /// Whether any field has actually been printed yet — an object with
    /// nothing printed renders as a compact `{}`/`[]` with no interior
    /// indent, the way `spec.md` §8 scenario S1 expects.
    pub fn any_printed(&self) -> bool {
        !self.first
    }
}

impl Default for FieldCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Schema-generated glue implements this once per table type. The
/// generated `fields` method calls the primitives in [`crate::fields`]
/// in schema-declaration order, each one deciding for itself (via
/// `Options` and vtable presence) whether it has anything to print.
pub trait TablePrinter {
    fn fields(&self, ctx: &mut Context, buf: &[u8], table: &Table, cursor: &mut FieldCursor) -> Result<()>;
}

/// Print the table object at `address`: opening/closing braces, the
/// recursion-depth check, and the per-level field cursor (`spec.md` §4.6
/// `print_table_object`).
///
/// `deep_recursion` is raised, without touching the buffer, the moment
/// `Context::level` would exceed [`MAX_LEVELS`] — matching §7's "errors
/// are detected before any further bytes are emitted for the failing
/// construct."
pub fn print_table_object<P: TablePrinter>(ctx: &mut Context, buf: &[u8], address: usize, printer: &P) -> Result<()> {
    if ctx.level() >= MAX_LEVELS {
        ctx.set_error(Error::DeepRecursion);
        return Err(Error::DeepRecursion);
    }
    let table = Table::at(buf, address);
    ctx.write_punct(b'{')?;
    ctx.enter_level();
    let mut cursor = FieldCursor::new();
    let result = printer.fields(ctx, buf, &table, &mut cursor);
    ctx.exit_level();
    result?;
    if cursor.any_printed() {
        ctx.write_indent()?;
    }
    ctx.write_punct(b'}')
}

/// Schema-generated glue implements this once per struct type. Structs
/// have no vtable and no field presence, so the generated `fields`
/// method is unconditional — it always prints every member via
/// [`crate::fields::struct_scalar_field`] or a nested
/// [`print_struct_object`]/[`print_table_object`] call.
pub trait StructPrinter {
    fn fields(&self, ctx: &mut Context, buf: &[u8], base: usize, cursor: &mut FieldCursor) -> Result<()>;
}

/// Print the struct object inline at `base` (`spec.md` §3 "Struct",
/// §4.5 "struct field"). Structs are fixed-layout with no vtable, so
/// there's no presence check and no possibility of an absent field —
/// only the brace/comma bookkeeping and the same recursion bound tables
/// use, since a struct can itself nest structs.
pub fn print_struct_object<P: StructPrinter>(ctx: &mut Context, buf: &[u8], base: usize, printer: &P) -> Result<()> {
    if ctx.level() >= MAX_LEVELS {
        ctx.set_error(Error::DeepRecursion);
        return Err(Error::DeepRecursion);
    }
    ctx.write_punct(b'{')?;
    ctx.enter_level();
    let mut cursor = FieldCursor::new();
    let result = printer.fields(ctx, buf, base, &mut cursor);
    ctx.exit_level();
    result?;
    if cursor.any_printed() {
        ctx.write_indent()?;
    }
    ctx.write_punct(b'}')
}
