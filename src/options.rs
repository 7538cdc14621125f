//! Formatting options threaded through every emission (`spec.md` §3, §6
//! "Options enumerated").

/// Runtime formatting knobs for a [`crate::context::Context`].
///
/// All fields default to the conservative / strict-JSON choice (spec.md
/// doesn't state defaults explicitly beyond implying `indent = 0` is the
/// compact baseline and every flag starts off); callers opt into the
/// non-standard-JSON deviations listed in §6 one flag at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Spaces per indent level. `0` disables all whitespace (§4.3
    /// "indent"): no newlines, no space after `:`.
    pub indent: u16,
    /// Emit field names and enum symbols unquoted (§6) — not valid
    /// standard JSON.
    pub unquote: bool,
    /// Print raw numbers instead of enum symbols (§4.5 "enum field").
    pub noenum: bool,
    /// Omit scalar fields whose value equals the schema default (§4.5
    /// "scalar field").
    pub skip_default: bool,
    /// Emit a scalar field's default even when absent from the vtable
    /// (§4.5, §9 open question (a)).
    pub force_default: bool,
    /// Always wrap bit-flag enums in quotes even when only one flag is
    /// emitted (§9 open question (c)); normally a lone flag under
    /// `unquote = true` prints bare.
    pub always_quote_flags: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            indent: 0,
            unquote: false,
            noenum: false,
            skip_default: false,
            force_default: false,
            always_quote_flags: false,
        }
    }
}

impl Options {
    /// Start from [`Default`] and set `indent`.
    pub fn with_indent(mut self, indent: u16) -> Self {
        self.indent = indent;
        self
    }

    /// Start from [`Default`] and set `unquote`.
    pub fn with_unquote(mut self, unquote: bool) -> Self {
        self.unquote = unquote;
        self
    }

    /// Start from [`Default`] and set `noenum`.
    pub fn with_noenum(mut self, noenum: bool) -> Self {
        self.noenum = noenum;
        self
    }

    /// Start from [`Default`] and set `skip_default`.
    pub fn with_skip_default(mut self, skip_default: bool) -> Self {
        self.skip_default = skip_default;
        self
    }

    /// Start from [`Default`] and set `force_default`.
    pub fn with_force_default(mut self, force_default: bool) -> Self {
        self.force_default = force_default;
        self
    }

    /// Whether a colon should be followed by a space (§4.3 "space after
    /// colon"): one space when indenting, none in compact mode.
    pub fn colon_space(&self) -> bool {
        self.indent > 0
    }
}
