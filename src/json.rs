//! JSON lexical emitters (`spec.md` §4.3 "JSON lexical emitters", C3):
//! literals, punctuation, indentation and escaped strings. Every method
//! here is a thin [`crate::context::Context`] extension — none of them
//! know about tables, vtables or schemas.

use crate::context::Context;
use crate::error::Result;

const SPACES: [u8; 256] = [b' '; 256];

impl<'a> Context<'a> {
    /// `null` (§4.5 absent-field rendering under certain options).
    pub fn write_null(&mut self) -> Result<()> {
        self.write_bytes(b"null");
        self.checkpoint()
    }

    pub fn write_bool(&mut self, v: bool) -> Result<()> {
        self.write_bytes(if v { b"true" } else { b"false" });
        self.checkpoint()
    }

    /// A single bounded punctuation byte (`{`, `}`, `[`, `]`, `,`).
    pub fn write_punct(&mut self, b: u8) -> Result<()> {
        self.write_byte(b);
        self.checkpoint()
    }

    /// `:` plus a space when `indent > 0` (§4.3 "space after colon").
    pub fn write_colon(&mut self) -> Result<()> {
        self.write_byte(b':');
        if self.options().colon_space() {
            self.write_byte(b' ');
        }
        self.checkpoint()
    }

    /// Newline plus `level * indent` spaces when `indent > 0`; a no-op
    /// flush checkpoint otherwise. Called after every structural `{`,
    /// `[`, `,` and before every closing `}`, `]` (§4.3), so it is the
    /// discipline's natural partial-flush checkpoint regardless of
    /// whether indentation is enabled.
    pub fn write_indent(&mut self) -> Result<()> {
        if self.options().indent > 0 {
            self.write_byte(b'\n');
            let mut spaces = self.level() as usize * self.options().indent as usize;
            while spaces > 0 {
                let take = spaces.min(SPACES.len());
                self.write_bytes(&SPACES[..take]);
                spaces -= take;
                // A run this long already crossed RESERVE; make room
                // before continuing rather than risk overrunning it.
                if spaces > 0 {
                    self.checkpoint()?;
                }
            }
        }
        self.checkpoint()
    }

    /// A double-quoted, schema-known identifier (field name, enum
    /// symbol) or its bare form under `unquote` (§6). Identifiers are
    /// bounded by [`crate::NAME_LEN_MAX`] and never contain characters
    /// that need escaping, so this is always a single bounded write.
    pub fn write_identifier(&mut self, name: &str) -> Result<()> {
        let quote = !self.options().unquote;
        if quote {
            self.write_byte(b'"');
        }
        self.write_bytes(name.as_bytes());
        if quote {
            self.write_byte(b'"');
        }
        self.checkpoint()
    }

    /// An always-quoted JSON string (wire string/byte-vector text),
    /// applying `spec.md` §4.4 escaping: `"` and `\` are backslash
    /// escaped, `\n \r \t \b \f` use their short escapes, other control
    /// bytes (`< 0x20`) become `\u00XX`, and everything else — including
    /// bytes `>= 0x80` — passes through verbatim without UTF-8
    /// validation (§9 open question (b)).
    pub fn write_escaped_string(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_byte(b'"');
        self.checkpoint()?;
        let mut start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            let escape: Option<&[u8]> = match b {
                b'"' => Some(b"\\\""),
                b'\\' => Some(b"\\\\"),
                b'\n' => Some(b"\\n"),
                b'\r' => Some(b"\\r"),
                b'\t' => Some(b"\\t"),
                0x08 => Some(b"\\b"),
                0x0c => Some(b"\\f"),
                0x00..=0x1f => None, // handled below via \u00XX
                _ => continue,
            };
            if i > start {
                self.write_unbounded(&bytes[start..i])?;
            }
            match escape {
                Some(seq) => self.write_bytes(seq),
                None => self.write_hex_escape(b),
            }
            self.checkpoint()?;
            start = i + 1;
        }
        if start < bytes.len() {
            self.write_unbounded(&bytes[start..])?;
        }
        self.write_byte(b'"');
        self.checkpoint()
    }

    fn write_hex_escape(&mut self, b: u8) {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        self.write_bytes(b"\\u00");
        self.write_byte(HEX[(b >> 4) as usize]);
        self.write_byte(HEX[(b & 0xf) as usize]);
    }

    /// Render a scalar via [`crate::numeric::Format`] and write it
    /// (bounded: `RESERVE` covers the longest rendering of any scalar).
    pub fn write_number<T: crate::numeric::Format>(&mut self, v: T) -> Result<()> {
        let mut scratch = [0u8; 64];
        let n = v.write_into(&mut scratch);
        self.write_bytes(&scratch[..n]);
        self.checkpoint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn render(f: impl FnOnce(&mut Context) -> Result<()>, options: Options) -> String {
        let mut ctx = Context::new_growable(None, options);
        f(&mut ctx).unwrap();
        String::from_utf8(ctx.finalize_dynamic_buffer().unwrap()).unwrap()
    }

    #[test]
    fn escapes_control_characters_and_quotes() {
        let out = render(|c| c.write_escaped_string(b"line\nbreak \"quoted\" \\slash\\"), Options::default());
        assert_eq!(out, "\"line\\nbreak \\\"quoted\\\" \\\\slash\\\\\"\n");
    }

    #[test]
    fn non_ascii_bytes_pass_through_unescaped() {
        let out = render(|c| c.write_escaped_string("héllo".as_bytes()), Options::default());
        assert_eq!(out, "\"héllo\"\n");
    }

    #[test]
    fn control_byte_below_0x20_uses_u00xx() {
        let out = render(|c| c.write_escaped_string(&[0x01]), Options::default());
        assert_eq!(out, "\"\\u0001\"\n");
    }

    #[test]
    fn unquote_option_drops_quotes_on_identifiers() {
        let out = render(|c| c.write_identifier("field"), Options::default().with_unquote(true));
        assert_eq!(out, "field\n");
    }

    #[test]
    fn indent_zero_emits_no_whitespace() {
        let out = render(
            |c| {
                c.write_punct(b'{')?;
                c.write_indent()?;
                c.write_punct(b'}')
            },
            Options::default(),
        );
        assert_eq!(out, "{}\n");
    }

    #[test]
    fn indent_nonzero_emits_newline_and_spaces_per_level() {
        let out = render(
            |c| {
                c.write_punct(b'{')?;
                c.enter_level();
                c.write_indent()?;
                c.write_punct(b'}')
            },
            Options::default().with_indent(2),
        );
        assert_eq!(out, "{\n  }\n");
    }
}
