//! The emitter state — `spec.md` §3 "Emitter state", §4.1 (C1, output
//! buffer & flush discipline) and §4.7 (C7, context lifecycle).
//!
//! `Context` is the only mutable entity in this crate; the wire buffer it
//! reads is a shared, read-only `&[u8]` that outlives it (§3, §5 "Shared
//! resources"). A `Context` is driven by exactly one thread at a time —
//! distinct contexts are independent, as `no_proto`'s `NP_Memory` /
//! `NP_Buffer` split shows for a different (mutable-buffer) use case.

use std::io::Write;

use crate::error::{Error, Result};
use crate::options::Options;
use crate::{BUFFER_SIZE, FLUSH_SIZE, RESERVE};

enum Storage<'a> {
    Owned(Vec<u8>),
    Borrowed(&'a mut [u8]),
}

impl Storage<'_> {
    fn as_slice(&self) -> &[u8] {
        match self {
            Storage::Owned(v) => v.as_slice(),
            Storage::Borrowed(b) => b,
        }
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Storage::Owned(v) => v.as_mut_slice(),
            Storage::Borrowed(b) => b,
        }
    }

    fn len(&self) -> usize {
        match self {
            Storage::Owned(v) => v.len(),
            Storage::Borrowed(b) => b.len(),
        }
    }
}

enum SinkTarget<'a> {
    /// §4.7 "stream sink": an internal buffer of `BUFFER_SIZE`, drained
    /// in `flush_size`-byte prefixes and compacted.
    Stream(&'a mut dyn Write),
    /// §4.7 "fixed buffer": a borrowed caller buffer; crossing `pflush`
    /// means it's exhausted, which is always `overflow`.
    Fixed,
    /// §4.7 "growable buffer": an owned buffer that doubles on demand.
    Growable,
}

/// One emission sequence's mutable state (`spec.md` §3 "Emitter state").
///
/// Three constructors correspond to the three sink kinds of §4.7:
/// [`Context::new_stream`], [`Context::new_fixed`], [`Context::new_growable`].
pub struct Context<'a> {
    buf: Storage<'a>,
    /// Write cursor.
    p: usize,
    /// Flush threshold: `buf ≤ p ≤ pflush < buf + size` (§3 invariant 1).
    pflush: usize,
    /// For the stream sink, the fixed number of bytes drained per
    /// partial flush. For fixed/growable sinks, `size - RESERVE`.
    flush_size: usize,
    /// Running total of flushed-and-buffered bytes (§3).
    total: u64,
    error: Option<Error>,
    options: Options,
    level: u16,
    sink: SinkTarget<'a>,
}

impl<'a> Context<'a> {
    /// §4.7 stream sink: owns an internal buffer, drains to `writer` in
    /// `FLUSH_SIZE`-byte prefixes.
    pub fn new_stream(writer: &'a mut dyn Write, options: Options) -> Self {
        Context {
            buf: Storage::Owned(vec![0u8; BUFFER_SIZE]),
            p: 0,
            pflush: FLUSH_SIZE,
            flush_size: FLUSH_SIZE,
            total: 0,
            error: None,
            options,
            level: 0,
            sink: SinkTarget::Stream(writer),
        }
    }

    /// §4.7 fixed buffer: borrows `buf`; any attempt to grow past it is
    /// `Error::Overflow`. `buf.len()` must exceed `RESERVE` or every
    /// emission will immediately overflow.
    pub fn new_fixed(buf: &'a mut [u8], options: Options) -> Self {
        let flush_size = buf.len().saturating_sub(RESERVE);
        Context {
            buf: Storage::Borrowed(buf),
            p: 0,
            pflush: flush_size,
            flush_size,
            total: 0,
            error: None,
            options,
            level: 0,
            sink: SinkTarget::Fixed,
        }
    }

    /// §4.7 growable buffer: starts at `capacity` (default 1024 bytes,
    /// matching `no_proto`'s `NP_Buffer::new` default) and doubles
    /// whenever it fills.
    pub fn new_growable(capacity: Option<usize>, options: Options) -> Self {
        let size = capacity.unwrap_or(1024).max(RESERVE * 2);
        let flush_size = size - RESERVE;
        Context {
            buf: Storage::Owned(vec![0u8; size]),
            p: 0,
            pflush: flush_size,
            flush_size,
            total: 0,
            error: None,
            options,
            level: 0,
            sink: SinkTarget::Growable,
        }
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn level(&self) -> u16 {
        self.level
    }

    pub fn enter_level(&mut self) {
        self.level += 1;
    }

    pub fn exit_level(&mut self) {
        self.level -= 1;
    }

    /// The sticky error, if any (§3 invariant 5, §7).
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Set the sticky error if none is set yet; first error wins.
    pub fn set_error(&mut self, err: Error) {
        if self.error.is_none() {
            crate::log_error(&err);
            self.error = Some(err);
        }
    }

    pub(crate) fn cursor(&self) -> usize {
        self.p
    }

    /// Write `bytes` at the cursor without any space check. Callers must
    /// guarantee `bytes.len() <= RESERVE` and that invariant 1 currently
    /// holds — every bounded JSON token (punctuation, one scalar
    /// rendering, one indent run) qualifies (§4.1 invariant 2).
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let p = self.p;
        self.buf.as_mut_slice()[p..p + bytes.len()].copy_from_slice(bytes);
        self.p = p + bytes.len();
    }

    pub fn write_byte(&mut self, b: u8) {
        let p = self.p;
        self.buf.as_mut_slice()[p] = b;
        self.p = p + 1;
    }

    /// Call after any bounded emission that might have crossed
    /// `pflush`; performs the sink-specific partial flush if so (§4.1
    /// invariant 3).
    pub fn checkpoint(&mut self) -> Result<()> {
        if self.p > self.pflush {
            self.flush(true)?;
        }
        Ok(())
    }

    /// Write unbounded content (escaped strings, base64) that may exceed
    /// `RESERVE`, looping in `pflush - p`-sized chunks and flushing
    /// between them (§4.1 "All string and indent emitters...").
    pub fn write_unbounded(&mut self, mut bytes: &[u8]) -> Result<()> {
        while !bytes.is_empty() {
            let room = self.pflush - self.p;
            let take = bytes.len().min(room);
            if take > 0 {
                self.write_bytes(&bytes[..take]);
                bytes = &bytes[take..];
            }
            if bytes.is_empty() {
                break;
            }
            self.flush(true)?;
        }
        Ok(())
    }

    /// Remaining headroom before the next checkpoint would trigger a
    /// flush; used by the base64 field primitive to pick chunk sizes
    /// (`spec.md` §4.5).
    pub fn room(&self) -> usize {
        self.pflush - self.p
    }

    /// Drive a partial flush directly (used when a caller, such as the
    /// base64 primitive, needs room before it can compute its next
    /// chunk).
    pub fn make_room(&mut self) -> Result<()> {
        self.flush(true)
    }

    /// §4.1 `flush(partial)`. `partial = true` drains/grows to make
    /// room and is only ever called once `p` has reached `pflush`;
    /// `partial = false` is the final drain issued by a root driver.
    fn flush(&mut self, partial: bool) -> Result<()> {
        match &mut self.sink {
            SinkTarget::Stream(writer) => {
                let drain = if partial { self.flush_size } else { self.p };
                let result = writer.write_all(&self.buf.as_slice()[..drain]);
                if result.is_err() {
                    self.error = Some(Error::Overflow);
                    return Err(Error::Overflow);
                }
                self.total += drain as u64;
                if partial {
                    self.buf.as_mut_slice().copy_within(drain..self.p, 0);
                    self.p -= drain;
                } else {
                    self.p = 0;
                }
                Ok(())
            }
            SinkTarget::Fixed => {
                if partial {
                    self.error = Some(Error::Overflow);
                    Err(Error::Overflow)
                } else {
                    // Nothing external to drain to; the assembled bytes
                    // already live in the caller's buffer.
                    Ok(())
                }
            }
            SinkTarget::Growable => {
                if partial {
                    self.grow()
                } else {
                    // Nothing external to drain to; the assembled bytes
                    // already live in `buf[0..p]`.
                    Ok(())
                }
            }
        }
    }

    fn grow(&mut self) -> Result<()> {
        match &mut self.buf {
            Storage::Owned(v) => {
                let new_size = v.len() * 2;
                v.resize(new_size, 0);
                self.flush_size = new_size - RESERVE;
                self.pflush = self.flush_size;
                Ok(())
            }
            Storage::Borrowed(_) => {
                self.error = Some(Error::Overflow);
                Err(Error::Overflow)
            }
        }
    }

    /// §4.6 step 4: unconditional trailing newline then final flush,
    /// returning total bytes emitted or the sticky error.
    pub fn finish(&mut self) -> Result<usize> {
        self.write_bytes(b"\n");
        self.flush(false)?;
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok((self.total + self.p as u64) as usize),
        }
    }

    /// §4.7 `finalize_dynamic_buffer`: truncates the owned buffer to the
    /// written length and hands it back, leaving the context empty. Only
    /// meaningful for the growable sink.
    pub fn finalize_dynamic_buffer(mut self) -> Result<Vec<u8>> {
        self.write_bytes(b"\n");
        self.flush(false)?;
        if let Some(e) = self.error.clone() {
            return Err(e);
        }
        match &mut self.buf {
            Storage::Owned(v) => {
                v.truncate(self.p);
                Ok(std::mem::take(v))
            }
            Storage::Borrowed(_) => unreachable!("finalize_dynamic_buffer is only valid for the growable sink"),
        }
    }
}
