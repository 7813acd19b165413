use std::io::SeekFrom;

use plain::Plain;

use crate::{error::OatError, oat_err, Result};

/// Random-access cursor over a byte buffer.
///
/// Reads decode little-endian fields and advance the position. Writes
/// overwrite bytes in place and never grow or shrink the buffer, which is
/// all the patchers need: every target format is patched without resizing.
///
/// Seeking past the end is allowed, the next read or write reports the
/// error instead.
#[derive(Debug)]
pub struct ByteCursor<T> {
    inner: T,
    pos: usize,
}

impl<T: AsRef<[u8]>> ByteCursor<T> {
    pub fn new(inner: T) -> Self {
        Self { inner, pos: 0 }
    }

    /// Creates a cursor that starts at `pos` instead of the buffer start.
    pub fn at(inner: T, pos: usize) -> Self {
        Self { inner, pos }
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.inner.as_ref().len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of bytes between the cursor and the end of the buffer, zero
    /// if the cursor was moved past the end.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.pos)
    }

    pub fn seek(&mut self, target: SeekFrom) -> Result<usize> {
        let (base, delta) = match target {
            SeekFrom::Start(off) => (0i128, off as i128),
            SeekFrom::Current(off) => (self.pos as i128, off as i128),
            SeekFrom::End(off) => (self.len() as i128, off as i128),
        };

        let new_pos = base + delta;
        if new_pos < 0 || new_pos > usize::MAX as i128 {
            return oat_err!(OutOfBounds {
                offset: new_pos.clamp(i64::MIN as i128, i64::MAX as i128) as i64,
                size: 0,
                len: self.len(),
            });
        }
        self.pos = new_pos as usize;
        Ok(self.pos)
    }

    #[inline]
    pub fn skip(&mut self, count: usize) -> Result<usize> {
        self.seek(SeekFrom::Current(count as i64))
    }

    pub fn read_fixed(&mut self, count: usize) -> Result<&[u8]> {
        let available = self.remaining();
        if available < count {
            return oat_err!(UnexpectedEof {
                offset: self.pos,
                needed: count,
                available,
            });
        }

        let start = self.pos;
        self.pos += count;
        Ok(&self.inner.as_ref()[start..start + count])
    }

    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_fixed(N)?);
        Ok(out)
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Copies a fixed `#[repr(C)]` structure out of the buffer.
    ///
    /// The copy has no alignment requirement, so this works at any offset.
    /// Multi-byte fields still carry the on-disk byte order and must be
    /// converted by the caller.
    pub fn read_plain<P: Plain + Default>(&mut self) -> Result<P> {
        let offset = self.pos;
        let needed = std::mem::size_of::<P>();
        let bytes = self.read_fixed(needed)?;

        let mut value = P::default();
        if plain::copy_from_bytes(&mut value, bytes).is_err() {
            return oat_err!(UnexpectedEof {
                offset,
                needed,
                available: bytes.len(),
            });
        }
        Ok(value)
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> ByteCursor<T> {
    pub fn write_fixed(&mut self, data: &[u8]) -> Result<()> {
        if self.remaining() < data.len() {
            return oat_err!(OutOfBounds {
                offset: self.pos as i64,
                size: data.len(),
                len: self.len(),
            });
        }

        let start = self.pos;
        self.inner.as_mut()[start..start + data.len()].copy_from_slice(data);
        self.pos += data.len();
        Ok(())
    }

    #[inline]
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_fixed(&value.to_le_bytes())
    }
}
