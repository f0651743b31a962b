use gemhist_wire::{BuildError, Builder, TableReader, U32Vector, VectorPos, WireError};

/// Field slot of the X-plane histogram. Slot identity is positional and
/// append-only: existing slots are never renumbered across schema versions.
pub const XHIST_SLOT: u16 = 0;
/// Field slot of the Y-plane histogram.
pub const YHIST_SLOT: u16 = 1;

const FIELD_COUNT: u16 = 2;

/// Read view of one serialized `GEMHist` record.
///
/// Borrows the caller's buffer and owns nothing. Both fields are resolved and
/// bounds-checked at open, so the accessors are infallible; an absent field
/// reads as zero-length, indistinguishable from one written empty. Shared
/// views over one buffer are freely usable from multiple threads as long as
/// nothing mutates the buffer.
#[derive(Debug, Clone, Copy)]
pub struct GemHist<'a> {
    xhist: Option<U32Vector<'a>>,
    yhist: Option<U32Vector<'a>>,
}

impl<'a> GemHist<'a> {
    /// Open the record rooted at the start of `buf`.
    pub fn from_buffer(buf: &'a [u8]) -> Result<Self, WireError> {
        Self::from_buffer_at(buf, 0)
    }

    /// Open the record whose root offset is stored at `root_offset`.
    pub fn from_buffer_at(buf: &'a [u8], root_offset: usize) -> Result<Self, WireError> {
        let table = TableReader::open_root_at(buf, root_offset)?;
        Ok(Self {
            xhist: table.u32_vector(XHIST_SLOT)?,
            yhist: table.u32_vector(YHIST_SLOT)?,
        })
    }

    /// Number of X-plane bins; 0 when the field is absent.
    pub fn xhist_len(&self) -> usize {
        self.xhist.map_or(0, |v| v.len())
    }

    /// X-plane bin at `index`, or `None` past the end.
    pub fn xhist(&self, index: usize) -> Option<u32> {
        self.xhist.and_then(|v| v.get(index))
    }

    /// Iterate the X-plane bins in order; yields nothing when absent.
    pub fn xhist_iter(&self) -> impl Iterator<Item = u32> + 'a {
        self.xhist.into_iter().flat_map(|v| v.iter())
    }

    /// Zero-copy view of the X-plane bins; `None` when the field is absent or
    /// the backing bytes cannot be reinterpreted in place (alignment or host
    /// endianness). Element-for-element identical to [`GemHist::xhist`] when
    /// it returns `Some`.
    pub fn xhist_slice(&self) -> Option<&'a [u32]> {
        self.xhist.and_then(|v| v.as_slice())
    }

    /// Number of Y-plane bins; 0 when the field is absent.
    pub fn yhist_len(&self) -> usize {
        self.yhist.map_or(0, |v| v.len())
    }

    /// Y-plane bin at `index`, or `None` past the end.
    pub fn yhist(&self, index: usize) -> Option<u32> {
        self.yhist.and_then(|v| v.get(index))
    }

    /// Iterate the Y-plane bins in order; yields nothing when absent.
    pub fn yhist_iter(&self) -> impl Iterator<Item = u32> + 'a {
        self.yhist.into_iter().flat_map(|v| v.iter())
    }

    /// Zero-copy view of the Y-plane bins; see [`GemHist::xhist_slice`].
    pub fn yhist_slice(&self) -> Option<&'a [u32]> {
        self.yhist.and_then(|v| v.as_slice())
    }
}

/// Write side of one `GEMHist` record.
///
/// Each field is write-once; fields never set are absent (not zero-length) in
/// the finished buffer. The builder is single-owner and consumed by
/// [`finish`](GemHistBuilder::finish).
#[derive(Debug, Default)]
pub struct GemHistBuilder {
    builder: Builder,
    xhist: Option<VectorPos>,
    yhist: Option<VectorPos>,
}

impl GemHistBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the X-plane bins. Errors if the field was already set.
    pub fn set_xhist(&mut self, bins: &[u32]) -> Result<(), BuildError> {
        if self.xhist.is_some() {
            return Err(BuildError::SlotAlreadySet { slot: XHIST_SLOT });
        }
        self.xhist = Some(self.builder.create_u32_vector(bins)?);
        Ok(())
    }

    /// Serialize the Y-plane bins. Errors if the field was already set.
    pub fn set_yhist(&mut self, bins: &[u32]) -> Result<(), BuildError> {
        if self.yhist.is_some() {
            return Err(BuildError::SlotAlreadySet { slot: YHIST_SLOT });
        }
        self.yhist = Some(self.builder.create_u32_vector(bins)?);
        Ok(())
    }

    /// Write the field table and root offset, yielding the finished message.
    pub fn finish(mut self) -> Result<Vec<u8>, BuildError> {
        self.builder.begin_table(FIELD_COUNT)?;
        if let Some(pos) = self.xhist {
            self.builder.set_vector_field(XHIST_SLOT, pos)?;
        }
        if let Some(pos) = self.yhist {
            self.builder.set_vector_field(YHIST_SLOT, pos)?;
        }
        let table = self.builder.end_table()?;
        self.builder.finish(table)?;
        self.builder.into_vec()
    }
}
