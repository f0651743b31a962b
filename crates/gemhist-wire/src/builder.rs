use crate::error::BuildError;

const ZERO_PAD: [u8; 4] = [0; 4];

/// Finalized vector, identified by its offset from the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorPos(u32);

/// Finalized field table, identified by its offset from the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TablePos(u32);

#[derive(Debug)]
enum Pending {
    None,
    Vector { declared: usize, pushed: usize },
    Table { slots: Vec<Option<VectorPos>> },
}

/// Builder for flat record buffers.
///
/// The buffer grows back-to-front: objects written first end up nearest the
/// end of the finished message, and every reference is a forward offset.
/// Strictly single-owner for the lifetime of one message; misuse of the
/// vector/table protocol is reported as [`BuildError`] rather than producing
/// a corrupt buffer.
///
/// Assembly order for one record: create each field's vector, then
/// [`begin_table`](Builder::begin_table), bind the vectors with
/// [`set_vector_field`](Builder::set_vector_field),
/// [`end_table`](Builder::end_table), and [`finish`](Builder::finish).
#[derive(Debug)]
pub struct Builder {
    buf: Vec<u8>,
    head: usize,
    pending: Pending,
    finished: bool,
}

impl Builder {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity],
            head: capacity,
            pending: Pending::None,
            finished: false,
        }
    }

    /// Bytes written so far; doubles as the offset-from-end of the next push.
    fn written(&self) -> usize {
        self.buf.len() - self.head
    }

    /// Offset-from-end of the most recently pushed byte, as a wire offset.
    fn wire_pos(&self) -> Result<u32, BuildError> {
        u32::try_from(self.written()).map_err(|_| BuildError::TooLarge)
    }

    /// Wire offset a value of `len` bytes will have once pushed.
    fn wire_pos_after(&self, len: usize) -> Result<u32, BuildError> {
        self.written()
            .checked_add(len)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or(BuildError::TooLarge)
    }

    fn make_space(&mut self, need: usize) -> Result<(), BuildError> {
        if need <= self.head {
            return Ok(());
        }
        let used = self.written();
        let mut new_len = self.buf.len().max(64);
        while new_len - used < need {
            new_len = new_len.checked_mul(2).ok_or(BuildError::TooLarge)?;
        }
        let mut fresh = vec![0u8; new_len];
        fresh[new_len - used..].copy_from_slice(&self.buf[self.head..]);
        self.head = new_len - used;
        self.buf = fresh;
        Ok(())
    }

    fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), BuildError> {
        self.make_space(bytes.len())?;
        self.head -= bytes.len();
        self.buf[self.head..self.head + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Pad with zeros until the write position is `align`-aligned relative to
    /// the end of the buffer. `finish` aligns the total size, which makes
    /// end-relative alignment hold in the final byte stream too.
    fn align(&mut self, align: usize) -> Result<(), BuildError> {
        let rem = self.written() % align;
        if rem != 0 {
            self.push_bytes(&ZERO_PAD[..align - rem])?;
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), BuildError> {
        if self.finished {
            return Err(BuildError::AlreadyFinished);
        }
        Ok(())
    }

    /// Begin a length-prefixed vector of exactly `len` `u32` elements.
    ///
    /// Must not be called while another vector or a table is in progress:
    /// vectors are created first, then referenced from the table.
    pub fn start_u32_vector(&mut self, len: usize) -> Result<(), BuildError> {
        self.ensure_open()?;
        match self.pending {
            Pending::None => {}
            Pending::Vector { .. } => return Err(BuildError::VectorInProgress),
            Pending::Table { .. } => return Err(BuildError::VectorInsideTable),
        }
        // The element count must fit the wire's u32 prefix.
        u32::try_from(len).map_err(|_| BuildError::TooLarge)?;
        len.checked_mul(4).ok_or(BuildError::TooLarge)?;
        self.align(4)?;
        self.pending = Pending::Vector {
            declared: len,
            pushed: 0,
        };
        Ok(())
    }

    /// Append the next element of the vector begun by
    /// [`start_u32_vector`](Builder::start_u32_vector).
    ///
    /// The buffer grows back-to-front, so elements are pushed in reverse
    /// order of their final logical index.
    pub fn push_u32(&mut self, value: u32) -> Result<(), BuildError> {
        match self.pending {
            Pending::Vector { declared, pushed } if pushed < declared => {}
            Pending::Vector { declared, .. } => {
                return Err(BuildError::VectorOverfilled { declared })
            }
            _ => return Err(BuildError::NoVectorInProgress),
        }
        self.push_bytes(&value.to_le_bytes())?;
        if let Pending::Vector { pushed, .. } = &mut self.pending {
            *pushed += 1;
        }
        Ok(())
    }

    /// Write the element-count prefix and finalize the vector.
    pub fn end_vector(&mut self) -> Result<VectorPos, BuildError> {
        let (declared, pushed) = match self.pending {
            Pending::Vector { declared, pushed } => (declared, pushed),
            _ => return Err(BuildError::NoVectorInProgress),
        };
        if pushed != declared {
            return Err(BuildError::VectorUnderfilled { declared, pushed });
        }
        self.push_bytes(&(declared as u32).to_le_bytes())?;
        self.pending = Pending::None;
        Ok(VectorPos(self.wire_pos()?))
    }

    /// Create a whole vector from a slice, preserving element order.
    pub fn create_u32_vector(&mut self, values: &[u32]) -> Result<VectorPos, BuildError> {
        self.start_u32_vector(values.len())?;
        for &value in values.iter().rev() {
            self.push_u32(value)?;
        }
        self.end_vector()
    }

    /// Begin a record with `field_count` slots. Slots left unset are absent
    /// (not zero-length) in the finished record.
    pub fn begin_table(&mut self, field_count: u16) -> Result<(), BuildError> {
        self.ensure_open()?;
        match self.pending {
            Pending::None => {}
            Pending::Vector { .. } => return Err(BuildError::VectorInProgress),
            Pending::Table { .. } => return Err(BuildError::TableInProgress),
        }
        self.pending = Pending::Table {
            slots: vec![None; usize::from(field_count)],
        };
        Ok(())
    }

    /// Bind a previously finalized vector to a field slot.
    pub fn set_vector_field(&mut self, slot: u16, pos: VectorPos) -> Result<(), BuildError> {
        let Pending::Table { slots } = &mut self.pending else {
            return Err(BuildError::NoTableInProgress);
        };
        let field_count = slots.len() as u16;
        let entry = slots
            .get_mut(usize::from(slot))
            .ok_or(BuildError::SlotOutOfRange { slot, field_count })?;
        if entry.is_some() {
            return Err(BuildError::SlotAlreadySet { slot });
        }
        *entry = Some(pos);
        Ok(())
    }

    /// Write the field words and vtable, and finalize the table.
    pub fn end_table(&mut self) -> Result<TablePos, BuildError> {
        let slots = match std::mem::replace(&mut self.pending, Pending::None) {
            Pending::Table { slots } => slots,
            other => {
                self.pending = other;
                return Err(BuildError::NoTableInProgress);
            }
        };

        // Field words, highest slot first so slot 0 lands nearest the table
        // start. Each word is a forward u32 offset to its vector.
        let mut field_offs: Vec<Option<u32>> = vec![None; slots.len()];
        let mut first_field_off: Option<u32> = None;
        for slot in (0..slots.len()).rev() {
            if let Some(VectorPos(vec_off)) = slots[slot] {
                self.align(4)?;
                let off = self.wire_pos_after(4)?;
                let rel = off.checked_sub(vec_off).ok_or(BuildError::ForeignOffset)?;
                self.push_bytes(&rel.to_le_bytes())?;
                field_offs[slot] = Some(off);
                if first_field_off.is_none() {
                    first_field_off = Some(off);
                }
            }
        }

        // Vtable-offset word at the table start; patched once the vtable's
        // position is known.
        self.align(4)?;
        self.push_bytes(&0i32.to_le_bytes())?;
        let table_off = self.wire_pos()?;

        let table_len = match first_field_off {
            Some(first) => table_off - first + 4,
            None => 4,
        };
        let table_len = u16::try_from(table_len).map_err(|_| BuildError::TooLarge)?;

        let vtable_len = 4 + 2 * slots.len();
        let vtable_len_u16 = u16::try_from(vtable_len).map_err(|_| BuildError::TooLarge)?;
        let mut vtable = Vec::with_capacity(vtable_len);
        vtable.extend_from_slice(&vtable_len_u16.to_le_bytes());
        vtable.extend_from_slice(&table_len.to_le_bytes());
        for off in &field_offs {
            let entry = match off {
                Some(field_off) => {
                    u16::try_from(table_off - field_off).map_err(|_| BuildError::TooLarge)?
                }
                None => 0,
            };
            vtable.extend_from_slice(&entry.to_le_bytes());
        }
        self.push_bytes(&vtable)?;
        let vtable_off = self.wire_pos()?;

        // Positive vtable offset: the vtable sits before the table in the
        // final byte stream.
        let soffset = i32::try_from(vtable_off - table_off).map_err(|_| BuildError::TooLarge)?;
        let table_start = self.buf.len() - table_off as usize;
        self.buf[table_start..table_start + 4].copy_from_slice(&soffset.to_le_bytes());

        Ok(TablePos(table_off))
    }

    /// Write the root offset referencing `table` and seal the buffer.
    pub fn finish(&mut self, table: TablePos) -> Result<(), BuildError> {
        self.ensure_open()?;
        match self.pending {
            Pending::None => {}
            Pending::Vector { .. } => return Err(BuildError::VectorInProgress),
            Pending::Table { .. } => return Err(BuildError::TableInProgress),
        }
        self.align(4)?;
        let off = self.wire_pos_after(4)?;
        let rel = off.checked_sub(table.0).ok_or(BuildError::ForeignOffset)?;
        self.push_bytes(&rel.to_le_bytes())?;
        self.finished = true;
        Ok(())
    }

    /// The completed message. Only valid after [`finish`](Builder::finish).
    pub fn finished_bytes(&self) -> Result<&[u8], BuildError> {
        if !self.finished {
            return Err(BuildError::NotFinished);
        }
        Ok(&self.buf[self.head..])
    }

    /// Consume the builder, returning the completed message.
    pub fn into_vec(mut self) -> Result<Vec<u8>, BuildError> {
        if !self.finished {
            return Err(BuildError::NotFinished);
        }
        self.buf.drain(..self.head);
        Ok(self.buf)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
