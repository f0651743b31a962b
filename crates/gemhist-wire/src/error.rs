use thiserror::Error;

/// Read-side failure: the buffer does not contain a well-formed record.
///
/// Buffers may come from untrusted sources (files, network captures), so every
/// dereference in this crate is bounds-checked and reports one of these
/// variants instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("out of bounds: offset={offset} len={len} capacity={capacity}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        capacity: usize,
    },

    #[error("integer overflow while resolving offsets")]
    OffsetOverflow,

    #[error("malformed buffer: {0}")]
    Malformed(&'static str),
}

/// Write-side failure: the builder was driven out of protocol, or the message
/// outgrew the wire's offset types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("a vector is already in progress")]
    VectorInProgress,

    #[error("no vector in progress")]
    NoVectorInProgress,

    #[error("vectors must be finished before the field table is begun")]
    VectorInsideTable,

    #[error("vector declared {declared} elements, push exceeds declaration")]
    VectorOverfilled { declared: usize },

    #[error("vector declared {declared} elements, only {pushed} pushed")]
    VectorUnderfilled { declared: usize, pushed: usize },

    #[error("a field table is already in progress")]
    TableInProgress,

    #[error("no field table in progress")]
    NoTableInProgress,

    #[error("field slot {slot} out of range for a table with {field_count} fields")]
    SlotOutOfRange { slot: u16, field_count: u16 },

    #[error("field slot {slot} already set")]
    SlotAlreadySet { slot: u16 },

    #[error("offset does not belong to this builder")]
    ForeignOffset,

    #[error("buffer already finished")]
    AlreadyFinished,

    #[error("buffer not finished")]
    NotFinished,

    #[error("object too large for wire offsets")]
    TooLarge,
}
