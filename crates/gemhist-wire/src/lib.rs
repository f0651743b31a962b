#![forbid(unsafe_code)]

//! Flat little-endian record primitives for GEM monitoring buffers.
//!
//! A message is a root offset, one field table (an `i32` back-reference to a
//! vtable of per-slot `u16` offsets), and length-prefixed `u32` vectors, all
//! referenced by forward relative offsets. The layout is bit-compatible with
//! the FlatBuffers encoding the detector pipeline historically produced, so
//! existing capture files remain readable.
//!
//! Reading is zero-copy over a caller-owned `&[u8]` and fully bounds-checked;
//! writing goes through [`Builder`], which grows its buffer back-to-front and
//! reports protocol misuse as [`BuildError`]. Typed per-schema accessors live
//! in the `gemhist` crate; this crate knows nothing about field meaning.

mod builder;
mod error;
mod reader;

pub use crate::builder::{Builder, TablePos, VectorPos};
pub use crate::error::{BuildError, WireError};
pub use crate::reader::{TableReader, U32Vector};
