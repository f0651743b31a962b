#![forbid(unsafe_code)]

//! Typed accessors for the `GEMHist` monitoring record.
//!
//! A `GEMHist` message carries two optional histograms of `u32` bin counts,
//! `Xhist` and `Yhist`, one per readout plane of a GEM detector. This crate
//! is the schema-aware layer over the generic wire primitives in
//! `gemhist-wire`: [`GemHist`] reads a record out of a caller-owned byte
//! buffer, [`GemHistBuilder`] writes one, and [`Hists`] accumulates per-strip
//! hit counts between publishes the way the detector pipeline batches its
//! monitoring output.
//!
//! Absent fields read as zero-length by design; producers that never set a
//! field leave it absent on the wire, and consumers cannot (and should not)
//! tell the difference through the length accessors.

mod hists;
mod record;

pub use gemhist_wire::{BuildError, WireError};

pub use crate::hists::Hists;
pub use crate::record::{GemHist, GemHistBuilder, XHIST_SLOT, YHIST_SLOT};
