//! PEM certificate-chain decoding and CA classification.
//!
//! This crate is the pure, synchronous leaf of certwatch: it turns an opaque
//! byte payload of concatenated PEM blocks into parsed, classified
//! certificate blocks and filters them down to the ones worth republishing.
//! No I/O happens here; everything is a function of its input.

#![forbid(unsafe_code)]

pub mod decode;
pub mod select;

pub use decode::{decode_chain, DecodedBlock};
pub use select::select_chain;
