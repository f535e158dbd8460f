//! Ethereum ABI encoding decoding library.
//!
//! Parses canonical type strings such as `(uint256,bytes,int32[2][],string)`
//! into descriptor trees, validates values against them, and encodes and
//! decodes the 32-byte-unit head/tail wire format, including the
//! non-standard packed variant.
//!
//! The library never hashes: `Function` takes the Keccak-256 digest
//! function from the caller and only deals in the resulting selector.

#![warn(missing_docs)]

extern crate serde;
extern crate ethcodec_integers as integers;

#[cfg(test)]
extern crate serde_json;
#[cfg(test)]
extern crate rustc_serialize;
#[cfg(test)]
extern crate tiny_keccak;

pub mod param_type;
pub mod token;
mod decoder;
mod encoder;
mod error;
mod function;
mod packed;
mod tuple;
mod util;

pub use param_type::{ParamType, Reader, Writer, MAX_TYPE_STRING_LEN};
pub use token::Token;
pub use error::Error;
pub use encoder::Encoder;
pub use decoder::{Decoder, Mode};
pub use packed::{PackedEncoder, PackedDecoder};
pub use function::{Function, SELECTOR_LEN};
pub use tuple::TupleType;

/// ABI address.
pub type Address = [u8; 20];

/// A single 32-byte encoding unit, big-endian.
pub type Word = [u8; 32];
