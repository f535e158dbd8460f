// Copyright 2015-2017 Parity Technologies (UK) Ltd.
// This file is part of Parity.

// Parity is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// Parity is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with Parity.  If not, see <http://www.gnu.org/licenses/>.

//! Recursive Length Prefix serialization crate.
//!
//! Everything revolves around `UntrustedRlp`, a random-access view over
//! one item in a byte slice. Nothing is copied on wrap: sub-items are
//! further views into the same buffer, and each header is checked for
//! canonical (minimal) form before it is believed, so corrupted input
//! surfaces as a `DecoderError` instead of a bad read. The lenient
//! profile drops the canonicity checks but still refuses items that
//! overrun their region.
//!
//! Around that core:
//!
//! * the `decode`/`encode` free functions handle the one-shot case of a
//!   single value in a single buffer;
//! * `RlpStream` builds encodings incrementally, splicing each list
//!   header in once the list has received all of its declared items;
//! * `RlpReader` feeds from an `io::Read` source, buffering only as much
//!   as it takes to hand out the next complete item, however the source
//!   chunks its reads.

extern crate elastic_array;
extern crate ethcodec_integers as integers;

mod traits;
mod error;
mod untrusted_rlp;
mod stream;
mod reader;
mod impls;

use elastic_array::ElasticArray1024;

pub use error::DecoderError;
pub use traits::{Decodable, Encodable};
pub use untrusted_rlp::{UntrustedRlp, UntrustedRlpIterator, PayloadInfo, RlpDecoder, RLP_STRICT, RLP_LENIENT};
pub use stream::RlpStream;
pub use reader::{RlpReader, OwnedRlp, StreamError};

/// The RLP encoded empty data (used to mean "null value").
pub const NULL_RLP: [u8; 1] = [0x80; 1];
/// The RLP encoded empty list.
pub const EMPTY_LIST_RLP: [u8; 1] = [0xC0; 1];

/// Shortcut function to decode untrusted rlp
///
/// ```rust
/// extern crate ethcodec_rlp as rlp;
///
/// fn main () {
/// 	let data = vec![0x83, b'c', b'a', b't'];
/// 	let animal: String = rlp::decode(&data).unwrap();
/// 	assert_eq!(animal, "cat".to_owned());
/// }
/// ```
pub fn decode<T>(bytes: &[u8]) -> Result<T, DecoderError> where T: Decodable {
	let rlp = UntrustedRlp::new(bytes)?;
	rlp.as_val()
}

/// Shortcut function to decode an rlp list of homogeneous values.
pub fn decode_list<T>(bytes: &[u8]) -> Result<Vec<T>, DecoderError> where T: Decodable {
	let rlp = UntrustedRlp::new(bytes)?;
	rlp.as_list()
}

/// Shortcut function to encode structure into rlp.
///
/// ```rust
/// extern crate ethcodec_rlp as rlp;
///
/// fn main () {
/// 	let animal = "cat";
/// 	let out = rlp::encode(&animal).to_vec();
/// 	assert_eq!(out, vec![0x83, b'c', b'a', b't']);
/// }
/// ```
pub fn encode<E>(object: &E) -> ElasticArray1024<u8> where E: Encodable {
	let mut stream = RlpStream::new();
	stream.append(object);
	stream.drain()
}

/// Shortcut function to encode a slice as an rlp list.
pub fn encode_list<E>(object: &[E]) -> ElasticArray1024<u8> where E: Encodable {
	let mut stream = RlpStream::new_list(object.len());
	for item in object {
		stream.append(item);
	}
	stream.drain()
}
