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

//! Streaming reader yielding one complete rlp item per step.

use std::fmt;
use std::io::{self, Read};
use untrusted_rlp::{UntrustedRlp, PayloadInfo, RlpDecoder, RLP_STRICT};
use error::DecoderError;

const CHUNK_LEN: usize = 4096;

/// Error concerning the streaming reader.
#[derive(Debug)]
pub enum StreamError {
	/// The underlying source failed.
	Io(io::Error),
	/// The source ended in the middle of an item.
	TruncatedItem,
	/// The item header was malformed.
	Rlp(DecoderError),
}

impl fmt::Display for StreamError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			StreamError::Io(ref e) => write!(f, "source error: {}", e),
			StreamError::TruncatedItem => write!(f, "source ended mid-item"),
			StreamError::Rlp(ref e) => write!(f, "malformed item: {}", e),
		}
	}
}

impl ::std::error::Error for StreamError {}

impl From<io::Error> for StreamError {
	fn from(err: io::Error) -> Self {
		StreamError::Io(err)
	}
}

impl From<DecoderError> for StreamError {
	fn from(err: DecoderError) -> Self {
		StreamError::Rlp(err)
	}
}

/// One complete item lifted out of a stream, owning its encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedRlp {
	bytes: Vec<u8>,
	info: PayloadInfo,
	list: bool,
	lenient: bool,
}

impl OwnedRlp {
	/// The raw encoding, header included.
	pub fn as_raw(&self) -> &[u8] {
		&self.bytes
	}

	/// Unwraps into the raw encoding.
	pub fn into_vec(self) -> Vec<u8> {
		self.bytes
	}

	/// List value.
	pub fn is_list(&self) -> bool {
		self.list
	}

	/// Borrows the item as a random-access view.
	pub fn as_rlp(&self) -> UntrustedRlp {
		UntrustedRlp::from_parts(&self.bytes, &self.info, self.list, self.lenient)
	}
}

/// Iterator over the rlp items of an `io::Read` source.
///
/// Maintains an internal buffer which is refilled on demand, so each call
/// to `next` yields one complete item regardless of how the source chunks
/// its reads. A source ending mid-item yields `StreamError::TruncatedItem`.
pub struct RlpReader<R: Read> {
	source: R,
	decoder: RlpDecoder,
	buffer: Vec<u8>,
	exhausted: bool,
	failed: bool,
}

impl<R: Read> RlpReader<R> {
	/// Creates a strict-mode reader over `source`.
	pub fn new(source: R) -> RlpReader<R> {
		RlpReader::with_decoder(source, RLP_STRICT)
	}

	/// Creates a reader using the given decoding profile.
	pub fn with_decoder(source: R, decoder: RlpDecoder) -> RlpReader<R> {
		RlpReader {
			source: source,
			decoder: decoder,
			buffer: Vec::new(),
			exhausted: false,
			failed: false,
		}
	}

	/// Reads more bytes into the buffer; returns false on end of source.
	fn refill(&mut self) -> Result<bool, StreamError> {
		let mut chunk = [0u8; CHUNK_LEN];
		let read = self.source.read(&mut chunk)?;
		if read == 0 {
			self.exhausted = true;
			return Ok(false);
		}
		self.buffer.extend_from_slice(&chunk[..read]);
		Ok(true)
	}

	fn next_item(&mut self) -> Result<Option<OwnedRlp>, StreamError> {
		loop {
			let mut complete = None;
			if !self.buffer.is_empty() {
				// wrap validates the payload bound, so success means the
				// buffer holds the whole item
				match self.decoder.wrap(&self.buffer, 0) {
					Ok(item) => complete = Some((item.payload_info(), item.is_list())),
					// a short buffer only means the item is still arriving
					Err(DecoderError::RlpIsTooShort) => {},
					Err(e) => return Err(StreamError::Rlp(e)),
				}
			}
			if let Some((info, list)) = complete {
				let rest = self.buffer.split_off(info.total());
				let bytes = ::std::mem::replace(&mut self.buffer, rest);
				return Ok(Some(OwnedRlp {
					bytes: bytes,
					info: info,
					list: list,
					lenient: self.decoder == super::RLP_LENIENT,
				}));
			}
			if self.exhausted || !self.refill()? {
				return if self.buffer.is_empty() {
					Ok(None)
				} else {
					Err(StreamError::TruncatedItem)
				};
			}
		}
	}
}

impl<R: Read> Iterator for RlpReader<R> {
	type Item = Result<OwnedRlp, StreamError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}
		match self.next_item() {
			Ok(Some(item)) => Some(Ok(item)),
			Ok(None) => None,
			Err(e) => {
				self.failed = true;
				Some(Err(e))
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use std::io::{self, Read};
	use super::{RlpReader, StreamError};

	/// Hands out one byte per read to exercise refilling.
	struct Trickle<'a> {
		data: &'a [u8],
		position: usize,
	}

	impl<'a> Read for Trickle<'a> {
		fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
			if self.position == self.data.len() || buf.is_empty() {
				return Ok(0);
			}
			buf[0] = self.data[self.position];
			self.position += 1;
			Ok(1)
		}
	}

	#[test]
	fn yields_consecutive_items() {
		let data: Vec<u8> = vec![0x83, b'c', b'a', b't', 0xc1, 0x80, 0x7f];
		let items: Vec<_> = RlpReader::new(io::Cursor::new(data)).collect();
		assert_eq!(items.len(), 3);
		let first = items[0].as_ref().unwrap();
		assert_eq!(first.as_rlp().data(), b"cat");
		let second = items[1].as_ref().unwrap();
		assert!(second.is_list());
		assert_eq!(second.as_rlp().item_count().unwrap(), 1);
		let third = items[2].as_ref().unwrap();
		assert_eq!(third.as_raw(), &[0x7f]);
	}

	#[test]
	fn reassembles_items_from_chunked_source() {
		let mut data: Vec<u8> = vec![0xb8, 0x38];
		data.extend_from_slice(&[b'a'; 56]);
		data.push(0x7f);
		let source = Trickle { data: &data, position: 0 };
		let items: Vec<_> = RlpReader::new(source).collect();
		assert_eq!(items.len(), 2);
		assert_eq!(items[0].as_ref().unwrap().as_rlp().data().len(), 56);
	}

	#[test]
	fn empty_source_yields_nothing() {
		let mut reader = RlpReader::new(io::Cursor::new(Vec::new()));
		assert!(reader.next().is_none());
	}

	#[test]
	fn truncated_item_errors() {
		let data: Vec<u8> = vec![0x83, b'c', b'a'];
		let mut reader = RlpReader::new(io::Cursor::new(data));
		match reader.next() {
			Some(Err(StreamError::TruncatedItem)) => {},
			other => panic!("unexpected result: {:?}", other.map(|r| r.map(|i| i.as_raw().to_vec()))),
		}
		assert!(reader.next().is_none());
	}

	#[test]
	fn malformed_header_errors() {
		let data: Vec<u8> = vec![0x81, 0x79];
		let mut reader = RlpReader::new(io::Cursor::new(data));
		match reader.next() {
			Some(Err(StreamError::Rlp(_))) => {},
			other => panic!("unexpected result: {:?}", other.map(|r| r.map(|i| i.as_raw().to_vec()))),
		}
	}
}
