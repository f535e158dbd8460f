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

//! Appendable rlp encoder.
//!
//! A list header carries the byte length of its payload, which is only
//! known once every element has been written. The stream therefore keeps
//! a stack of open lists, writes elements straight into the output, and
//! splices each header in at the recorded position the moment its list
//! receives the declared number of items.

use elastic_array::ElasticArray1024;
use integers;
use traits::Encodable;

/// A declared list whose header cannot be written yet.
#[derive(Debug, Copy, Clone)]
struct PendingList {
	/// Output position where the header will be spliced in on close.
	splice_at: usize,
	/// Items still owed before the list closes.
	remaining: usize,
}

/// Appendable rlp encoder.
pub struct RlpStream {
	output: ElasticArray1024<u8>,
	pending: Vec<PendingList>,
	// true while the item most recently appended was a list that closed,
	// and was therefore already counted against its parent
	list_just_closed: bool,
}

impl Default for RlpStream {
	fn default() -> Self {
		RlpStream::new()
	}
}

impl RlpStream {
	/// Initializes instance of empty `RlpStream`.
	pub fn new() -> Self {
		RlpStream {
			output: ElasticArray1024::new(),
			pending: Vec::new(),
			list_just_closed: false,
		}
	}

	/// Initializes the `RlpStream` as a list of `len` items.
	pub fn new_list(len: usize) -> Self {
		let mut stream = RlpStream::new();
		stream.begin_list(len);
		stream
	}

	/// Appends value to the end of stream, chainable.
	///
	/// ```rust
	/// extern crate ethcodec_rlp as rlp;
	/// use rlp::*;
	///
	/// fn main () {
	/// 	let mut stream = RlpStream::new_list(2);
	/// 	stream.append(&"cat").append(&"dog");
	/// 	let out = stream.out();
	/// 	assert_eq!(out, vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']);
	/// }
	/// ```
	pub fn append<'a, E>(&'a mut self, value: &E) -> &'a mut Self where E: Encodable {
		self.list_just_closed = false;
		value.rlp_append(self);
		if !self.list_just_closed {
			self.mark_appended(1);
		}
		self
	}

	/// Declares appending the list of given size, chainable.
	pub fn begin_list(&mut self, len: usize) -> &mut RlpStream {
		self.list_just_closed = false;
		if len == 0 {
			// an empty list is complete the moment it is declared
			self.output.push(0xc0u8);
			self.mark_appended(1);
			self.list_just_closed = true;
		} else {
			let splice_at = self.output.len();
			self.pending.push(PendingList { splice_at: splice_at, remaining: len });
		}
		self
	}

	/// Appends null to the end of stream, chainable.
	pub fn append_empty_data(&mut self) -> &mut RlpStream {
		self.output.push(0x80u8);
		self.mark_appended(1);
		self
	}

	/// Appends raw (pre-serialised) RLP data, counted as `item_count`
	/// items, chainable.
	pub fn append_raw<'a>(&'a mut self, bytes: &[u8], item_count: usize) -> &'a mut RlpStream {
		self.output.append_slice(bytes);
		self.mark_appended(item_count);
		self
	}

	/// Clear the output stream so far.
	pub fn clear(&mut self) {
		self.output.clear();
		self.pending.clear();
	}

	/// Returns true if stream doesn't expect any more items.
	pub fn is_finished(&self) -> bool {
		self.pending.is_empty()
	}

	/// Get raw encoded bytes.
	pub fn as_raw(&self) -> &[u8] {
		&self.output
	}

	/// Streams out encoded bytes.
	///
	/// panic! if stream is not finished.
	pub fn out(self) -> Vec<u8> {
		match self.is_finished() {
			true => self.output.to_vec(),
			false => panic!("stream is incomplete!"),
		}
	}

	/// Drain the object and return the underlying ElasticArray.
	///
	/// panic! if stream is not finished.
	pub fn drain(self) -> ElasticArray1024<u8> {
		match self.is_finished() {
			true => self.output,
			false => panic!("stream is incomplete!"),
		}
	}

	/// Appends a string header and payload. A single byte below 0x80 is
	/// its own encoding and gets no header.
	pub(crate) fn write_value(&mut self, payload: &[u8]) {
		if payload.len() == 1 && payload[0] < 0x80 {
			self.output.push(payload[0]);
			return;
		}
		if payload.len() <= 55 {
			self.output.push(0x80u8 + payload.len() as u8);
		} else {
			let mut header = [0u8; 9];
			let end = integers::put_long(payload.len() as u64, &mut header, 1);
			header[0] = 0xb7u8 + (end - 1) as u8;
			self.output.append_slice(&header[..end]);
		}
		self.output.append_slice(payload);
	}

	/// Counts freshly appended items against the innermost open list.
	/// Every list this completes gets its header spliced in, and itself
	/// counts as one item of the list above it, so closes can cascade.
	fn mark_appended(&mut self, appended: usize) {
		let mut owed = appended;
		let mut innermost = true;
		while owed > 0 {
			let completed = match self.pending.last_mut() {
				None => false,
				Some(list) => {
					if owed > list.remaining {
						panic!("appended more items than the list declared");
					}
					list.remaining -= owed;
					list.remaining == 0
				},
			};
			if innermost {
				self.list_just_closed = completed;
				innermost = false;
			}
			if !completed {
				break;
			}
			let list = self.pending.pop().expect("last_mut saw an entry; qed");
			let payload_len = self.output.len() - list.splice_at;
			self.splice_list_header(list.splice_at, payload_len);
			owed = 1;
		}
	}

	/// Inserts a list header at `at` for a payload of the given length.
	fn splice_list_header(&mut self, at: usize, payload_len: usize) {
		let mut header = [0u8; 9];
		let header_len = if payload_len <= 55 {
			header[0] = 0xc0u8 + payload_len as u8;
			1
		} else {
			let end = integers::put_long(payload_len as u64, &mut header, 1);
			header[0] = 0xf7u8 + (end - 1) as u8;
			end
		};
		self.output.insert_slice(at, &header[..header_len]);
	}
}
