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

use std::fmt;
use integers;
use {DecoderError, Decodable};

/// Decoding profile. The strict profile additionally rejects non-minimal
/// (longer than necessary) header encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RlpDecoder {
	lenient: bool,
}

/// Rejects non-canonical encodings.
pub const RLP_STRICT: RlpDecoder = RlpDecoder { lenient: false };
/// Accepts non-canonical encodings; items overrunning their region are
/// still rejected.
pub const RLP_LENIENT: RlpDecoder = RlpDecoder { lenient: true };

impl RlpDecoder {
	/// Parses the item header at `offset` and returns a validated view.
	pub fn wrap<'a>(&self, buffer: &'a [u8], offset: usize) -> Result<UntrustedRlp<'a>, DecoderError> {
		UntrustedRlp::wrap(buffer, offset, buffer.len(), self.lenient)
	}
}

/// Header geometry of a wrapped item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadInfo {
	/// Byte count of the item header.
	pub header_len: usize,
	/// Byte count of the item payload.
	pub value_len: usize,
}

impl PayloadInfo {
	/// Total length of the item encoding.
	pub fn total(&self) -> usize {
		self.header_len + self.value_len
	}
}

/// Data-oriented view onto one rlp item inside an untrusted buffer.
///
/// Wrapping parses and validates the header only; payloads are never
/// copied, and sub-items are views into the same backing buffer.
#[derive(Debug, Clone, Copy)]
pub struct UntrustedRlp<'a> {
	buffer: &'a [u8],
	start: usize,
	data_index: usize,
	data_len: usize,
	list: bool,
	lenient: bool,
}

impl<'a> fmt::Display for UntrustedRlp<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if self.list {
			write!(f, "[")?;
			for (i, item) in self.iter().enumerate() {
				if i != 0 {
					write!(f, ", ")?;
				}
				match item {
					Ok(item) => write!(f, "{}", item)?,
					Err(e) => write!(f, "!{}", e)?,
				}
			}
			write!(f, "]")
		} else {
			write!(f, "\"0x")?;
			for b in self.data() {
				write!(f, "{:02x}", b)?;
			}
			write!(f, "\"")
		}
	}
}

impl<'a, 'view> UntrustedRlp<'a> where 'a: 'view {
	/// Wraps `bytes` as a single item, rejecting non-canonical headers
	/// and unconsumed trailing bytes.
	pub fn new(bytes: &'a [u8]) -> Result<UntrustedRlp<'a>, DecoderError> {
		Self::wrap_whole(bytes, false)
	}

	/// Wraps `bytes` without the minimal-encoding checks. Trailing bytes
	/// are still rejected.
	pub fn new_lenient(bytes: &'a [u8]) -> Result<UntrustedRlp<'a>, DecoderError> {
		Self::wrap_whole(bytes, true)
	}

	/// Wraps a buffer that must hold exactly one item.
	fn wrap_whole(bytes: &'a [u8], lenient: bool) -> Result<UntrustedRlp<'a>, DecoderError> {
		let rlp = UntrustedRlp::wrap(bytes, 0, bytes.len(), lenient)?;
		if rlp.end_index() != bytes.len() {
			return Err(DecoderError::RlpIsTooBig);
		}
		Ok(rlp)
	}

	pub(crate) fn from_parts(buffer: &'a [u8], info: &PayloadInfo, list: bool, lenient: bool) -> UntrustedRlp<'a> {
		UntrustedRlp {
			buffer: buffer,
			start: 0,
			data_index: info.header_len,
			data_len: info.value_len,
			list: list,
			lenient: lenient,
		}
	}

	/// Parses the header at `offset`; `limit` is the end of the enclosing
	/// region, which the item must not overrun.
	fn wrap(buffer: &'a [u8], offset: usize, limit: usize, lenient: bool) -> Result<UntrustedRlp<'a>, DecoderError> {
		if offset >= limit || offset >= buffer.len() {
			return Err(DecoderError::RlpIsTooShort);
		}
		let header = buffer[offset];
		let (list, data_index, data_len) = match header {
			0x00..=0x7f => (false, offset, 1),
			0x80..=0xb7 => {
				let len = (header - 0x80) as usize;
				let data_index = offset + 1;
				if !lenient && len == 1 {
					if data_index >= limit {
						return Err(DecoderError::RlpIsTooShort);
					}
					// a lone byte below 0x80 must be its own encoding
					if buffer[data_index] < 0x80 {
						return Err(DecoderError::RlpInvalidIndirection);
					}
				}
				(false, data_index, len)
			},
			0xb8..=0xbf => {
				let len_of_len = (header - 0xb7) as usize;
				let len = Self::read_length(buffer, offset + 1, len_of_len, lenient, DecoderError::RlpDataLenWithZeroPrefix)?;
				if !lenient && len < 56 {
					return Err(DecoderError::RlpInvalidIndirection);
				}
				(false, offset + 1 + len_of_len, len)
			},
			0xc0..=0xf7 => (true, offset + 1, (header - 0xc0) as usize),
			0xf8..=0xff => {
				let len_of_len = (header - 0xf7) as usize;
				let len = Self::read_length(buffer, offset + 1, len_of_len, lenient, DecoderError::RlpListLenWithZeroPrefix)?;
				if !lenient && len < 56 {
					return Err(DecoderError::RlpInvalidIndirection);
				}
				(true, offset + 1 + len_of_len, len)
			},
		};
		let end = data_index.checked_add(data_len).ok_or(DecoderError::RlpInvalidLength)?;
		if end > limit {
			return Err(if limit == buffer.len() {
				DecoderError::RlpIsTooShort
			} else {
				DecoderError::RlpInconsistentLengthAndData
			});
		}
		Ok(UntrustedRlp {
			buffer: buffer,
			start: offset,
			data_index: data_index,
			data_len: data_len,
			list: list,
			lenient: lenient,
		})
	}

	fn read_length(buffer: &[u8], offset: usize, len_of_len: usize, lenient: bool, zero_prefix: DecoderError) -> Result<usize, DecoderError> {
		let len = integers::get_long(buffer, offset, len_of_len, lenient).map_err(|e| match e {
			integers::Error::LeadingZero => zero_prefix,
			integers::Error::SourceTooShort => DecoderError::RlpIsTooShort,
			_ => DecoderError::RlpInvalidLength,
		})?;
		if len > usize::max_value() as u64 {
			return Err(DecoderError::RlpInvalidLength);
		}
		Ok(len as usize)
	}

	/// The raw encoding of this item, header included.
	pub fn as_raw(&'view self) -> &'a [u8] {
		&self.buffer[self.start..self.data_index + self.data_len]
	}

	/// The item payload, without the header.
	pub fn data(&'view self) -> &'a [u8] {
		&self.buffer[self.data_index..self.data_index + self.data_len]
	}

	/// Header geometry of this item.
	pub fn payload_info(&self) -> PayloadInfo {
		PayloadInfo {
			header_len: self.data_index - self.start,
			value_len: self.data_len,
		}
	}

	/// Absolute offset just past this item in the backing buffer.
	pub fn end_index(&self) -> usize {
		self.data_index + self.data_len
	}

	/// List value.
	pub fn is_list(&self) -> bool {
		self.list
	}

	/// String value.
	pub fn is_data(&self) -> bool {
		!self.list
	}

	/// Contains a zero-length string or zero-length list.
	pub fn is_empty(&self) -> bool {
		self.data_len == 0
	}

	/// Returns the number of sub-items.
	///
	/// ```rust
	/// extern crate ethcodec_rlp as rlp;
	/// use rlp::*;
	///
	/// fn main () {
	/// 	let data = vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g'];
	/// 	let rlp = UntrustedRlp::new(&data).unwrap();
	/// 	assert_eq!(rlp.item_count().unwrap(), 2);
	/// }
	/// ```
	pub fn item_count(&self) -> Result<usize, DecoderError> {
		if !self.list {
			return Err(DecoderError::RlpExpectedToBeList);
		}
		let mut count = 0;
		let end = self.end_index();
		let mut index = self.data_index;
		while index < end {
			let item = UntrustedRlp::wrap(self.buffer, index, end, self.lenient)?;
			index = item.end_index();
			count += 1;
		}
		Ok(count)
	}

	/// Get view onto the sub-item at `index`.
	///
	/// ```rust
	/// extern crate ethcodec_rlp as rlp;
	/// use rlp::*;
	///
	/// fn main () {
	/// 	let data = vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g'];
	/// 	let rlp = UntrustedRlp::new(&data).unwrap();
	/// 	let dog = rlp.at(1).unwrap();
	/// 	assert_eq!(dog.data(), &[b'd', b'o', b'g']);
	/// }
	/// ```
	pub fn at(&'view self, index: usize) -> Result<UntrustedRlp<'a>, DecoderError> {
		if !self.list {
			return Err(DecoderError::RlpExpectedToBeList);
		}
		let end = self.end_index();
		let mut position = self.data_index;
		let mut current = 0;
		while position < end {
			let item = UntrustedRlp::wrap(self.buffer, position, end, self.lenient)?;
			if current == index {
				return Ok(item);
			}
			position = item.end_index();
			current += 1;
		}
		Err(DecoderError::RlpIsTooShort)
	}

	/// Get iterator over sub-items.
	pub fn iter(&'view self) -> UntrustedRlpIterator<'a, 'view> {
		self.into_iter()
	}

	/// Decode this item into an object.
	pub fn as_val<T>(&self) -> Result<T, DecoderError> where T: Decodable {
		T::decode(self)
	}

	/// Decode this list into a vector of objects.
	pub fn as_list<T>(&self) -> Result<Vec<T>, DecoderError> where T: Decodable {
		let mut result = vec![];
		for item in self.iter() {
			result.push(item?.as_val()?);
		}
		Ok(result)
	}

	/// Decode the sub-item at `index` into an object.
	pub fn val_at<T>(&self, index: usize) -> Result<T, DecoderError> where T: Decodable {
		self.at(index)?.as_val()
	}
}

/// Iterator over rlp-slice list elements.
pub struct UntrustedRlpIterator<'a, 'view> where 'a: 'view {
	rlp: &'view UntrustedRlp<'a>,
	index: usize,
	failed: bool,
}

impl<'a, 'view> IntoIterator for &'view UntrustedRlp<'a> where 'a: 'view {
	type Item = Result<UntrustedRlp<'a>, DecoderError>;
	type IntoIter = UntrustedRlpIterator<'a, 'view>;

	fn into_iter(self) -> Self::IntoIter {
		UntrustedRlpIterator {
			rlp: self,
			index: self.data_index,
			failed: false,
		}
	}
}

impl<'a, 'view> Iterator for UntrustedRlpIterator<'a, 'view> {
	type Item = Result<UntrustedRlp<'a>, DecoderError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed || !self.rlp.list || self.index >= self.rlp.end_index() {
			return None;
		}
		match UntrustedRlp::wrap(self.rlp.buffer, self.index, self.rlp.end_index(), self.rlp.lenient) {
			Ok(item) => {
				self.index = item.end_index();
				Some(Ok(item))
			},
			Err(e) => {
				self.failed = true;
				Some(Err(e))
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use {UntrustedRlp, DecoderError, RLP_STRICT, RLP_LENIENT};

	#[test]
	fn wrap_single_byte() {
		let data = [0x7fu8];
		let rlp = UntrustedRlp::new(&data).unwrap();
		assert!(rlp.is_data());
		assert_eq!(rlp.data(), &[0x7f]);
		assert_eq!(rlp.as_raw(), &[0x7f]);
	}

	#[test]
	fn wrap_short_string() {
		let data = [0x83, b'c', b'a', b't'];
		let rlp = UntrustedRlp::new(&data).unwrap();
		assert!(rlp.is_data());
		assert_eq!(rlp.data(), b"cat");
		assert_eq!(rlp.payload_info().header_len, 1);
		assert_eq!(rlp.payload_info().value_len, 3);
	}

	#[test]
	fn wrap_list() {
		let data = [0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g'];
		let rlp = UntrustedRlp::new(&data).unwrap();
		assert!(rlp.is_list());
		assert_eq!(rlp.item_count().unwrap(), 2);
		assert_eq!(rlp.at(0).unwrap().data(), b"cat");
		assert_eq!(rlp.at(1).unwrap().data(), b"dog");
		assert_eq!(rlp.at(2).unwrap_err(), DecoderError::RlpIsTooShort);
	}

	#[test]
	fn list_of_empty_string() {
		let data = [0xc1, 0x80];
		let rlp = UntrustedRlp::new(&data).unwrap();
		assert!(rlp.is_list());
		assert_eq!(rlp.item_count().unwrap(), 1);
		let item = rlp.at(0).unwrap();
		assert!(item.is_data());
		assert!(item.is_empty());
	}

	#[test]
	fn long_string_of_56_bytes() {
		let mut data = vec![0xb8, 0x38];
		data.extend_from_slice(&[b'a'; 56]);
		let rlp = UntrustedRlp::new(&data).unwrap();
		assert_eq!(rlp.data().len(), 56);
		assert_eq!(rlp.payload_info().header_len, 2);
	}

	#[test]
	fn rejects_long_form_below_56() {
		// 55-byte payload must use the short form
		let mut data = vec![0xb8, 0x37];
		data.extend_from_slice(&[b'a'; 55]);
		assert_eq!(UntrustedRlp::new(&data).unwrap_err(), DecoderError::RlpInvalidIndirection);
		assert!(UntrustedRlp::new_lenient(&data).is_ok());
	}

	#[test]
	fn rejects_long_list_form_below_56() {
		let mut data = vec![0xf8, 0x03];
		data.extend_from_slice(&[0x81, 0xff, 0x80]);
		assert_eq!(UntrustedRlp::new(&data).unwrap_err(), DecoderError::RlpInvalidIndirection);
		assert!(UntrustedRlp::new_lenient(&data).is_ok());
	}

	#[test]
	fn rejects_non_canonical_single_byte() {
		// 0x79 alone is its own encoding; 0x81 0x79 is indirect
		let data = [0x81, 0x79];
		assert_eq!(UntrustedRlp::new(&data).unwrap_err(), DecoderError::RlpInvalidIndirection);
		let rlp = UntrustedRlp::new_lenient(&data).unwrap();
		assert_eq!(rlp.data(), &[0x79]);
	}

	#[test]
	fn accepts_canonical_single_byte_indirection() {
		let data = [0x81, 0x80];
		let rlp = UntrustedRlp::new(&data).unwrap();
		assert_eq!(rlp.data(), &[0x80]);
	}

	#[test]
	fn rejects_zero_prefixed_length() {
		let mut data = vec![0xb9, 0x00, 0x38];
		data.extend_from_slice(&[b'a'; 56]);
		assert_eq!(UntrustedRlp::new(&data).unwrap_err(), DecoderError::RlpDataLenWithZeroPrefix);

		let mut list = vec![0xf9, 0x00, 0x38];
		list.extend_from_slice(&[0x80; 56]);
		assert_eq!(UntrustedRlp::new(&list).unwrap_err(), DecoderError::RlpListLenWithZeroPrefix);
	}

	#[test]
	fn rejects_truncated_input() {
		let data = [0x83, b'c', b'a'];
		assert_eq!(UntrustedRlp::new(&data).unwrap_err(), DecoderError::RlpIsTooShort);
	}

	#[test]
	fn rejects_trailing_bytes() {
		let data = [0x83, b'c', b'a', b't', 0xff];
		assert_eq!(UntrustedRlp::new(&data).unwrap_err(), DecoderError::RlpIsTooBig);
		assert_eq!(UntrustedRlp::new_lenient(&data).unwrap_err(), DecoderError::RlpIsTooBig);
	}

	#[test]
	fn rejects_item_past_enclosing_region() {
		// list claims 2 payload bytes, sub-item claims 3
		let data = [0xc2, 0x82, 0x61, 0x61];
		let rlp = UntrustedRlp::new(&data).unwrap();
		assert_eq!(rlp.at(0).unwrap_err(), DecoderError::RlpInconsistentLengthAndData);
	}

	#[test]
	fn iterator_walks_elements() {
		let data = [0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g'];
		let rlp = UntrustedRlp::new(&data).unwrap();
		let animals: Vec<String> = rlp.as_list().unwrap();
		assert_eq!(animals, vec!["cat".to_owned(), "dog".to_owned()]);
	}

	#[test]
	fn decoder_wrap_at_offset() {
		let data = [0x00, 0x00, 0x83, b'c', b'a', b't'];
		let rlp = RLP_STRICT.wrap(&data, 2).unwrap();
		assert_eq!(rlp.data(), b"cat");
		assert_eq!(rlp.end_index(), 6);
	}

	#[test]
	fn lenient_decoder_still_rejects_overruns() {
		let data = [0x83, b'c', b'a'];
		assert_eq!(RLP_LENIENT.wrap(&data, 0).unwrap_err(), DecoderError::RlpIsTooShort);
	}
}
