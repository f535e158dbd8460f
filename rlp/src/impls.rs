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

use std::{mem, str};
use traits::{Encodable, Decodable};
use stream::RlpStream;
use {UntrustedRlp, DecoderError};

fn string_data<'a>(rlp: &UntrustedRlp<'a>) -> Result<&'a [u8], DecoderError> {
	if rlp.is_list() {
		return Err(DecoderError::RlpExpectedToBeData);
	}
	Ok(rlp.data())
}

/// Converts a minimal big-endian payload into a usize.
pub fn decode_usize(bytes: &[u8]) -> Result<usize, DecoderError> {
	match bytes.len() {
		0 => Ok(0),
		l if l <= mem::size_of::<usize>() => {
			if bytes[0] == 0 {
				return Err(DecoderError::RlpInvalidIndirection);
			}
			let mut res = 0usize;
			for (i, byte) in bytes.iter().enumerate() {
				let shift = (l - 1 - i) * 8;
				res = res + ((*byte as usize) << shift);
			}
			Ok(res)
		}
		_ => Err(DecoderError::RlpIsTooBig),
	}
}

impl<'a> Encodable for &'a [u8] {
	fn rlp_append(&self, s: &mut RlpStream) {
		s.write_value(self);
	}
}

impl Encodable for Vec<u8> {
	fn rlp_append(&self, s: &mut RlpStream) {
		s.write_value(self);
	}
}

impl Decodable for Vec<u8> {
	fn decode(rlp: &UntrustedRlp) -> Result<Self, DecoderError> {
		string_data(rlp).map(|bytes| bytes.to_vec())
	}
}

impl<'a> Encodable for &'a str {
	fn rlp_append(&self, s: &mut RlpStream) {
		s.write_value(self.as_bytes());
	}
}

impl Encodable for String {
	fn rlp_append(&self, s: &mut RlpStream) {
		s.write_value(self.as_bytes());
	}
}

impl Decodable for String {
	fn decode(rlp: &UntrustedRlp) -> Result<Self, DecoderError> {
		let bytes = string_data(rlp)?;
		match str::from_utf8(bytes) {
			Ok(s) => Ok(s.to_owned()),
			// consider better error type here
			Err(_) => Err(DecoderError::RlpExpectedToBeData),
		}
	}
}

impl Encodable for bool {
	fn rlp_append(&self, s: &mut RlpStream) {
		if *self {
			s.write_value(&[1]);
		} else {
			s.write_value(&[]);
		}
	}
}

impl Decodable for bool {
	fn decode(rlp: &UntrustedRlp) -> Result<Self, DecoderError> {
		let bytes = string_data(rlp)?;
		match bytes.len() {
			0 => Ok(false),
			1 => Ok(bytes[0] != 0),
			_ => Err(DecoderError::RlpIsTooBig),
		}
	}
}

macro_rules! impl_encodable_for_uint {
	($name: ident, $size: expr) => {
		impl Encodable for $name {
			fn rlp_append(&self, s: &mut RlpStream) {
				let value = *self as u64;
				let mut buf = [0u8; 8];
				let written = ::integers::put_long(value, &mut buf, 0);
				s.write_value(&buf[..written]);
			}
		}
	}
}

macro_rules! impl_decodable_for_uint {
	($name: ident, $size: expr) => {
		impl Decodable for $name {
			fn decode(rlp: &UntrustedRlp) -> Result<Self, DecoderError> {
				let bytes = string_data(rlp)?;
				match bytes.len() {
					0 => Ok(0),
					l if l <= $size => {
						if bytes[0] == 0 {
							return Err(DecoderError::RlpInvalidIndirection);
						}
						let value = ::integers::get_long(bytes, 0, l, true)
							.map_err(|_| DecoderError::RlpIsTooBig)?;
						Ok(value as $name)
					}
					_ => Err(DecoderError::RlpIsTooBig),
				}
			}
		}
	}
}

impl_encodable_for_uint!(u8, 1);
impl_encodable_for_uint!(u16, 2);
impl_encodable_for_uint!(u32, 4);
impl_encodable_for_uint!(u64, 8);

impl_decodable_for_uint!(u8, 1);
impl_decodable_for_uint!(u16, 2);
impl_decodable_for_uint!(u32, 4);
impl_decodable_for_uint!(u64, 8);

impl Encodable for usize {
	fn rlp_append(&self, s: &mut RlpStream) {
		(*self as u64).rlp_append(s)
	}
}

impl Decodable for usize {
	fn decode(rlp: &UntrustedRlp) -> Result<Self, DecoderError> {
		decode_usize(string_data(rlp)?)
	}
}

#[cfg(test)]
mod tests {
	use {encode, decode, UntrustedRlp, DecoderError};

	#[test]
	fn uint_round_trip() {
		let values: Vec<u64> = vec![0, 1, 0x7f, 0x80, 0x100, 0xffff, 0x10000, u64::max_value()];
		for value in values {
			let encoded = encode(&value);
			let decoded: u64 = decode(&encoded).unwrap();
			assert_eq!(decoded, value);
		}
	}

	#[test]
	fn zero_encodes_to_empty_string() {
		assert_eq!(encode(&0u8).to_vec(), vec![0x80]);
		let decoded: u8 = decode(&[0x80]).unwrap();
		assert_eq!(decoded, 0);
	}

	#[test]
	fn uint_rejects_leading_zero() {
		let data = [0x82, 0x00, 0x10];
		let rlp = UntrustedRlp::new(&data).unwrap();
		assert_eq!(rlp.as_val::<u16>().unwrap_err(), DecoderError::RlpInvalidIndirection);
	}

	#[test]
	fn uint_rejects_oversize_payload() {
		let data = [0x82, 0x01, 0x10];
		let rlp = UntrustedRlp::new(&data).unwrap();
		assert_eq!(rlp.as_val::<u8>().unwrap_err(), DecoderError::RlpIsTooBig);
	}

	#[test]
	fn decode_rejects_trailing_bytes() {
		let data = [0x83, b'c', b'a', b't', 0xff];
		assert_eq!(decode::<String>(&data).unwrap_err(), DecoderError::RlpIsTooBig);
	}

	#[test]
	fn string_round_trip() {
		let encoded = encode(&"gavofyork");
		let decoded: String = decode(&encoded).unwrap();
		assert_eq!(decoded, "gavofyork");
	}

	#[test]
	fn list_is_not_data() {
		let data = [0xc1, 0x80];
		let rlp = UntrustedRlp::new(&data).unwrap();
		assert_eq!(rlp.as_val::<Vec<u8>>().unwrap_err(), DecoderError::RlpExpectedToBeData);
	}
}
