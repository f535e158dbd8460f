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

//! Minimal-form big-endian integer primitives.
//!
//! Both wire formats in this workspace carry unsigned integers as their
//! shortest big-endian byte form: no leading zero bytes, and zero itself
//! encodes to nothing. These helpers read and write that form and provide
//! the length arithmetic built on top of it.

extern crate byteorder;

use std::fmt;
use byteorder::{BigEndian, ByteOrder};

/// Error concerning the checked read operations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
	/// A minimal-form integer may not begin with a zero byte.
	LeadingZero,
	/// The requested integer is wider than eight bytes.
	Oversize,
	/// The source slice ends before the requested range.
	SourceTooShort,
	/// The length is not a multiple of the required unit.
	NotMultiple,
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Error::LeadingZero => write!(f, "integer has a leading zero byte"),
			Error::Oversize => write!(f, "integer is wider than eight bytes"),
			Error::SourceTooShort => write!(f, "source slice is too short"),
			Error::NotMultiple => write!(f, "length is not a multiple of the unit"),
		}
	}
}

impl ::std::error::Error for Error {}

/// Returns the position of the highest set bit; zero for zero.
pub fn bit_len(val: u64) -> usize {
	(64 - val.leading_zeros()) as usize
}

/// Byte length of the minimal big-endian encoding of `val`; zero for zero.
pub fn len(val: u64) -> usize {
	(bit_len(val) + 7) / 8
}

/// Writes the minimal big-endian encoding of `val` into `dest` at `offset`.
///
/// Returns the offset just past the written bytes. Zero writes nothing.
pub fn put_long(val: u64, dest: &mut [u8], offset: usize) -> usize {
	let n = len(val);
	if n > 0 {
		BigEndian::write_uint(&mut dest[offset..offset + n], val, n);
	}
	offset + n
}

/// Reads an unsigned big-endian integer of `len` bytes at `offset`.
///
/// A zero-length read yields zero. Unless `lenient` is set, a leading zero
/// byte is rejected as non-minimal.
pub fn get_long(source: &[u8], offset: usize, len: usize, lenient: bool) -> Result<u64, Error> {
	if len == 0 {
		return Ok(0);
	}
	if len > 8 {
		return Err(Error::Oversize);
	}
	let end = offset.checked_add(len).ok_or(Error::SourceTooShort)?;
	if end > source.len() {
		return Err(Error::SourceTooShort);
	}
	if !lenient && source[offset] == 0 {
		return Err(Error::LeadingZero);
	}
	Ok(BigEndian::read_uint(&source[offset..end], len))
}

/// Rounds `len` up to the nearest multiple of `unit`.
pub fn round_up(len: usize, unit: usize) -> usize {
	match len % unit {
		0 => len,
		rem => len + unit - rem,
	}
}

/// Fails unless `len` is an exact multiple of `unit`.
pub fn check_is_multiple(len: usize, unit: usize) -> Result<(), Error> {
	match len % unit {
		0 => Ok(()),
		_ => Err(Error::NotMultiple),
	}
}
