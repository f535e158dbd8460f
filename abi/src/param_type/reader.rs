//! Canonical type-string parsing.

use ParamType;
use error::Error;

/// Upper bound on accepted type-string length, capping parser work on
/// untrusted input.
pub const MAX_TYPE_STRING_LEN: usize = 2000;

/// Parses a canonical or near-canonical type string into a `ParamType`.
pub struct Reader;

impl Reader {
	/// Parses a type string such as `uint256`, `int24[2][]` or
	/// `(bool,(bytes,string))`.
	///
	/// Bare `uint`/`int`/`fixed`/`ufixed` expand to their default widths.
	pub fn read(name: &str) -> Result<ParamType, Error> {
		if name.len() > MAX_TYPE_STRING_LEN {
			return Err(Error::TypeParse(format!(
				"type string length {} exceeds the limit of {}",
				name.len(),
				MAX_TYPE_STRING_LEN
			)));
		}
		Reader::read_any(name)
	}

	fn read_any(name: &str) -> Result<ParamType, Error> {
		// the trailing suffix of `T[j][k]` is the outermost dimension
		if name.ends_with(']') {
			let split = name.rfind('[')
				.ok_or_else(|| Error::TypeParse(format!("unmatched bracket in `{}`", name)))?;
			let element = Reader::read_any(&name[..split])?;
			let suffix = &name[split + 1..name.len() - 1];
			return if suffix.is_empty() {
				Ok(ParamType::Array(Box::new(element)))
			} else {
				let len = Reader::read_number(suffix)
					.ok_or_else(|| Error::TypeParse(format!("invalid array length in `{}`", name)))?;
				Ok(ParamType::FixedArray(Box::new(element), len))
			};
		}
		if name.starts_with('(') {
			return Reader::read_tuple(name);
		}
		Reader::read_scalar(name)
	}

	fn read_tuple(name: &str) -> Result<ParamType, Error> {
		if !name.ends_with(')') {
			return Err(Error::TypeParse(format!("trailing characters in `{}`", name)));
		}
		let inner = &name[1..name.len() - 1];
		if inner.is_empty() {
			return Ok(ParamType::Tuple(vec![]));
		}
		let mut params = vec![];
		let mut depth = 0usize;
		let mut start = 0;
		for (index, ch) in inner.char_indices() {
			match ch {
				'(' => depth += 1,
				')' => {
					depth = depth.checked_sub(1)
						.ok_or_else(|| Error::TypeParse(format!("unbalanced parentheses in `{}`", name)))?;
				},
				',' if depth == 0 => {
					params.push(Reader::read_any(&inner[start..index])?);
					start = index + 1;
				},
				_ => {},
			}
		}
		if depth != 0 {
			return Err(Error::TypeParse(format!("unbalanced parentheses in `{}`", name)));
		}
		params.push(Reader::read_any(&inner[start..])?);
		Ok(ParamType::Tuple(params))
	}

	fn read_scalar(name: &str) -> Result<ParamType, Error> {
		match name {
			"address" => return Ok(ParamType::Address),
			"bytes" => return Ok(ParamType::Bytes),
			"bool" => return Ok(ParamType::Bool),
			"string" => return Ok(ParamType::String),
			"int" => return Ok(ParamType::Int(256)),
			"uint" => return Ok(ParamType::Uint(256)),
			"fixed" => return Ok(ParamType::Fixed(128, 18)),
			"ufixed" => return Ok(ParamType::Ufixed(128, 18)),
			"decimal" => return Ok(ParamType::Fixed(168, 10)),
			// a function reference is a 24-byte value on the wire
			"function" => return Ok(ParamType::FixedBytes(24)),
			_ => {},
		}
		if name.starts_with("ufixed") {
			let (width, scale) = Reader::read_fixed_suffix(&name[6..], name)?;
			return Ok(ParamType::Ufixed(width, scale));
		}
		if name.starts_with("fixed") {
			let (width, scale) = Reader::read_fixed_suffix(&name[5..], name)?;
			return Ok(ParamType::Fixed(width, scale));
		}
		if name.starts_with("bytes") {
			let len = Reader::read_number(&name[5..])
				.ok_or_else(|| Error::TypeParse(format!("invalid numeric suffix in `{}`", name)))?;
			if len < 1 || len > 32 {
				return Err(Error::TypeParse(format!("invalid bytes width in `{}`", name)));
			}
			return Ok(ParamType::FixedBytes(len));
		}
		if name.starts_with("uint") {
			let bits = Reader::read_int_width(&name[4..], name)?;
			return Ok(ParamType::Uint(bits));
		}
		if name.starts_with("int") {
			let bits = Reader::read_int_width(&name[3..], name)?;
			return Ok(ParamType::Int(bits));
		}
		Err(Error::TypeParse(format!("invalid type `{}`", name)))
	}

	fn read_int_width(suffix: &str, name: &str) -> Result<usize, Error> {
		let bits = Reader::read_number(suffix)
			.ok_or_else(|| Error::TypeParse(format!("invalid numeric suffix in `{}`", name)))?;
		if bits < 1 || bits > 256 {
			return Err(Error::TypeParse(format!("invalid integer width in `{}`", name)));
		}
		Ok(bits)
	}

	fn read_fixed_suffix(suffix: &str, name: &str) -> Result<(usize, usize), Error> {
		let split = suffix.find('x')
			.ok_or_else(|| Error::TypeParse(format!("invalid fixed suffix in `{}`", name)))?;
		let width = Reader::read_number(&suffix[..split])
			.ok_or_else(|| Error::TypeParse(format!("invalid fixed width in `{}`", name)))?;
		let scale = Reader::read_number(&suffix[split + 1..])
			.ok_or_else(|| Error::TypeParse(format!("invalid fixed scale in `{}`", name)))?;
		if width < 8 || width > 256 || width % 8 != 0 {
			return Err(Error::TypeParse(format!("invalid fixed width in `{}`", name)));
		}
		if scale > 80 {
			return Err(Error::TypeParse(format!("invalid fixed scale in `{}`", name)));
		}
		Ok((width, scale))
	}

	/// Parses a decimal with no sign and no superfluous leading zero.
	fn read_number(digits: &str) -> Option<usize> {
		if digits.is_empty() || (digits.len() > 1 && digits.starts_with('0')) {
			return None;
		}
		if !digits.bytes().all(|b| b >= b'0' && b <= b'9') {
			return None;
		}
		digits.parse().ok()
	}
}
