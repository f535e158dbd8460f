//! Non-standard packed encoding: no offsets, no padding, no length
//! prefixes. Scalars occupy their natural widths, arrays are concatenated
//! raw, and nested tuples are flattened.

use {ParamType, Token, Error, Encoder};
use util::extend;

/// Packed encoder.
pub struct PackedEncoder;

impl PackedEncoder {
	/// Returns the packed byte length of `token`, validating shapes on
	/// the way.
	pub fn byte_length(param: &ParamType, token: &Token) -> Result<usize, Error> {
		match (param, token) {
			(&ParamType::Address, &Token::Address(_)) => Ok(20),
			(&ParamType::Bool, &Token::Bool(_)) => Ok(1),
			(&ParamType::Int(bits), &Token::Int(_)) |
			(&ParamType::Fixed(bits, _), &Token::Int(_)) |
			(&ParamType::Uint(bits), &Token::Uint(_)) |
			(&ParamType::Ufixed(bits, _), &Token::Uint(_)) => Ok((bits + 7) / 8),
			(&ParamType::FixedBytes(len), &Token::FixedBytes(ref bytes)) => {
				if bytes.len() != len {
					return Err(Error::Validation(format!(
						"fixed bytes length mismatch: {} != {}",
						bytes.len(),
						len
					)));
				}
				Ok(len)
			},
			(&ParamType::Bytes, &Token::Bytes(ref bytes)) => Ok(bytes.len()),
			(&ParamType::String, &Token::String(ref s)) => Ok(s.len()),
			(&ParamType::FixedArray(ref param, len), &Token::FixedArray(ref tokens)) => {
				if tokens.len() != len {
					return Err(Error::Validation(format!(
						"array length mismatch: {} != {}",
						tokens.len(),
						len
					)));
				}
				Self::elements_length(param, tokens)
			},
			(&ParamType::Array(ref param), &Token::Array(ref tokens)) => {
				Self::elements_length(param, tokens)
			},
			(&ParamType::Tuple(ref params), &Token::Tuple(ref tokens)) => {
				Self::tuple_length(params, tokens)
			},
			(param, token) => Err(Error::Validation(format!(
				"type mismatch: {} expected, found {}",
				param,
				token.type_name()
			))),
		}
	}

	fn elements_length(param: &ParamType, tokens: &[Token]) -> Result<usize, Error> {
		let mut total = 0;
		for (i, token) in tokens.iter().enumerate() {
			total += Self::byte_length(param, token)
				.map_err(|e| e.context(&format!("array index {}", i)))?;
		}
		Ok(total)
	}

	/// Packed byte length of a tuple of values.
	pub fn tuple_length(params: &[ParamType], tokens: &[Token]) -> Result<usize, Error> {
		if params.len() != tokens.len() {
			return Err(Error::Validation(format!(
				"tuple length mismatch: actual != expected: {} != {}",
				tokens.len(),
				params.len()
			)));
		}
		let mut total = 0;
		for (i, (param, token)) in params.iter().zip(tokens).enumerate() {
			total += Self::byte_length(param, token)
				.map_err(|e| e.context(&format!("tuple index {}", i)))?;
		}
		Ok(total)
	}

	/// Encodes a tuple of values in packed form. Values are fully
	/// validated first, as for the standard encoding.
	pub fn encode(params: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>, Error> {
		Encoder::validate(params, tokens)?;
		let len = Self::tuple_length(params, tokens)?;
		let mut dest = Vec::with_capacity(len);
		for (param, token) in params.iter().zip(tokens) {
			Self::encode_unchecked(param, token, &mut dest)?;
		}
		Ok(dest)
	}

	/// Encodes one validated value in packed form.
	pub fn encode_token(param: &ParamType, token: &Token) -> Result<Vec<u8>, Error> {
		Encoder::validate_token(param, token)?;
		let len = Self::byte_length(param, token)?;
		let mut dest = Vec::with_capacity(len);
		Self::encode_unchecked(param, token, &mut dest)?;
		Ok(dest)
	}

	fn encode_unchecked(param: &ParamType, token: &Token, dest: &mut Vec<u8>) -> Result<(), Error> {
		match (param, token) {
			(&ParamType::Address, &Token::Address(ref address)) => {
				dest.extend_from_slice(address);
			},
			(&ParamType::Bool, &Token::Bool(b)) => {
				dest.push(b as u8);
			},
			// the word is already sign-extended; emit its tail
			(&ParamType::Int(bits), &Token::Int(ref word)) |
			(&ParamType::Fixed(bits, _), &Token::Int(ref word)) |
			(&ParamType::Uint(bits), &Token::Uint(ref word)) |
			(&ParamType::Ufixed(bits, _), &Token::Uint(ref word)) => {
				dest.extend_from_slice(&word[32 - (bits + 7) / 8..]);
			},
			(&ParamType::FixedBytes(_), &Token::FixedBytes(ref bytes)) => {
				dest.extend_from_slice(bytes);
			},
			(&ParamType::Bytes, &Token::Bytes(ref bytes)) => {
				dest.extend_from_slice(bytes);
			},
			(&ParamType::String, &Token::String(ref s)) => {
				dest.extend_from_slice(s.as_bytes());
			},
			(&ParamType::FixedArray(ref param, _), &Token::FixedArray(ref tokens)) |
			(&ParamType::Array(ref param), &Token::Array(ref tokens)) => {
				for token in tokens {
					Self::encode_unchecked(param, token, dest)?;
				}
			},
			(&ParamType::Tuple(ref params), &Token::Tuple(ref tokens)) => {
				for (param, token) in params.iter().zip(tokens) {
					Self::encode_unchecked(param, token, dest)?;
				}
			},
			(param, token) => {
				return Err(Error::Validation(format!(
					"type mismatch: {} expected, found {}",
					param,
					token.type_name()
				)));
			},
		}
		Ok(())
	}
}

/// Packed decoder.
///
/// Only inputs with at most one dynamic element are decodable: everything
/// before it is read forward, everything after it back-to-front, and the
/// dynamic payload takes whatever remains.
pub struct PackedDecoder;

impl PackedDecoder {
	/// Decodes a packed tuple. Refuses inputs with more than one dynamic
	/// element, arrays of dynamic elements, and dynamic counts of
	/// zero-length elements.
	pub fn decode(params: &[ParamType], data: &[u8]) -> Result<Vec<Token>, Error> {
		let mut dynamics = 0;
		for param in params {
			dynamics += Self::count_dynamics(param)?;
		}
		if dynamics > 1 {
			return Err(Error::PackedDecode("multiple dynamic elements".to_owned()));
		}
		let (tokens, end) = Self::decode_tuple(params, data, 0, data.len())?;
		if end != data.len() {
			return Err(Error::Decode(format!(
				"unconsumed bytes: {} remaining",
				data.len() - end
			)));
		}
		Ok(tokens)
	}

	/// Number of dynamic elements under `param`; errors on shapes that can
	/// never be decoded from the packed form.
	fn count_dynamics(param: &ParamType) -> Result<usize, Error> {
		match *param {
			ParamType::Bytes | ParamType::String => Ok(1),
			ParamType::Array(ref param) => {
				if Self::count_dynamics(param)? != 0 {
					return Err(Error::PackedDecode("array of dynamic elements".to_owned()));
				}
				Ok(1)
			},
			ParamType::FixedArray(ref param, _) => {
				if Self::count_dynamics(param)? != 0 {
					return Err(Error::PackedDecode("array of dynamic elements".to_owned()));
				}
				Ok(0)
			},
			ParamType::Tuple(ref params) => {
				let mut count = 0;
				for param in params {
					count += Self::count_dynamics(param)?;
				}
				Ok(count)
			},
			_ => Ok(0),
		}
	}

	/// Packed length known from the type alone; `None` when a dynamic
	/// element is involved.
	fn static_length(param: &ParamType) -> Option<usize> {
		match *param {
			ParamType::Address => Some(20),
			ParamType::Bool => Some(1),
			ParamType::Int(bits) | ParamType::Uint(bits)
			| ParamType::Fixed(bits, _) | ParamType::Ufixed(bits, _) => Some((bits + 7) / 8),
			ParamType::FixedBytes(len) => Some(len),
			ParamType::Bytes | ParamType::String | ParamType::Array(_) => None,
			ParamType::FixedArray(ref param, len) => {
				Self::static_length(param).map(|elem| elem * len)
			},
			ParamType::Tuple(ref params) => {
				let mut total = 0;
				for param in params {
					match Self::static_length(param) {
						Some(len) => total += len,
						None => return None,
					}
				}
				Some(total)
			},
		}
	}

	/// Decodes the children of a tuple spanning `data[start..end]`.
	fn decode_tuple(params: &[ParamType], data: &[u8], start: usize, end: usize) -> Result<(Vec<Token>, usize), Error> {
		let mut tokens = Vec::with_capacity(params.len());
		let mut position = start;
		for (i, param) in params.iter().enumerate() {
			let remaining: usize = params[i + 1..].iter()
				.map(|p| Self::static_length(p).unwrap_or(0))
				.sum();
			let token = match Self::static_length(param) {
				Some(len) => {
					let token = Self::decode_static(param, data, position)
						.map_err(|e| e.context(&format!("tuple index {}", i)))?;
					position += len;
					token
				},
				None => {
					// the dynamic element takes whatever the suffix leaves
					let limit = end.checked_sub(remaining)
						.ok_or_else(|| Error::Decode("truncated packed input".to_owned()))?;
					let (token, next) = Self::decode_dynamic(param, data, position, limit)
						.map_err(|e| e.context(&format!("tuple index {}", i)))?;
					position = next;
					token
				},
			};
			tokens.push(token);
		}
		Ok((tokens, position))
	}

	fn decode_static(param: &ParamType, data: &[u8], position: usize) -> Result<Token, Error> {
		let take = |len: usize| -> Result<&[u8], Error> {
			let end = position.checked_add(len)
				.ok_or_else(|| Error::Decode("length overflow".to_owned()))?;
			if end > data.len() {
				return Err(Error::Decode("truncated packed input".to_owned()));
			}
			Ok(&data[position..end])
		};
		match *param {
			ParamType::Address => {
				let bytes = take(20)?;
				let mut address = [0u8; 20];
				address.copy_from_slice(bytes);
				Ok(Token::Address(address))
			},
			ParamType::Bool => {
				let byte = take(1)?[0];
				match byte {
					0 => Ok(Token::Bool(false)),
					1 => Ok(Token::Bool(true)),
					_ => Err(Error::Decode("illegal boolean value".to_owned())),
				}
			},
			ParamType::Int(bits) | ParamType::Fixed(bits, _) => {
				let bytes = take((bits + 7) / 8)?;
				Ok(Token::Int(extend(bytes, true)))
			},
			ParamType::Uint(bits) | ParamType::Ufixed(bits, _) => {
				let bytes = take((bits + 7) / 8)?;
				Ok(Token::Uint(extend(bytes, false)))
			},
			ParamType::FixedBytes(len) => {
				Ok(Token::FixedBytes(take(len)?.to_vec()))
			},
			ParamType::FixedArray(ref param, len) => {
				let elem = Self::static_length(param)
					.ok_or_else(|| Error::PackedDecode("array of dynamic elements".to_owned()))?;
				let mut tokens = Vec::with_capacity(len);
				for i in 0..len {
					let token = Self::decode_static(param, data, position + i * elem)
						.map_err(|e| e.context(&format!("array index {}", i)))?;
					tokens.push(token);
				}
				Ok(Token::FixedArray(tokens))
			},
			ParamType::Tuple(ref params) => {
				let len = Self::static_length(param)
					.ok_or_else(|| Error::PackedDecode("dynamic element in static position".to_owned()))?;
				let (tokens, _) = Self::decode_tuple(params, data, position, position + len)?;
				Ok(Token::Tuple(tokens))
			},
			ParamType::Bytes | ParamType::String | ParamType::Array(_) => {
				Err(Error::PackedDecode("dynamic element in static position".to_owned()))
			},
		}
	}

	/// Decodes the single dynamic element spanning `data[position..limit]`.
	fn decode_dynamic(param: &ParamType, data: &[u8], position: usize, limit: usize) -> Result<(Token, usize), Error> {
		if limit > data.len() || position > limit {
			return Err(Error::Decode("truncated packed input".to_owned()));
		}
		match *param {
			ParamType::Bytes => {
				Ok((Token::Bytes(data[position..limit].to_vec()), limit))
			},
			ParamType::String => {
				let s = String::from_utf8(data[position..limit].to_vec())
					.map_err(|_| Error::Decode("invalid utf-8 string payload".to_owned()))?;
				Ok((Token::String(s), limit))
			},
			ParamType::Array(ref param) => {
				let elem = Self::static_length(param)
					.ok_or_else(|| Error::PackedDecode("array of dynamic elements".to_owned()))?;
				if elem == 0 {
					return Err(Error::PackedDecode(
						"can't decode dynamic number of zero-length elements".to_owned()
					));
				}
				let span = limit - position;
				if span % elem != 0 {
					return Err(Error::Decode(format!(
						"packed array span {} is not a multiple of the element length {}",
						span,
						elem
					)));
				}
				let count = span / elem;
				let mut tokens = Vec::with_capacity(count);
				for i in 0..count {
					let token = Self::decode_static(param, data, position + i * elem)
						.map_err(|e| e.context(&format!("array index {}", i)))?;
					tokens.push(token);
				}
				Ok((Token::Array(tokens), limit))
			},
			ParamType::Tuple(ref params) => {
				let (tokens, next) = Self::decode_tuple(params, data, position, limit)?;
				Ok((Token::Tuple(tokens), next))
			},
			_ => {
				let token = Self::decode_static(param, data, position)?;
				// unreachable for truly static params; kept total
				let len = Self::static_length(param).unwrap_or(0);
				Ok((token, position + len))
			},
		}
	}
}
