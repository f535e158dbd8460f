//! ABI decoder.

use {ParamType, Token, Word, Error};
use util::{fits_signed, fits_unsigned};
use integers::round_up;

/// Offset-handling profile for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
	/// Offsets must point exactly at the next unconsumed byte.
	Strict,
	/// Forward-skipping offsets are accepted and the skipped bytes are
	/// not inspected, as solc once emitted them (solidity commit
	/// 3d1ca07e9b4b42355aa9be5db5c00048607986d1). Backwards jumps are
	/// rejected in both modes.
	Lenient,
}

impl Default for Mode {
	fn default() -> Mode {
		Mode::Strict
	}
}

/// Decode offsets and length prefixes are bounded to 31 bits.
const VALUE_BITS_LIMIT: usize = 0x7fff_ffff;

struct Cursor<'a> {
	data: &'a [u8],
	position: usize,
	mode: Mode,
}

impl<'a> Cursor<'a> {
	fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
		let end = self.position.checked_add(len)
			.ok_or_else(|| Error::Decode("length overflow".to_owned()))?;
		if end > self.data.len() {
			return Err(Error::Decode(format!(
				"truncated input: {} bytes needed at position {}",
				len,
				self.position
			)));
		}
		let slice = &self.data[self.position..end];
		self.position = end;
		Ok(slice)
	}

	fn take_word(&mut self) -> Result<Word, Error> {
		let slice = self.take(32)?;
		let mut word = [0u8; 32];
		word.copy_from_slice(slice);
		Ok(word)
	}

	/// Reads a 32-byte word holding an offset or length, bounded to 31
	/// bits.
	fn take_usize(&mut self) -> Result<usize, Error> {
		let word = self.take_word()?;
		if word[..28].iter().any(|b| *b != 0) || word[28] & 0x80 != 0 {
			return Err(Error::Decode("offset or length exceeds 31 bits".to_owned()));
		}
		let value = ((word[28] as usize) << 24)
			| ((word[29] as usize) << 16)
			| ((word[30] as usize) << 8)
			| (word[31] as usize);
		debug_assert!(value <= VALUE_BITS_LIMIT);
		Ok(value)
	}
}

/// One head slot: either an already decoded static child or the offset of
/// a dynamic one.
enum Slot {
	Value(Token),
	Offset(usize),
}

/// ABI decoder.
pub struct Decoder;

impl Decoder {
	/// Decodes ABI compliant vector of bytes into vector of tokens
	/// described by types param. Strict mode; trailing bytes are an error.
	pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, Error> {
		Self::decode_with_mode(types, data, Mode::Strict)
	}

	/// As `decode`, with an explicit offset-handling profile.
	pub fn decode_with_mode(types: &[ParamType], data: &[u8], mode: Mode) -> Result<Vec<Token>, Error> {
		let mut cursor = Cursor { data: data, position: 0, mode: mode };
		let refs: Vec<&ParamType> = types.iter().collect();
		let tokens = Self::decode_objects(&refs, &mut cursor, false)?;
		if cursor.position != data.len() {
			return Err(Error::Decode(format!(
				"unconsumed bytes: {} remaining",
				data.len() - cursor.position
			)));
		}
		Ok(tokens)
	}

	/// Decodes the tuple at `offset`, returning the tokens and the
	/// position just past the consumed range. Trailing bytes are left for
	/// the caller.
	pub fn decode_at(types: &[ParamType], data: &[u8], offset: usize, mode: Mode) -> Result<(Vec<Token>, usize), Error> {
		let mut cursor = Cursor { data: data, position: offset, mode: mode };
		let refs: Vec<&ParamType> = types.iter().collect();
		let tokens = Self::decode_objects(&refs, &mut cursor, false)?;
		Ok((tokens, cursor.position))
	}

	/// Decodes one standalone value of the given type.
	pub fn decode_token(param: &ParamType, data: &[u8]) -> Result<Token, Error> {
		Self::decode_token_with_mode(param, data, Mode::Strict)
	}

	/// As `decode_token`, with an explicit offset-handling profile.
	pub fn decode_token_with_mode(param: &ParamType, data: &[u8], mode: Mode) -> Result<Token, Error> {
		let mut cursor = Cursor { data: data, position: 0, mode: mode };
		let token = if param.is_dynamic() {
			Self::decode_tail(param, &mut cursor)?
		} else {
			Self::decode_static(param, &mut cursor)?
		};
		if cursor.position != data.len() {
			return Err(Error::Decode(format!(
				"unconsumed bytes: {} remaining",
				data.len() - cursor.position
			)));
		}
		Ok(token)
	}

	/// Decodes only the `index`-th element of the tuple described by
	/// `types`, without materializing the earlier children.
	pub fn decode_index(types: &[ParamType], data: &[u8], index: usize) -> Result<Token, Error> {
		Self::decode_index_with_mode(types, data, index, Mode::Strict)
	}

	/// As `decode_index`, with an explicit offset-handling profile.
	pub fn decode_index_with_mode(types: &[ParamType], data: &[u8], index: usize, mode: Mode) -> Result<Token, Error> {
		if index >= types.len() {
			return Err(Error::Decode(format!(
				"tuple index out of bounds: {} >= {}",
				index,
				types.len()
			)));
		}
		let skip: usize = types[..index].iter().map(ParamType::head_length).sum();
		let mut cursor = Cursor { data: data, position: skip, mode: mode };
		let param = &types[index];
		if param.is_dynamic() {
			// the enclosing region starts at zero for a top-level tuple
			let jump = cursor.take_usize()?;
			cursor.position = jump;
			Self::decode_tail(param, &mut cursor)
		} else {
			Self::decode_static(param, &mut cursor)
		}
	}

	/// Decodes the head/tail region of consecutive children. The region
	/// starts at the cursor, and offsets are measured from it.
	fn decode_objects(types: &[&ParamType], cursor: &mut Cursor, in_array: bool) -> Result<Vec<Token>, Error> {
		let label = if in_array { "array index" } else { "tuple index" };
		let region = cursor.position;
		let mut slots = Vec::with_capacity(types.len());
		for (i, param) in types.iter().enumerate() {
			if param.is_dynamic() {
				let offset = cursor.take_usize()
					.map_err(|e| e.context(&format!("{} {}", label, i)))?;
				slots.push(Slot::Offset(offset));
			} else {
				let token = Self::decode_static(param, cursor)
					.map_err(|e| e.context(&format!("{} {}", label, i)))?;
				slots.push(Slot::Value(token));
			}
		}
		let mut tokens = Vec::with_capacity(types.len());
		for (i, slot) in slots.into_iter().enumerate() {
			match slot {
				Slot::Value(token) => tokens.push(token),
				Slot::Offset(offset) => {
					let jump = region.checked_add(offset)
						.ok_or_else(|| Error::Decode("offset overflow".to_owned()))?;
					if jump < cursor.position {
						return Err(Error::Decode(format!(
							"illegal backwards jump: ({}+{}={})<{}",
							region,
							offset,
							jump,
							cursor.position
						)).context(&format!("{} {}", label, i)));
					}
					if jump > cursor.position {
						match cursor.mode {
							// skipped bytes are not inspected
							Mode::Lenient => cursor.position = jump,
							Mode::Strict => {
								return Err(Error::Decode(format!(
									"illegal forward jump: ({}+{}={})>{}",
									region,
									offset,
									jump,
									cursor.position
								)).context(&format!("{} {}", label, i)));
							},
						}
					}
					let token = Self::decode_tail(types[i], cursor)
						.map_err(|e| e.context(&format!("{} {}", label, i)))?;
					tokens.push(token);
				},
			}
		}
		Ok(tokens)
	}

	/// Decodes a non-dynamic value in place.
	fn decode_static(param: &ParamType, cursor: &mut Cursor) -> Result<Token, Error> {
		match *param {
			ParamType::Address => {
				let word = cursor.take_word()?;
				if word[..12].iter().any(|b| *b != 0) {
					return Err(Error::Decode("address exceeds 160 bits".to_owned()));
				}
				let mut address = [0u8; 20];
				address.copy_from_slice(&word[12..]);
				Ok(Token::Address(address))
			},
			ParamType::Int(bits) | ParamType::Fixed(bits, _) => {
				let word = cursor.take_word()?;
				if !fits_signed(&word, bits) {
					return Err(Error::Decode(format!("integer out of range for {}", param)));
				}
				Ok(Token::Int(word))
			},
			ParamType::Uint(bits) | ParamType::Ufixed(bits, _) => {
				let word = cursor.take_word()?;
				if !fits_unsigned(&word, bits) {
					return Err(Error::Decode(format!("integer out of range for {}", param)));
				}
				Ok(Token::Uint(word))
			},
			ParamType::Bool => {
				let word = cursor.take_word()?;
				if word[..31].iter().any(|b| *b != 0) || word[31] > 1 {
					return Err(Error::Decode("illegal boolean value".to_owned()));
				}
				Ok(Token::Bool(word[31] == 1))
			},
			ParamType::FixedBytes(len) => {
				let bytes = cursor.take(len)?.to_vec();
				let padding = cursor.take(round_up(len, 32) - len)?;
				if padding.iter().any(|b| *b != 0) {
					return Err(Error::Decode("non-zero padding byte".to_owned()));
				}
				Ok(Token::FixedBytes(bytes))
			},
			ParamType::FixedArray(ref param, len) => {
				let mut tokens = Vec::with_capacity(len);
				for i in 0..len {
					let token = Self::decode_static(param, cursor)
						.map_err(|e| e.context(&format!("array index {}", i)))?;
					tokens.push(token);
				}
				Ok(Token::FixedArray(tokens))
			},
			ParamType::Tuple(ref params) => {
				let mut tokens = Vec::with_capacity(params.len());
				for (i, param) in params.iter().enumerate() {
					let token = Self::decode_static(param, cursor)
						.map_err(|e| e.context(&format!("tuple index {}", i)))?;
					tokens.push(token);
				}
				Ok(Token::Tuple(tokens))
			},
			ParamType::Bytes | ParamType::String | ParamType::Array(_) => {
				Err(Error::Decode(format!("dynamic type {} in static position", param)))
			},
		}
	}

	/// Decodes the tail of a dynamic value at the cursor.
	fn decode_tail(param: &ParamType, cursor: &mut Cursor) -> Result<Token, Error> {
		match *param {
			ParamType::Bytes => {
				Self::take_padded_bytes(cursor).map(Token::Bytes)
			},
			ParamType::String => {
				let bytes = Self::take_padded_bytes(cursor)?;
				let s = String::from_utf8(bytes)
					.map_err(|_| Error::Decode("invalid utf-8 string payload".to_owned()))?;
				Ok(Token::String(s))
			},
			ParamType::Array(ref param) => {
				let len = cursor.take_usize()?;
				// every element occupies at least its head slot; reject
				// length claims the remaining input cannot hold
				let head = param.head_length();
				let remaining = cursor.data.len().saturating_sub(cursor.position);
				if head > 0 && len > remaining / head {
					return Err(Error::Decode(format!(
						"array length {} exceeds the remaining input",
						len
					)));
				}
				let types: Vec<&ParamType> = (0..len).map(|_| &**param).collect();
				let tokens = Self::decode_objects(&types, cursor, true)?;
				Ok(Token::Array(tokens))
			},
			ParamType::FixedArray(ref param, len) => {
				let types: Vec<&ParamType> = (0..len).map(|_| &**param).collect();
				let tokens = Self::decode_objects(&types, cursor, true)?;
				Ok(Token::FixedArray(tokens))
			},
			ParamType::Tuple(ref params) => {
				let types: Vec<&ParamType> = params.iter().collect();
				let tokens = Self::decode_objects(&types, cursor, false)?;
				Ok(Token::Tuple(tokens))
			},
			_ => Self::decode_static(param, cursor),
		}
	}

	fn take_padded_bytes(cursor: &mut Cursor) -> Result<Vec<u8>, Error> {
		let len = cursor.take_usize()?;
		let bytes = cursor.take(len)?.to_vec();
		let padding = cursor.take(round_up(len, 32) - len)?;
		if padding.iter().any(|b| *b != 0) {
			return Err(Error::Decode("non-zero padding byte".to_owned()));
		}
		Ok(bytes)
	}
}

#[cfg(test)]
mod tests {
	use rustc_serialize::hex::FromHex;
	use {Decoder, Encoder, Mode, ParamType, Token, Reader};

	#[test]
	fn decode_address() {
		let encoded = "0000000000000000000000001111111111111111111111111111111111111111".from_hex().unwrap();
		let expected = vec![Token::Address([0x11u8; 20])];
		let decoded = Decoder::decode(&[ParamType::Address], &encoded).unwrap();
		assert_eq!(decoded, expected);
	}

	#[test]
	fn decode_rejects_dirty_address_word() {
		let encoded = "0000000000000000000000011111111111111111111111111111111111111111".from_hex().unwrap();
		assert!(Decoder::decode(&[ParamType::Address], &encoded).is_err());
	}

	#[test]
	fn decode_two_addresses() {
		let encoded = ("".to_owned() +
			"0000000000000000000000001111111111111111111111111111111111111111" +
			"0000000000000000000000002222222222222222222222222222222222222222").from_hex().unwrap();
		let expected = vec![Token::Address([0x11u8; 20]), Token::Address([0x22u8; 20])];
		let decoded = Decoder::decode(&[ParamType::Address, ParamType::Address], &encoded).unwrap();
		assert_eq!(decoded, expected);
	}

	#[test]
	fn decode_fixed_array_of_addresses() {
		let encoded = ("".to_owned() +
			"0000000000000000000000001111111111111111111111111111111111111111" +
			"0000000000000000000000002222222222222222222222222222222222222222").from_hex().unwrap();
		let expected = vec![Token::FixedArray(vec![
			Token::Address([0x11u8; 20]),
			Token::Address([0x22u8; 20]),
		])];
		let decoded = Decoder::decode(&[Reader::read("address[2]").unwrap()], &encoded).unwrap();
		assert_eq!(decoded, expected);
	}

	#[test]
	fn decode_uint_and_int() {
		let encoded = "1111111111111111111111111111111111111111111111111111111111111111".from_hex().unwrap();
		let decoded = Decoder::decode(&[ParamType::Uint(256)], &encoded).unwrap();
		assert_eq!(decoded, vec![Token::Uint([0x11u8; 32])]);
		let decoded = Decoder::decode(&[ParamType::Int(256)], &encoded).unwrap();
		assert_eq!(decoded, vec![Token::Int([0x11u8; 32])]);
	}

	#[test]
	fn decode_rejects_out_of_range_integer() {
		let encoded = "0000000000000000000000000000000000000000000000000000000000000100".from_hex().unwrap();
		assert!(Decoder::decode(&[ParamType::Uint(8)], &encoded).is_err());
		assert!(Decoder::decode(&[ParamType::Uint(16)], &encoded).is_ok());

		// a positive value whose sign bit is set for int8
		let encoded = "0000000000000000000000000000000000000000000000000000000000000080".from_hex().unwrap();
		assert!(Decoder::decode(&[ParamType::Int(8)], &encoded).is_err());
		assert!(Decoder::decode(&[ParamType::Uint(8)], &encoded).is_ok());
	}

	#[test]
	fn decode_dynamic_array_of_addresses() {
		let encoded = ("".to_owned() +
			"0000000000000000000000000000000000000000000000000000000000000020" +
			"0000000000000000000000000000000000000000000000000000000000000002" +
			"0000000000000000000000001111111111111111111111111111111111111111" +
			"0000000000000000000000002222222222222222222222222222222222222222").from_hex().unwrap();
		let expected = vec![Token::Array(vec![
			Token::Address([0x11u8; 20]),
			Token::Address([0x22u8; 20]),
		])];
		let decoded = Decoder::decode(&[Reader::read("address[]").unwrap()], &encoded).unwrap();
		assert_eq!(decoded, expected);
	}

	#[test]
	fn decode_dynamic_array_of_dynamic_arrays() {
		let encoded = ("".to_owned() +
			"0000000000000000000000000000000000000000000000000000000000000020" +
			"0000000000000000000000000000000000000000000000000000000000000002" +
			"0000000000000000000000000000000000000000000000000000000000000040" +
			"0000000000000000000000000000000000000000000000000000000000000080" +
			"0000000000000000000000000000000000000000000000000000000000000001" +
			"0000000000000000000000001111111111111111111111111111111111111111" +
			"0000000000000000000000000000000000000000000000000000000000000001" +
			"0000000000000000000000002222222222222222222222222222222222222222").from_hex().unwrap();
		let expected = vec![Token::Array(vec![
			Token::Array(vec![Token::Address([0x11u8; 20])]),
			Token::Array(vec![Token::Address([0x22u8; 20])]),
		])];
		let decoded = Decoder::decode(&[Reader::read("address[][]").unwrap()], &encoded).unwrap();
		assert_eq!(decoded, expected);
	}

	#[test]
	fn decode_bytes_and_string() {
		let encoded = ("".to_owned() +
			"0000000000000000000000000000000000000000000000000000000000000020" +
			"0000000000000000000000000000000000000000000000000000000000000002" +
			"1234000000000000000000000000000000000000000000000000000000000000").from_hex().unwrap();
		let decoded = Decoder::decode(&[ParamType::Bytes], &encoded).unwrap();
		assert_eq!(decoded, vec![Token::Bytes(vec![0x12, 0x34])]);

		let encoded = ("".to_owned() +
			"0000000000000000000000000000000000000000000000000000000000000020" +
			"0000000000000000000000000000000000000000000000000000000000000009" +
			"6761766f66796f726b0000000000000000000000000000000000000000000000").from_hex().unwrap();
		let decoded = Decoder::decode(&[ParamType::String], &encoded).unwrap();
		assert_eq!(decoded, vec![Token::String("gavofyork".to_owned())]);
	}

	#[test]
	fn decode_rejects_nonzero_padding() {
		let encoded = ("".to_owned() +
			"0000000000000000000000000000000000000000000000000000000000000020" +
			"0000000000000000000000000000000000000000000000000000000000000002" +
			"1234000000000000000000000000000000000000000000000000000000000001").from_hex().unwrap();
		let err = Decoder::decode(&[ParamType::Bytes], &encoded).unwrap_err();
		assert!(err.message().contains("non-zero padding"));
	}

	#[test]
	fn decode_boolean_slot_checks() {
		let valid = "0000000000000000000000000000000000000000000000000000000000000001".from_hex().unwrap();
		assert_eq!(Decoder::decode(&[ParamType::Bool], &valid).unwrap(), vec![Token::Bool(true)]);

		// byte 31 = 2
		let two = "0000000000000000000000000000000000000000000000000000000000000002".from_hex().unwrap();
		assert!(Decoder::decode(&[ParamType::Bool], &two).is_err());

		// nonzero byte among positions 0..=30
		let dirty = "0100000000000000000000000000000000000000000000000000000000000001".from_hex().unwrap();
		assert!(Decoder::decode(&[ParamType::Bool], &dirty).is_err());
	}

	#[test]
	fn decode_rejects_trailing_bytes() {
		let encoded = ("".to_owned() +
			"0000000000000000000000000000000000000000000000000000000000000001" +
			"0000000000000000000000000000000000000000000000000000000000000000").from_hex().unwrap();
		let err = Decoder::decode(&[ParamType::Bool], &encoded).unwrap_err();
		assert!(err.message().contains("unconsumed bytes"));
	}

	#[test]
	fn decode_rejects_truncated_input() {
		let encoded = "00000000000000000000000000000000".from_hex().unwrap();
		let err = Decoder::decode(&[ParamType::Bool], &encoded).unwrap_err();
		assert!(err.message().contains("truncated"));
	}

	#[test]
	fn decode_rejects_oversized_offset() {
		let encoded = ("".to_owned() +
			"0000000000000000000000000000000000000000000000000000000080000000" +
			"0000000000000000000000000000000000000000000000000000000000000000").from_hex().unwrap();
		let err = Decoder::decode(&[ParamType::Bytes], &encoded).unwrap_err();
		assert!(err.message().contains("31 bits"));
	}

	#[test]
	fn lenient_accepts_forward_jump_strict_rejects() {
		// offset points one word past the head; the skipped word is junk
		let encoded = ("".to_owned() +
			"0000000000000000000000000000000000000000000000000000000000000040" +
			"deadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef" +
			"0000000000000000000000000000000000000000000000000000000000000002" +
			"1234000000000000000000000000000000000000000000000000000000000000").from_hex().unwrap();
		let decoded = Decoder::decode_with_mode(&[ParamType::Bytes], &encoded, Mode::Lenient).unwrap();
		assert_eq!(decoded, vec![Token::Bytes(vec![0x12, 0x34])]);

		let err = Decoder::decode_with_mode(&[ParamType::Bytes], &encoded, Mode::Strict).unwrap_err();
		assert!(err.message().contains("forward jump"));
	}

	#[test]
	fn both_modes_reject_backward_jump() {
		// second offset points back into the head
		let encoded = ("".to_owned() +
			"0000000000000000000000000000000000000000000000000000000000000040" +
			"0000000000000000000000000000000000000000000000000000000000000000" +
			"0000000000000000000000000000000000000000000000000000000000000002" +
			"1234000000000000000000000000000000000000000000000000000000000000").from_hex().unwrap();
		for mode in &[Mode::Strict, Mode::Lenient] {
			let err = Decoder::decode_with_mode(
				&[ParamType::Bytes, ParamType::Bytes],
				&encoded,
				*mode,
			).unwrap_err();
			assert!(err.message().contains("backwards jump"));
		}
	}

	#[test]
	fn decode_static_tuple() {
		let encoded = ("".to_owned() +
			"0000000000000000000000000000000000000000000000000000000000000001" +
			"0000000000000000000000000000000000000000000000000000000000000001" +
			"0000000000000000000000001111111111111111111111111111111111111111").from_hex().unwrap();
		let decoded = Decoder::decode(
			&[Reader::read("(uint256,bool)").unwrap(), ParamType::Address],
			&encoded,
		).unwrap();
		assert_eq!(decoded, vec![
			Token::Tuple(vec![Token::uint(1), Token::Bool(true)]),
			Token::Address([0x11u8; 20]),
		]);
	}

	#[test]
	fn decode_dynamic_tuple() {
		let encoded = ("".to_owned() +
			"0000000000000000000000000000000000000000000000000000000000000040" +
			"0000000000000000000000000000000000000000000000000000000000000001" +
			"0000000000000000000000000000000000000000000000000000000000000001" +
			"0000000000000000000000000000000000000000000000000000000000000040" +
			"0000000000000000000000000000000000000000000000000000000000000003" +
			"6761760000000000000000000000000000000000000000000000000000000000").from_hex().unwrap();
		let decoded = Decoder::decode(
			&[Reader::read("(uint256,string)").unwrap(), ParamType::Bool],
			&encoded,
		).unwrap();
		assert_eq!(decoded, vec![
			Token::Tuple(vec![Token::uint(1), Token::String("gav".to_owned())]),
			Token::Bool(true),
		]);
	}

	#[test]
	fn decode_empty_dynamic_array() {
		let encoded = vec![0u8; 32];
		let decoded = Decoder::decode_token(&Reader::read("uint256[]").unwrap(), &encoded).unwrap();
		assert_eq!(decoded, Token::Array(vec![]));
	}

	#[test]
	fn decode_empty_tuple() {
		let decoded = Decoder::decode(&[], &[]).unwrap();
		assert_eq!(decoded, vec![]);
	}

	#[test]
	fn round_trips() {
		let types = vec![
			Reader::read("(uint256,bytes,int32[2][],string)").unwrap(),
			ParamType::Bool,
		];
		let tokens = vec![
			Token::Tuple(vec![
				Token::uint(42),
				Token::Bytes(vec![1, 2, 3]),
				Token::Array(vec![
					Token::FixedArray(vec![Token::int(-1), Token::int(1)]),
					Token::FixedArray(vec![Token::int(7), Token::int(-7)]),
				]),
				Token::String("hello".to_owned()),
			]),
			Token::Bool(true),
		];
		let encoded = Encoder::encode(&types, &tokens).unwrap();
		let decoded = Decoder::decode(&types, &encoded).unwrap();
		assert_eq!(decoded, tokens);
		// canonical re-encode
		let re_encoded = Encoder::encode(&types, &decoded).unwrap();
		assert_eq!(re_encoded, encoded);
	}

	#[test]
	fn decode_index_matches_full_decode() {
		let types = vec![
			ParamType::Bytes,
			ParamType::Bool,
			Reader::read("uint256[]").unwrap(),
		];
		let tokens = vec![
			Token::Bytes(b"dave".to_vec()),
			Token::Bool(true),
			Token::Array(vec![Token::uint(1), Token::uint(2), Token::uint(3)]),
		];
		let encoded = Encoder::encode(&types, &tokens).unwrap();
		let full = Decoder::decode(&types, &encoded).unwrap();
		for i in 0..types.len() {
			let selected = Decoder::decode_index(&types, &encoded, i).unwrap();
			assert_eq!(selected, full[i]);
		}
	}

	#[test]
	fn decode_index_skips_static_composites() {
		let types = vec![
			Reader::read("uint256[2]").unwrap(),
			Reader::read("(bool,bytes7)").unwrap(),
			ParamType::String,
			ParamType::Address,
		];
		let tokens = vec![
			Token::FixedArray(vec![Token::uint(5), Token::uint(6)]),
			Token::Tuple(vec![Token::Bool(true), Token::FixedBytes(vec![7u8; 7])]),
			Token::String("skip me not".to_owned()),
			Token::Address([0x42u8; 20]),
		];
		let encoded = Encoder::encode(&types, &tokens).unwrap();
		assert_eq!(Decoder::decode_index(&types, &encoded, 2).unwrap(), tokens[2]);
		assert_eq!(Decoder::decode_index(&types, &encoded, 3).unwrap(), tokens[3]);
	}

	#[test]
	fn decode_at_leaves_position_after_consumed_range() {
		let types = vec![ParamType::Bool];
		let mut data = Encoder::encode(&types, &[Token::Bool(true)]).unwrap();
		data.extend_from_slice(&[0xffu8; 7]);
		let (tokens, end) = Decoder::decode_at(&types, &data, 0, Mode::Strict).unwrap();
		assert_eq!(tokens, vec![Token::Bool(true)]);
		assert_eq!(end, 32);
		assert_eq!(&data[end..], &[0xffu8; 7][..]);
	}

	#[test]
	fn decode_index_out_of_bounds() {
		let err = Decoder::decode_index(&[ParamType::Bool], &[0u8; 32], 1).unwrap_err();
		assert!(err.message().contains("out of bounds"));
	}
}
