//! ABI encoder.

use {ParamType, Token, Word, Error};
use util::{pad_usize, fits_signed, fits_unsigned};
use integers::round_up;

fn pad_fixed_bytes(bytes: &[u8]) -> Vec<Word> {
	let mut result = vec![];
	let len = (bytes.len() + 31) / 32;
	for i in 0..len {
		let mut padded = [0u8; 32];

		let to_copy = match i == len - 1 {
			false => 32,
			true => match bytes.len() % 32 {
				0 => 32,
				x => x,
			},
		};

		let offset = 32 * i;
		padded[..to_copy].copy_from_slice(&bytes[offset..offset + to_copy]);
		result.push(padded);
	}

	result
}

fn pad_bytes(bytes: &[u8]) -> Vec<Word> {
	let mut result = vec![pad_usize(bytes.len())];
	result.extend(pad_fixed_bytes(bytes));
	result
}

/// Intermediate form of one value: enough to lay out heads and tails and
/// to compute every offset before any byte is written.
#[derive(Debug)]
enum Mediate {
	/// Static words, inlined in the head.
	Raw(Vec<Word>),
	/// Length-prefixed words (bytes, string); offset slot in the head.
	Prefixed(Vec<Word>),
	/// Fully static composite, inlined in the head.
	Fixed(Vec<Mediate>),
	/// Dynamic tuple or fixed array of dynamic elements; offset slot in
	/// the head, head/tail region in the tail, no length prefix.
	Dynamic(Vec<Mediate>),
	/// Dynamic-length array; offset slot in the head, length prefix and
	/// head/tail region in the tail.
	Array(Vec<Mediate>),
}

impl Mediate {
	fn head_len(&self) -> usize {
		match *self {
			Mediate::Raw(ref raw) => 32 * raw.len(),
			Mediate::Fixed(ref mediates) => mediates.iter().map(Mediate::head_len).sum(),
			Mediate::Prefixed(_) | Mediate::Dynamic(_) | Mediate::Array(_) => 32,
		}
	}

	fn tail_len(&self) -> usize {
		match *self {
			// a static composite holds no dynamic children
			Mediate::Raw(_) | Mediate::Fixed(_) => 0,
			Mediate::Prefixed(ref pre) => 32 * pre.len(),
			Mediate::Dynamic(ref mediates) => {
				mediates.iter().map(|m| m.head_len() + m.tail_len()).sum()
			},
			Mediate::Array(ref mediates) => {
				32 + mediates.iter().map(|m| m.head_len() + m.tail_len()).sum::<usize>()
			},
		}
	}

	/// Offset of the `position`-th tail, measured from the start of the
	/// region (excluding any length prefix).
	fn offset_for(mediates: &[Mediate], position: usize) -> usize {
		let heads: usize = mediates.iter().map(Mediate::head_len).sum();
		mediates[..position].iter().fold(heads, |acc, m| acc + m.tail_len())
	}

	fn head(&self, suffix_offset: usize, dest: &mut Vec<u8>) {
		match *self {
			Mediate::Raw(ref raw) => {
				for word in raw {
					dest.extend_from_slice(word);
				}
			},
			Mediate::Fixed(ref mediates) => {
				for (i, m) in mediates.iter().enumerate() {
					m.head(Mediate::offset_for(mediates, i), dest);
				}
			},
			Mediate::Prefixed(_) | Mediate::Dynamic(_) | Mediate::Array(_) => {
				dest.extend_from_slice(&pad_usize(suffix_offset));
			},
		}
	}

	fn tail(&self, dest: &mut Vec<u8>) {
		match *self {
			Mediate::Raw(_) | Mediate::Fixed(_) => {},
			Mediate::Prefixed(ref pre) => {
				for word in pre {
					dest.extend_from_slice(word);
				}
			},
			Mediate::Dynamic(ref mediates) => {
				Mediate::write_region(mediates, dest);
			},
			Mediate::Array(ref mediates) => {
				dest.extend_from_slice(&pad_usize(mediates.len()));
				Mediate::write_region(mediates, dest);
			},
		}
	}

	/// Writes all heads, then all tails, in declaration order.
	fn write_region(mediates: &[Mediate], dest: &mut Vec<u8>) {
		for (i, m) in mediates.iter().enumerate() {
			m.head(Mediate::offset_for(mediates, i), dest);
		}
		for m in mediates {
			m.tail(dest);
		}
	}
}

/// ABI encoder and value validator.
pub struct Encoder;

impl Encoder {
	/// Validates `tokens` against the tuple of `types` and returns the
	/// exact encoded byte length. Computed without allocation.
	pub fn validate(types: &[ParamType], tokens: &[Token]) -> Result<usize, Error> {
		if types.len() != tokens.len() {
			return Err(Error::Validation(format!(
				"tuple length mismatch: actual != expected: {} != {}",
				tokens.len(),
				types.len()
			)));
		}
		let mut total = 0;
		for (i, (param, token)) in types.iter().zip(tokens).enumerate() {
			let len = Self::validate_token(param, token)
				.map_err(|e| e.context(&format!("tuple index {}", i)))?;
			total += if param.is_dynamic() { 32 + len } else { len };
		}
		Ok(total)
	}

	/// Validates a single value and returns its encoded byte length,
	/// excluding any offset slot it may occupy in an enclosing head.
	pub fn validate_token(param: &ParamType, token: &Token) -> Result<usize, Error> {
		match (param, token) {
			(&ParamType::Address, &Token::Address(_)) => Ok(32),
			(&ParamType::Bool, &Token::Bool(_)) => Ok(32),
			(&ParamType::Int(bits), &Token::Int(ref word)) |
			(&ParamType::Fixed(bits, _), &Token::Int(ref word)) => {
				if !fits_signed(word, bits) {
					return Err(Error::Validation(format!("integer out of range for {}", param)));
				}
				Ok(32)
			},
			(&ParamType::Uint(bits), &Token::Uint(ref word)) |
			(&ParamType::Ufixed(bits, _), &Token::Uint(ref word)) => {
				if !fits_unsigned(word, bits) {
					return Err(Error::Validation(format!("integer out of range for {}", param)));
				}
				Ok(32)
			},
			(&ParamType::FixedBytes(len), &Token::FixedBytes(ref bytes)) => {
				if bytes.len() != len {
					return Err(Error::Validation(format!(
						"fixed bytes length mismatch: {} != {}",
						bytes.len(),
						len
					)));
				}
				Ok(round_up(len, 32))
			},
			(&ParamType::Bytes, &Token::Bytes(ref bytes)) => {
				Ok(32 + round_up(bytes.len(), 32))
			},
			// length is in bytes of the utf-8 form
			(&ParamType::String, &Token::String(ref s)) => {
				Ok(32 + round_up(s.len(), 32))
			},
			(&ParamType::FixedArray(ref param, len), &Token::FixedArray(ref tokens)) => {
				if tokens.len() != len {
					return Err(Error::Validation(format!(
						"array length mismatch: {} != {}",
						tokens.len(),
						len
					)));
				}
				Self::validate_elements(param, tokens)
			},
			(&ParamType::Array(ref param), &Token::Array(ref tokens)) => {
				Ok(32 + Self::validate_elements(param, tokens)?)
			},
			(&ParamType::Tuple(ref params), &Token::Tuple(ref tokens)) => {
				Self::validate(params, tokens)
			},
			(param, token) => Err(Error::Validation(format!(
				"type mismatch: {} expected, found {}",
				param,
				token.type_name()
			))),
		}
	}

	fn validate_elements(param: &ParamType, tokens: &[Token]) -> Result<usize, Error> {
		let dynamic = param.is_dynamic();
		let mut total = 0;
		for (i, token) in tokens.iter().enumerate() {
			let len = Self::validate_token(param, token)
				.map_err(|e| e.context(&format!("array index {}", i)))?;
			total += if dynamic { 32 + len } else { len };
		}
		Ok(total)
	}

	/// Encodes `tokens` as the ABI tuple described by `types`.
	///
	/// ```rust
	/// extern crate ethcodec_abi as abi;
	/// use abi::{Encoder, ParamType, Token};
	///
	/// fn main () {
	/// 	let encoded = Encoder::encode(
	/// 		&[ParamType::Address],
	/// 		&[Token::Address([0x11u8; 20])],
	/// 	).unwrap();
	/// 	assert_eq!(encoded.len(), 32);
	/// }
	/// ```
	pub fn encode(types: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>, Error> {
		let len = Self::validate(types, tokens)?;
		let mut dest = Vec::with_capacity(len);
		let mediates = Self::mediates(types, tokens)?;
		Mediate::write_region(&mediates, &mut dest);
		Ok(dest)
	}

	/// Encodes `tokens` into a caller-supplied buffer at its current end.
	pub fn encode_into(types: &[ParamType], tokens: &[Token], dest: &mut Vec<u8>) -> Result<(), Error> {
		Self::validate(types, tokens)?;
		let mediates = Self::mediates(types, tokens)?;
		Mediate::write_region(&mediates, dest);
		Ok(())
	}

	/// Encodes one standalone value: a static value is its head words, a
	/// dynamic one is its tail (no offset slot is written).
	pub fn encode_token(param: &ParamType, token: &Token) -> Result<Vec<u8>, Error> {
		let len = Self::validate_token(param, token)?;
		let mut dest = Vec::with_capacity(len);
		let mediate = Self::mediate(param, token)?;
		match mediate {
			Mediate::Raw(_) | Mediate::Fixed(_) => mediate.head(0, &mut dest),
			ref dynamic => dynamic.tail(&mut dest),
		}
		Ok(dest)
	}

	fn mediates(types: &[ParamType], tokens: &[Token]) -> Result<Vec<Mediate>, Error> {
		types.iter()
			.zip(tokens)
			.map(|(param, token)| Self::mediate(param, token))
			.collect()
	}

	fn mediate(param: &ParamType, token: &Token) -> Result<Mediate, Error> {
		match (param, token) {
			(&ParamType::Address, &Token::Address(ref address)) => {
				let mut padded = [0u8; 32];
				padded[12..].copy_from_slice(address);
				Ok(Mediate::Raw(vec![padded]))
			},
			(&ParamType::Int(_), &Token::Int(ref word)) |
			(&ParamType::Fixed(_, _), &Token::Int(ref word)) |
			(&ParamType::Uint(_), &Token::Uint(ref word)) |
			(&ParamType::Ufixed(_, _), &Token::Uint(ref word)) => {
				Ok(Mediate::Raw(vec![*word]))
			},
			(&ParamType::Bool, &Token::Bool(b)) => {
				Ok(Mediate::Raw(vec![pad_usize(b as usize)]))
			},
			(&ParamType::FixedBytes(_), &Token::FixedBytes(ref bytes)) => {
				Ok(Mediate::Raw(pad_fixed_bytes(bytes)))
			},
			(&ParamType::Bytes, &Token::Bytes(ref bytes)) => {
				Ok(Mediate::Prefixed(pad_bytes(bytes)))
			},
			(&ParamType::String, &Token::String(ref s)) => {
				Ok(Mediate::Prefixed(pad_bytes(s.as_bytes())))
			},
			(&ParamType::FixedArray(ref param, _), &Token::FixedArray(ref tokens)) => {
				let mediates = tokens.iter()
					.map(|token| Self::mediate(param, token))
					.collect::<Result<Vec<Mediate>, Error>>()?;
				if param.is_dynamic() {
					Ok(Mediate::Dynamic(mediates))
				} else {
					Ok(Mediate::Fixed(mediates))
				}
			},
			(&ParamType::Array(ref param), &Token::Array(ref tokens)) => {
				let mediates = tokens.iter()
					.map(|token| Self::mediate(param, token))
					.collect::<Result<Vec<Mediate>, Error>>()?;
				Ok(Mediate::Array(mediates))
			},
			(&ParamType::Tuple(ref params), &Token::Tuple(ref tokens)) => {
				let mediates = Self::mediates(params, tokens)?;
				if param.is_dynamic() {
					Ok(Mediate::Dynamic(mediates))
				} else {
					Ok(Mediate::Fixed(mediates))
				}
			},
			(param, token) => Err(Error::Validation(format!(
				"type mismatch: {} expected, found {}",
				param,
				token.type_name()
			))),
		}
	}
}
