//! Ethereum ABI params.

use {ParamType, Word, Address};
use util;

/// Ethereum ABI params.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
	/// Address.
	///
	/// solidity name: address
	/// Encoded to left padded [0u8; 32].
	Address(Address),
	/// Vector of bytes with known size.
	///
	/// solidity name eg.: bytes8, bytes32
	/// Encoded right padded to 32 bytes.
	FixedBytes(Vec<u8>),
	/// Vector of bytes of unknown size.
	///
	/// solidity name: bytes
	/// Encoded as a length prefix followed by right padded bytes.
	Bytes(Vec<u8>),
	/// Signed integer as a big-endian two's-complement word.
	///
	/// solidity name: int, fixed
	Int(Word),
	/// Unsigned integer as a big-endian word.
	///
	/// solidity name: uint, ufixed
	Uint(Word),
	/// Boolean value.
	///
	/// solidity name: bool
	/// Encoded as left padded [0u8; 32], where last bit represents boolean value.
	Bool(bool),
	/// String.
	///
	/// solidity name: string
	/// Encoded in the same way as bytes. Must be utf8 compliant.
	String(String),
	/// Array with known size.
	///
	/// solidity name eg.: int[3], bool[3], address[][8]
	FixedArray(Vec<Token>),
	/// Array of params with unknown size.
	///
	/// solidity name eg. int[], bool[], address[5][]
	Array(Vec<Token>),
	/// Tuple of params of fixed arity.
	///
	/// solidity name eg. (int,bool,bytes)
	Tuple(Vec<Token>),
}

impl Token {
	/// Returns true if the token's runtime shape can satisfy the given type.
	pub fn type_check(&self, param: &ParamType) -> bool {
		match (self, param) {
			(&Token::Address(_), &ParamType::Address) => true,
			(&Token::Bytes(_), &ParamType::Bytes) => true,
			(&Token::FixedBytes(ref bytes), &ParamType::FixedBytes(len)) => bytes.len() == len,
			(&Token::Int(_), &ParamType::Int(_)) |
			(&Token::Int(_), &ParamType::Fixed(_, _)) => true,
			(&Token::Uint(_), &ParamType::Uint(_)) |
			(&Token::Uint(_), &ParamType::Ufixed(_, _)) => true,
			(&Token::Bool(_), &ParamType::Bool) => true,
			(&Token::String(_), &ParamType::String) => true,
			(&Token::FixedArray(ref tokens), &ParamType::FixedArray(ref param, len)) => {
				tokens.len() == len && tokens.iter().all(|t| t.type_check(param))
			},
			(&Token::Array(ref tokens), &ParamType::Array(ref param)) => {
				tokens.iter().all(|t| t.type_check(param))
			},
			(&Token::Tuple(ref tokens), &ParamType::Tuple(ref params)) => {
				tokens.len() == params.len()
					&& tokens.iter().zip(params).all(|(t, p)| t.type_check(p))
			},
			_ => false,
		}
	}

	/// Short name of the token's runtime shape, for error messages.
	pub fn type_name(&self) -> &'static str {
		match *self {
			Token::Address(_) => "address",
			Token::FixedBytes(_) => "fixed bytes",
			Token::Bytes(_) => "bytes",
			Token::Int(_) => "int",
			Token::Uint(_) => "uint",
			Token::Bool(_) => "bool",
			Token::String(_) => "string",
			Token::FixedArray(_) => "fixed array",
			Token::Array(_) => "array",
			Token::Tuple(_) => "tuple",
		}
	}

	/// An unsigned integer token holding `value`.
	pub fn uint(value: u64) -> Token {
		Token::Uint(util::uint_word(value))
	}

	/// A signed integer token holding `value`.
	pub fn int(value: i64) -> Token {
		Token::Int(util::int_word(value))
	}
}
