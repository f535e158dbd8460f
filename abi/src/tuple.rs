//! Tuple descriptors with optional element names.

use std::fmt;
use serde::{Deserialize, Deserializer};
use serde::de::{Error as SerdeError, Visitor};
use {ParamType, Token, Error, Reader, Writer, Encoder, Decoder, Mode, PackedEncoder, PackedDecoder};

/// An ordered sequence of param types with optional element names.
///
/// Names are metadata for error messages and interop only: they take no
/// part in encoding, validation, or equality.
#[derive(Debug, Clone)]
pub struct TupleType {
	types: Vec<ParamType>,
	names: Option<Vec<String>>,
}

impl PartialEq for TupleType {
	fn eq(&self, other: &TupleType) -> bool {
		self.types == other.types
	}
}

impl Eq for TupleType {}

impl fmt::Display for TupleType {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.canonical_type())
	}
}

impl From<Vec<ParamType>> for TupleType {
	fn from(types: Vec<ParamType>) -> TupleType {
		TupleType { types: types, names: None }
	}
}

impl TupleType {
	/// Parses a parenthesized type string such as `(uint256,bytes)`.
	pub fn parse(name: &str) -> Result<TupleType, Error> {
		match Reader::read(name)? {
			ParamType::Tuple(types) => Ok(TupleType { types: types, names: None }),
			other => Err(Error::TypeParse(format!("not a tuple type: {}", other))),
		}
	}

	/// Parses a tuple type and attaches element names to it.
	pub fn parse_named<S: Into<String>>(name: &str, names: Vec<S>) -> Result<TupleType, Error> {
		let mut tuple = TupleType::parse(name)?;
		tuple.set_names(names)?;
		Ok(tuple)
	}

	/// Attaches element names; the count must equal the arity.
	pub fn set_names<S: Into<String>>(&mut self, names: Vec<S>) -> Result<(), Error> {
		if names.len() != self.types.len() {
			return Err(Error::TypeParse(format!(
				"element name count mismatch: {} != {}",
				names.len(),
				self.types.len()
			)));
		}
		self.names = Some(names.into_iter().map(Into::into).collect());
		Ok(())
	}

	/// Number of elements.
	pub fn size(&self) -> usize {
		self.types.len()
	}

	/// True for the empty tuple `()`.
	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	/// The element type at `index`.
	pub fn get(&self, index: usize) -> Option<&ParamType> {
		self.types.get(index)
	}

	/// The element name at `index`, if names were attached.
	pub fn name(&self, index: usize) -> Option<&str> {
		match self.names {
			Some(ref names) => names.get(index).map(|n| &**n),
			None => None,
		}
	}

	/// The element types.
	pub fn types(&self) -> &[ParamType] {
		&self.types
	}

	/// This tuple as a plain param type.
	pub fn to_param_type(&self) -> ParamType {
		ParamType::Tuple(self.types.clone())
	}

	/// Canonical type string, e.g. `(uint256,bytes)`.
	pub fn canonical_type(&self) -> String {
		Writer::write(&ParamType::Tuple(self.types.clone()))
	}

	/// Returns whether any element is dynamic.
	pub fn is_dynamic(&self) -> bool {
		self.types.iter().any(ParamType::is_dynamic)
	}

	/// Exact encoded length when no element is dynamic.
	pub fn static_byte_length(&self) -> Option<usize> {
		self.to_param_type().static_byte_length()
	}

	/// Validates `tokens` and returns the exact encoded byte length.
	pub fn validate(&self, tokens: &[Token]) -> Result<usize, Error> {
		Encoder::validate(&self.types, tokens)
	}

	/// Encodes `tokens` according to this tuple's element types.
	pub fn encode(&self, tokens: &[Token]) -> Result<Vec<u8>, Error> {
		Encoder::encode(&self.types, tokens)
	}

	/// Encodes `tokens` into a caller-supplied buffer at its current end.
	pub fn encode_into(&self, tokens: &[Token], dest: &mut Vec<u8>) -> Result<(), Error> {
		Encoder::encode_into(&self.types, tokens, dest)
	}

	/// Decodes a full encoding of this tuple; trailing bytes are an error.
	pub fn decode(&self, data: &[u8]) -> Result<Vec<Token>, Error> {
		Decoder::decode(&self.types, data)
	}

	/// As `decode`, with an explicit offset-handling profile.
	pub fn decode_with_mode(&self, data: &[u8], mode: Mode) -> Result<Vec<Token>, Error> {
		Decoder::decode_with_mode(&self.types, data, mode)
	}

	/// Decodes only the `index`-th element, without materializing the
	/// earlier ones.
	pub fn decode_index(&self, data: &[u8], index: usize) -> Result<Token, Error> {
		Decoder::decode_index(&self.types, data, index)
	}

	/// Packed byte length of `tokens`.
	pub fn byte_length_packed(&self, tokens: &[Token]) -> Result<usize, Error> {
		PackedEncoder::tuple_length(&self.types, tokens)
	}

	/// Encodes `tokens` in the non-standard packed form.
	pub fn encode_packed(&self, tokens: &[Token]) -> Result<Vec<u8>, Error> {
		PackedEncoder::encode(&self.types, tokens)
	}

	/// Decodes the non-standard packed form.
	pub fn decode_packed(&self, data: &[u8]) -> Result<Vec<Token>, Error> {
		PackedDecoder::decode(&self.types, data)
	}

	/// The sub-tuple of elements whose manifest entry is true.
	pub fn select(&self, manifest: &[bool]) -> Result<TupleType, Error> {
		self.subtuple(manifest, false)
	}

	/// The sub-tuple of elements whose manifest entry is false; the
	/// complement of `select` over the same manifest.
	pub fn exclude(&self, manifest: &[bool]) -> Result<TupleType, Error> {
		self.subtuple(manifest, true)
	}

	fn subtuple(&self, manifest: &[bool], negate: bool) -> Result<TupleType, Error> {
		if manifest.len() != self.types.len() {
			return Err(Error::Validation(format!(
				"manifest length mismatch: {} != {}",
				manifest.len(),
				self.types.len()
			)));
		}
		let types = self.types.iter()
			.zip(manifest)
			.filter(|&(_, keep)| negate ^ keep)
			.map(|(param, _)| param.clone())
			.collect();
		let names = self.names.as_ref().map(|names| {
			names.iter()
				.zip(manifest)
				.filter(|&(_, keep)| negate ^ keep)
				.map(|(name, _)| name.clone())
				.collect()
		});
		Ok(TupleType { types: types, names: names })
	}
}

impl<'a> Deserialize<'a> for TupleType {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'a> {
		deserializer.deserialize_str(TupleTypeVisitor)
	}
}

struct TupleTypeVisitor;

impl<'a> Visitor<'a> for TupleTypeVisitor {
	type Value = TupleType;

	fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
		write!(formatter, "a parenthesized list of abi-encodable parameter types")
	}

	fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> where E: SerdeError {
		TupleType::parse(value).map_err(|e| SerdeError::custom(format!("{}", e)))
	}

	fn visit_string<E>(self, value: String) -> Result<Self::Value, E> where E: SerdeError {
		self.visit_str(value.as_str())
	}
}

#[cfg(test)]
mod tests {
	use serde_json;
	use {TupleType, ParamType, Token};

	#[test]
	fn parse_and_render() {
		let tuple = TupleType::parse("(uint256,bytes)").unwrap();
		assert_eq!(tuple.size(), 2);
		assert_eq!(tuple.canonical_type(), "(uint256,bytes)");
		assert_eq!(tuple.get(0), Some(&ParamType::Uint(256)));
		assert!(tuple.is_dynamic());

		let empty = TupleType::parse("()").unwrap();
		assert!(empty.is_empty());
		assert_eq!(empty.canonical_type(), "()");
		assert_eq!(empty.encode(&[]).unwrap(), Vec::<u8>::new());
	}

	#[test]
	fn rejects_non_tuple() {
		assert!(TupleType::parse("uint256").is_err());
	}

	#[test]
	fn names_are_metadata_only() {
		let anonymous = TupleType::parse("(uint256,bool)").unwrap();
		let named = TupleType::parse_named("(uint256,bool)", vec!["amount", "flag"]).unwrap();
		assert_eq!(anonymous, named);
		assert_eq!(named.name(0), Some("amount"));
		assert_eq!(named.name(1), Some("flag"));
		assert_eq!(anonymous.name(0), None);
	}

	#[test]
	fn name_count_must_match_arity() {
		assert!(TupleType::parse_named("(uint256,bool)", vec!["amount"]).is_err());
	}

	#[test]
	fn select_and_exclude_are_complements() {
		let tuple = TupleType::parse_named(
			"(uint256,bool,bytes)",
			vec!["amount", "flag", "payload"],
		).unwrap();
		let manifest = [true, false, true];

		let selected = tuple.select(&manifest).unwrap();
		assert_eq!(selected.canonical_type(), "(uint256,bytes)");
		assert_eq!(selected.name(1), Some("payload"));

		let excluded = tuple.exclude(&manifest).unwrap();
		assert_eq!(excluded.canonical_type(), "(bool)");
		assert_eq!(excluded.name(0), Some("flag"));

		// identity laws
		assert_eq!(tuple.select(&[true, true, true]).unwrap(), tuple);
		assert_eq!(tuple.exclude(&[false, false, false]).unwrap(), tuple);
	}

	#[test]
	fn select_requires_full_manifest() {
		let tuple = TupleType::parse("(uint256,bool)").unwrap();
		assert!(tuple.select(&[true]).is_err());
		assert!(tuple.exclude(&[true, false, true]).is_err());
	}

	#[test]
	fn tuple_round_trip() {
		let tuple = TupleType::parse("(uint256,bytes,bool)").unwrap();
		let tokens = vec![
			Token::uint(9000),
			Token::Bytes(vec![0xde, 0xad]),
			Token::Bool(true),
		];
		let encoded = tuple.encode(&tokens).unwrap();
		assert_eq!(tuple.validate(&tokens).unwrap(), encoded.len());
		assert_eq!(tuple.decode(&encoded).unwrap(), tokens);
	}

	#[test]
	fn decode_index_agrees_with_decode() {
		let tuple = TupleType::parse("(bytes,bool,uint256[])").unwrap();
		let tokens = vec![
			Token::Bytes(b"dave".to_vec()),
			Token::Bool(true),
			Token::Array(vec![Token::uint(1), Token::uint(2), Token::uint(3)]),
		];
		let encoded = tuple.encode(&tokens).unwrap();
		let decoded = tuple.decode(&encoded).unwrap();
		for index in 0..tuple.size() {
			assert_eq!(tuple.decode_index(&encoded, index).unwrap(), decoded[index]);
		}
	}

	#[test]
	fn deserializes_from_string_form() {
		let tuple: TupleType = serde_json::from_str(r#""(uint256,bytes)""#).unwrap();
		assert_eq!(tuple, TupleType::parse("(uint256,bytes)").unwrap());
	}
}
