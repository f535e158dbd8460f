//! Contract function call builder.

use std::fmt;
use {TupleType, Token, Error};

/// Length of the function selector prefix.
pub const SELECTOR_LEN: usize = 4;

/// Contract function call builder.
///
/// The selector is the first four bytes of the Keccak-256 digest of the
/// canonical signature. The digest function is supplied by the caller at
/// construction; this library never hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
	name: String,
	inputs: TupleType,
	selector: [u8; 4],
}

impl fmt::Display for Function {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.signature())
	}
}

impl Function {
	/// Creates a function call builder from a name and input tuple;
	/// `keccak` supplies the 32-byte digest of the signature.
	pub fn new<H>(name: &str, inputs: TupleType, keccak: H) -> Function
		where H: FnOnce(&[u8]) -> [u8; 32]
	{
		let signature = format!("{}{}", name, inputs.canonical_type());
		let digest = keccak(signature.as_bytes());
		let mut selector = [0u8; 4];
		selector.copy_from_slice(&digest[..SELECTOR_LEN]);
		Function {
			name: name.to_owned(),
			inputs: inputs,
			selector: selector,
		}
	}

	/// Parses a full signature such as `sam(bytes,bool,uint256[])`.
	pub fn parse<H>(signature: &str, keccak: H) -> Result<Function, Error>
		where H: FnOnce(&[u8]) -> [u8; 32]
	{
		let split = signature.find('(')
			.ok_or_else(|| Error::TypeParse(format!("missing argument list in `{}`", signature)))?;
		let inputs = TupleType::parse(&signature[split..])?;
		Ok(Function::new(&signature[..split], inputs, keccak))
	}

	/// The function name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The input tuple type.
	pub fn inputs(&self) -> &TupleType {
		&self.inputs
	}

	/// The canonical signature, `name(type1,type2,…)`.
	pub fn signature(&self) -> String {
		format!("{}{}", self.name, self.inputs.canonical_type())
	}

	/// The four-byte selector.
	pub fn selector(&self) -> [u8; 4] {
		self.selector
	}

	/// Prepares the ABI call data: selector followed by the encoded
	/// arguments.
	pub fn encode_call(&self, tokens: &[Token]) -> Result<Vec<u8>, Error> {
		let len = self.inputs.validate(tokens)?;
		let mut call = Vec::with_capacity(SELECTOR_LEN + len);
		call.extend_from_slice(&self.selector);
		self.inputs.encode_into(tokens, &mut call)?;
		Ok(call)
	}

	/// Strips and verifies the selector, then decodes the arguments.
	pub fn decode_call(&self, data: &[u8]) -> Result<Vec<Token>, Error> {
		if data.len() < SELECTOR_LEN {
			return Err(Error::Decode("call data shorter than the selector".to_owned()));
		}
		if data[..SELECTOR_LEN] != self.selector {
			return Err(Error::Decode(format!(
				"selector mismatch: expected {:02x}{:02x}{:02x}{:02x}",
				self.selector[0],
				self.selector[1],
				self.selector[2],
				self.selector[3]
			)));
		}
		self.inputs.decode(&data[SELECTOR_LEN..])
	}
}
