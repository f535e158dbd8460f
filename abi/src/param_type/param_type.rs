//! Function and event param types.

use std::fmt;
use param_type::Writer;

/// Function and event param types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
	/// Address.
	Address,
	/// Bytes.
	Bytes,
	/// Signed integer, bit width 1..=256.
	Int(usize),
	/// Unsigned integer, bit width 1..=256.
	Uint(usize),
	/// Boolean.
	Bool,
	/// String.
	String,
	/// Array of unknown size.
	Array(Box<ParamType>),
	/// Vector of bytes with fixed size, 1..=32.
	FixedBytes(usize),
	/// Array with fixed size.
	FixedArray(Box<ParamType>, usize),
	/// Tuple of params.
	Tuple(Vec<ParamType>),
	/// Signed fixed-point decimal: bit width and scale.
	///
	/// The value on the wire is the scaled integer; the scale lives only
	/// here in the descriptor.
	Fixed(usize, usize),
	/// Unsigned fixed-point decimal: bit width and scale.
	Ufixed(usize, usize),
}

impl fmt::Display for ParamType {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", Writer::write(self))
	}
}

impl ParamType {
	/// Returns whether the encoded form has a data-dependent length.
	///
	/// A composite is dynamic iff any descendant is dynamic or a
	/// dynamic-length array.
	pub fn is_dynamic(&self) -> bool {
		match *self {
			ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
			ParamType::FixedArray(ref param, _) => param.is_dynamic(),
			ParamType::Tuple(ref params) => params.iter().any(|param| param.is_dynamic()),
			_ => false,
		}
	}

	/// Small integer code identifying the variant.
	pub fn type_code(&self) -> u8 {
		match *self {
			ParamType::Bool => 0,
			ParamType::Int(_) => 1,
			ParamType::Uint(_) => 2,
			ParamType::Fixed(_, _) => 3,
			ParamType::Ufixed(_, _) => 4,
			ParamType::FixedBytes(_) => 5,
			ParamType::Bytes => 6,
			ParamType::String => 7,
			ParamType::Address => 8,
			ParamType::Array(_) => 9,
			ParamType::FixedArray(_, _) => 10,
			ParamType::Tuple(_) => 11,
		}
	}

	/// Exact encoded length, known from the type alone; `None` for
	/// dynamic types.
	///
	/// Descriptor trees are acyclic by construction, so the recursion is
	/// bounded by the parsed type string.
	pub fn static_byte_length(&self) -> Option<usize> {
		match *self {
			ParamType::Bytes | ParamType::String | ParamType::Array(_) => None,
			ParamType::FixedArray(ref param, len) => {
				param.static_byte_length().map(|elem| elem * len)
			},
			ParamType::Tuple(ref params) => {
				let mut total = 0;
				for param in params {
					match param.static_byte_length() {
						Some(len) => total += len,
						None => return None,
					}
				}
				Some(total)
			},
			_ => Some(32),
		}
	}

	/// Length of this type's slot in the head of an enclosing composite:
	/// the full static length, or 32 for an offset slot.
	pub fn head_length(&self) -> usize {
		match self.static_byte_length() {
			Some(len) => len,
			None => 32,
		}
	}
}
