//! String-form deserialization of param types.

use std::fmt;
use serde::{Deserialize, Deserializer};
use serde::de::{Error as SerdeError, Visitor};
use super::{ParamType, Reader};

impl<'a> Deserialize<'a> for ParamType {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'a> {
		deserializer.deserialize_str(TypeStringVisitor)
	}
}

/// Feeds every string the deserializer produces through `Reader::read`.
struct TypeStringVisitor;

impl<'a> Visitor<'a> for TypeStringVisitor {
	type Value = ParamType;

	fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
		formatter.write_str("a canonical ABI type string such as `uint256` or `(bool,bytes)[2]`")
	}

	fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> where E: SerdeError {
		Reader::read(value).map_err(SerdeError::custom)
	}
}
