//! Canonical type-string rendering.

use ParamType;

/// Renders a param type into its canonical string form.
pub struct Writer;

impl Writer {
	/// Returns the canonical type string: no spaces, default widths
	/// expanded, tuples parenthesized.
	pub fn write(param: &ParamType) -> String {
		match *param {
			ParamType::Address => "address".to_owned(),
			ParamType::Bytes => "bytes".to_owned(),
			ParamType::FixedBytes(len) => format!("bytes{}", len),
			ParamType::Int(len) => format!("int{}", len),
			ParamType::Uint(len) => format!("uint{}", len),
			ParamType::Bool => "bool".to_owned(),
			ParamType::String => "string".to_owned(),
			ParamType::Fixed(width, scale) => format!("fixed{}x{}", width, scale),
			ParamType::Ufixed(width, scale) => format!("ufixed{}x{}", width, scale),
			ParamType::Array(ref param) => format!("{}[]", Writer::write(param)),
			ParamType::FixedArray(ref param, len) => format!("{}[{}]", Writer::write(param), len),
			ParamType::Tuple(ref params) => {
				let elements = params.iter()
					.map(Writer::write)
					.collect::<Vec<String>>()
					.join(",");
				format!("({})", elements)
			},
		}
	}
}
