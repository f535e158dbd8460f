//! Param types and their parsing.

mod param_type;
mod writer;
mod reader;
mod deserialize;

pub use self::param_type::ParamType;
pub use self::writer::Writer;
pub use self::reader::{Reader, MAX_TYPE_STRING_LEN};
