use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

/// Binary data passed to or returned from a function.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
	pub fn into_inner(self) -> Vec<u8> {
		self.0
	}
}

impl Deref for Bytes {
	type Target = [u8];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<Vec<u8>> for Bytes {
	fn from(v: Vec<u8>) -> Self {
		Bytes(v)
	}
}

/// A value exchanged with the host database.
///
/// This mirrors the storage classes a host engine hands to scalar and
/// aggregate functions: a function receives its arguments as values and
/// returns a single value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
	#[default]
	Null,
	Int(i64),
	Float(f64),
	Strand(String),
	Bytes(Bytes),
}

impl Value {
	/// Check if this Value is NULL
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Returns the name of the kind of this value, used in error messages.
	pub fn kindof(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Int(_) => "int",
			Value::Float(_) => "float",
			Value::Strand(_) => "string",
			Value::Bytes(_) => "bytes",
		}
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int(v)
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Int(v as i64)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float(v)
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Strand(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Strand(v.to_owned())
	}
}

impl From<Bytes> for Value {
	fn from(v: Bytes) -> Self {
		Value::Bytes(v)
	}
}

impl From<Vec<u8>> for Value {
	fn from(v: Vec<u8>) -> Self {
		Value::Bytes(Bytes(v))
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map(Into::into).unwrap_or_default()
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => f.write_str("NULL"),
			Value::Int(v) => write!(f, "{v}"),
			Value::Float(v) => write!(f, "{v:?}"),
			Value::Strand(v) => write!(f, "'{v}'"),
			Value::Bytes(v) => {
				f.write_str("X'")?;
				for b in v.iter() {
					write!(f, "{b:02X}")?;
				}
				f.write_str("'")
			}
		}
	}
}
