use std::vec::IntoIter;

use anyhow::{Result, bail};

use crate::err::Error;
use crate::sid::{IndexValue, decode_index_blob};
use crate::val::{Bytes, Value};

/// The number of arguments a function takes.
#[derive(Debug)]
pub struct Arity {
	pub lower: usize,
	pub upper: Option<usize>,
}

impl Arity {
	pub const fn base() -> Arity {
		Arity {
			lower: 0,
			upper: Some(0),
		}
	}

	/// Combine the arity from multiple arguments to calculate the combined
	/// arity.
	pub fn combine(self, other: Self) -> Arity {
		Arity {
			lower: self.lower + other.lower,
			upper: self.upper.and_then(|a| other.upper.map(|b| a + b)),
		}
	}
}

pub struct Args {
	count: usize,
	iter: IntoIter<Value>,
}

impl Args {
	pub fn from_vec(args: Vec<Value>) -> Self {
		Args {
			count: 1,
			iter: args.into_iter(),
		}
	}

	pub fn next(&mut self) -> Option<(usize, Value)> {
		let v = self.iter.next()?;
		let idx = self.count;
		self.count += 1;
		Some((idx, v))
	}
}

/// A type which a single host value can be converted into.
pub trait FromValue: Sized {
	/// The kind of value expected, used in error messages.
	const KIND: &'static str;

	/// Converts the value, handing it back when it is of the wrong kind.
	fn from_value(v: Value) -> Result<Self, Value>;
}

impl FromValue for i64 {
	const KIND: &'static str = "an integer";

	fn from_value(v: Value) -> Result<Self, Value> {
		match v {
			Value::Int(v) => Ok(v),
			v => Err(v),
		}
	}
}

impl FromValue for f64 {
	const KIND: &'static str = "a number";

	fn from_value(v: Value) -> Result<Self, Value> {
		match v {
			Value::Float(v) => Ok(v),
			Value::Int(v) => Ok(v as f64),
			v => Err(v),
		}
	}
}

impl FromValue for String {
	const KIND: &'static str = "text";

	fn from_value(v: Value) -> Result<Self, Value> {
		match v {
			Value::Strand(v) => Ok(v),
			v => Err(v),
		}
	}
}

impl FromValue for Bytes {
	const KIND: &'static str = "a blob";

	fn from_value(v: Value) -> Result<Self, Value> {
		match v {
			Value::Bytes(v) => Ok(v),
			v => Err(v),
		}
	}
}

/// One or more spatial index values, given either as a single integer or
/// as an index blob.
#[derive(Clone, Debug, PartialEq)]
pub enum Sids {
	One(IndexValue),
	Blob(Bytes),
}

impl Sids {
	pub fn into_values(self) -> Result<Vec<IndexValue>> {
		match self {
			Sids::One(v) => Ok(vec![v]),
			Sids::Blob(b) => decode_index_blob(&b),
		}
	}
}

impl FromValue for Sids {
	const KIND: &'static str = "an integer or a blob";

	fn from_value(v: Value) -> Result<Self, Value> {
		match v {
			Value::Int(v) => Ok(Sids::One(v)),
			Value::Bytes(v) => Ok(Sids::Blob(v)),
			v => Err(v),
		}
	}
}

pub trait FromArg: Sized {
	// returns the number of arguments the type takes.
	fn arity() -> Arity;
	/// Convert a collection of argument values into a certain argument format,
	/// failing if there are too many or too few arguments, or if one of the
	/// arguments could not be converted.
	fn from_arg(name: &str, args: &mut Args) -> Result<Self>;
}

pub trait FromArgs: Sized {
	fn from_args(name: &str, args: Vec<Value>) -> Result<Self>;
}

impl<T: FromValue> FromArg for T {
	fn arity() -> Arity {
		Arity {
			lower: 1,
			upper: Some(1),
		}
	}

	fn from_arg(name: &str, iter: &mut Args) -> Result<Self> {
		// The error should not happen when called with the FromArgs traits as the arity
		// is already checked.
		let (idx, x) = iter.next().ok_or_else(|| Error::InvalidArguments {
			name: name.to_owned(),
			message: "Missing an argument".to_string(),
		})?;

		let v = T::from_value(x).map_err(|v| Error::InvalidArgumentType {
			name: name.to_owned(),
			message: format!("Argument {idx} was the wrong type. Expected {} but found {}", T::KIND, v.kindof()),
		})?;
		Ok(v)
	}
}

impl<T: FromArg> FromArgs for T {
	fn from_args(name: &str, args: Vec<Value>) -> Result<Self> {
		let arity = T::arity();

		if args.len() < arity.lower || arity.upper.map(|x| args.len() > x).unwrap_or(false) {
			let message = if let Some(upper) = arity.upper {
				if upper == arity.lower {
					if upper == 0 {
						"Expected no arguments".to_string()
					} else if upper == 1 {
						"Expected 1 argument".to_string()
					} else {
						format!("Expected {upper} arguments")
					}
				} else {
					format!("Expected {} to {} arguments", arity.lower, upper)
				}
			} else if arity.lower == 0 {
				"Expected zero or more arguments".to_string()
			} else {
				format!("Expected {} or more arguments", arity.lower)
			};

			bail!(Error::InvalidArguments {
				name: name.to_owned(),
				message,
			});
		}

		let mut args = Args::from_vec(args);
		T::from_arg(name, &mut args)
	}
}

/// Some functions take a fixed number of arguments.
/// The len must match the number of type idents that follow.
macro_rules! impl_tuple {
	($($T:ident), *$(,)?) => {

		impl<$($T:FromArg),*> FromArg for ($($T,)*) {
			fn arity() -> Arity{
				Arity::base()
				$(
					.combine($T::arity())
				)*
			}

			#[allow(non_snake_case)]
			fn from_arg(_name: &str, _iter: &mut Args) -> Result<Self>
			{
				Ok(( $(
					$T::from_arg(_name,_iter)?,
				)*))
			}
		}
	}
}

impl_tuple!(A);
impl_tuple!(A, B);
impl_tuple!(A, B, C);
