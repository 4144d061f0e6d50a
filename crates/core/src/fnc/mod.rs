//! The functions registered with the host database.

use anyhow::{Result, bail};

use self::aggregate::{Accumulator, SumBlobArray};
use self::args::FromArgs;
use crate::ctx::Context;
use crate::err::Error;
use crate::val::Value;

pub mod aggregate;
pub mod args;
pub mod blob;
pub mod stare;

const TARGET: &str = "starelite::core::fnc";

/// The scalar functions, with the number of arguments each takes.
pub const SCALAR_FUNCTIONS: &[(&str, usize)] = &[
	("stare_from_lonlat", 3),
	("stare_from_point", 2),
	("stare_from_polygon", 2),
	("decode_stareblob", 1),
	("encode_stareblob", 1),
	("decode_float_blob", 1),
	("encode_float_blob", 1),
	("stare_intersects", 2),
	("stare_brute_intersects", 2),
	("sum_blob_all_element_array", 1),
	("sum_blob_all_element_array_double", 1),
];

/// The aggregate functions, each taking one argument per row.
pub const AGGREGATE_FUNCTIONS: &[&str] = &["sum_blob_array", "sum_blob_array_double"];

/// Runs a scalar function.
///
/// Bad input data yields `Value::Null`. An unknown function name, or a call
/// with the wrong number of arguments, is returned as an error.
pub fn run(ctx: &Context, name: &str, args: Vec<Value>) -> Result<Value> {
	trace!(target: TARGET, name, args = args.len(), "Running function");
	match synchronous(ctx, name, args) {
		Err(e) => match e.downcast_ref::<Error>() {
			Some(error) if error.is_recoverable() => {
				debug!(target: TARGET, name, %error, "Function returned null");
				Ok(Value::Null)
			}
			_ => Err(e),
		},
		res => res,
	}
}

fn exec<A, F>(name: &str, args: Vec<Value>, f: F) -> Result<Value>
where
	A: FromArgs,
	F: FnOnce(A) -> Result<Value>,
{
	f(A::from_args(name, args)?)
}

fn synchronous(ctx: &Context, name: &str, args: Vec<Value>) -> Result<Value> {
	match name {
		"stare_from_lonlat" => exec(name, args, |a| stare::from_lonlat(ctx, a)),
		"stare_from_point" => exec(name, args, |a| stare::from_point(ctx, a)),
		"stare_from_polygon" => exec(name, args, |a| stare::from_polygon(ctx, a)),
		"decode_stareblob" => exec(name, args, blob::decode_index),
		"encode_stareblob" => exec(name, args, blob::encode_index),
		"decode_float_blob" => exec(name, args, blob::decode_float),
		"encode_float_blob" => exec(name, args, blob::encode_float),
		"stare_intersects" => exec(name, args, |a| stare::intersects(ctx, a)),
		"stare_brute_intersects" => exec(name, args, |a| stare::brute_intersects(ctx, a)),
		"sum_blob_all_element_array" => exec(name, args, blob::sum),
		"sum_blob_all_element_array_double" => exec(name, args, blob::sum_double),
		_ => bail!(Error::InvalidFunction {
			name: name.to_owned(),
		}),
	}
}

/// Creates the accumulator of an aggregate function.
pub fn aggregate(name: &str) -> Result<Box<dyn Accumulator>> {
	match name {
		"sum_blob_array" => Ok(Box::new(SumBlobArray::new())),
		"sum_blob_array_double" => Ok(Box::new(SumBlobArray::double())),
		_ => bail!(Error::InvalidFunction {
			name: name.to_owned(),
		}),
	}
}
