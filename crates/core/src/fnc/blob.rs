use anyhow::Result;

use crate::sid::{self, Sum};
use crate::val::{Bytes, Value};

pub fn decode_index((blob,): (Bytes,)) -> Result<Value> {
	Ok(sid::decode_index_text(&blob)?.into())
}

pub fn encode_index((text,): (String,)) -> Result<Value> {
	Ok(sid::encode_index_text(&text)?.into())
}

pub fn decode_float((blob,): (Bytes,)) -> Result<Value> {
	Ok(sid::decode_float_text(&blob)?.into())
}

pub fn encode_float((text,): (String,)) -> Result<Value> {
	Ok(sid::encode_float_text(&text)?.into())
}

/// Sums every element, returned as text with six decimals.
pub fn sum((blob,): (Bytes,)) -> Result<Value> {
	let mut acc = Sum::new();
	acc.accumulate(&blob)?;
	Ok(acc.finalize().into())
}

pub fn sum_double((blob,): (Bytes,)) -> Result<Value> {
	Ok(sid::sum(&blob)?.into())
}
