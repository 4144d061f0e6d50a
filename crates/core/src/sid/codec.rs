use std::fmt::Write;
use std::str::FromStr;

use anyhow::{Result, bail};

use super::IndexValue;
use crate::cnf::BLOB_VALUE_WIDTH;
use crate::err::Error;

/// Splits a blob into its 8-byte chunks, failing when the length does not
/// divide evenly.
fn chunks(blob: &[u8]) -> Result<impl Iterator<Item = [u8; BLOB_VALUE_WIDTH]> + '_> {
	if blob.len() % BLOB_VALUE_WIDTH != 0 {
		bail!(Error::MalformedInput(format!(
			"blob length {} is not a multiple of {BLOB_VALUE_WIDTH}",
			blob.len()
		)));
	}
	Ok(blob.chunks_exact(BLOB_VALUE_WIDTH).map(|chunk| {
		let mut bytes = [0u8; BLOB_VALUE_WIDTH];
		bytes.copy_from_slice(chunk);
		bytes
	}))
}

/// Writes `[a, b, c]` using the given formatter for each element.
fn write_list<T>(values: &[T], mut fmt: impl FnMut(&mut String, &T)) -> String {
	let mut out = String::with_capacity(2 + values.len() * 8);
	out.push('[');
	for (i, v) in values.iter().enumerate() {
		if i > 0 {
			out.push_str(", ");
		}
		fmt(&mut out, v);
	}
	out.push(']');
	out
}

/// Parses the elements of a bracketed, comma separated list.
///
/// Whitespace and bracket characters are ignored wherever they appear. A
/// single trailing empty element is accepted, as texts written by older
/// versions end in `", ]"`.
fn parse_list<T: FromStr>(text: &str, kind: &str) -> Result<Vec<T>> {
	let mut tokens: Vec<String> = text
		.split(',')
		.map(|t| t.chars().filter(|c| !c.is_whitespace() && *c != '[' && *c != ']').collect())
		.collect();
	if tokens.last().is_some_and(|t| t.is_empty()) {
		tokens.pop();
	}
	tokens
		.into_iter()
		.enumerate()
		.map(|(i, token)| {
			token.parse::<T>().map_err(|_| {
				anyhow::Error::new(Error::MalformedInput(format!(
					"element {i} ('{token}') is not a valid {kind}"
				)))
			})
		})
		.collect()
}

/// Decodes a blob of big-endian 64-bit integers.
pub fn decode_index_blob(blob: &[u8]) -> Result<Vec<IndexValue>> {
	Ok(chunks(blob)?.map(IndexValue::from_be_bytes).collect())
}

/// Encodes index values as a blob of big-endian 64-bit integers.
pub fn encode_index_blob(values: &[IndexValue]) -> Vec<u8> {
	values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

/// Renders an index blob as `[v0, v1, ...]`.
pub fn decode_index_text(blob: &[u8]) -> Result<String> {
	let values = decode_index_blob(blob)?;
	Ok(write_list(&values, |out, v| {
		let _ = write!(out, "{v}");
	}))
}

/// Parses `[v0, v1, ...]` into an index blob.
pub fn encode_index_text(text: &str) -> Result<Vec<u8>> {
	let values = parse_list::<IndexValue>(text, "integer")?;
	Ok(encode_index_blob(&values))
}

/// Decodes a blob of big-endian IEEE-754 doubles.
pub fn decode_float_blob(blob: &[u8]) -> Result<Vec<f64>> {
	Ok(chunks(blob)?.map(f64::from_be_bytes).collect())
}

/// Encodes doubles as a blob of big-endian IEEE-754 values.
pub fn encode_float_blob(values: &[f64]) -> Vec<u8> {
	values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

/// Renders a float blob as `[v0, v1, ...]`.
///
/// Each element uses the shortest representation that parses back to the
/// same double, so the text round-trips exactly except for NaN payloads.
pub fn decode_float_text(blob: &[u8]) -> Result<String> {
	let values = decode_float_blob(blob)?;
	Ok(write_list(&values, |out, v| {
		let _ = write!(out, "{v:?}");
	}))
}

/// Parses `[v0, v1, ...]` into a float blob.
pub fn encode_float_text(text: &str) -> Result<Vec<u8>> {
	let values = parse_list::<f64>(text, "number")?;
	Ok(encode_float_blob(&values))
}
