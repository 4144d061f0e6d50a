use anyhow::Result;

use super::codec::decode_float_blob;

/// Sums every double packed in a float blob.
pub fn sum(blob: &[u8]) -> Result<f64> {
	Ok(decode_float_blob(blob)?.iter().sum())
}

/// A running total over many float blobs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sum {
	total: f64,
}

impl Sum {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds every element of a blob to the total.
	///
	/// The blob is decoded before anything is added, so a malformed blob
	/// leaves the total untouched.
	pub fn accumulate(&mut self, blob: &[u8]) -> Result<()> {
		let values = decode_float_blob(blob)?;
		self.total += values.iter().sum::<f64>();
		Ok(())
	}

	pub fn total(&self) -> f64 {
		self.total
	}

	/// Renders the total with six decimal places.
	pub fn finalize(&self) -> String {
		format!("{:.6}", self.total)
	}

	pub fn reset(&mut self) {
		self.total = 0.0;
	}
}
