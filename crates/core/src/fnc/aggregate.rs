use anyhow::Result;

use super::args::FromArgs;
use crate::sid::Sum;
use crate::val::{Bytes, Value};

const TARGET: &str = "starelite::core::fnc::aggregate";

/// The running state of an aggregate function over one group of rows.
pub trait Accumulator: Send {
	/// The name the aggregate is registered under.
	fn name(&self) -> &'static str;

	/// Folds the arguments of one row into the state.
	fn update(&mut self, args: Vec<Value>) -> Result<()>;

	/// Produces the result for the rows folded so far.
	fn finalize(&self) -> Result<Value>;

	/// Clears the state, ready for the next group.
	fn reset(&mut self);
}

/// Folds every row into an accumulator, skipping rows which fail to update.
pub fn fold<I>(acc: &mut dyn Accumulator, rows: I) -> Result<Value>
where
	I: IntoIterator<Item = Vec<Value>>,
{
	for (row, args) in rows.into_iter().enumerate() {
		if let Err(error) = acc.update(args) {
			debug!(target: TARGET, name = acc.name(), row, %error, "Skipping aggregate row");
		}
	}
	acc.finalize()
}

/// Sums every element of the float blob of every row.
#[derive(Debug, Default)]
pub struct SumBlobArray {
	sum: Sum,
	double: bool,
}

impl SumBlobArray {
	/// The total is rendered as text with six decimals.
	pub fn new() -> Self {
		Self::default()
	}

	/// The total is returned as a float.
	pub fn double() -> Self {
		Self {
			sum: Sum::new(),
			double: true,
		}
	}
}

impl Accumulator for SumBlobArray {
	fn name(&self) -> &'static str {
		if self.double {
			"sum_blob_array_double"
		} else {
			"sum_blob_array"
		}
	}

	fn update(&mut self, args: Vec<Value>) -> Result<()> {
		let (blob,) = <(Bytes,)>::from_args(self.name(), args)?;
		self.sum.accumulate(&blob)
	}

	fn finalize(&self) -> Result<Value> {
		Ok(if self.double {
			self.sum.total().into()
		} else {
			self.sum.finalize().into()
		})
	}

	fn reset(&mut self) {
		self.sum.reset();
	}
}
