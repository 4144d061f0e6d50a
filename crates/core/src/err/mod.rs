use thiserror::Error;

/// An error originating from a starelite function.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// The requested function does not exist
	#[error("The function '{name}' does not exist")]
	InvalidFunction {
		name: String,
	},

	/// The wrong number of arguments was given to a function
	#[error("Incorrect arguments for function {name}(). {message}")]
	InvalidArguments {
		name: String,
		message: String,
	},

	/// An argument was of the wrong kind for its position
	#[error("Invalid argument type for function {name}(). {message}")]
	InvalidArgumentType {
		name: String,
		message: String,
	},

	/// A blob or text argument could not be decoded
	#[error("Malformed input: {0}")]
	MalformedInput(String),

	/// No usable point or polygon could be extracted from a geometry
	#[error("No usable geometry: {0}")]
	MissingGeometry(String),
}

impl Error {
	/// Whether this error describes bad input data which the host boundary
	/// reports as a null result instead of failing the call.
	pub fn is_recoverable(&self) -> bool {
		matches!(
			self,
			Error::InvalidArgumentType { .. }
				| Error::MalformedInput(_)
				| Error::MissingGeometry(_)
		)
	}
}
