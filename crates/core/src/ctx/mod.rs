use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::sid::SpatialIndex;

/// The state shared by every function call of a connection.
///
/// The context is cheap to clone, and holds the spatial-indexing library
/// which the conversion and intersection functions delegate to.
#[derive(Clone)]
pub struct Context {
	index: Arc<dyn SpatialIndex>,
}

impl Context {
	pub fn new(index: Arc<dyn SpatialIndex>) -> Self {
		Self {
			index,
		}
	}

	/// Get the spatial-indexing library for this context
	pub fn index(&self) -> &dyn SpatialIndex {
		self.index.as_ref()
	}
}

impl Debug for Context {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Context").finish_non_exhaustive()
	}
}
