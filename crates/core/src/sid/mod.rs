//! Spatial index values and the collection engine built on them.
//!
//! A spatial index value is a 64-bit token naming a cell, or a whole subtree
//! of cells, in a hierarchical triangular mesh. This module treats the token
//! as opaque: its ordering is the raw integer ordering, and whether two values
//! overlap is answered by a [`SpatialCompare`] supplied by the spatial-indexing
//! library.
//!
//! - [`codec`]: packing collections of values into blobs and bracketed text
//! - [`intersects`]: testing two collections for a spatial overlap
//! - [`sum`]: summing the doubles packed in float blobs

pub mod codec;
pub mod intersects;
pub mod sum;

use geo_types::Coord;

pub use self::codec::{
	decode_float_blob, decode_float_text, decode_index_blob, decode_index_text, encode_float_blob,
	encode_float_text, encode_index_blob, encode_index_text,
};
pub use self::intersects::{brute_intersects, intersects, sorted_intersects};
pub use self::sum::{Sum, sum};

/// A single spatial index value.
pub type IndexValue = i64;

/// Decides whether two spatial index values denote overlapping regions.
///
/// The result is 0 when the regions are disjoint, and non-zero when they
/// intersect or one is nested in the other.
pub trait SpatialCompare {
	fn cmp_spatial(&self, a: IndexValue, b: IndexValue) -> i32;
}

impl<F> SpatialCompare for F
where
	F: Fn(IndexValue, IndexValue) -> i32,
{
	fn cmp_spatial(&self, a: IndexValue, b: IndexValue) -> i32 {
		self(a, b)
	}
}

/// A compact covering produced by a hull computation, which has to be
/// expanded before it can be stored or compared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpatialIntervals(pub Vec<IndexValue>);

/// The spatial-indexing library the conversion functions delegate to.
///
/// An implementation is constructed once by the embedder and handed to every
/// call through the function [`Context`](crate::ctx::Context).
pub trait SpatialIndex: SpatialCompare + Send + Sync {
	/// Looks up the index value of a location at the given level, returning
	/// `None` when the location cannot be indexed.
	fn value_from_lat_lon(&self, lat: f64, lon: f64, level: u8) -> Option<IndexValue>;

	/// Covers a polygon, given as its vertices (`x` longitude, `y` latitude in
	/// degrees), at the given resolution.
	fn non_convex_hull(&self, vertices: &[Coord<f64>], resolution: u8) -> SpatialIntervals;

	/// Expands a covering into the index values it is made of.
	fn expand_intervals(&self, intervals: SpatialIntervals) -> Vec<IndexValue>;
}
