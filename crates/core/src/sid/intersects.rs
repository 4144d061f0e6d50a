use super::{IndexValue, SpatialCompare};
use crate::cnf::EXHAUSTIVE_INTERSECTS_THRESHOLD;

const TARGET: &str = "starelite::core::sid::intersects";

/// Checks whether any value of `a` spatially intersects any value of `b`.
///
/// Small inputs are compared pair by pair with [`brute_intersects`], which is
/// exact. Larger inputs go through [`sorted_intersects`] in both directions,
/// so the result does not depend on the order of the arguments.
pub fn intersects<C>(a: Vec<IndexValue>, b: &[IndexValue], cmp: &C) -> bool
where
	C: SpatialCompare + ?Sized,
{
	if a.is_empty() || b.is_empty() {
		return false;
	}
	let pairs = a.len().saturating_mul(b.len());
	if pairs <= *EXHAUSTIVE_INTERSECTS_THRESHOLD {
		trace!(target: TARGET, pairs, "Comparing every pair of index values");
		brute_intersects(&a, b, cmp)
	} else {
		trace!(target: TARGET, pairs, "Scanning sorted index values");
		sorted_intersects(a.clone(), b, cmp) || sorted_intersects(b.to_vec(), &a, cmp)
	}
}

/// Compares every value of `b` against every value of `a`.
pub fn brute_intersects<C>(a: &[IndexValue], b: &[IndexValue], cmp: &C) -> bool
where
	C: SpatialCompare + ?Sized,
{
	b.iter().any(|&y| a.iter().any(|&x| cmp.cmp_spatial(y, x) != 0))
}

/// Sorts `a` and binary-searches it for every value of `b`.
///
/// A raw match counts as an intersection straight away. Otherwise the values
/// left of, at, and right of the insertion point are passed to the comparator,
/// which catches an ancestor or descendant sorting next to the searched value.
/// Overlapping values further away than one slot are missed, so at mixed
/// resolutions this can report false where [`brute_intersects`] reports true.
pub fn sorted_intersects<C>(mut a: Vec<IndexValue>, b: &[IndexValue], cmp: &C) -> bool
where
	C: SpatialCompare + ?Sized,
{
	a.sort_unstable();
	b.iter().any(|&sid| match a.binary_search(&sid) {
		Ok(_) => true,
		Err(pos) => neighbours(&a, pos).iter().any(|&x| cmp.cmp_spatial(x, sid) != 0),
	})
}

/// The values around an insertion point, clipped to the slice.
fn neighbours(sorted: &[IndexValue], pos: usize) -> &[IndexValue] {
	let start = pos.saturating_sub(1).min(sorted.len());
	let end = pos.saturating_add(2).min(sorted.len());
	&sorted[start..end]
}
