use std::sync::LazyLock;

/// The width in bytes of a single packed value within a blob.
pub const BLOB_VALUE_WIDTH: usize = 8;

/// The largest product of the two input sizes for which `intersects` compares
/// every pair of index values instead of running the sorted scan. Set to 0 to
/// always use the sorted scan.
pub static EXHAUSTIVE_INTERSECTS_THRESHOLD: LazyLock<usize> =
	lazy_env_parse!("STARELITE_EXHAUSTIVE_INTERSECTS_THRESHOLD", usize, 64);

/// The deepest level (or polygon resolution) accepted by the conversion functions.
pub static MAX_RESOLUTION: LazyLock<u8> = lazy_env_parse!("STARELITE_MAX_RESOLUTION", u8, 27);
