//! # Starelite Core
//!
//! Functions over STARE spatial index values, for registration with a host
//! database. Index values are carried between rows as blobs of big-endian
//! 64-bit integers, and can be converted to and from a bracketed text form,
//! tested for a spatial intersection, and produced from locations and WKB
//! geometries through a pluggable spatial-indexing library.
//!
//! The host registers every name of [`fnc::SCALAR_FUNCTIONS`] and forwards
//! calls to [`fnc::run`], and creates aggregate state with [`fnc::aggregate`].
//!

#[macro_use]
extern crate tracing;

#[macro_use]
mod mac;

pub mod cnf;
pub mod ctx;
pub mod err;
pub mod fnc;
pub mod geo;
pub mod sid;
pub mod val;
