//! Tests for the functions registered with the host database

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use geo_types::Coord;
use starelite_core::ctx::Context;
use starelite_core::err::Error;
use starelite_core::fnc::{self, aggregate::fold};
use starelite_core::sid::{
	IndexValue, SpatialCompare, SpatialIndex, SpatialIntervals, decode_index_blob, encode_float_blob,
	encode_index_blob,
};
use starelite_core::val::Value;
use test_log::test;

/// Gives every whole degree cell its own value, with the level in the low
/// five bits. Values only overlap when equal.
struct Grid;

impl Grid {
	fn value(lat: f64, lon: f64, level: u8) -> IndexValue {
		let cell = (lat + 90.0).floor() as i64 * 1000 + (lon + 180.0).floor() as i64;
		(cell << 5) | level as i64
	}
}

impl SpatialCompare for Grid {
	fn cmp_spatial(&self, a: IndexValue, b: IndexValue) -> i32 {
		(a == b) as i32
	}
}

impl SpatialIndex for Grid {
	fn value_from_lat_lon(&self, lat: f64, lon: f64, level: u8) -> Option<IndexValue> {
		if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
			return None;
		}
		Some(Self::value(lat, lon, level))
	}

	fn non_convex_hull(&self, vertices: &[Coord<f64>], resolution: u8) -> SpatialIntervals {
		SpatialIntervals(
			vertices.iter().filter_map(|c| self.value_from_lat_lon(c.y, c.x, resolution)).collect(),
		)
	}

	fn expand_intervals(&self, intervals: SpatialIntervals) -> Vec<IndexValue> {
		intervals.0
	}
}

fn ctx() -> Context {
	Context::new(Arc::new(Grid))
}

fn run(name: &str, args: Vec<Value>) -> Value {
	fnc::run(&ctx(), name, args).unwrap()
}

fn blob(values: &[IndexValue]) -> Value {
	encode_index_blob(values).into()
}

fn values(v: Value) -> Vec<IndexValue> {
	match v {
		Value::Bytes(b) => decode_index_blob(&b).unwrap(),
		v => panic!("expected a blob, found {v}"),
	}
}

mod wkb {
	fn header(kind: u32) -> Vec<u8> {
		let mut out = vec![0];
		out.extend(kind.to_be_bytes());
		out
	}

	pub fn point(x: f64, y: f64) -> Vec<u8> {
		let mut out = header(1);
		out.extend(x.to_be_bytes());
		out.extend(y.to_be_bytes());
		out
	}

	pub fn polygon(ring: &[(f64, f64)]) -> Vec<u8> {
		let mut out = header(3);
		out.extend(1u32.to_be_bytes());
		out.extend((ring.len() as u32).to_be_bytes());
		for (x, y) in ring {
			out.extend(x.to_be_bytes());
			out.extend(y.to_be_bytes());
		}
		out
	}

	pub fn multi(kind: u32, parts: &[Vec<u8>]) -> Vec<u8> {
		let mut out = header(kind);
		out.extend((parts.len() as u32).to_be_bytes());
		for part in parts {
			out.extend(part);
		}
		out
	}
}

#[test]
fn lonlat_to_index_value() {
	let expected = Value::Int(Grid::value(51.5, -0.1, 10));
	assert_eq!(run("stare_from_lonlat", vec![(-0.1).into(), 51.5.into(), Value::Int(10)]), expected);
	let expected = Value::Int(Grid::value(51.0, -1.0, 0));
	assert_eq!(run("stare_from_lonlat", vec![Value::Int(-1), Value::Int(51), Value::Int(0)]), expected);
}

#[test]
fn lonlat_bad_input_is_null() {
	// text coordinate
	assert!(run("stare_from_lonlat", vec!["1.0".into(), 2.0.into(), Value::Int(10)]).is_null());
	// float level
	assert!(run("stare_from_lonlat", vec![1.0.into(), 2.0.into(), 10.0.into()]).is_null());
	// levels out of range
	assert!(run("stare_from_lonlat", vec![1.0.into(), 2.0.into(), Value::Int(28)]).is_null());
	assert!(run("stare_from_lonlat", vec![1.0.into(), 2.0.into(), Value::Int(-1)]).is_null());
	// latitude the index rejects
	assert!(run("stare_from_lonlat", vec![1.0.into(), 95.0.into(), Value::Int(10)]).is_null());
	assert!(run("stare_from_lonlat", vec![f64::NAN.into(), 2.0.into(), Value::Int(10)]).is_null());
}

#[test]
fn wrong_argument_count_is_an_error() {
	let e = fnc::run(&ctx(), "stare_from_lonlat", vec![1.0.into(), 2.0.into()]).unwrap_err();
	assert!(matches!(e.downcast_ref::<Error>(), Some(Error::InvalidArguments { .. })));
	let e = fnc::run(&ctx(), "decode_stareblob", vec![]).unwrap_err();
	assert_eq!(e.to_string(), "Incorrect arguments for function decode_stareblob(). Expected 1 argument");
}

#[test]
fn point_to_index_value() {
	let point = wkb::point(12.5, -33.25);
	let res = run("stare_from_point", vec![point.into(), Value::Int(7)]);
	assert_eq!(res, Value::Int(Grid::value(-33.25, 12.5, 7)));
}

#[test]
fn point_bad_input_is_null() {
	let polygon = wkb::polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
	assert!(run("stare_from_point", vec![polygon.into(), Value::Int(7)]).is_null());
	assert!(run("stare_from_point", vec![vec![0u8, 1, 2].into(), Value::Int(7)]).is_null());
	assert!(run("stare_from_point", vec!["POINT(1 2)".into(), Value::Int(7)]).is_null());
	assert!(run("stare_from_point", vec![wkb::point(1.0, 2.0).into(), Value::Int(99)]).is_null());
}

#[test]
fn polygon_to_index_values() {
	let ring = [(0.5, 0.5), (3.5, 0.5), (3.5, 2.5), (0.5, 0.5)];
	let res = run("stare_from_polygon", vec![wkb::polygon(&ring).into(), Value::Int(5)]);
	let expected: Vec<IndexValue> = ring.iter().map(|(x, y)| Grid::value(*y, *x, 5)).collect();
	assert_eq!(values(res), expected);
}

#[test]
fn multipolygon_values_are_merged() {
	let a = wkb::polygon(&[(2.5, 2.5), (0.5, 0.5), (1.5, 0.5), (2.5, 2.5)]);
	let b = wkb::polygon(&[(0.5, 0.5), (9.5, 9.5), (0.5, 0.5)]);
	let res = run("stare_from_polygon", vec![wkb::multi(6, &[a, b]).into(), Value::Int(5)]);
	let mut expected: Vec<IndexValue> =
		[(0.5, 0.5), (1.5, 0.5), (2.5, 2.5), (9.5, 9.5)].iter().map(|(x, y)| Grid::value(*y, *x, 5)).collect();
	expected.sort_unstable();
	assert_eq!(values(res), expected);
}

#[test]
fn polygon_bad_input_is_null() {
	assert!(run("stare_from_polygon", vec![wkb::point(1.0, 1.0).into(), Value::Int(5)]).is_null());
	assert!(run("stare_from_polygon", vec![blob_of_nothing(), Value::Int(5)]).is_null());
	assert!(run("stare_from_polygon", vec![Value::Null, Value::Int(5)]).is_null());
}

#[test]
fn index_blob_text_round_trip() {
	let blob = run("encode_stareblob", vec!["[100, 200, 300]".into()]);
	match &blob {
		Value::Bytes(b) => assert_eq!(b.len(), 24),
		v => panic!("expected a blob, found {v}"),
	}
	assert_eq!(values(blob.clone()), vec![100, 200, 300]);
	assert_eq!(run("decode_stareblob", vec![blob]), Value::from("[100, 200, 300]"));
	assert_eq!(run("decode_stareblob", vec![blob_of_nothing()]), Value::from("[]"));
}

fn blob_of_nothing() -> Value {
	Value::from(Vec::<u8>::new())
}

#[test]
fn index_blob_bad_input_is_null() {
	assert!(run("decode_stareblob", vec![vec![0u8; 7].into()]).is_null());
	assert!(run("decode_stareblob", vec!["[1, 2]".into()]).is_null());
	assert!(run("encode_stareblob", vec!["[1, x]".into()]).is_null());
	assert!(run("encode_stareblob", vec![blob(&[1])]).is_null());
}

#[test]
fn float_blob_text_round_trip() {
	let blob = run("encode_float_blob", vec!["[1.5, -2.25, 3]".into()]);
	assert_eq!(run("decode_float_blob", vec![blob]), Value::from("[1.5, -2.25, 3.0]"));
	assert!(run("decode_float_blob", vec![vec![0u8; 9].into()]).is_null());
	assert!(run("encode_float_blob", vec!["[1.5, one]".into()]).is_null());
}

#[test]
fn intersects_values_and_blobs() {
	assert_eq!(run("stare_intersects", vec![Value::Int(10), Value::Int(10)]), Value::Int(1));
	assert_eq!(run("stare_intersects", vec![Value::Int(10), Value::Int(20)]), Value::Int(0));
	assert_eq!(run("stare_intersects", vec![Value::Int(5), blob(&[9, 1, 5])]), Value::Int(1));
	assert_eq!(run("stare_intersects", vec![blob(&[9, 1, 5]), blob(&[2, 4])]), Value::Int(0));
	assert_eq!(run("stare_intersects", vec![blob(&[]), blob(&[2, 4])]), Value::Int(0));
	assert_eq!(run("stare_brute_intersects", vec![blob(&[9, 1, 5]), Value::Int(1)]), Value::Int(1));
	assert_eq!(run("stare_brute_intersects", vec![blob(&[9, 1, 5]), Value::Int(2)]), Value::Int(0));
}

#[test]
fn intersects_is_symmetric() {
	let a: Vec<IndexValue> = (0..40).map(|i| i * 3).collect();
	let b: Vec<IndexValue> = (0..40).map(|i| i * 5 + 1).collect();
	let ab = run("stare_intersects", vec![blob(&a), blob(&b)]);
	let ba = run("stare_intersects", vec![blob(&b), blob(&a)]);
	assert_eq!(ab, ba);
	assert_eq!(ab, Value::Int(1));
	assert_eq!(run("stare_intersects", vec![blob(&a), blob(&a)]), Value::Int(1));
}

#[test]
fn intersects_bad_input_is_null() {
	assert!(run("stare_intersects", vec![vec![0u8; 4].into(), Value::Int(1)]).is_null());
	assert!(run("stare_intersects", vec![1.5.into(), Value::Int(1)]).is_null());
	assert!(run("stare_brute_intersects", vec![Value::Int(1), "1".into()]).is_null());
}

#[test]
fn sum_scalar() {
	let blob: Value = encode_float_blob(&[1.5, 2.5, 3.0]).into();
	assert_eq!(run("sum_blob_all_element_array", vec![blob.clone()]), Value::from("7.000000"));
	assert_eq!(run("sum_blob_all_element_array_double", vec![blob]), Value::Float(7.0));
	assert!(run("sum_blob_all_element_array", vec![Value::Int(1)]).is_null());
	assert!(run("sum_blob_all_element_array_double", vec![vec![0u8; 3].into()]).is_null());
}

#[test]
fn sum_aggregate() {
	let rows = || {
		vec![
			vec![Value::from(encode_float_blob(&[1.5, 2.5]))],
			vec![Value::Null],
			vec![Value::from(encode_float_blob(&[3.0]))],
		]
	};
	let mut acc = fnc::aggregate("sum_blob_array").unwrap();
	assert_eq!(fold(acc.as_mut(), rows()).unwrap(), Value::from("7.000000"));
	let mut acc = fnc::aggregate("sum_blob_array_double").unwrap();
	assert_eq!(fold(acc.as_mut(), rows()).unwrap(), Value::Float(7.0));
}

#[test]
fn unknown_functions() {
	let e = fnc::run(&ctx(), "stare_union", vec![]).unwrap_err();
	assert!(matches!(e.downcast_ref::<Error>(), Some(Error::InvalidFunction { .. })));
	assert!(fnc::aggregate("sum_blob_all_element_array").is_err());
}
