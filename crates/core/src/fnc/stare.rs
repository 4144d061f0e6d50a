use anyhow::Result;

use super::args::Sids;
use crate::ctx::Context;
use crate::geo;
use crate::sid::{self, encode_index_blob};
use crate::val::{Bytes, Value};

pub fn from_lonlat(ctx: &Context, (lon, lat, level): (f64, f64, i64)) -> Result<Value> {
	let level = geo::level(level)?;
	Ok(geo::lonlat_to_value(ctx.index(), lon, lat, level)?.into())
}

pub fn from_point(ctx: &Context, (blob, level): (Bytes, i64)) -> Result<Value> {
	let level = geo::level(level)?;
	Ok(geo::point_to_value(ctx.index(), &blob, level)?.into())
}

pub fn from_polygon(ctx: &Context, (blob, resolution): (Bytes, i64)) -> Result<Value> {
	let resolution = geo::level(resolution)?;
	let values = geo::polygon_to_values(ctx.index(), &blob, resolution)?;
	Ok(encode_index_blob(&values).into())
}

pub fn intersects(ctx: &Context, (a, b): (Sids, Sids)) -> Result<Value> {
	let (a, b) = (a.into_values()?, b.into_values()?);
	Ok(sid::intersects(a, &b, ctx.index()).into())
}

pub fn brute_intersects(ctx: &Context, (a, b): (Sids, Sids)) -> Result<Value> {
	let (a, b) = (a.into_values()?, b.into_values()?);
	Ok(sid::brute_intersects(&a, &b, ctx.index()).into())
}
