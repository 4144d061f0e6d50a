//! Conversion from locations and WKB geometries to spatial index values.
//!
//! Geometries are read with the `wkb` crate and walked through the
//! `geo-traits` accessors, so no intermediate geometry is allocated beyond
//! the extracted coordinates. Coordinates use `x` for the longitude and `y`
//! for the latitude, both in degrees.

use anyhow::{Result, bail};
use geo_traits::{
	CoordTrait, GeometryCollectionTrait, GeometryTrait, GeometryType, LineStringTrait,
	MultiPointTrait, MultiPolygonTrait, PointTrait, PolygonTrait,
};
use geo_types::Coord;
use wkb::reader::{Wkb, read_wkb};

use crate::cnf::MAX_RESOLUTION;
use crate::err::Error;
use crate::sid::{IndexValue, SpatialIndex};

const TARGET: &str = "starelite::core::geo";

/// Checks a level or resolution argument against the configured maximum.
pub fn level(value: i64) -> Result<u8> {
	match u8::try_from(value) {
		Ok(v) if v <= *MAX_RESOLUTION => Ok(v),
		_ => bail!(Error::MalformedInput(format!(
			"level {value} is outside the range 0 to {}",
			*MAX_RESOLUTION
		))),
	}
}

fn read(blob: &[u8]) -> Result<Wkb<'_>> {
	read_wkb(blob)
		.map_err(|e| anyhow::Error::new(Error::MalformedInput(format!("invalid WKB geometry: {e}"))))
}

fn coord(c: &impl CoordTrait<T = f64>) -> Coord<f64> {
	Coord {
		x: c.x(),
		y: c.y(),
	}
}

fn first_coord<G: GeometryTrait<T = f64>>(geom: &G) -> Option<Coord<f64>> {
	let found = match geom.as_type() {
		GeometryType::Point(p) => p.coord().map(|c| coord(&c)),
		GeometryType::MultiPoint(mp) => mp.points().find_map(|p| p.coord().map(|c| coord(&c))),
		GeometryType::GeometryCollection(gc) => gc.geometries().find_map(|g| first_coord(&g)),
		_ => None,
	};
	found.filter(|c| c.x.is_finite() && c.y.is_finite())
}

fn exterior(polygon: &impl PolygonTrait<T = f64>) -> Option<Vec<Coord<f64>>> {
	let ring = polygon.exterior()?;
	let coords: Vec<Coord<f64>> = ring.coords().map(|c| coord(&c)).collect();
	(!coords.is_empty()).then_some(coords)
}

fn exteriors<G: GeometryTrait<T = f64>>(geom: &G, rings: &mut Vec<Vec<Coord<f64>>>) {
	match geom.as_type() {
		GeometryType::Polygon(p) => rings.extend(exterior(p)),
		GeometryType::MultiPolygon(mp) => rings.extend(mp.polygons().filter_map(|p| exterior(&p))),
		GeometryType::GeometryCollection(gc) => {
			for g in gc.geometries() {
				exteriors(&g, rings);
			}
		}
		_ => {}
	}
}

/// Extracts the first point of a point, multipoint or collection geometry.
pub fn first_point(blob: &[u8]) -> Result<Coord<f64>> {
	let geom = read(blob)?;
	match first_coord(&geom) {
		Some(c) => Ok(c),
		None => bail!(Error::MissingGeometry("the geometry does not contain a point".to_owned())),
	}
}

/// Extracts the exterior ring of every polygon in a polygon, multipolygon or
/// collection geometry. Interior rings are ignored.
pub fn polygon_rings(blob: &[u8]) -> Result<Vec<Vec<Coord<f64>>>> {
	let geom = read(blob)?;
	let mut rings = Vec::new();
	exteriors(&geom, &mut rings);
	if rings.is_empty() {
		bail!(Error::MissingGeometry("the geometry does not contain a polygon".to_owned()));
	}
	Ok(rings)
}

/// Looks up the index value of a location.
pub fn lonlat_to_value(index: &dyn SpatialIndex, lon: f64, lat: f64, level: u8) -> Result<IndexValue> {
	if !lon.is_finite() || !lat.is_finite() {
		bail!(Error::MalformedInput(format!("location ({lon}, {lat}) is not finite")));
	}
	match index.value_from_lat_lon(lat, lon, level) {
		Some(v) => Ok(v),
		None => bail!(Error::MalformedInput(format!(
			"location ({lon}, {lat}) cannot be indexed at level {level}"
		))),
	}
}

/// Looks up the index value of the first point of a WKB geometry.
pub fn point_to_value(index: &dyn SpatialIndex, blob: &[u8], level: u8) -> Result<IndexValue> {
	let point = first_point(blob)?;
	lonlat_to_value(index, point.x, point.y, level)
}

/// Covers the polygons of a WKB geometry with index values.
///
/// A single polygon yields the expanded covering as the library returns it.
/// Several polygons are covered one by one, and the coverings merged into a
/// single sorted list without duplicates.
pub fn polygon_to_values(
	index: &dyn SpatialIndex,
	blob: &[u8],
	resolution: u8,
) -> Result<Vec<IndexValue>> {
	let rings = polygon_rings(blob)?;
	trace!(target: TARGET, polygons = rings.len(), resolution, "Covering polygons");
	let mut coverings =
		rings.iter().map(|ring| index.expand_intervals(index.non_convex_hull(ring, resolution)));
	if rings.len() == 1 {
		return Ok(coverings.next().unwrap_or_default());
	}
	let mut values: Vec<IndexValue> = coverings.flatten().collect();
	values.sort_unstable();
	values.dedup();
	Ok(values)
}
