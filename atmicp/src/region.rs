use crate::{
    dataset::Dataset,
    errors::{Error, Result},
    helpers::rearrange,
};

/// US Pacific Northwest.
pub const PNW: Region = Region {
    lon_min: -123.0,
    lon_max: -119.0,
    lat_min: 45.0,
    lat_max: 52.0,
};

/// North American west coast.
pub const WEST_COAST: Region = Region {
    lon_min: -150.0,
    lon_max: -100.0,
    lat_min: 30.0,
    lat_max: 70.0,
};

/// A longitude/latitude box, in degrees. Bounds are inclusive.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl Region {
    pub fn new(lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64) -> Self {
        let (lon_min, lon_max) = rearrange(lon_min, lon_max);
        let (lat_min, lat_max) = rearrange(lat_min, lat_max);
        Self {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        }
    }

    /// Region from `[lon min, lon max, lat min, lat max]`.
    ///
    pub fn from_bounds(bounds: [f64; 4]) -> Self {
        let [lon_min, lon_max, lat_min, lat_max] = bounds;
        Self::new(lon_min, lon_max, lat_min, lat_max)
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.lon_min <= lon && lon <= self.lon_max && self.lat_min <= lat && lat <= self.lat_max
    }
}

impl Dataset {
    /// Keep the grid points inside `region`.
    ///
    /// Uses the `longitude` and `latitude` coordinates, which must exist and be floating point.
    /// Longitudes in 0..360 are compared as -180..180.
    ///
    pub fn select_region(&self, region: &Region) -> Result<Self> {
        let longitudes = self.positions("longitude", |lon| {
            let lon = if lon > 180.0 { lon - 360.0 } else { lon };
            region.lon_min <= lon && lon <= region.lon_max
        })?;
        let latitudes = self.positions("latitude", |lat| {
            region.lat_min <= lat && lat <= region.lat_max
        })?;

        self.isel("longitude", &longitudes)?
            .isel("latitude", &latitudes)
    }

    fn positions(&self, name: &str, keep: impl Fn(f64) -> bool) -> Result<Vec<usize>> {
        let values = self
            .get_coordinate(name)
            .and_then(|coordinate| coordinate.values.as_f64())
            .ok_or_else(|| Error::MissingCoordinate(name.to_string()))?;

        Ok(values
            .iter()
            .enumerate()
            .filter(|(_, value)| keep(**value))
            .map(|(i, _)| i)
            .collect())
    }
}
