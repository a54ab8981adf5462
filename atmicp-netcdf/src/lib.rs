//! A concrete implementation of the `atmicp::Loader` interface for NetCDF files.
//!
//! Each file of a file group is read into an `atmicp::Dataset`, passed through the preprocessing
//! hook, and the per-file datasets are merged with `atmicp::combine_by_coords`.
//!
use std::path::Path;

use log::debug;
use ndarray::{Array1, ArrayD, IxDyn};
use netcdf::AttributeValue;

use atmicp::{
    combine_by_coords, Coordinate, CoordinateValues, Dataset, Error, FileGroup, Loader, Preprocess,
    Result, Variable,
};

#[derive(Clone, Copy, Debug, Default)]
pub struct NetcdfLoader;

impl NetcdfLoader {
    pub fn new() -> Self {
        Self
    }

    /// Read one file.
    ///
    /// One-dimensional variables named after their dimension become `f64` coordinates. Every
    /// other variable with at least one dimension is read as `f32`, with fill values mapped to NaN
    /// and `scale_factor`/`add_offset` applied.
    ///
    pub fn read(&self, path: &Path) -> Result<Dataset> {
        let target = path.display().to_string();
        let fail = |err: netcdf::Error| Error::load(target.clone(), err.to_string());

        let file = netcdf::open(path).map_err(fail)?;
        let mut dataset = Dataset::new();
        for var in file.variables() {
            let name = var.name();
            let dims: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
            let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();

            if dims.len() == 1 && dims[0] == name {
                let values = var.get_values::<f64, _>(..).map_err(fail)?;
                dataset.add_coordinate(Coordinate {
                    name,
                    values: CoordinateValues::F64(Array1::from(values)),
                })?;
            } else if !dims.is_empty() {
                let raw = var.get_values::<f32, _>(..).map_err(fail)?;
                let packing = Packing::of(&var).map_err(fail)?;
                let data = ArrayD::from_shape_vec(IxDyn(&shape), raw)
                    .map_err(|err| Error::load(target.clone(), err))?
                    .mapv_into(|value| packing.unpack(value));
                dataset.add_variable(Variable::new(name, dims.as_slice(), data))?;
            }
        }

        debug!("read {target}: {dataset}");

        Ok(dataset)
    }
}

impl Loader for NetcdfLoader {
    fn load(&self, group: &FileGroup, preprocess: &dyn Preprocess) -> Result<Dataset> {
        let datasets = group
            .paths()?
            .iter()
            .map(|path| preprocess.preprocess(self.read(path)?))
            .collect::<Result<Vec<_>>>()?;

        combine_by_coords(datasets)
    }
}

/// CF conventions for packed and missing values.
///
struct Packing {
    scale_factor: f32,
    add_offset: f32,
    fill_values: Vec<f32>,
}

impl Packing {
    fn of(var: &netcdf::Variable) -> std::result::Result<Self, netcdf::Error> {
        let scale_factor = number(var, "scale_factor")?.unwrap_or(1.0);
        let add_offset = number(var, "add_offset")?.unwrap_or(0.0);
        let mut fill_values = vec![];
        for name in ["_FillValue", "missing_value"] {
            if let Some(value) = number(var, name)? {
                fill_values.push(value as f32);
            }
        }

        Ok(Self {
            scale_factor: scale_factor as f32,
            add_offset: add_offset as f32,
            fill_values,
        })
    }

    fn unpack(&self, value: f32) -> f32 {
        if value.is_nan() || self.fill_values.contains(&value) {
            f32::NAN
        } else {
            value * self.scale_factor + self.add_offset
        }
    }
}

fn number(var: &netcdf::Variable, name: &str) -> std::result::Result<Option<f64>, netcdf::Error> {
    let value = match var.attribute(name) {
        Some(attribute) => attribute.value()?,
        None => return Ok(None),
    };

    Ok(match value {
        AttributeValue::Double(value) => Some(value),
        AttributeValue::Float(value) => Some(value as f64),
        AttributeValue::Int(value) => Some(value as f64),
        AttributeValue::Short(value) => Some(value as f64),
        AttributeValue::Schar(value) => Some(value as f64),
        AttributeValue::Uchar(value) => Some(value as f64),
        _ => None,
    })
}
