//! Concatenation and combination of datasets.
//!
//! `concat` joins datasets end to end along one dimension, aligning every other dimension by
//! coordinate. `combine_by_coords` merges the datasets read from the files of a single file group,
//! which are usually split along time.
//!
use std::cmp::Ordering;

use ndarray::{concatenate, Array1, ArrayD, Dimension, IxDyn};

use crate::{
    dataset::{Coordinate, CoordinateKey, CoordinateValues, Dataset, Variable},
    errors::{Error, Result},
};

/// Concatenate `datasets` along `dim`, in the order given.
///
/// If `dim` exists in every dataset, data are joined along it and its coordinate values are
/// appended. If it exists in none, a new leading dimension is created with a positional `i64`
/// coordinate.
///
/// Every other dimension is aligned by outer join on its coordinate: the result has each
/// coordinate value that appears in any input, in order of first appearance, and positions an
/// input doesn't have are filled with NaN. Dimensions without a coordinate must have the same
/// length in every input.
///
pub fn concat(datasets: Vec<Dataset>, dim: &str) -> Result<Dataset> {
    if datasets.is_empty() {
        return Err(Error::Concat(format!("nothing to concatenate along '{dim}'")));
    }

    let with_dim = datasets.iter().filter(|d| d.has_dim(dim)).count();
    let datasets = if with_dim == 0 {
        datasets
            .into_iter()
            .enumerate()
            .map(|(i, dataset)| {
                dataset.expand_dims(dim, CoordinateValues::I64(Array1::from_elem(1, i as i64)))
            })
            .collect::<Result<Vec<_>>>()?
    } else if with_dim == datasets.len() {
        datasets
    } else {
        return Err(Error::Concat(format!(
            "dimension '{dim}' is present in only {with_dim} of {} datasets",
            datasets.len()
        )));
    };

    check_variables(&datasets)?;
    let datasets = align(datasets, dim)?;

    let first = &datasets[0];
    let mut dims: Vec<(String, usize)> = first.dims().to_vec();
    let total: usize = datasets.iter().filter_map(|d| d.len_of(dim)).sum();
    for (name, len) in dims.iter_mut() {
        if name == dim {
            *len = total;
        }
    }

    let mut coordinates: Vec<Coordinate> = first
        .coordinates()
        .iter()
        .filter(|c| c.name != dim)
        .cloned()
        .collect();
    let parts: Vec<&CoordinateValues> = datasets
        .iter()
        .filter_map(|d| d.get_coordinate(dim))
        .map(|c| &c.values)
        .collect();
    if parts.len() == datasets.len() {
        coordinates.push(Coordinate {
            name: dim.to_string(),
            values: CoordinateValues::concat(&parts)?,
        });
    } else if !parts.is_empty() {
        return Err(Error::Concat(format!(
            "only some datasets have a '{dim}' coordinate"
        )));
    }

    let mut variables = Vec::with_capacity(first.variables().len());
    for name in first.variable_names() {
        let parts = datasets
            .iter()
            .map(|dataset| {
                let variable = dataset
                    .get_variable(name)
                    .ok_or_else(|| Error::MissingVariable(name.to_string()))?;
                let len = dataset.len_of(dim).unwrap_or(1);
                Ok(conform(variable, dim, len))
            })
            .collect::<Result<Vec<_>>>()?;
        variables.push(join_variable(parts, dim)?);
    }

    Dataset::from_parts(dims, coordinates, variables)
}

/// Merge the datasets read from the files of one file group.
///
/// A single dataset is returned unchanged. Otherwise the inputs should differ in the coordinate of
/// exactly one dimension; they are sorted by that coordinate's first value and concatenated along
/// it, and the joined coordinate must come out strictly increasing (or strictly decreasing, if the
/// inputs run that way). If no coordinate differs, the inputs hold different variables on the same grid and their
/// variables are merged.
///
pub fn combine_by_coords(mut datasets: Vec<Dataset>) -> Result<Dataset> {
    if datasets.len() < 2 {
        return datasets
            .pop()
            .ok_or_else(|| Error::Concat(String::from("nothing to combine")));
    }

    let first = &datasets[0];
    let differing: Vec<String> = first
        .dims()
        .iter()
        .map(|(dim, _)| dim.clone())
        .filter(|dim| match first.get_coordinate(dim) {
            Some(coordinate) => datasets[1..].iter().any(|other| {
                other.get_coordinate(dim).map(|c| &c.values) != Some(&coordinate.values)
            }),
            None => false,
        })
        .collect();

    match differing.as_slice() {
        [] => merge(datasets),
        [dim] => {
            let mut keyed = datasets
                .into_iter()
                .map(|dataset| {
                    let key = dataset
                        .get_coordinate(dim)
                        .and_then(|c| c.values.keys().into_iter().next())
                        .ok_or_else(|| Error::MissingCoordinate(dim.clone()))?;
                    Ok((key, dataset))
                })
                .collect::<Result<Vec<(CoordinateKey, Dataset)>>>()?;
            keyed.sort_by(|a, b| a.0.cmp(&b.0));
            if keyed
                .iter()
                .filter_map(|(_, dataset)| dataset.get_coordinate(dim))
                .any(|c| is_monotonic(&c.values.keys(), Ordering::Greater))
            {
                keyed.reverse();
            }

            let combined = concat(keyed.into_iter().map(|(_, dataset)| dataset).collect(), dim)?;
            let keys = combined
                .get_coordinate(dim)
                .map(|c| c.values.keys())
                .unwrap_or_default();
            if !is_monotonic(&keys, Ordering::Less) && !is_monotonic(&keys, Ordering::Greater) {
                return Err(Error::Concat(format!(
                    "'{dim}' values of the combined datasets overlap or repeat"
                )));
            }

            Ok(combined)
        }
        dims => Err(Error::Concat(format!(
            "can't tell how to combine datasets, they differ along {}",
            dims.join(", ")
        ))),
    }
}

/// Whether each key is strictly ordered before the next, by `order`. Needs at least two keys.
///
fn is_monotonic(keys: &[CoordinateKey], order: Ordering) -> bool {
    keys.len() > 1 && keys.windows(2).all(|pair| pair[0].cmp(&pair[1]) == order)
}

fn merge(datasets: Vec<Dataset>) -> Result<Dataset> {
    let mut merged = Dataset::new();
    for dataset in datasets {
        for coordinate in dataset.coordinates() {
            merged.add_coordinate(coordinate.clone())?;
        }
        for variable in dataset.variables() {
            if merged.get_variable(&variable.name).is_some() {
                return Err(Error::Concat(format!(
                    "variable '{}' appears in more than one file",
                    variable.name
                )));
            }
            merged.add_variable(variable.clone())?;
        }
    }

    Ok(merged)
}

fn check_variables(datasets: &[Dataset]) -> Result<()> {
    let first = &datasets[0];
    let mut expected = first.variable_names();
    expected.sort_unstable();

    for dataset in &datasets[1..] {
        let mut names = dataset.variable_names();
        names.sort_unstable();
        if names != expected {
            return Err(Error::Concat(format!(
                "variables differ: [{}] vs [{}]",
                expected.join(", "),
                names.join(", ")
            )));
        }
    }

    Ok(())
}

/// Reindex every dataset so all dimensions other than `dim` line up.
///
fn align(datasets: Vec<Dataset>, dim: &str) -> Result<Vec<Dataset>> {
    let mut others: Vec<String> = vec![];
    for dataset in &datasets {
        for (name, _) in dataset.dims() {
            if name != dim && !others.contains(name) {
                others.push(name.clone());
            }
        }
    }

    let mut datasets = datasets;
    for other in &others {
        if let Some(missing) = datasets.iter().position(|d| !d.has_dim(other)) {
            return Err(Error::Concat(format!(
                "dimension '{other}' is missing from dataset {missing}"
            )));
        }

        let parts: Vec<&CoordinateValues> = datasets
            .iter()
            .filter_map(|d| d.get_coordinate(other))
            .map(|c| &c.values)
            .collect();

        if parts.is_empty() {
            let lens: Vec<usize> = datasets.iter().filter_map(|d| d.len_of(other)).collect();
            if lens.iter().any(|len| *len != lens[0]) {
                return Err(Error::Concat(format!(
                    "dimension '{other}' has no coordinate and differing lengths {lens:?}"
                )));
            }
            continue;
        }
        if parts.len() != datasets.len() {
            return Err(Error::Concat(format!(
                "only some datasets have a '{other}' coordinate"
            )));
        }
        if parts.iter().all(|part| *part == parts[0]) {
            continue;
        }

        let (joined, mappings) = CoordinateValues::union(&parts)?;
        datasets = datasets
            .iter()
            .zip(mappings)
            .map(|(dataset, mapping)| dataset.reindex(other, &mapping, Some(joined.clone())))
            .collect::<Result<Vec<_>>>()?;
    }

    Ok(datasets)
}

/// Give `variable` the dimension `dim` (repeating it `len` times) if it lacks it.
///
fn conform(variable: &Variable, dim: &str, len: usize) -> Variable {
    if variable.axis_of(dim).is_some() {
        return variable.clone();
    }

    let mut shape = vec![len];
    shape.extend_from_slice(variable.data.shape());
    let data = ArrayD::from_shape_fn(IxDyn(&shape), |index| {
        variable.data[&index.slice()[1..]]
    });

    let mut dims = vec![dim.to_string()];
    dims.extend(variable.dims.iter().cloned());

    Variable {
        name: variable.name.clone(),
        dims,
        data,
    }
}

/// Join the pieces of one variable along `dim`, in the axis order of the first piece.
///
fn join_variable(parts: Vec<Variable>, dim: &str) -> Result<Variable> {
    let first = &parts[0];
    let axis = first
        .axis_of(dim)
        .ok_or_else(|| Error::Concat(format!("variable '{}' lacks '{dim}'", first.name)))?;

    let mut arrays = Vec::with_capacity(parts.len());
    for part in &parts {
        let permutation = first
            .dims
            .iter()
            .map(|d| {
                part.dims.iter().position(|p| p == d).ok_or_else(|| {
                    Error::Concat(format!(
                        "variable '{}' has dimensions {:?} in one dataset and {:?} in another",
                        first.name, first.dims, part.dims
                    ))
                })
            })
            .collect::<Result<Vec<usize>>>()?;
        if part.dims.len() != first.dims.len() {
            return Err(Error::Concat(format!(
                "variable '{}' has dimensions {:?} in one dataset and {:?} in another",
                first.name, first.dims, part.dims
            )));
        }
        arrays.push(part.data.view().permuted_axes(permutation.as_slice()));
    }

    let data = concatenate(axis, &arrays)
        .map_err(|err| Error::ShapeMismatch(format!("variable '{}': {err}", first.name)))?;

    Ok(Variable {
        name: first.name.clone(),
        dims: first.dims.clone(),
        data,
    })
}

#[cfg(test)]
mod tests {
    use ndarray::{arr1, Array2, Array3};

    use super::*;

    fn grid(name: &str, times: &[i64], lats: &[f64], value: f32) -> Result<Dataset> {
        let mut dataset = Dataset::new();
        dataset.add_coordinate(Coordinate::i64("time", arr1(times)))?;
        dataset.add_coordinate(Coordinate::f64("latitude", arr1(lats)))?;
        let data = Array2::from_shape_fn((times.len(), lats.len()), |(t, y)| {
            value + (times[t] * 10) as f32 + lats[y] as f32
        });
        dataset.add_variable(Variable::new(name, &["time", "latitude"], data.into_dyn()))?;

        Ok(dataset)
    }

    fn tagged(dataset: Dataset, dim: &str, label: &str) -> Result<Dataset> {
        dataset.expand_dims(dim, CoordinateValues::label(label))
    }

    #[test]
    fn test_concat_existing_dim() -> Result<()> {
        let a = tagged(grid("t2m", &[0, 1], &[50.0, 51.0], 0.0)?, "climate", "pi")?;
        let b = tagged(grid("t2m", &[0, 1], &[50.0, 51.0], 1000.0)?, "climate", "curr")?;
        let joined = concat(vec![a, b], "climate")?;

        assert_eq!(joined.len_of("climate"), Some(2));
        assert_eq!(
            joined.get_coordinate("climate").unwrap().values,
            CoordinateValues::labels(&["pi", "curr"])
        );
        let t2m = joined.get_variable("t2m").unwrap();
        assert_eq!(t2m.dims, vec!["climate", "time", "latitude"]);
        assert_eq!(t2m.data[[0, 1, 1]], 61.0);
        assert_eq!(t2m.data[[1, 1, 1]], 1061.0);

        Ok(())
    }

    #[test]
    fn test_concat_new_dim() -> Result<()> {
        let a = grid("msl", &[0], &[50.0], 1.0)?;
        let b = grid("msl", &[0], &[50.0], 2.0)?;
        let c = grid("msl", &[0], &[50.0], 3.0)?;
        let joined = concat(vec![a, b, c], "number")?;

        assert_eq!(joined.dims()[0], (String::from("number"), 3));
        assert_eq!(
            joined.get_coordinate("number").unwrap().values,
            CoordinateValues::I64(arr1(&[0, 1, 2]))
        );
        let msl = joined.get_variable("msl").unwrap();
        assert_eq!(msl.data.shape(), &[3, 1, 1]);
        assert_eq!(msl.data[[2, 0, 0]], 53.0);

        Ok(())
    }

    #[test]
    fn test_concat_aligns_by_outer_join() -> Result<()> {
        let pi = concat(
            vec![
                tagged(grid("t2m", &[0], &[50.0], 1.0)?, "perturbation", "t+q")?,
                tagged(grid("t2m", &[0], &[50.0], 2.0)?, "perturbation", "progn_vars")?,
            ],
            "perturbation",
        )?;
        let curr = tagged(grid("t2m", &[0], &[50.0], 3.0)?, "perturbation", "none")?;

        let joined = concat(
            vec![tagged(pi, "climate", "pi")?, tagged(curr, "climate", "curr")?],
            "climate",
        )?;

        assert_eq!(
            joined.get_coordinate("perturbation").unwrap().values,
            CoordinateValues::labels(&["t+q", "progn_vars", "none"])
        );
        let t2m = joined.get_variable("t2m").unwrap();
        assert_eq!(t2m.dims, vec!["climate", "perturbation", "time", "latitude"]);
        assert_eq!(t2m.data.shape(), &[2, 3, 1, 1]);
        assert_eq!(t2m.data[[0, 0, 0, 0]], 51.0);
        assert_eq!(t2m.data[[0, 1, 0, 0]], 52.0);
        assert!(t2m.data[[0, 2, 0, 0]].is_nan());
        assert!(t2m.data[[1, 0, 0, 0]].is_nan());
        assert!(t2m.data[[1, 1, 0, 0]].is_nan());
        assert_eq!(t2m.data[[1, 2, 0, 0]], 53.0);

        Ok(())
    }

    #[test]
    fn test_concat_aligns_numeric_coordinates() -> Result<()> {
        let a = tagged(grid("t2m", &[0], &[50.0, 51.0], 0.0)?, "number", "cf")?;
        let b = tagged(grid("t2m", &[0], &[51.0, 52.0], 0.0)?, "number", "pf")?;
        let joined = concat(vec![a, b], "number")?;

        assert_eq!(
            joined.get_coordinate("latitude").unwrap().values,
            CoordinateValues::F64(arr1(&[50.0, 51.0, 52.0]))
        );
        let t2m = joined.get_variable("t2m").unwrap();
        assert_eq!(t2m.data[[0, 0, 1]], 51.0);
        assert!(t2m.data[[0, 0, 2]].is_nan());
        assert!(t2m.data[[1, 0, 0]].is_nan());
        assert_eq!(t2m.data[[1, 0, 2]], 52.0);

        Ok(())
    }

    #[test]
    fn test_concat_permutes_axes() -> Result<()> {
        let a = tagged(grid("t2m", &[0, 1], &[50.0], 0.0)?, "number", "cf")?;

        let mut b = Dataset::new();
        b.add_coordinate(Coordinate::labels("number", &["pf"]))?;
        b.add_coordinate(Coordinate::f64("latitude", arr1(&[50.0])))?;
        b.add_coordinate(Coordinate::i64("time", arr1(&[0, 1])))?;
        let data = Array3::from_shape_fn((1, 2, 1), |(_, t, _)| 100.0 + t as f32);
        b.add_variable(Variable::new(
            "t2m",
            &["latitude", "time", "number"],
            data.into_dyn(),
        ))?;

        let joined = concat(vec![a, b], "number")?;
        let t2m = joined.get_variable("t2m").unwrap();
        assert_eq!(t2m.dims, vec!["number", "time", "latitude"]);
        assert_eq!(t2m.data[[1, 0, 0]], 100.0);
        assert_eq!(t2m.data[[1, 1, 0]], 101.0);

        Ok(())
    }

    #[test]
    fn test_concat_empty() {
        assert!(matches!(concat(vec![], "climate"), Err(Error::Concat(_))));
    }

    #[test]
    fn test_concat_mixed_presence() -> Result<()> {
        let a = tagged(grid("t2m", &[0], &[50.0], 0.0)?, "climate", "pi")?;
        let b = grid("t2m", &[0], &[50.0], 0.0)?;
        assert!(matches!(concat(vec![a, b], "climate"), Err(Error::Concat(_))));

        Ok(())
    }

    #[test]
    fn test_concat_different_variables() -> Result<()> {
        let a = grid("t2m", &[0], &[50.0], 0.0)?;
        let b = grid("msl", &[0], &[50.0], 0.0)?;
        assert!(matches!(concat(vec![a, b], "number"), Err(Error::Concat(_))));

        Ok(())
    }

    #[test]
    fn test_concat_mismatched_coordinate_kinds() -> Result<()> {
        let a = tagged(grid("t2m", &[0], &[50.0], 0.0)?, "climate", "pi")?;
        let b = grid("t2m", &[0], &[50.0], 0.0)?
            .expand_dims("climate", CoordinateValues::I64(arr1(&[1])))?;
        assert!(matches!(concat(vec![a, b], "climate"), Err(Error::Concat(_))));

        Ok(())
    }

    #[test]
    fn test_combine_by_time() -> Result<()> {
        let late = grid("t2m", &[2, 3], &[50.0], 0.0)?;
        let early = grid("t2m", &[0, 1], &[50.0], 0.0)?;
        let combined = combine_by_coords(vec![late, early])?;

        assert_eq!(
            combined.get_coordinate("time").unwrap().values,
            CoordinateValues::I64(arr1(&[0, 1, 2, 3]))
        );
        let t2m = combined.get_variable("t2m").unwrap();
        assert_eq!(t2m.dims, vec!["time", "latitude"]);
        assert_eq!(t2m.data[[0, 0]], 50.0);
        assert_eq!(t2m.data[[3, 0]], 80.0);

        Ok(())
    }

    #[test]
    fn test_combine_descending() -> Result<()> {
        let south = grid("t2m", &[0], &[46.0, 45.0], 0.0)?;
        let north = grid("t2m", &[0], &[48.0, 47.0], 0.0)?;
        let combined = combine_by_coords(vec![south, north])?;

        assert_eq!(
            combined.get_coordinate("latitude").unwrap().values,
            CoordinateValues::F64(arr1(&[48.0, 47.0, 46.0, 45.0]))
        );

        Ok(())
    }

    #[test]
    fn test_combine_interleaved() -> Result<()> {
        let odd = grid("t2m", &[1, 3], &[50.0], 0.0)?;
        let even = grid("t2m", &[0, 2], &[50.0], 0.0)?;
        assert!(matches!(combine_by_coords(vec![odd, even]), Err(Error::Concat(_))));

        Ok(())
    }

    #[test]
    fn test_combine_by_variable() -> Result<()> {
        let t2m = grid("t2m", &[0, 1], &[50.0], 0.0)?;
        let msl = grid("msl", &[0, 1], &[50.0], 1.0)?;
        let combined = combine_by_coords(vec![t2m, msl])?;

        assert_eq!(combined.variable_names(), vec!["t2m", "msl"]);
        assert_eq!(combined.len_of("time"), Some(2));

        Ok(())
    }

    #[test]
    fn test_combine_duplicate_variable() -> Result<()> {
        let a = grid("t2m", &[0], &[50.0], 0.0)?;
        let b = grid("t2m", &[0], &[50.0], 1.0)?;
        assert!(matches!(combine_by_coords(vec![a, b]), Err(Error::Concat(_))));

        Ok(())
    }

    #[test]
    fn test_combine_ambiguous() -> Result<()> {
        let a = grid("t2m", &[0], &[50.0], 0.0)?;
        let b = grid("t2m", &[1], &[51.0], 0.0)?;
        assert!(matches!(combine_by_coords(vec![a, b]), Err(Error::Concat(_))));

        Ok(())
    }

    #[test]
    fn test_combine_single() -> Result<()> {
        let a = grid("t2m", &[0], &[50.0], 0.0)?;
        assert_eq!(combine_by_coords(vec![a.clone()])?, a);
        assert!(combine_by_coords(vec![]).is_err());

        Ok(())
    }
}
