use std::{cmp::Ordering, collections::HashMap, fmt};

use ndarray::{Array1, ArrayD, Axis, IxDyn};

use crate::{
    errors::{Error, Result},
    helpers::take_axis,
};

/// A labeled, multi-dimensional dataset.
///
/// A dataset is a set of named variables sharing named dimensions. A dimension may carry a
/// coordinate, which labels each position along it. Dimension lengths are checked as coordinates
/// and variables are added, so every variable using a dimension agrees on its length.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    dims: Vec<(String, usize)>,
    coordinates: Vec<Coordinate>,
    variables: Vec<Variable>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Coordinate {
    /// Name of the dimension this coordinate labels, e.g. "latitude"
    pub name: String,

    pub values: CoordinateValues,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CoordinateValues {
    Labels(Vec<String>),
    I64(Array1<i64>),
    F64(Array1<f64>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    /// Name of the variable, e.g. "t2m"
    pub name: String,

    /// Dimension names, one per axis of `data`
    pub dims: Vec<String>,

    pub data: ArrayD<f32>,
}

/// A single coordinate value, hashable and ordered so coordinates can be joined and sorted.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum CoordinateKey {
    Label(String),
    Int(i64),
    Float(u64),
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a dataset with dimensions registered in the given order.
    ///
    pub(crate) fn from_parts(
        dims: Vec<(String, usize)>,
        coordinates: Vec<Coordinate>,
        variables: Vec<Variable>,
    ) -> Result<Self> {
        let mut dataset = Self {
            dims,
            ..Self::default()
        };
        for coordinate in coordinates {
            dataset.add_coordinate(coordinate)?;
        }
        for variable in variables {
            dataset.add_variable(variable)?;
        }

        Ok(dataset)
    }

    pub fn add_coordinate(&mut self, coordinate: Coordinate) -> Result<()> {
        self.register_dim(&coordinate.name, coordinate.len())?;
        match self.coordinates.iter_mut().find(|c| c.name == coordinate.name) {
            Some(existing) => *existing = coordinate,
            None => self.coordinates.push(coordinate),
        }

        Ok(())
    }

    pub fn add_variable(&mut self, variable: Variable) -> Result<()> {
        if variable.dims.len() != variable.data.ndim() {
            return Err(Error::ShapeMismatch(format!(
                "variable '{}' has {} dimension names for {} axes",
                variable.name,
                variable.dims.len(),
                variable.data.ndim()
            )));
        }
        for (i, dim) in variable.dims.iter().enumerate() {
            if variable.dims[..i].contains(dim) {
                return Err(Error::ShapeMismatch(format!(
                    "variable '{}' repeats dimension '{dim}'",
                    variable.name
                )));
            }
        }
        for (dim, len) in variable.dims.iter().zip(variable.data.shape()) {
            self.register_dim(dim, *len)?;
        }

        match self.variables.iter_mut().find(|v| v.name == variable.name) {
            Some(existing) => *existing = variable,
            None => self.variables.push(variable),
        }

        Ok(())
    }

    fn register_dim(&mut self, name: &str, len: usize) -> Result<()> {
        match self.len_of(name) {
            Some(existing) if existing != len => Err(Error::ShapeMismatch(format!(
                "dimension '{name}' has length {existing}, got {len}"
            ))),
            Some(_) => Ok(()),
            None => {
                self.dims.push((name.to_string(), len));
                Ok(())
            }
        }
    }

    /// Dimension names and lengths, in the order they were first seen.
    ///
    pub fn dims(&self) -> &[(String, usize)] {
        &self.dims
    }

    pub fn len_of(&self, dim: &str) -> Option<usize> {
        self.dims
            .iter()
            .find(|(name, _)| name == dim)
            .map(|(_, len)| *len)
    }

    pub fn has_dim(&self, dim: &str) -> bool {
        self.len_of(dim).is_some()
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn get_coordinate(&self, name: &str) -> Option<&Coordinate> {
        self.coordinates.iter().find(|c| c.name == name)
    }

    pub fn get_variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn variable_names(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.name.as_str()).collect()
    }

    /// Keep only the named variables, in the order given.
    ///
    /// Dimensions and coordinates not used by any kept variable are dropped.
    ///
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let mut variables = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let variable = self
                .get_variable(name)
                .ok_or_else(|| Error::MissingVariable(name.to_string()))?;
            variables.push(variable.clone());
        }

        let dims: Vec<(String, usize)> = self
            .dims
            .iter()
            .filter(|(dim, _)| variables.iter().any(|v| v.dims.contains(dim)))
            .cloned()
            .collect();
        let coordinates = self
            .coordinates
            .iter()
            .filter(|c| dims.iter().any(|(dim, _)| *dim == c.name))
            .cloned()
            .collect();

        Self::from_parts(dims, coordinates, variables)
    }

    /// Add a new leading dimension labeled by `values` to the dataset and to every variable.
    ///
    /// Variable data is repeated along the new dimension, so with a single label this tags the
    /// dataset with a singleton coordinate.
    ///
    pub fn expand_dims<S: Into<String>>(self, dim: S, values: CoordinateValues) -> Result<Self> {
        let dim = dim.into();
        if self.has_dim(&dim) {
            return Err(Error::ShapeMismatch(format!("dimension '{dim}' already exists")));
        }

        let len = values.len();
        let mut dims = vec![(dim.clone(), len)];
        dims.extend(self.dims);

        let mut variables = Vec::with_capacity(self.variables.len());
        for variable in self.variables {
            let mut shape = vec![len];
            shape.extend_from_slice(variable.data.shape());
            let data = variable
                .data
                .view()
                .insert_axis(Axis(0))
                .broadcast(IxDyn(&shape))
                .ok_or_else(|| {
                    Error::ShapeMismatch(format!("can't broadcast '{}'", variable.name))
                })?
                .to_owned();

            let mut var_dims = vec![dim.clone()];
            var_dims.extend(variable.dims);
            variables.push(Variable {
                name: variable.name,
                dims: var_dims,
                data,
            });
        }

        let mut coordinates = vec![Coordinate {
            name: dim,
            values,
        }];
        coordinates.extend(self.coordinates);

        Self::from_parts(dims, coordinates, variables)
    }

    /// Select positions along `dim`.
    ///
    pub fn isel(&self, dim: &str, indices: &[usize]) -> Result<Self> {
        let len = self
            .len_of(dim)
            .ok_or_else(|| Error::MissingCoordinate(dim.to_string()))?;
        if let Some(index) = indices.iter().find(|&&index| index >= len) {
            return Err(Error::ShapeMismatch(format!(
                "index {index} is out of bounds for dimension '{dim}' with length {len}"
            )));
        }

        let mapping: Vec<Option<usize>> = indices.iter().map(|&index| Some(index)).collect();
        let values = self
            .get_coordinate(dim)
            .map(|coordinate| coordinate.values.take(&mapping))
            .transpose()?;

        self.reindex(dim, &mapping, values)
    }

    /// Rebuild the dataset with `dim` rearranged according to `mapping`, see `take_axis`.
    ///
    /// The coordinate for `dim` is replaced by `values`, or dropped if `values` is `None`.
    ///
    pub(crate) fn reindex(
        &self,
        dim: &str,
        mapping: &[Option<usize>],
        values: Option<CoordinateValues>,
    ) -> Result<Self> {
        let dims = self
            .dims
            .iter()
            .map(|(name, len)| {
                if name == dim {
                    (name.clone(), mapping.len())
                } else {
                    (name.clone(), *len)
                }
            })
            .collect();

        let mut coordinates: Vec<Coordinate> = self
            .coordinates
            .iter()
            .filter(|c| c.name != dim)
            .cloned()
            .collect();
        if let Some(values) = values {
            coordinates.push(Coordinate {
                name: dim.to_string(),
                values,
            });
        }

        let variables = self
            .variables
            .iter()
            .map(|variable| match variable.axis_of(dim) {
                Some(axis) => Variable {
                    name: variable.name.clone(),
                    dims: variable.dims.clone(),
                    data: take_axis(variable.data.view(), axis, mapping),
                },
                None => variable.clone(),
            })
            .collect();

        Self::from_parts(dims, coordinates, variables)
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims: Vec<String> = self
            .dims
            .iter()
            .map(|(name, len)| format!("{name}: {len}"))
            .collect();
        write!(
            f,
            "Dataset {{ {} }} [{}]",
            dims.join(", "),
            self.variable_names().join(", ")
        )
    }
}

impl Coordinate {
    pub fn labels<S: Into<String>, L: AsRef<str>>(name: S, labels: &[L]) -> Self {
        Self {
            name: name.into(),
            values: CoordinateValues::labels(labels),
        }
    }

    pub fn f64<S: Into<String>>(name: S, values: Array1<f64>) -> Self {
        Self {
            name: name.into(),
            values: CoordinateValues::F64(values),
        }
    }

    pub fn i64<S: Into<String>>(name: S, values: Array1<i64>) -> Self {
        Self {
            name: name.into(),
            values: CoordinateValues::I64(values),
        }
    }

    /// A regularly spaced floating point coordinate.
    ///
    pub fn range<S: Into<String>>(name: S, start: f64, step: f64, steps: usize) -> Self {
        let values = Array1::from_iter((0..steps).map(|i| start + (i as f64) * step));
        Self::f64(name, values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl CoordinateValues {
    pub fn labels<L: AsRef<str>>(labels: &[L]) -> Self {
        Self::Labels(labels.iter().map(|l| l.as_ref().to_string()).collect())
    }

    /// A single label, as used to tag a dataset along a new dimension.
    ///
    pub fn label<L: Into<String>>(label: L) -> Self {
        Self::Labels(vec![label.into()])
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Labels(labels) => labels.len(),
            Self::I64(values) => values.len(),
            Self::F64(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_labels(&self) -> Option<&[String]> {
        match self {
            Self::Labels(labels) => Some(labels),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<&Array1<i64>> {
        match self {
            Self::I64(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<&Array1<f64>> {
        match self {
            Self::F64(values) => Some(values),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Labels(_) => "label",
            Self::I64(_) => "i64",
            Self::F64(_) => "f64",
        }
    }

    pub(crate) fn keys(&self) -> Vec<CoordinateKey> {
        match self {
            Self::Labels(labels) => labels.iter().cloned().map(CoordinateKey::Label).collect(),
            Self::I64(values) => values.iter().map(|&v| CoordinateKey::Int(v)).collect(),
            Self::F64(values) => values
                .iter()
                .map(|&v| CoordinateKey::Float(v.to_bits()))
                .collect(),
        }
    }

    /// Pick values by position. Coordinates can't hold gaps, so every position must be `Some`.
    ///
    pub(crate) fn take(&self, mapping: &[Option<usize>]) -> Result<Self> {
        let positions = mapping
            .iter()
            .map(|position| {
                position.ok_or_else(|| Error::Concat(String::from("coordinate has a gap")))
            })
            .collect::<Result<Vec<usize>>>()?;

        Ok(match self {
            Self::Labels(labels) => {
                Self::Labels(positions.iter().map(|&i| labels[i].clone()).collect())
            }
            Self::I64(values) => Self::I64(positions.iter().map(|&i| values[i]).collect()),
            Self::F64(values) => Self::F64(positions.iter().map(|&i| values[i]).collect()),
        })
    }

    /// Append coordinate values end to end. All parts must be of the same kind.
    ///
    pub(crate) fn concat(parts: &[&CoordinateValues]) -> Result<Self> {
        let first = parts
            .first()
            .ok_or_else(|| Error::Concat(String::from("no coordinates to join")))?;
        if let Some(other) = parts.iter().find(|part| part.kind() != first.kind()) {
            return Err(Error::Concat(format!(
                "can't join {} coordinate with {} coordinate",
                first.kind(),
                other.kind()
            )));
        }

        Ok(match first {
            Self::Labels(_) => Self::Labels(
                parts
                    .iter()
                    .flat_map(|part| part.as_labels().unwrap_or_default().iter().cloned())
                    .collect(),
            ),
            Self::I64(_) => Self::I64(
                parts
                    .iter()
                    .filter_map(|part| part.as_i64())
                    .flat_map(|values| values.iter().copied())
                    .collect(),
            ),
            Self::F64(_) => Self::F64(
                parts
                    .iter()
                    .filter_map(|part| part.as_f64())
                    .flat_map(|values| values.iter().copied())
                    .collect(),
            ),
        })
    }

    /// Outer join of coordinates.
    ///
    /// Returns the joined coordinate, listing values in order of first appearance, and for each
    /// part a mapping from joined positions to that part's positions (`None` where the part has
    /// no such value). A part that repeats a value can't be aligned and is an error.
    ///
    pub(crate) fn union(parts: &[&CoordinateValues]) -> Result<(Self, Vec<Vec<Option<usize>>>)> {
        let mut joined_positions: Vec<(usize, usize)> = vec![];
        let mut index: HashMap<CoordinateKey, usize> = HashMap::new();
        let mut part_keys = Vec::with_capacity(parts.len());

        for (p, part) in parts.iter().enumerate() {
            let keys = part.keys();
            for (i, key) in keys.iter().enumerate() {
                if keys[..i].contains(key) {
                    return Err(Error::Concat(format!(
                        "can't align on a coordinate that repeats {key:?}"
                    )));
                }
                if !index.contains_key(key) {
                    index.insert(key.clone(), joined_positions.len());
                    joined_positions.push((p, i));
                }
            }
            part_keys.push(keys);
        }

        // Gather joined values from whichever part first held them
        let mut pieces = Vec::with_capacity(joined_positions.len());
        for &(p, i) in &joined_positions {
            pieces.push(parts[p].take(&[Some(i)])?);
        }
        let pieces: Vec<&CoordinateValues> = pieces.iter().collect();
        let joined = Self::concat(&pieces)?;

        let mappings = part_keys
            .iter()
            .map(|keys| {
                let mut mapping = vec![None; joined_positions.len()];
                for (i, key) in keys.iter().enumerate() {
                    mapping[index[key]] = Some(i);
                }
                mapping
            })
            .collect();

        Ok((joined, mappings))
    }
}

impl PartialOrd for CoordinateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CoordinateKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Label(a), Self::Label(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => f64::from_bits(*a).total_cmp(&f64::from_bits(*b)),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl CoordinateKey {
    fn rank(&self) -> u8 {
        match self {
            Self::Label(_) => 0,
            Self::Int(_) => 1,
            Self::Float(_) => 2,
        }
    }
}

impl Variable {
    pub fn new<S: Into<String>, D: AsRef<str>>(name: S, dims: &[D], data: ArrayD<f32>) -> Self {
        Self {
            name: name.into(),
            dims: dims.iter().map(|d| d.as_ref().to_string()).collect(),
            data,
        }
    }

    pub fn axis_of(&self, dim: &str) -> Option<Axis> {
        self.dims.iter().position(|d| d == dim).map(Axis)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{arr1, Array3};

    use super::*;

    fn make_one() -> Result<Dataset> {
        let mut dataset = Dataset::new();
        dataset.add_coordinate(Coordinate::i64("time", arr1(&[0, 6])))?;
        dataset.add_coordinate(Coordinate::range("latitude", 52.0, -1.0, 3))?;
        dataset.add_coordinate(Coordinate::range("longitude", -123.0, 1.0, 4))?;

        for (k, name) in ["t2m", "msl", "tcwv", "u10"].iter().enumerate() {
            let data = Array3::from_shape_fn((2, 3, 4), |(t, y, x)| {
                (k * 1000 + t * 100 + y * 10 + x) as f32
            });
            dataset.add_variable(Variable::new(
                *name,
                &["time", "latitude", "longitude"],
                data.into_dyn(),
            ))?;
        }

        Ok(dataset)
    }

    #[test]
    fn test_new() -> Result<()> {
        let dataset = make_one()?;
        assert_eq!(
            dataset.dims(),
            &[
                (String::from("time"), 2),
                (String::from("latitude"), 3),
                (String::from("longitude"), 4)
            ]
        );
        assert_eq!(dataset.variable_names(), vec!["t2m", "msl", "tcwv", "u10"]);
        assert_eq!(dataset.len_of("latitude"), Some(3));
        assert!(dataset.get_coordinate("number").is_none());
        assert!(dataset.get_variable("sst").is_none());

        let latitude = dataset.get_coordinate("latitude").unwrap();
        assert_eq!(latitude.values.as_f64().unwrap(), &arr1(&[52.0, 51.0, 50.0]));

        let msl = dataset.get_variable("msl").unwrap();
        assert_eq!(msl.data[[1, 2, 3]], 1123.0);
        assert_eq!(msl.axis_of("longitude"), Some(Axis(2)));

        Ok(())
    }

    #[test]
    fn test_shape_mismatch() -> Result<()> {
        let mut dataset = make_one()?;
        let data = ArrayD::zeros(IxDyn(&[3, 3]));
        let err = dataset
            .add_variable(Variable::new("bad", &["time", "latitude"], data))
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));

        let data = ArrayD::zeros(IxDyn(&[2, 3]));
        let err = dataset
            .add_variable(Variable::new("bad", &["time"], data))
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));

        let err = dataset
            .add_coordinate(Coordinate::labels("time", &["a"]))
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));

        Ok(())
    }

    #[test]
    fn test_select() -> Result<()> {
        let dataset = make_one()?;
        let selected = dataset.select(&["tcwv", "t2m"])?;
        assert_eq!(selected.variable_names(), vec!["tcwv", "t2m"]);
        assert_eq!(selected.dims(), dataset.dims());
        assert_eq!(selected.coordinates().len(), 3);
        assert_eq!(selected.get_variable("t2m"), dataset.get_variable("t2m"));

        Ok(())
    }

    #[test]
    fn test_select_missing() -> Result<()> {
        let err = make_one()?.select(&["t2m", "sst"]).unwrap_err();
        assert!(matches!(err, Error::MissingVariable(name) if name == "sst"));

        Ok(())
    }

    #[test]
    fn test_expand_dims() -> Result<()> {
        let dataset = make_one()?
            .select(&["t2m"])?
            .expand_dims("perturbation", CoordinateValues::label("t+q"))?
            .expand_dims("climate", CoordinateValues::label("pi"))?;

        let dims: Vec<&str> = dataset.dims().iter().map(|(d, _)| d.as_str()).collect();
        assert_eq!(
            dims,
            vec!["climate", "perturbation", "time", "latitude", "longitude"]
        );
        let t2m = dataset.get_variable("t2m").unwrap();
        assert_eq!(t2m.data.shape(), &[1, 1, 2, 3, 4]);
        assert_eq!(t2m.data[[0, 0, 1, 2, 3]], 123.0);
        assert_eq!(
            dataset.get_coordinate("climate").unwrap().values,
            CoordinateValues::label("pi")
        );

        let err = dataset
            .expand_dims("climate", CoordinateValues::label("curr"))
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));

        Ok(())
    }

    #[test]
    fn test_expand_dims_broadcasts() -> Result<()> {
        let dataset = make_one()?
            .select(&["msl"])?
            .expand_dims("number", CoordinateValues::labels(&["cf", "pf"]))?;
        let msl = dataset.get_variable("msl").unwrap();
        assert_eq!(msl.data.shape(), &[2, 2, 3, 4]);
        assert_eq!(msl.data[[0, 1, 0, 1]], msl.data[[1, 1, 0, 1]]);

        Ok(())
    }

    #[test]
    fn test_isel() -> Result<()> {
        let dataset = make_one()?.isel("longitude", &[3, 1])?;
        assert_eq!(dataset.len_of("longitude"), Some(2));
        assert_eq!(
            dataset.get_coordinate("longitude").unwrap().values,
            CoordinateValues::F64(arr1(&[-120.0, -122.0]))
        );
        let u10 = dataset.get_variable("u10").unwrap();
        assert_eq!(u10.data[[1, 2, 0]], 3123.0);
        assert_eq!(u10.data[[1, 2, 1]], 3121.0);

        assert!(make_one()?.isel("longitude", &[4]).is_err());
        assert!(make_one()?.isel("level", &[0]).is_err());

        Ok(())
    }

    #[test]
    fn test_union() -> Result<()> {
        let a = CoordinateValues::labels(&["t+q", "progn_vars"]);
        let b = CoordinateValues::labels(&["none"]);
        let c = CoordinateValues::labels(&["progn_vars", "t+q"]);
        let (joined, mappings) = CoordinateValues::union(&[&a, &b, &c])?;

        assert_eq!(joined, CoordinateValues::labels(&["t+q", "progn_vars", "none"]));
        assert_eq!(mappings[0], vec![Some(0), Some(1), None]);
        assert_eq!(mappings[1], vec![None, None, Some(0)]);
        assert_eq!(mappings[2], vec![Some(1), Some(0), None]);

        Ok(())
    }

    #[test]
    fn test_union_with_repeated_value() {
        let a = CoordinateValues::labels(&["t+q", "t+q"]);
        let b = CoordinateValues::labels(&["none"]);
        let err = CoordinateValues::union(&[&a, &b]).unwrap_err();
        assert!(matches!(err, Error::Concat(_)));
    }

    #[test]
    fn test_union_of_different_kinds() {
        let a = CoordinateValues::labels(&["cf"]);
        let b = CoordinateValues::I64(arr1(&[0]));
        assert!(CoordinateValues::union(&[&a, &b]).is_err());
    }

    #[test]
    fn test_concat_values() -> Result<()> {
        let a = CoordinateValues::F64(arr1(&[0.0, 1.0]));
        let b = CoordinateValues::F64(arr1(&[2.0]));
        assert_eq!(
            CoordinateValues::concat(&[&a, &b])?,
            CoordinateValues::F64(arr1(&[0.0, 1.0, 2.0]))
        );

        Ok(())
    }

    #[test]
    fn test_key_order() {
        let mut keys = vec![
            CoordinateKey::Float(2.5_f64.to_bits()),
            CoordinateKey::Float((-1.0_f64).to_bits()),
            CoordinateKey::Float(0.0_f64.to_bits()),
        ];
        keys.sort();
        assert_eq!(keys[0], CoordinateKey::Float((-1.0_f64).to_bits()));
        assert_eq!(keys[2], CoordinateKey::Float(2.5_f64.to_bits()));
    }

    #[test]
    fn test_display() -> Result<()> {
        let dataset = make_one()?.select(&["t2m", "msl"])?;
        assert_eq!(
            dataset.to_string(),
            "Dataset { time: 2, latitude: 3, longitude: 4 } [t2m, msl]"
        );

        Ok(())
    }
}
