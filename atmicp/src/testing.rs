use ndarray::{arr1, Array3};
use parking_lot::Mutex;
use rand::Rng;

use crate::{
    dataset::{Coordinate, Dataset, Variable},
    errors::{Error, Result},
    file_group::FileGroup,
    loader::{Loader, Preprocess},
};

pub(crate) const SHAPE: [usize; 3] = [2, 3, 4];

/// A test implementation of Loader that makes up a small dataset for every file group and
/// records which groups were asked for.
///
/// Data for the n-th load are `n * 1000 + t * 100 + y * 10 + x`, so tests can tell which load a
/// slice of the assembled dataset came from. With `random` set, data are random instead.
///
pub(crate) struct MemoryLoader {
    calls: Mutex<Vec<FileGroup>>,
    missing: Vec<String>,
    random: bool,
}

impl MemoryLoader {
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(vec![]),
            missing: vec![],
            random: false,
        }
    }

    pub(crate) fn random() -> Self {
        Self {
            random: true,
            ..Self::new()
        }
    }

    /// Fail to load any group whose glob contains `fragment`.
    ///
    pub(crate) fn without(fragment: &str) -> Self {
        Self {
            missing: vec![fragment.to_string()],
            ..Self::new()
        }
    }

    pub(crate) fn calls(&self) -> Vec<FileGroup> {
        self.calls.lock().clone()
    }

    fn make_one(&self, n: usize) -> Result<Dataset> {
        let [times, rows, cols] = SHAPE;
        let mut dataset = Dataset::new();
        dataset.add_coordinate(Coordinate::i64("time", arr1(&[0, 6])))?;
        dataset.add_coordinate(Coordinate::range("latitude", 52.0, -1.0, rows))?;
        dataset.add_coordinate(Coordinate::range("longitude", -123.0, 1.0, cols))?;

        let mut rng = rand::thread_rng();
        for name in ["u10", "tcwv", "msl", "t2m"] {
            let data = Array3::from_shape_fn((times, rows, cols), |(t, y, x)| {
                if self.random {
                    rng.gen::<f32>()
                } else {
                    (n * 1000 + t * 100 + y * 10 + x) as f32
                }
            });
            dataset.add_variable(Variable::new(
                name,
                &["time", "latitude", "longitude"],
                data.into_dyn(),
            ))?;
        }

        Ok(dataset)
    }
}

impl Loader for MemoryLoader {
    fn load(&self, group: &FileGroup, preprocess: &dyn Preprocess) -> Result<Dataset> {
        let n = {
            let mut calls = self.calls.lock();
            calls.push(group.clone());
            calls.len() - 1
        };

        let glob = group.glob();
        if self.missing.iter().any(|fragment| glob.contains(fragment)) {
            return Err(Error::load(glob, "no files match"));
        }

        preprocess.preprocess(self.make_one(n)?)
    }
}

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
