use crate::{dataset::Dataset, errors::Result, file_group::FileGroup};

/// A trait for loading the files of a file group as one dataset.
///
/// Implementations read every file matching the group, run `preprocess` on each file's dataset,
/// then merge the files (usually with `combine_by_coords`). Failure to locate or read the files
/// must be reported as `Error::Load`; the assembler passes it on unchanged.
///
pub trait Loader: Send + Sync {
    fn load(&self, group: &FileGroup, preprocess: &dyn Preprocess) -> Result<Dataset>;
}

/// A transformation applied to each file's dataset before the files of a group are merged.
///
pub trait Preprocess: Send + Sync {
    fn preprocess(&self, dataset: Dataset) -> Result<Dataset>;
}

impl<F> Preprocess for F
where
    F: Fn(Dataset) -> Result<Dataset> + Send + Sync,
{
    fn preprocess(&self, dataset: Dataset) -> Result<Dataset> {
        self(dataset)
    }
}

/// Leaves datasets as they are.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl Preprocess for Identity {
    fn preprocess(&self, dataset: Dataset) -> Result<Dataset> {
        Ok(dataset)
    }
}

impl<L: Loader + ?Sized> Loader for Box<L> {
    fn load(&self, group: &FileGroup, preprocess: &dyn Preprocess) -> Result<Dataset> {
        (**self).load(group, preprocess)
    }
}
