mod assemble;
mod catalog;
mod concat;
mod dataset;
mod errors;
mod file_group;
mod helpers;
mod loader;
mod region;
mod selection;

#[cfg(test)]
mod testing;

pub use assemble::Assembler;
pub use assemble::ExperimentPlan;
pub use assemble::Plan;
pub use assemble::VariantPlan;
pub use assemble::{CLIMATE, NUMBER, PERTURBATION};

pub use catalog::Catalog;
pub use catalog::Perturbation;
pub use catalog::Scenario;
pub use catalog::{DEFAULT_ROOT, VARIABLES};

pub use concat::combine_by_coords;
pub use concat::concat;

pub use dataset::Coordinate;
pub use dataset::CoordinateValues;
pub use dataset::Dataset;
pub use dataset::Variable;

pub use errors::BoxError;
pub use errors::Error;
pub use errors::Result;

pub use file_group::FileGroup;

pub use helpers::rearrange;

pub use loader::Identity;
pub use loader::Loader;
pub use loader::Preprocess;

pub use region::Region;
pub use region::{PNW, WEST_COAST};

pub use selection::Experiment;
pub use selection::LevelType;
pub use selection::MemberKind;
pub use selection::Resolution;
pub use selection::Selection;
