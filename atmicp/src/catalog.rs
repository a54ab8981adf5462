use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    errors::{Error, Result},
    file_group::FileGroup,
    selection::{Experiment, LevelType, MemberKind, Resolution},
};

/// Root of the IFS iterative-run file store.
pub const DEFAULT_ROOT: &str = "/gf5/predict/AWH019_ERMIS_ATMICP/ITERATION/MED-R/EXP";

/// Surface temperature, mean sea-level pressure and total column water vapour.
pub const VARIABLES: [&str; 3] = ["t2m", "msl", "tcwv"];

/// The fixed configuration the assembler resolves a selection against.
///
/// A catalog maps each experiment to an ordered list of run-variant identifiers (`expver`s) and
/// each run-variant to the label used on the `perturbation` axis. It also knows where the file
/// store lives, which suffix data files carry, and which variables are kept. The built-in tables
/// are returned by `Catalog::ifs`; another catalog can be read from JSON with
/// `Catalog::from_json`.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Directory containing `<experiment>/<resolution>/<level type>/<member kind>/`
    pub root: PathBuf,

    /// File name suffix of data files, appended to `<run-variant>*`
    pub suffix: String,

    /// Variables kept from each file group
    pub variables: Vec<String>,

    /// Ordered run-variants for each experiment
    pub scenarios: Vec<Scenario>,

    /// Perturbation label for each run-variant
    pub perturbations: Vec<Perturbation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub experiment: Experiment,
    pub run_variants: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Perturbation {
    pub run_variant: String,
    pub label: String,
}

impl Catalog {
    /// The tables for the IFS iterative initial-condition perturbation runs.
    ///
    pub fn ifs() -> Self {
        let scenario = |experiment, run_variants: &[&str]| Scenario {
            experiment,
            run_variants: run_variants.iter().map(|id| id.to_string()).collect(),
        };
        let perturbation = |run_variant: &str, label: &str| Perturbation {
            run_variant: run_variant.to_string(),
            label: label.to_string(),
        };

        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            suffix: String::from(".nc"),
            variables: VARIABLES.iter().map(|name| name.to_string()).collect(),
            scenarios: vec![
                scenario(Experiment::PreIndustrial, &["b2us", "b2uu"]),
                scenario(Experiment::Current, &["b2ut"]),
                scenario(Experiment::IncreasedGhg, &["b2v0", "b2v1"]),
            ],
            perturbations: vec![
                perturbation("b2us", "t+q"),
                perturbation("b2uu", "progn_vars"),
                perturbation("b2ut", "none"),
                perturbation("b2v0", "t+q"),
                perturbation("b2v1", "progn_vars"),
            ],
        }
    }

    /// Read a catalog from JSON.
    ///
    pub fn from_json(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// The same catalog, pointed at a different file store.
    ///
    pub fn with_root<P: AsRef<Path>>(self, root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..self
        }
    }

    /// Ordered run-variant identifiers for `experiment`.
    ///
    pub fn run_variants(&self, experiment: Experiment) -> Result<&[String]> {
        self.scenarios
            .iter()
            .find(|scenario| scenario.experiment == experiment)
            .map(|scenario| scenario.run_variants.as_slice())
            .ok_or_else(|| {
                Error::ConfigurationFault(format!("no run variants listed for '{experiment}'"))
            })
    }

    /// Perturbation label for `run_variant`.
    ///
    pub fn perturbation(&self, run_variant: &str) -> Result<&str> {
        self.perturbations
            .iter()
            .find(|perturbation| perturbation.run_variant == run_variant)
            .map(|perturbation| perturbation.label.as_str())
            .ok_or_else(|| {
                Error::ConfigurationFault(format!(
                    "run variant '{run_variant}' has no perturbation label"
                ))
            })
    }

    /// Location of the files for one run variant under one experiment, resolution, level type
    /// and member kind.
    ///
    pub fn file_group(
        &self,
        experiment: Experiment,
        resolution: Resolution,
        level_type: LevelType,
        member_kind: MemberKind,
        run_variant: &str,
    ) -> FileGroup {
        let directory = self
            .root
            .join(experiment.tag())
            .join(resolution.tag())
            .join(level_type.tag())
            .join(member_kind.tag());

        FileGroup::new(directory, format!("{run_variant}*{}", self.suffix))
    }

    /// Check that the two tables agree: every experiment has run variants, every run variant has
    /// a label, and no experiment uses a label twice.
    ///
    pub fn check(&self) -> Result<()> {
        for experiment in Experiment::ALL {
            let run_variants = self.run_variants(*experiment)?;
            if run_variants.is_empty() {
                return Err(Error::ConfigurationFault(format!(
                    "no run variants listed for '{experiment}'"
                )));
            }
            let mut labels: Vec<&str> = Vec::with_capacity(run_variants.len());
            for run_variant in run_variants {
                let label = self.perturbation(run_variant)?;
                if labels.contains(&label) {
                    return Err(Error::ConfigurationFault(format!(
                        "'{experiment}' has more than one run variant labeled '{label}'"
                    )));
                }
                labels.push(label);
            }
        }

        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::ifs()
    }
}
