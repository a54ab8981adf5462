use log::{debug, info};

use crate::{
    catalog::Catalog,
    concat::concat,
    dataset::{CoordinateValues, Dataset},
    errors::Result,
    file_group::FileGroup,
    loader::{Identity, Loader, Preprocess},
    selection::{Experiment, MemberKind, Selection},
};

pub const CLIMATE: &str = "climate";
pub const PERTURBATION: &str = "perturbation";
pub const NUMBER: &str = "number";

/// Builds one dataset with `climate`, `perturbation` and `number` dimensions out of the file
/// groups of a selection.
///
/// The assembler is stateless between calls: the catalog and loader are only read, so one
/// assembler can serve any number of `assemble` calls.
///
pub struct Assembler<L>
where
    L: Loader,
{
    catalog: Catalog,
    loader: L,
    preprocess: Box<dyn Preprocess>,
}

/// Every file group a selection resolves to, organised as experiment → run variant → member
/// kind.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    pub experiments: Vec<ExperimentPlan>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentPlan {
    pub experiment: Experiment,
    pub variants: Vec<VariantPlan>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariantPlan {
    pub run_variant: String,

    /// Label for this run variant on the `perturbation` axis
    pub perturbation: String,

    pub members: Vec<(MemberKind, FileGroup)>,
}

impl<L> Assembler<L>
where
    L: Loader,
{
    pub fn new(catalog: Catalog, loader: L) -> Self {
        Self {
            catalog,
            loader,
            preprocess: Box::new(Identity),
        }
    }

    /// Use `preprocess` on every file's dataset before the files of a group are merged.
    ///
    pub fn with_preprocess<P: Preprocess + 'static>(self, preprocess: P) -> Self {
        Self {
            preprocess: Box::new(preprocess),
            ..self
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Load and combine the requested experiments and member kinds.
    ///
    /// # Arguments
    ///
    /// * `member_kinds` - Non-empty subset of `cf` (control) and `pf` (perturbed). Order sets the
    ///   order of the `number` axis.
    /// * `experiments` - Non-empty subset of `pi`, `curr` and `incr`. Order sets the order of the
    ///   `climate` axis.
    /// * `resolution` - `US025` or `GLO100`.
    /// * `level_type` - `sfc` or `pl`. `US025` only has `sfc`.
    ///
    /// Selectors are validated before anything is read. Any load failure aborts the whole
    /// assembly.
    ///
    pub fn assemble<M, E>(
        &self,
        member_kinds: &[M],
        experiments: &[E],
        resolution: &str,
        level_type: &str,
    ) -> Result<Dataset>
    where
        M: AsRef<str>,
        E: AsRef<str>,
    {
        let selection = Selection::parse(member_kinds, experiments, resolution, level_type)?;
        self.assemble_selection(&selection)
    }

    /// Same as `assemble`, for an already validated selection.
    ///
    pub fn assemble_selection(&self, selection: &Selection) -> Result<Dataset> {
        info!(
            "assembling experiments {:?}, members {:?} at {}/{}",
            selection.experiments, selection.member_kinds, selection.resolution, selection.level_type
        );

        let plan = self.plan(selection)?;
        let climates = plan
            .experiments
            .iter()
            .map(|experiment| self.load_experiment(experiment))
            .collect::<Result<Vec<_>>>()?;

        let dataset = concat(climates, CLIMATE)?;
        info!("assembled {dataset}");

        Ok(dataset)
    }

    /// Resolve a selection to its file groups, without reading anything.
    ///
    /// Fails with a configuration fault if the catalog can't label a run variant.
    ///
    pub fn plan(&self, selection: &Selection) -> Result<Plan> {
        let mut experiments = Vec::with_capacity(selection.experiments.len());
        for &experiment in &selection.experiments {
            let mut variants = vec![];
            for run_variant in self.catalog.run_variants(experiment)? {
                let perturbation = self.catalog.perturbation(run_variant)?.to_string();
                let members = selection
                    .member_kinds
                    .iter()
                    .map(|&member_kind| {
                        let group = self.catalog.file_group(
                            experiment,
                            selection.resolution,
                            selection.level_type,
                            member_kind,
                            run_variant,
                        );
                        (member_kind, group)
                    })
                    .collect();

                variants.push(VariantPlan {
                    run_variant: run_variant.clone(),
                    perturbation,
                    members,
                });
            }

            experiments.push(ExperimentPlan {
                experiment,
                variants,
            });
        }

        Ok(Plan { experiments })
    }

    fn load_experiment(&self, plan: &ExperimentPlan) -> Result<Dataset> {
        let perturbations = plan
            .variants
            .iter()
            .map(|variant| self.load_variant(plan.experiment, variant))
            .collect::<Result<Vec<_>>>()?;

        let dataset = concat(perturbations, PERTURBATION)?;
        debug!("{}: {dataset}", plan.experiment);

        Ok(dataset)
    }

    fn load_variant(&self, experiment: Experiment, plan: &VariantPlan) -> Result<Dataset> {
        let numbers = plan
            .members
            .iter()
            .map(|(member_kind, group)| {
                self.load_unit(experiment, &plan.perturbation, *member_kind, group)
            })
            .collect::<Result<Vec<_>>>()?;

        let dataset = concat(numbers, NUMBER)?;
        debug!("{experiment}/{}: {dataset}", plan.run_variant);

        Ok(dataset)
    }

    /// Load one file group, keep the catalog's variables and tag it with its place on the three
    /// new axes.
    ///
    fn load_unit(
        &self,
        experiment: Experiment,
        perturbation: &str,
        member_kind: MemberKind,
        group: &FileGroup,
    ) -> Result<Dataset> {
        debug!("loading {group}");
        self.loader
            .load(group, self.preprocess.as_ref())?
            .select(&self.catalog.variables)?
            .expand_dims(NUMBER, CoordinateValues::label(member_kind.tag()))?
            .expand_dims(PERTURBATION, CoordinateValues::label(perturbation))?
            .expand_dims(CLIMATE, CoordinateValues::label(experiment.tag()))
    }
}
