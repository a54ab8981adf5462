use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

macro_rules! Selector {
    ($name:ident, $parameter:literal, { $($variant:ident => $tag:literal),+ $(,)? }) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $tag)]
                $variant,
            )+
        }

        impl $name {
            /// Every allowed value, in canonical order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The tag used for this value in the file store and in coordinate labels.
            pub fn tag(&self) -> &'static str {
                match self {
                    $($name::$variant => $tag,)+
                }
            }

            /// Parse a tag, reporting a bad value as an invalid selection of this parameter.
            pub fn parse(tag: &str) -> Result<Self> {
                match tag {
                    $($tag => Ok($name::$variant),)+
                    _ => Err(Error::invalid(
                        $parameter,
                        format!("must be one of [{}], got '{tag}'", Self::tags()),
                    )),
                }
            }

            fn tags() -> String {
                Self::ALL
                    .iter()
                    .map(|value| value.tag())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.tag())
            }
        }
    };
}

Selector!(Experiment, "experiments", {
    PreIndustrial => "pi",
    Current => "curr",
    IncreasedGhg => "incr",
});

Selector!(MemberKind, "member_kinds", {
    Control => "cf",
    Perturbed => "pf",
});

Selector!(Resolution, "resolution", {
    Us025 => "US025",
    Glo100 => "GLO100",
});

Selector!(LevelType, "level_type", {
    Surface => "sfc",
    PressureLevel => "pl",
});

impl Resolution {
    /// Level types available at this resolution.
    pub fn supports(&self, level_type: LevelType) -> bool {
        match self {
            Resolution::Us025 => level_type == LevelType::Surface,
            Resolution::Glo100 => true,
        }
    }
}

/// A validated request: which experiments and member kinds to load, at which resolution and
/// level type.
///
/// Orders of `experiments` and `member_kinds` are kept as given; they determine the order of the
/// `climate` and `number` axes in the assembled dataset.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub member_kinds: Vec<MemberKind>,
    pub experiments: Vec<Experiment>,
    pub resolution: Resolution,
    pub level_type: LevelType,
}

impl Selection {
    /// Validate string tags and build a `Selection`.
    ///
    /// Checks run in a fixed order (resolution, level type, member kinds, experiments, then the
    /// resolution/level type combination) and the first failure is returned.
    ///
    pub fn parse<M, E>(
        member_kinds: &[M],
        experiments: &[E],
        resolution: &str,
        level_type: &str,
    ) -> Result<Self>
    where
        M: AsRef<str>,
        E: AsRef<str>,
    {
        let resolution = Resolution::parse(resolution)?;
        let level_type = LevelType::parse(level_type)?;
        let member_kinds = parse_subset(member_kinds, "member_kinds", MemberKind::parse)?;
        let experiments = parse_subset(experiments, "experiments", Experiment::parse)?;

        Self::new(member_kinds, experiments, resolution, level_type)
    }

    /// Build a `Selection` from typed values, checking the constraints the types can't express.
    ///
    pub fn new(
        member_kinds: Vec<MemberKind>,
        experiments: Vec<Experiment>,
        resolution: Resolution,
        level_type: LevelType,
    ) -> Result<Self> {
        check_subset(&member_kinds, "member_kinds")?;
        check_subset(&experiments, "experiments")?;

        if !resolution.supports(level_type) {
            return Err(Error::invalid(
                "level_type",
                format!("resolution '{resolution}' only supports level type 'sfc', got '{level_type}'"),
            ));
        }

        Ok(Self {
            member_kinds,
            experiments,
            resolution,
            level_type,
        })
    }
}

fn parse_subset<S, T>(
    tags: &[S],
    parameter: &'static str,
    parse: impl Fn(&str) -> Result<T>,
) -> Result<Vec<T>>
where
    S: AsRef<str>,
{
    // Report a bad tag against the list it came from
    tags.iter()
        .map(|tag| {
            parse(tag.as_ref()).map_err(|err| match err {
                Error::InvalidSelection { message, .. } => Error::invalid(parameter, message),
                err => err,
            })
        })
        .collect()
}

fn check_subset<T>(values: &[T], parameter: &'static str) -> Result<()>
where
    T: PartialEq + fmt::Display,
{
    if values.is_empty() {
        return Err(Error::invalid(parameter, "must not be empty"));
    }

    for (i, value) in values.iter().enumerate() {
        if values[..i].contains(value) {
            return Err(Error::invalid(
                parameter,
                format!("'{value}' is given more than once"),
            ));
        }
    }

    Ok(())
}
