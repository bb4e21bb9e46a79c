use serde::{Deserialize, Serialize};

/// Number of teeth on a single change gear
pub type Teeth = u32;

/// Exact rational used for every ratio, pitch and tolerance
pub type Ratio = num_rational::Ratio<u64>;

/// One driver/driven pair of gears meshing in a train
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Stage {
    /// Gear turned by the previous shaft (spindle side)
    pub driver: Teeth,
    /// Gear turning the next shaft (leadscrew side)
    pub driven: Teeth,
}

impl Stage {
    #[must_use]
    pub fn new(driver: Teeth, driven: Teeth) -> Self {
        Self { driver, driven }
    }

    /// Ratio contributed by this stage alone
    #[must_use]
    pub fn ratio(&self) -> Ratio {
        Ratio::new(u64::from(self.driven), u64::from(self.driver))
    }
}

impl From<(Teeth, Teeth)> for Stage {
    fn from((driver, driven): (Teeth, Teeth)) -> Self {
        Self::new(driver, driven)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.driver, self.driven)
    }
}

/// Unit system of a thread pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadSystem {
    /// Pitch given as millimetres per thread
    Metric,
    /// Pitch given as threads per inch
    Imperial,
}

impl ThreadSystem {
    /// Unit label used in reports
    #[must_use]
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Metric => "mm",
            Self::Imperial => "tpi",
        }
    }
}

impl std::fmt::Display for ThreadSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

/// Which tie-break rule produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Trains use the preferred driver and the preferred driven gear
    BothPreferred,
    /// Trains use the preferred driver gear
    PreferredDriver,
    /// Trains use the preferred driven gear
    PreferredDriven,
    /// No preference applied; every shortest candidate
    Shortest,
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BothPreferred => write!(f, "both preferred"),
            Self::PreferredDriver => write!(f, "preferred driver"),
            Self::PreferredDriven => write!(f, "preferred driven"),
            Self::Shortest => write!(f, "shortest"),
        }
    }
}

/// How closely a selected train reproduces the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fit {
    /// Nearest available train, outside the tolerance band
    Approximate,
    /// Within the tolerance band
    InTolerance,
    /// Ratio equals the target exactly
    Exact,
}

impl Fit {
    #[must_use]
    pub fn classify(ratio: &Ratio, target: &Ratio, within_tolerance: bool) -> Self {
        if ratio == target {
            Self::Exact
        } else if within_tolerance {
            Self::InTolerance
        } else {
            Self::Approximate
        }
    }
}

impl std::fmt::Display for Fit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approximate => write!(f, "nearest"),
            Self::InTolerance => write!(f, "in tolerance"),
            Self::Exact => write!(f, "exact"),
        }
    }
}
