use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::core::error::{ShareTableError, ValidationError};
use crate::core::transaction::Amount;

/// Category of tourism revenue. The set is closed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityType {
    Homestay,
    GuidedTour,
    Food,
    Handicraft
}

impl ActivityType {
    pub const ALL: [ActivityType; 4] = [
        ActivityType::Homestay,
        ActivityType::GuidedTour,
        ActivityType::Food,
        ActivityType::Handicraft
    ];

    /// Identifier used in storage and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Homestay => "homestay",
            Self::GuidedTour => "guided-tour",
            Self::Food => "food",
            Self::Handicraft => "handicraft"
        }
    }

    /// Human readable name for tables and charts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Homestay => "Homestay",
            Self::GuidedTour => "Guided Tour",
            Self::Food => "Local Cuisine",
            Self::Handicraft => "Handicrafts"
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for ActivityType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL.iter()
            .find(|activity| activity.key() == key)
            .copied()
            .ok_or_else(|| ValidationError::UnknownActivity(key.to_owned()))
    }
}

/// Percentages of an amount going to the individual and to the community fund.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Split {
    pub individual: Amount,
    pub community: Amount
}

impl Split {
    pub const fn new(individual: Amount, community: Amount) -> Split {
        Split { individual, community }
    }

    fn validate(&self, activity: ActivityType) -> Result<(), ShareTableError> {
        let valid = |pct: Amount| pct.is_finite() && pct >= 0.0;
        if !valid(self.individual) || !valid(self.community) {
            return Err(ShareTableError::InvalidPercentage { activity });
        }
        let total = self.individual + self.community;
        if (total - 100.0).abs() > 1e-9 {
            return Err(ShareTableError::BadTotal { activity, total });
        }
        Ok(())
    }

    /// Splits `amount` into `(individual, community)`.
    /// Multiplies before dividing and never rounds.
    pub fn apply(&self, amount: Amount) -> (Amount, Amount) {
        let individual = amount * self.individual / 100.0;
        let community = amount * self.community / 100.0;
        (individual, community)
    }
}

/// Revenue-share configuration, one split per activity.
#[derive(Clone, PartialEq, Debug)]
pub struct ShareTable {
    splits: BTreeMap<ActivityType, Split>
}

impl Default for ShareTable {
    fn default() -> Self {
        let splits = BTreeMap::from([
            (ActivityType::Homestay, Split::new(60.0, 40.0)),
            (ActivityType::GuidedTour, Split::new(70.0, 30.0)),
            (ActivityType::Food, Split::new(65.0, 35.0)),
            (ActivityType::Handicraft, Split::new(80.0, 20.0)),
        ]);
        ShareTable { splits }
    }
}

impl ShareTable {
    /// Builds a table from the defaults with `overrides` applied on top.
    pub fn with_overrides<I>(overrides: I) -> Result<ShareTable, ShareTableError>
    where
        I: IntoIterator<Item = (ActivityType, Split)>
    {
        let mut table = ShareTable::default();
        for (activity, split) in overrides {
            split.validate(activity)?;
            table.splits.insert(activity, split);
        }
        Ok(table)
    }

    pub fn split(&self, activity: ActivityType) -> Option<&Split> {
        self.splits.get(&activity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActivityType, &Split)> {
        self.splits.iter().map(|(activity, split)| (*activity, split))
    }
}
