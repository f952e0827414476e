use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

/// Which chromosomes a histogram is built from.
#[derive(Eq, Hash, PartialEq, Clone, Debug, Default)]
pub enum ChromosomeSelector {
    /// Every chromosome in the store, merged.
    #[default]
    All,
    /// A single chromosome by exact name.
    Single(String),
}

impl ChromosomeSelector {
    pub fn matches(
        &self,
        chromosome: &str,
    ) -> bool {
        match self {
            ChromosomeSelector::All => true,
            ChromosomeSelector::Single(name) => name == chromosome,
        }
    }
}

impl FromStr for ChromosomeSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(ChromosomeSelector::All)
        }
        else {
            Ok(ChromosomeSelector::Single(s.to_string()))
        }
    }
}

impl Display for ChromosomeSelector {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ChromosomeSelector::All => write!(f, "all"),
            ChromosomeSelector::Single(name) => write!(f, "{}", name),
        }
    }
}

impl Serialize for ChromosomeSelector {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ChromosomeSelector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = String::deserialize(deserializer)?;
        Ok(ChromosomeSelector::from_str(&s).unwrap_or_default())
    }
}
