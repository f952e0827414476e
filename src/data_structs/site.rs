use serde::{
    Deserialize,
    Serialize,
};

use super::typedef::{
    CountType,
    DensityType,
    PosType,
    ScoreType,
};

/// Nanopore (bedMethyl) call at a single site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NanoporeCall {
    pub end:             PosType,
    pub percent:         DensityType,
    pub score:           ScoreType,
    pub mod_count:       CountType,
    pub canonical_count: CountType,
    /// Raw read coverage (bedMethyl column 10), not `mod + canonical`.
    pub total_reads:     CountType,
}

/// Bisulfite (coverage report) call at a single site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BisulfiteCall {
    pub percent:         DensityType,
    pub mod_count:       CountType,
    pub canonical_count: CountType,
    pub total_reads:     CountType,
}

impl BisulfiteCall {
    pub fn new(
        percent: DensityType,
        mod_count: CountType,
        canonical_count: CountType,
    ) -> Self {
        Self {
            percent,
            mod_count,
            canonical_count,
            total_reads: mod_count.saturating_add(canonical_count),
        }
    }
}

/// Which technologies have reported on a site.
///
/// A site is always created from a nanopore call. A bisulfite call can only
/// move an existing site into [`SiteState::Joint`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SiteState {
    NanoporeOnly(NanoporeCall),
    Joint(NanoporeCall, BisulfiteCall),
}

/// Accumulated cross-technology measurement of one CpG site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    state: SiteState,
}

impl SiteRecord {
    pub fn from_nanopore(call: NanoporeCall) -> Self {
        Self {
            state: SiteState::NanoporeOnly(call),
        }
    }

    /// Attaches a bisulfite call, replacing any previous one.
    pub fn set_bisulfite(
        &mut self,
        call: BisulfiteCall,
    ) {
        let ont = match &self.state {
            SiteState::NanoporeOnly(ont) | SiteState::Joint(ont, _) => ont.clone(),
        };
        self.state = SiteState::Joint(ont, call);
    }

    pub fn state(&self) -> &SiteState {
        &self.state
    }

    pub fn nanopore(&self) -> &NanoporeCall {
        match &self.state {
            SiteState::NanoporeOnly(ont) | SiteState::Joint(ont, _) => ont,
        }
    }

    pub fn bisulfite(&self) -> Option<&BisulfiteCall> {
        match &self.state {
            SiteState::NanoporeOnly(_) => None,
            SiteState::Joint(_, bis) => Some(bis),
        }
    }

    pub fn is_joint(&self) -> bool {
        matches!(self.state, SiteState::Joint(..))
    }
}
