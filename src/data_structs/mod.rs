//! Core data structures of the join: the per-site record with its explicit
//! two-state lifecycle, and the chromosome/position keyed store that holds
//! them.
//!
//! - [`SiteRecord`] wraps a [`SiteState`], which is either
//!   [`SiteState::NanoporeOnly`] or [`SiteState::Joint`].
//! - [`PositionalStore`] maps chromosome to start position to
//!   [`SiteRecord`].
//! - [`ChromosomeSelector`] picks the chromosomes a histogram is built from.
//! - [`typedef`] holds the numeric aliases and bucket constants.

mod enums;
mod site;
mod store;
pub mod typedef;


pub use enums::ChromosomeSelector;
pub use site::{
    BisulfiteCall,
    NanoporeCall,
    SiteRecord,
    SiteState,
};
pub use store::PositionalStore;
