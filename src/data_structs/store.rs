use indexmap::map::Entry;
use indexmap::IndexMap;

use super::enums::ChromosomeSelector;
use super::site::{
    BisulfiteCall,
    NanoporeCall,
    SiteRecord,
};
use super::typedef::PosType;
use crate::error::{
    MethCompError,
    Result,
};

type ChromosomeSites = IndexMap<PosType, SiteRecord>;

/// Sites keyed by chromosome, then by start position.
///
/// Both levels keep first-insertion order, so iteration follows the order
/// in which sites first appeared in the nanopore input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionalStore {
    chromosomes: IndexMap<String, ChromosomeSites>,
}

impl PositionalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a nanopore call, replacing any existing record at the key in
    /// full. Returns `true` if a record was replaced.
    pub fn insert_nanopore(
        &mut self,
        chromosome: &str,
        start: PosType,
        call: NanoporeCall,
    ) -> bool {
        let idx = match self.chromosomes.get_index_of(chromosome) {
            Some(idx) => idx,
            None => {
                self.chromosomes
                    .insert_full(chromosome.to_string(), ChromosomeSites::new())
                    .0
            },
        };
        self.chromosomes[idx]
            .insert(start, SiteRecord::from_nanopore(call))
            .is_some()
    }

    /// Attaches a bisulfite call to an existing site. Returns `false` and
    /// leaves the store untouched when no site exists at the key.
    pub fn attach_bisulfite(
        &mut self,
        chromosome: &str,
        start: PosType,
        call: BisulfiteCall,
    ) -> bool {
        match self
            .chromosomes
            .get_mut(chromosome)
            .map(|sites| sites.entry(start))
        {
            Some(Entry::Occupied(mut entry)) => {
                entry.get_mut().set_bisulfite(call);
                true
            },
            _ => false,
        }
    }

    pub fn get(
        &self,
        chromosome: &str,
        start: PosType,
    ) -> Option<&SiteRecord> {
        self.chromosomes
            .get(chromosome)
            .and_then(|sites| sites.get(&start))
    }

    pub fn contains_chromosome(
        &self,
        chromosome: &str,
    ) -> bool {
        self.chromosomes.contains_key(chromosome)
    }

    pub fn chromosomes(&self) -> impl Iterator<Item = &str> {
        self.chromosomes.keys().map(String::as_str)
    }

    /// Total number of sites.
    pub fn len(&self) -> usize {
        self.chromosomes.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of sites holding calls from both technologies.
    pub fn joint_len(&self) -> usize {
        self.iter().filter(|(_, _, site)| site.is_joint()).count()
    }

    /// Iterates over `(chromosome, start, record)` in store order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, PosType, &SiteRecord)> {
        self.chromosomes.iter().flat_map(|(chr, sites)| {
            sites
                .iter()
                .map(move |(start, site)| (chr.as_str(), *start, site))
        })
    }

    /// Iterates over the sites selected by `selector`.
    ///
    /// Fails if a single chromosome is selected that the store has never
    /// seen.
    pub fn select<'a>(
        &'a self,
        selector: &'a ChromosomeSelector,
    ) -> Result<impl Iterator<Item = (&'a str, PosType, &'a SiteRecord)> + 'a> {
        if let ChromosomeSelector::Single(name) = selector {
            if !self.contains_chromosome(name) {
                return Err(MethCompError::UnknownChromosome(name.clone()));
            }
        }
        Ok(self
            .iter()
            .filter(move |(chr, _, _)| selector.matches(chr)))
    }
}
