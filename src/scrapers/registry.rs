//! Source id → extractor lookup table.
//!
//! Built once at startup and shared read-only; iteration order is
//! registration order, which is also the key order of batch reports.

use super::Extractor;
use super::{
    addiyar::Addiyar, alakhbar::AlAkhbar, aliwaa::Aliwaa, aljadeed::AlJadeed,
    aljoumhouria::AlJoumhouria, annahar::Annahar, elsharkonline::ElSharkOnline, lbcgroup::LbcGroup,
    lebaneseforces::LebaneseForces, lebanondebate::LebanonDebate, mtv::Mtv,
    nidaalwatan::NidaaAlWatan, sawtbeirut::SawtBeirut,
};
use crate::error::{Result, ScrapeError};
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct ExtractorDescriptor {
    pub source_id: String,
    pub extractor: Arc<dyn Extractor>,
}

impl fmt::Debug for ExtractorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorDescriptor")
            .field("source_id", &self.source_id)
            .field("listing_url", &self.extractor.listing_url())
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtractorRegistry {
    descriptors: Vec<ExtractorDescriptor>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in Lebanese source.
    pub fn builtin() -> Self {
        Self::new()
            .with("addiyar", Addiyar)
            .with("annahar", Annahar)
            .with("aljoumhouria", AlJoumhouria)
            .with("alakhbar", AlAkhbar)
            .with("nidaalwatan", NidaaAlWatan)
            .with("aliwaa", Aliwaa)
            .with("elsharkonline", ElSharkOnline)
            .with("mtv", Mtv)
            .with("aljadeed", AlJadeed)
            .with("sawtbeirut", SawtBeirut)
            .with("lebanondebate", LebanonDebate)
            .with("lebaneseforces", LebaneseForces)
            .with("lbcgroup", LbcGroup)
    }

    /// Register `extractor` under `source_id`. A repeated id replaces the
    /// earlier extractor but keeps its position.
    pub fn with(mut self, source_id: &str, extractor: impl Extractor + 'static) -> Self {
        let descriptor = ExtractorDescriptor {
            source_id: source_id.to_ascii_lowercase(),
            extractor: Arc::new(extractor),
        };
        match self
            .descriptors
            .iter_mut()
            .find(|d| d.source_id == descriptor.source_id)
        {
            Some(existing) => *existing = descriptor,
            None => self.descriptors.push(descriptor),
        }
        self
    }

    /// Keep only the sources for which `keep` returns true.
    pub fn retain(mut self, keep: impl Fn(&str) -> bool) -> Self {
        self.descriptors.retain(|d| keep(&d.source_id));
        self
    }

    /// Case-insensitive lookup.
    pub fn lookup(&self, source_id: &str) -> Result<&ExtractorDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.source_id.eq_ignore_ascii_case(source_id))
            .ok_or_else(|| ScrapeError::UnknownSource(source_id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractorDescriptor> {
        self.descriptors.iter()
    }

    pub fn source_ids(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.source_id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
