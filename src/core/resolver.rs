//! Part resolution with per-run memoization

use std::collections::HashMap;

use crate::core::cogs::ResolvedLine;
use crate::core::provider::{PartLookup, PartQuery, UpstreamError};
use crate::core::strategy::SearchStrategy;
use crate::entities::{LineItem, PartMatch};

/// Lookups made during one run, keyed by query
///
/// A cached `None` is a terminal "not found" for that query.
#[derive(Debug, Default)]
pub struct PartCache {
    entries: HashMap<PartQuery, Option<PartMatch>>,
}

impl PartCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, query: &PartQuery) -> Option<&Option<PartMatch>> {
        self.entries.get(query)
    }

    pub fn insert(&mut self, query: PartQuery, result: Option<PartMatch>) {
        self.entries.insert(query, result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of cached queries that produced a match
    pub fn found(&self) -> usize {
        self.entries.values().filter(|m| m.is_some()).count()
    }

    /// Number of cached matches that carry at least one price break
    pub fn priced(&self) -> usize {
        self.entries
            .values()
            .filter(|m| m.as_ref().is_some_and(PartMatch::is_priced))
            .count()
    }
}

/// Resolves BOM parts to priced catalog matches
///
/// The first lookup for a query is authoritative for the rest of the run;
/// later requests for the same query are served from the cache.
pub struct PartResolver<L> {
    lookup: L,
    strategy: SearchStrategy,
    cache: PartCache,
}

impl<L: PartLookup> PartResolver<L> {
    pub fn new(lookup: L, strategy: SearchStrategy) -> Self {
        Self::with_cache(lookup, strategy, PartCache::new())
    }

    pub fn with_cache(lookup: L, strategy: SearchStrategy, cache: PartCache) -> Self {
        Self {
            lookup,
            strategy,
            cache,
        }
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    pub fn cache(&self) -> &PartCache {
        &self.cache
    }

    #[cfg(test)]
    fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Resolve a part, hitting the API only on the first request for its query.
    ///
    /// Returns `Ok(None)` when the API has no match. Upstream failures are
    /// returned as-is and are not cached.
    pub fn resolve(
        &mut self,
        part_number: &str,
        manufacturer: &str,
    ) -> Result<Option<&PartMatch>, UpstreamError> {
        let query = PartQuery::new(part_number, manufacturer, self.strategy);

        if self.cache.get(&query).is_none() {
            let result = self.lookup.lookup(&query)?;
            match &result {
                Some(part) => tracing::debug!(
                    part = %query,
                    id = %part.id,
                    breaks = part.price_breaks().len(),
                    "Resolved part"
                ),
                None => tracing::warn!("No results found for {}", query),
            }
            self.cache.insert(query.clone(), result);
        }

        Ok(self.cache.get(&query).and_then(|m| m.as_ref()))
    }

    /// Resolve every line in BOM order, stopping at the first upstream failure
    pub fn resolve_lines(&mut self, items: Vec<LineItem>) -> Result<Vec<ResolvedLine>, UpstreamError> {
        items
            .into_iter()
            .map(|item| {
                let part = self.resolve(&item.part_number, &item.manufacturer)?.cloned();
                Ok(ResolvedLine::new(item, part))
            })
            .collect()
    }
}
