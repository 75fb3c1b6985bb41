//! Shared cache of weight tables.
//!
//! Tables depend only on `(centering, ratio)` and never change once built, so
//! every refine operator on a level can share the same `Arc`. The cache is a
//! concurrent map; lookups from several threads never block each other on a
//! hit.

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::amr_error::Result;
use crate::layout::Centering;
use crate::refine::weights::WeightTable;

static GLOBAL: Lazy<WeightTableCache> = Lazy::new(WeightTableCache::default);

/// Concurrent `(centering, ratio) -> Arc<WeightTable>` map.
#[derive(Debug, Default)]
pub struct WeightTableCache {
    tables: DashMap<(Centering, i32), Arc<WeightTable>>,
}

impl WeightTableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache used by
    /// [`LinearRefineIndexesAndWeights::new`](crate::refine::LinearRefineIndexesAndWeights::new).
    pub fn global() -> &'static WeightTableCache {
        &GLOBAL
    }

    /// Return the cached table, building it on first use.
    ///
    /// # Errors
    /// `InvalidRefinementRatio` if `ratio < 1`; nothing is cached in that case.
    pub fn get_or_build(
        &self,
        centering: Centering,
        ratio: i32,
    ) -> Result<Arc<WeightTable>> {
        if let Some(hit) = self.tables.get(&(centering, ratio)) {
            return Ok(Arc::clone(hit.value()));
        }
        let table = Arc::new(WeightTable::new(centering, ratio)?);
        log::debug!("built {centering} weight table for ratio {ratio}");
        // Another thread may have raced us; keep whichever landed first.
        let entry = self
            .tables
            .entry((centering, ratio))
            .or_insert(table);
        Ok(Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn clear(&self) {
        self.tables.clear();
    }
}
