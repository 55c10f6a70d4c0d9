//! Memoized per-layer compute results.
//!
//! Entries are keyed by layer kind and the canonical form of the layer's options, so two
//! layers with equal options share one artifact. A layer is stale when its kind has a
//! compute step and no entry exists for its current key.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::Arc,
};

use crate::{
    foundation::error::{LayerkitError, LayerkitResult},
    layers::{canonical::canonical_form, model::Layer, model::LayerKind},
    plugins::{ComputedResult, LayerPlugin, PluginRegistry},
};

type CacheKey = (LayerKind, String);

#[derive(Debug, Default)]
pub struct ComputeCache {
    entries: HashMap<LayerKind, HashMap<String, ComputedResult>>,
    pending_cleanups: Vec<ComputedResult>,
}

/// What one [`ComputeCache::refresh_stale`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshStats {
    pub launched: usize,
    pub stored: usize,
    pub failed: usize,
    pub evicted: usize,
}

impl ComputeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, kind: LayerKind, options: &serde_json::Value) -> Option<&ComputedResult> {
        self.entries.get(&kind)?.get(&canonical_form(options))
    }

    pub fn get_for(&self, layer: &Layer) -> Option<&ComputedResult> {
        self.get(layer.kind, &layer.options)
    }

    /// Store `result`, replacing any entry for the same key. A replaced entry's cleanup
    /// is queued for [`Self::flush_cleanups`].
    pub fn set(&mut self, kind: LayerKind, options: &serde_json::Value, result: ComputedResult) {
        self.insert((kind, canonical_form(options)), result);
    }

    fn insert(&mut self, (kind, key): CacheKey, result: ComputedResult) {
        if let Some(old) = self.entries.entry(kind).or_default().insert(key, result) {
            self.pending_cleanups.push(old);
        }
    }

    /// Whether `layer` still needs a compute before it can be drawn.
    pub fn is_layer_stale(&self, layer: &Layer, plugins: &PluginRegistry) -> LayerkitResult<bool> {
        let plugin = plugins.get(layer.kind)?;
        Ok(plugin.has_compute() && self.get_for(layer).is_none())
    }

    pub fn is_stale(&self, layers: &[Layer], plugins: &PluginRegistry) -> LayerkitResult<bool> {
        for layer in layers {
            if self.is_layer_stale(layer, plugins)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn stale_keys(
        &self,
        layers: &[Layer],
        plugins: &PluginRegistry,
    ) -> LayerkitResult<BTreeMap<CacheKey, (Arc<dyn LayerPlugin>, serde_json::Value)>> {
        let mut out = BTreeMap::new();
        for layer in layers {
            let plugin = plugins.get(layer.kind)?;
            if !plugin.has_compute() {
                continue;
            }
            let key = canonical_form(&layer.options);
            let cached = self
                .entries
                .get(&layer.kind)
                .is_some_and(|m| m.contains_key(&key));
            if !cached {
                out.entry((layer.kind, key))
                    .or_insert_with(|| (plugin.clone(), layer.options.clone()));
            }
        }
        Ok(out)
    }

    fn referenced_keys(
        layers: &[Layer],
        plugins: &PluginRegistry,
    ) -> LayerkitResult<BTreeSet<CacheKey>> {
        let mut out = BTreeSet::new();
        for layer in layers {
            if plugins.get(layer.kind)?.has_compute() {
                out.insert((layer.kind, canonical_form(&layer.options)));
            }
        }
        Ok(out)
    }

    /// Compute every stale key concurrently and store the successes.
    ///
    /// Runs one task per distinct key and returns once all of them settled. Failed keys
    /// store nothing and stay stale; if any failed, the aggregate error is returned after
    /// the successes are stored. Entries no layer references any more are evicted and
    /// their cleanups awaited. Must be called inside a tokio runtime; dropping the
    /// returned future aborts every compute still running.
    #[tracing::instrument(skip(self, layers, plugins), fields(layers = layers.len()))]
    pub async fn refresh_stale(
        &mut self,
        layers: &[Layer],
        plugins: &PluginRegistry,
    ) -> LayerkitResult<RefreshStats> {
        let stale = self.stale_keys(layers, plugins)?;
        let referenced = Self::referenced_keys(layers, plugins)?;
        let mut stats = RefreshStats {
            launched: stale.len(),
            ..RefreshStats::default()
        };

        let mut tasks = tokio::task::JoinSet::new();
        let mut keys = HashMap::with_capacity(stale.len());
        for (cache_key, (plugin, options)) in stale {
            let handle = tasks.spawn(async move { plugin.compute(&options).await });
            keys.insert(handle.id(), cache_key);
        }

        let mut failures: Vec<(String, String)> = Vec::new();
        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, outcome) = match joined {
                Ok((id, outcome)) => (id, Ok(outcome)),
                Err(err) => (err.id(), Err(err)),
            };
            let Some((kind, key)) = keys.remove(&id) else {
                continue;
            };
            match outcome {
                Ok(Ok(result)) => {
                    tracing::debug!(%kind, key = %key, "stored computed result");
                    self.insert((kind, key), result);
                    stats.stored += 1;
                }
                Ok(Err(err)) => {
                    tracing::warn!(%kind, key = %key, %err, "compute failed");
                    failures.push((kind.to_string(), compute_message(err)));
                }
                Err(join_err) if join_err.is_panic() => {
                    tracing::warn!(%kind, key = %key, "compute task panicked");
                    failures.push((kind.to_string(), "compute task panicked".to_string()));
                }
                Err(join_err) => {
                    tracing::warn!(%kind, key = %key, err = %join_err, "compute task cancelled");
                    failures.push((kind.to_string(), format!("compute task failed: {join_err}")));
                }
            }
        }
        stats.failed = failures.len();

        stats.evicted = self.evict_unreferenced(&referenced);
        self.flush_cleanups().await;

        match aggregate_failures(failures) {
            Some(err) => Err(err),
            None => Ok(stats),
        }
    }

    /// Evict entries no layer in `layers` references and run their cleanups.
    #[tracing::instrument(skip(self, layers, plugins), fields(layers = layers.len()))]
    pub async fn prune(
        &mut self,
        layers: &[Layer],
        plugins: &PluginRegistry,
    ) -> LayerkitResult<usize> {
        let referenced = Self::referenced_keys(layers, plugins)?;
        let evicted = self.evict_unreferenced(&referenced);
        self.flush_cleanups().await;
        Ok(evicted)
    }

    /// Evict everything and run every cleanup.
    pub async fn clear(&mut self) -> usize {
        let mut evicted = 0;
        for (_, by_key) in self.entries.drain() {
            evicted += by_key.len();
            self.pending_cleanups.extend(by_key.into_values());
        }
        self.flush_cleanups().await;
        evicted
    }

    /// Run queued cleanups in eviction order; returns how many ran.
    pub async fn flush_cleanups(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending_cleanups);
        let n = pending.len();
        for result in pending {
            result.run_cleanup().await;
        }
        n
    }

    fn evict_unreferenced(&mut self, referenced: &BTreeSet<CacheKey>) -> usize {
        let mut evicted = 0;
        for (kind, by_key) in self.entries.iter_mut() {
            let dead: Vec<String> = by_key
                .keys()
                .filter(|k| !referenced.contains(&(*kind, (*k).clone())))
                .cloned()
                .collect();
            for key in dead {
                if let Some(old) = by_key.remove(&key) {
                    tracing::debug!(%kind, key = %key, "evicted computed result");
                    self.pending_cleanups.push(old);
                    evicted += 1;
                }
            }
        }
        self.entries.retain(|_, by_key| !by_key.is_empty());
        evicted
    }
}

fn compute_message(err: LayerkitError) -> String {
    match err {
        LayerkitError::Compute { message, .. } => message,
        other => other.to_string(),
    }
}

fn aggregate_failures(failures: Vec<(String, String)>) -> Option<LayerkitError> {
    if failures.is_empty() {
        return None;
    }
    let kinds: BTreeSet<&str> = failures.iter().map(|(k, _)| k.as_str()).collect();
    let kind = kinds.into_iter().collect::<Vec<_>>().join(",");
    let message = failures
        .iter()
        .map(|(_, m)| m.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Some(LayerkitError::compute(kind, message))
}

#[cfg(test)]
#[path = "../../tests/unit/cache/computed.rs"]
mod tests;
