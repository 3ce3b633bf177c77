//! Store facade: owns the key-value handle and wires the field registry,
//! write path, and merge scan together.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use rocksdb::{BlockBasedOptions, Cache, Options, DB};

use crate::error::Result;
use crate::fields::FieldRegistry;
use crate::keys;
use crate::query::Query;
use crate::scan;
use crate::telemetry::{noop_event_listener, store_metrics, StoreEvent, StoreEventListener};
use crate::types::{FieldId, Series};
use crate::write;

const ONE_GIBIBYTE: usize = 1024 * 1024 * 1024;
const TWO_FIFTY_SIX_KIBIBYTES: usize = 256 * 1024;
const BLOOM_FILTER_BITS_PER_KEY: f64 = 64.0;

/// Configuration options for opening a [`Store`].
///
/// The storage tuning values are advisory defaults for the underlying
/// store; they do not affect correctness.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Capacity of the shared LRU block cache.
    pub block_cache_bytes: usize,
    /// Uncompressed block size of the underlying store.
    pub block_size_bytes: usize,
    /// Bloom filter bits per key; set to 0 to disable the filter.
    pub bloom_filter_bits_per_key: f64,
    /// Create the database directory if it does not exist.
    pub create_if_missing: bool,
    /// Structured event hook for observability (no-op by default).
    pub event_listener: Arc<dyn StoreEventListener>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            block_cache_bytes: ONE_GIBIBYTE,
            block_size_bytes: TWO_FIFTY_SIX_KIBIBYTES,
            bloom_filter_bits_per_key: BLOOM_FILTER_BITS_PER_KEY,
            create_if_missing: true,
            event_listener: noop_event_listener(),
        }
    }
}

/// The storage engine: a single ordered key space holding data entries,
/// field/series indexes, definition records, and the id counter.
///
/// A `Store` is safe to share across threads behind an `Arc`; writes and
/// queries take `&self`. Only the allocation of new field ids serializes
/// on an internal mutex.
pub struct Store {
    db: DB,
    registry: FieldRegistry,
    events: Arc<dyn StoreEventListener>,
}

impl Store {
    /// Opens (or creates) a store at `path` with default configuration.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, StoreConfig::default())
    }

    /// Opens (or creates) a store at `path`.
    ///
    /// Reads the persisted id counter into memory; an absent counter means
    /// no field id has ever been issued.
    ///
    /// # Errors
    /// Returns an error if the underlying store cannot be opened or the
    /// persisted counter is malformed.
    pub fn open_with_config(path: impl AsRef<Path>, config: StoreConfig) -> Result<Self> {
        let mut block_opts = BlockBasedOptions::default();
        block_opts.set_block_size(config.block_size_bytes);
        let cache = Cache::new_lru_cache(config.block_cache_bytes);
        block_opts.set_block_cache(&cache);
        if config.bloom_filter_bits_per_key > 0.0 {
            block_opts.set_bloom_filter(config.bloom_filter_bits_per_key, false);
        }

        let mut opts = Options::default();
        opts.create_if_missing(config.create_if_missing);
        opts.set_block_based_table_factory(&block_opts);

        let db = DB::open(&opts, path)?;
        let registry = FieldRegistry::load(&db, config.event_listener.clone())?;
        Ok(Store {
            db,
            registry,
            events: config.event_listener,
        })
    }

    /// Persists a batch of points for one series.
    ///
    /// All data entries of the batch, plus the definition records of any
    /// first-seen fields, commit atomically: a concurrent query sees either
    /// the whole write or none of it. Value slots holding `None` produce no
    /// entry.
    ///
    /// # Errors
    /// Returns an error if a name is invalid or the underlying store fails;
    /// nothing of the batch is visible in that case.
    pub fn write_series(&self, database: &str, series: &Series) -> Result<()> {
        let started = Instant::now();
        write::write_series(&self.db, &self.registry, database, series)?;

        let points = series.points.len() as u64;
        store_metrics::record_write(started.elapsed(), points);
        self.events.on_event(StoreEvent::SeriesWritten {
            database: database.to_string(),
            series: series.name.clone(),
            points,
        });
        Ok(())
    }

    /// Runs a range query and hands the assembled result to `yield_series`.
    ///
    /// Points are emitted in strictly descending `(timestamp, sequence)`
    /// order, with one value slot per requested field; fields without an
    /// entry at a row's `(timestamp, sequence)` are `None`. The start bound
    /// is exclusive, the end bound inclusive. The post-filter, if any, runs
    /// over the assembled result before it is yielded.
    ///
    /// # Errors
    /// Fails with `UnknownField` if any requested field has never been
    /// written (no partial results), with `Decode` if a stored value is
    /// malformed, and propagates any error returned by `yield_series`.
    pub fn query<F>(&self, database: &str, query: &Query, mut yield_series: F) -> Result<()>
    where
        F: FnMut(Series) -> Result<()>,
    {
        let started = Instant::now();
        keys::validate_name(database)?;
        keys::validate_name(&query.series)?;

        let fields =
            self.registry
                .resolve_for_query(&self.db, database, &query.series, &query.fields)?;
        let mut points = scan::scan_points(&self.db, &fields, query.start_time, query.end_time)?;
        query.apply_filter(&mut points);

        let result = Series {
            name: query.series.clone(),
            fields: fields.into_iter().map(|f| f.definition).collect(),
            points,
        };
        let points = result.points.len() as u64;
        yield_series(result)?;

        store_metrics::record_query(started.elapsed(), points);
        self.events.on_event(StoreEvent::ScanFinished {
            database: database.to_string(),
            series: query.series.clone(),
            points,
        });
        Ok(())
    }

    /// All series names of a database, in index order.
    pub fn list_series(&self, database: &str) -> Result<Vec<String>> {
        keys::validate_name(database)?;
        self.registry.list_series(&self.db, database)
    }

    /// All field names of a series with their ids, in index order.
    pub fn list_fields(&self, database: &str, series: &str) -> Result<Vec<(String, FieldId)>> {
        keys::validate_name(database)?;
        keys::validate_name(series)?;
        self.registry.list_fields(&self.db, database, series)
    }

    /// Flushes the underlying store's memtables to disk.
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Flushes and releases the store. Dropping a `Store` also releases it;
    /// `close` additionally surfaces flush errors.
    pub fn close(self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}
