//! Bounded memoization of height samples keyed by integer cell.
//!
//! Entries are never invalidated (the terrain is static per seed); the cache
//! only bounds its own memory with a two-generation scheme. Because every
//! entry stores the height at its cell's integer corner, a lookup returns the
//! same value whether it hits, misses, or was evicted in between.

use std::mem;

use rustc_hash::FxHashMap;

use crate::height_field::{HeightField, HeightQuery};

/// Pack the integer cell containing `(x, z)` into one key: the floored x in
/// the high 32 bits, the floored z in the low 32 bits.
#[inline]
pub fn cell_key(x: f64, z: f64) -> u64 {
    let (ix, iz) = cell_of(x, z);
    ((ix as u32 as u64) << 32) | iz as u32 as u64
}

#[inline]
fn cell_of(x: f64, z: f64) -> (i32, i32) {
    (x.floor() as i32, z.floor() as i32)
}

/// Two-generation height cache.
///
/// New entries go into the live generation. Once it holds half the
/// capacity, it is retired wholesale and the previous retired generation is
/// dropped, so at most `capacity` entries are resident. A hit in the retired
/// generation promotes the entry back into the live one.
#[derive(Debug)]
pub struct HeightCache {
    live: FxHashMap<u64, f64>,
    retired: FxHashMap<u64, f64>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl HeightCache {
    pub const DEFAULT_CAPACITY: usize = 1 << 20;

    /// Create a cache holding at most `capacity` entries (minimum 2).
    pub fn new(capacity: usize) -> Self {
        Self {
            live: FxHashMap::default(),
            retired: FxHashMap::default(),
            capacity: capacity.max(2),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up the cell containing `(x, z)`, computing it with `compute`
    /// (called with the cell's integer corner) on a miss.
    pub fn get_or_insert_with(
        &mut self,
        x: f64,
        z: f64,
        compute: impl FnOnce(f64, f64) -> f64,
    ) -> f64 {
        let key = cell_key(x, z);
        if let Some(&h) = self.live.get(&key) {
            self.hits += 1;
            return h;
        }
        let h = match self.retired.remove(&key) {
            Some(h) => {
                self.hits += 1;
                h
            }
            None => {
                self.misses += 1;
                let (ix, iz) = cell_of(x, z);
                compute(ix as f64, iz as f64)
            }
        };
        self.insert_live(key, h);
        h
    }

    fn insert_live(&mut self, key: u64, h: f64) {
        self.live.insert(key, h);
        if self.live.len() >= self.capacity / 2 {
            self.retired = mem::take(&mut self.live);
        }
    }

    /// Number of resident entries across both generations.
    pub fn len(&self) -> usize {
        self.live.len() + self.retired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.live.clear();
        self.retired.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl Default for HeightCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// A [`HeightField`] paired with its [`HeightCache`].
pub struct CachedHeightField {
    field: HeightField,
    cache: HeightCache,
}

impl CachedHeightField {
    pub fn new(field: HeightField, cache: HeightCache) -> Self {
        Self { field, cache }
    }

    /// Memoized height of the integer cell containing `(x, z)`.
    #[inline]
    pub fn height(&mut self, x: f64, z: f64) -> f64 {
        let field = &self.field;
        self.cache
            .get_or_insert_with(x, z, |cx, cz| field.height_at(cx, cz))
    }

    pub fn field(&self) -> &HeightField {
        &self.field
    }

    pub fn cache(&self) -> &HeightCache {
        &self.cache
    }
}
