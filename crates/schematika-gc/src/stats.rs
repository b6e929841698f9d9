//! Collection statistics — grounded in `xo-alloc`'s `GcStatistics` /
//! `ObjectStatistics`, which track allocation counts/bytes and per-cycle
//! survivor counts separately from the collector's hot path. Rebuilt here
//! as plain `Cell`-backed counters (single mutator, no atomics needed) with
//! a `Display` impl feeding the CLI's `--gc-stats` flag (§6).

use std::cell::Cell;
use std::fmt;

#[derive(Default)]
pub struct ObjectStatistics {
    allocations: Cell<u64>,
    bytes_allocated: Cell<u64>,
    survivors: Cell<u64>,
    bytes_survived: Cell<u64>,
}

impl ObjectStatistics {
    pub fn record_alloc(&self, bytes: usize) {
        self.allocations.set(self.allocations.get() + 1);
        self.bytes_allocated.set(self.bytes_allocated.get() + bytes as u64);
    }

    pub fn record_survivor(&self, bytes: usize) {
        self.survivors.set(self.survivors.get() + 1);
        self.bytes_survived.set(self.bytes_survived.get() + bytes as u64);
    }

    pub fn allocations(&self) -> u64 {
        self.allocations.get()
    }

    pub fn bytes_allocated(&self) -> u64 {
        self.bytes_allocated.get()
    }
}

#[derive(Default)]
pub struct GcStats {
    pub nursery_collections: Cell<u64>,
    pub major_collections: Cell<u64>,
    pub bytes_copied: Cell<u64>,
    pub objects_promoted: Cell<u64>,
    pub object_stats: ObjectStatistics,
}

impl GcStats {
    pub fn record_nursery_collection(&self, bytes_copied: usize) {
        self.nursery_collections.set(self.nursery_collections.get() + 1);
        self.bytes_copied.set(self.bytes_copied.get() + bytes_copied as u64);
    }

    pub fn record_major_collection(&self, bytes_copied: usize) {
        self.major_collections.set(self.major_collections.get() + 1);
        self.bytes_copied.set(self.bytes_copied.get() + bytes_copied as u64);
    }

    pub fn record_promotion(&self, count: u64) {
        self.objects_promoted.set(self.objects_promoted.get() + count);
    }
}

impl fmt::Display for GcStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "gc stats:")?;
        writeln!(f, "  nursery collections : {}", self.nursery_collections.get())?;
        writeln!(f, "  major collections    : {}", self.major_collections.get())?;
        writeln!(f, "  objects promoted     : {}", self.objects_promoted.get())?;
        writeln!(f, "  bytes copied total   : {}", self.bytes_copied.get())?;
        writeln!(f, "  allocations          : {}", self.object_stats.allocations())?;
        write!(f, "  bytes allocated total: {}", self.object_stats.bytes_allocated())
    }
}
