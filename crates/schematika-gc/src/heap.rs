//! The single-threaded generational copying collector itself (§4.D).
//!
//! The original allocator this design is drawn from moves raw bytes between
//! regions addressed by pointer arithmetic, which is how a concurrent
//! mark-compact collector with TLABs has to work. This collector has one
//! mutator and no background threads, so it takes the simpler
//! *handle table* shape instead: a [`Ptr`] is a stable logical handle, not a
//! raw address, and a collection cycle only ever rewrites the handle
//! table — no embedded-pointer fixup pass is needed, because nothing
//! outside the table ever holds a raw slot index.
//!
//! This is still a faithful generational Cheney collector: objects are
//! scavenged out of the nursery by tracing from roots, survivors that have
//! been copied `tenure_threshold` times are promoted, and a full heap
//! (`collect_major`) walks both generations together once the tenured arena
//! approaches its limit.

use std::any::Any;
use std::collections::HashSet;

use crate::config::GcConfig;
use crate::error::{GcError, GcResult};
use crate::object::header::ObjectHeader;
use crate::stats::GcStats;

/// A stable, generation-agnostic handle to a GC-managed object.
///
/// Cloning a `Ptr` is cheap and never needs fixing up after a collection —
/// only the handle table entry it indexes into changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ptr(u32);

/// Anything the collector can store must say what it points to, so tracing
/// can follow the object graph without the collector knowing the concrete
/// representation (facet-style, §4.A: the collector only needs the
/// `GcObject` facet, not the whole type).
pub trait GcObject: Any {
    /// All outgoing `Ptr`s reachable directly from this object (§4.D: "trace
    /// from roots").
    fn children(&self) -> Vec<Ptr>;

    fn as_any(&self) -> &dyn Any;
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Generation {
    Nursery,
    Tenured,
}

struct PhysicalLoc {
    gen: Generation,
    index: u32,
}

struct Slot {
    header: ObjectHeader,
    obj: Box<dyn GcObject>,
}

/// Process-local generational heap.
pub struct Heap {
    config: GcConfig,
    stats: GcStats,
    handles: Vec<Option<PhysicalLoc>>,
    free_handles: Vec<u32>,
    nursery: Vec<Slot>,
    nursery_bytes: usize,
    tenured: Vec<Slot>,
    tenured_bytes: usize,
    /// Tenured handles known to point at nursery objects — scavenge roots
    /// maintained by [`Heap::write_barrier`] (§4.D write barrier).
    remembered: HashSet<u32>,
}

impl Heap {
    pub fn new(config: GcConfig) -> GcResult<Self> {
        config.validate().map_err(|e| GcError::HeapInitialization(e.to_string()))?;
        Ok(Self {
            config,
            stats: GcStats::default(),
            handles: Vec::new(),
            free_handles: Vec::new(),
            nursery: Vec::new(),
            nursery_bytes: 0,
            tenured: Vec::new(),
            tenured_bytes: 0,
            remembered: HashSet::new(),
        })
    }

    pub fn stats(&self) -> &GcStats {
        &self.stats
    }

    fn new_handle(&mut self, loc: PhysicalLoc) -> Ptr {
        if let Some(idx) = self.free_handles.pop() {
            self.handles[idx as usize] = Some(loc);
            Ptr(idx)
        } else {
            let idx = self.handles.len() as u32;
            self.handles.push(Some(loc));
            Ptr(idx)
        }
    }

    /// Allocate a fresh nursery object, triggering a nursery (and if needed
    /// major) collection first if the nursery is full. `roots` are the
    /// currently-live handles the caller holds outside the heap (interpreter
    /// frame locals, globals) — passed in fresh at each call site since the
    /// collector has no stack-scanning capability of its own (§4.D: roots
    /// come from the interpreter's frame stack and global environment, not
    /// from scanning machine registers).
    pub fn alloc<T: GcObject + 'static>(
        &mut self,
        typeseq: u32,
        size: usize,
        obj: T,
        roots: &[Ptr],
    ) -> GcResult<Ptr> {
        if self.nursery_bytes + size > self.config.nursery_bytes {
            self.collect_nursery(roots);
        }
        if self.nursery_bytes + size > self.config.nursery_bytes {
            return Err(GcError::OutOfMemory {
                requested: size,
                available: self.config.nursery_bytes.saturating_sub(self.nursery_bytes),
            });
        }

        let index = self.nursery.len() as u32;
        self.nursery.push(Slot { header: ObjectHeader::new(typeseq, size), obj: Box::new(obj) });
        self.nursery_bytes += size;
        self.stats.object_stats.record_alloc(size);
        Ok(self.new_handle(PhysicalLoc { gen: Generation::Nursery, index }))
    }

    pub fn get(&self, ptr: Ptr) -> Option<&dyn GcObject> {
        let loc = self.handles.get(ptr.0 as usize)?.as_ref()?;
        let slot = match loc.gen {
            Generation::Nursery => self.nursery.get(loc.index as usize),
            Generation::Tenured => self.tenured.get(loc.index as usize),
        }?;
        Some(slot.obj.as_ref())
    }

    pub fn header(&self, ptr: Ptr) -> Option<&ObjectHeader> {
        let loc = self.handles.get(ptr.0 as usize)?.as_ref()?;
        let slot = match loc.gen {
            Generation::Nursery => self.nursery.get(loc.index as usize),
            Generation::Tenured => self.tenured.get(loc.index as usize),
        }?;
        Some(&slot.header)
    }

    fn generation_of(&self, ptr: Ptr) -> Option<Generation> {
        self.handles.get(ptr.0 as usize)?.as_ref().map(|l| l.gen)
    }

    /// Write barrier (§4.D, §5): call whenever a tenured object's field is
    /// mutated to point at a (possibly nursery) object, so the next
    /// nursery scavenge knows to trace from it without walking the whole
    /// tenured generation.
    pub fn write_barrier(&mut self, container: Ptr, child: Ptr) {
        if self.generation_of(container) == Some(Generation::Tenured)
            && self.generation_of(child) == Some(Generation::Nursery)
        {
            self.remembered.insert(container.0);
        }
    }

    /// Scavenge the nursery: trace from `extra_roots` plus the remembered
    /// set, copy survivors into a fresh nursery vector (promoting anything
    /// that has reached `tenure_threshold`), and drop everything else.
    pub fn collect_nursery(&mut self, extra_roots: &[Ptr]) {
        let mut worklist: Vec<Ptr> = extra_roots.to_vec();
        for &idx in &self.remembered {
            if let Some(loc) = &self.handles[idx as usize] {
                if loc.gen == Generation::Tenured {
                    worklist.extend(self.tenured[loc.index as usize].obj.children());
                }
            }
        }

        let mut new_nursery: Vec<Slot> = Vec::new();
        let mut new_nursery_bytes = 0usize;
        let mut promoted = 0u64;
        let mut copied_bytes = 0usize;
        let mut seen: HashSet<u32> = HashSet::new();

        while let Some(ptr) = worklist.pop() {
            if !seen.insert(ptr.0) {
                continue;
            }
            let Some(loc) = self.handles[ptr.0 as usize].as_ref() else { continue };
            if loc.gen != Generation::Nursery {
                // Already tenured or already scavenged this cycle; still
                // need to trace through it for newly-discovered roots.
                if loc.gen == Generation::Tenured {
                    worklist.extend(self.tenured[loc.index as usize].obj.children());
                }
                continue;
            }

            let index = loc.index;
            let slot = std::mem::replace(
                &mut self.nursery[index as usize],
                Slot { header: ObjectHeader::new(0, 0), obj: Box::new(Tombstone) },
            );
            let new_age = slot.header.bump_age();
            worklist.extend(slot.obj.children());
            copied_bytes += slot.header.size();

            if new_age >= self.config.tenure_threshold {
                let tenured_index = self.tenured.len() as u32;
                self.tenured_bytes += slot.header.size();
                self.tenured.push(slot);
                self.handles[ptr.0 as usize] =
                    Some(PhysicalLoc { gen: Generation::Tenured, index: tenured_index });
                promoted += 1;
            } else {
                let new_index = new_nursery.len() as u32;
                new_nursery_bytes += slot.header.size();
                new_nursery.push(slot);
                self.handles[ptr.0 as usize] =
                    Some(PhysicalLoc { gen: Generation::Nursery, index: new_index });
            }
        }

        // Anything left pointing at the old nursery was unreachable.
        for h in self.handles.iter_mut() {
            if let Some(loc) = h {
                if loc.gen == Generation::Nursery {
                    *h = None;
                }
            }
        }
        self.free_handles
            .extend((0..self.handles.len() as u32).filter(|i| self.handles[*i as usize].is_none()));

        self.nursery = new_nursery;
        self.nursery_bytes = new_nursery_bytes;
        self.remembered.clear();
        self.stats.record_nursery_collection(copied_bytes);
        self.stats.record_promotion(promoted);

        if self.config.verbose {
            tracing::debug!(
                "nursery collection: copied {copied_bytes} bytes, promoted {promoted} objects"
            );
        }

        if self.tenured_bytes > self.config.max_tenured_bytes / 2 {
            self.collect_major(extra_roots);
        }
    }

    /// Full-heap collection: trace from `extra_roots` across both
    /// generations and rebuild the tenured arena, dropping unreachable
    /// tenured objects too (§4.D: the tenured generation is still a moving
    /// generation, not a permanent arena).
    pub fn collect_major(&mut self, extra_roots: &[Ptr]) {
        let mut worklist: Vec<Ptr> = extra_roots.to_vec();
        let mut new_tenured: Vec<Slot> = Vec::new();
        let mut new_tenured_bytes = 0usize;
        let mut seen: HashSet<u32> = HashSet::new();
        let mut copied_bytes = 0usize;

        while let Some(ptr) = worklist.pop() {
            if !seen.insert(ptr.0) {
                continue;
            }
            let Some(loc) = self.handles[ptr.0 as usize].as_ref() else { continue };
            match loc.gen {
                Generation::Nursery => {
                    worklist.extend(self.nursery[loc.index as usize].obj.children());
                }
                Generation::Tenured => {
                    let index = loc.index;
                    let slot = std::mem::replace(
                        &mut self.tenured[index as usize],
                        Slot { header: ObjectHeader::new(0, 0), obj: Box::new(Tombstone) },
                    );
                    worklist.extend(slot.obj.children());
                    copied_bytes += slot.header.size();
                    let new_index = new_tenured.len() as u32;
                    new_tenured_bytes += slot.header.size();
                    new_tenured.push(slot);
                    self.handles[ptr.0 as usize] =
                        Some(PhysicalLoc { gen: Generation::Tenured, index: new_index });
                }
            }
        }

        for h in self.handles.iter_mut() {
            if let Some(loc) = h {
                if loc.gen == Generation::Tenured {
                    *h = None;
                }
            }
        }
        self.free_handles
            .extend((0..self.handles.len() as u32).filter(|i| self.handles[*i as usize].is_none()));

        self.tenured = new_tenured;
        self.tenured_bytes = new_tenured_bytes;
        self.remembered.clear();
        self.stats.record_major_collection(copied_bytes);

        if self.config.verbose {
            tracing::info!("major collection: {copied_bytes} bytes retained in tenured generation");
        }
    }
}

/// Placeholder left in a slot mid-scavenge; never observed by the mutator
/// since every live handle is repointed before `collect_nursery` returns.
struct Tombstone;
impl GcObject for Tombstone {
    fn children(&self) -> Vec<Ptr> {
        Vec::new()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}
