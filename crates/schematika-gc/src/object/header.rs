//! Object Header — per-allocation metadata for the single-threaded collector.
//!
//! The original collector this design is drawn from packs mark bits, a
//! forwarding address, and an age into one `AtomicUsize` so concurrent
//! marker threads can update it with CAS loops. With exactly one mutator
//! and no concurrent collector
//! (§5), none of that is needed: the fields below are plain `Cell`s, and
//! "forwarded" is represented the ordinary way a Cheney collector represents
//! it — by overwriting the header's `typeseq` word with a sentinel and
//! storing the new address in `forward`.

use std::cell::Cell;

/// Sentinel stored in `typeseq` once an object has been forwarded to
/// to-space; the real typeseq is recoverable from the forwarded copy.
const FORWARDED_TYPESEQ: u32 = u32::MAX;

/// Every GC-managed allocation starts with this header.
#[repr(C)]
pub struct ObjectHeader {
    /// RTTI tag identifying which facet-registered representation this
    /// allocation holds (§4.A) — `FORWARDED_TYPESEQ` once relocated.
    typeseq: Cell<u32>,
    /// Age in nursery collections survived; saturates at `tenure_threshold`
    /// and then the object is promoted (§4.D).
    age: Cell<u8>,
    /// Total size in bytes, header included.
    size: usize,
    /// Forwarding address once `typeseq == FORWARDED_TYPESEQ`.
    forward: Cell<usize>,
}

impl ObjectHeader {
    pub fn new(typeseq: u32, size: usize) -> Self {
        Self {
            typeseq: Cell::new(typeseq),
            age: Cell::new(0),
            size,
            forward: Cell::new(0),
        }
    }

    pub fn typeseq(&self) -> Option<u32> {
        let t = self.typeseq.get();
        if t == FORWARDED_TYPESEQ {
            None
        } else {
            Some(t)
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn age(&self) -> u8 {
        self.age.get()
    }

    pub fn bump_age(&self) -> u8 {
        let a = self.age.get().saturating_add(1);
        self.age.set(a);
        a
    }

    pub fn is_forwarded(&self) -> bool {
        self.typeseq.get() == FORWARDED_TYPESEQ
    }

    pub fn forwarding_address(&self) -> Option<usize> {
        self.is_forwarded().then(|| self.forward.get())
    }

    /// Record that this object has been copied to `new_addr`; the original
    /// slot becomes a forwarding pointer read during the trace-and-drain
    /// pass (§4.D).
    pub fn set_forwarded(&self, new_addr: usize) {
        self.forward.set(new_addr);
        self.typeseq.set(FORWARDED_TYPESEQ);
    }
}
