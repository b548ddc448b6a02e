//! Short-string pool.
//!
//! Strings of at most [`MAX_POOLED_LEN`] characters are shared through a
//! per-thread set so repeated dialogue fragments and identifiers reuse one
//! allocation. The pool stops admitting new entries at [`POOL_CAPACITY`];
//! strings that miss the pool are allocated normally. Pooling never changes
//! equality.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashSet;

/// Longest string (in chars) eligible for pooling.
pub const MAX_POOLED_LEN: usize = 16;

/// Maximum number of distinct pooled strings per thread.
pub const POOL_CAPACITY: usize = 4096;

thread_local! {
    static POOL: RefCell<FxHashSet<Rc<str>>> = RefCell::new(FxHashSet::default());
}

/// Return a shared handle for `s`, pooled when eligible.
pub fn intern(s: &str) -> Rc<str> {
    if s.chars().count() > MAX_POOLED_LEN {
        return Rc::from(s);
    }
    POOL.with(|pool| {
        let mut pool = pool.borrow_mut();
        if let Some(existing) = pool.get(s) {
            return Rc::clone(existing);
        }
        let fresh: Rc<str> = Rc::from(s);
        if pool.len() < POOL_CAPACITY {
            pool.insert(Rc::clone(&fresh));
        }
        fresh
    })
}

/// Number of strings currently pooled on this thread.
pub fn pooled_count() -> usize {
    POOL.with(|pool| pool.borrow().len())
}
