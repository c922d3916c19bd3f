//! Process-wide single instances behind a once-initialized accessor.
//!
//! `OnceLock` runs the initializer exactly once even when several threads
//! race on first access, so every caller ends up with the same `&'static`.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use tracing::debug;

use crate::core::config::GlobalSettings;
use crate::core::error::Result;
use crate::core::narrator::Narrator;

static COUNTER: OnceLock<Counter> = OnceLock::new();
static SINGLETON: OnceLock<Singleton> = OnceLock::new();

/// A shared counter. There is no public constructor; use `Counter::instance`.
#[derive(Debug)]
pub struct Counter {
    count: AtomicI64,
}

impl Counter {
    pub fn instance() -> &'static Counter {
        COUNTER.get_or_init(|| {
            debug!("initializing counter singleton");
            Counter {
                count: AtomicI64::new(0),
            }
        })
    }

    /// Increments and returns the new value.
    pub fn increment(&self) -> i64 {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Decrements and returns the new value.
    pub fn decrement(&self) -> i64 {
        self.count.fetch_sub(1, Ordering::SeqCst) - 1
    }

    pub fn value(&self) -> i64 {
        self.count.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct Singleton {
    calls: AtomicUsize,
}

impl Singleton {
    pub fn instance() -> &'static Singleton {
        SINGLETON.get_or_init(|| Singleton {
            calls: AtomicUsize::new(0),
        })
    }

    /// Stand-in for whatever work the shared instance does; returns how many
    /// times it has run.
    pub fn some_business_logic(&self) -> usize {
        self.calls.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Identity, not value, equality.
pub fn is_same_instance<T>(a: &T, b: &T) -> bool {
    std::ptr::eq(a, b)
}

pub fn demonstrate(narrator: &mut dyn Narrator, _settings: &GlobalSettings) -> Result<()> {
    narrator.heading("☝️ Singleton");

    let s1 = Singleton::instance();
    let s2 = Singleton::instance();
    if is_same_instance(s1, s2) {
        narrator.line("Singleton works: both handles refer to the same instance.");
    } else {
        narrator.line("Singleton failed: the handles refer to different instances.");
    }

    let c1 = Counter::instance();
    let c2 = Counter::instance();
    narrator.line(&format!("c1 increment: {}", c1.increment()));
    narrator.line(&format!("c2 increment: {}", c2.increment()));
    narrator.line(&format!("c1 value: {}", c1.value()));
    narrator.line(&format!("c2 value: {}", c2.value()));
    narrator.line(&format!("c1 is c2: {}", is_same_instance(c1, c2)));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_accessors_return_the_same_instance() {
        assert!(is_same_instance(Counter::instance(), Counter::instance()));
        assert!(is_same_instance(Singleton::instance(), Singleton::instance()));
    }

    // Demo runs elsewhere in this binary also bump the counter, so only
    // ordering is asserted here.
    #[test]
    fn test_counter_state_is_shared_between_handles() {
        let a = Counter::instance();
        let b = Counter::instance();

        let after = a.increment();
        assert!(b.value() >= after);
        assert!(b.increment() > after);
        assert!(a.value() > after);
    }

    #[test]
    fn test_concurrent_first_access_yields_one_instance() {
        static FRESH: OnceLock<Counter> = OnceLock::new();
        static INITS: AtomicUsize = AtomicUsize::new(0);
        const THREADS: usize = 8;

        let barrier = Arc::new(Barrier::new(THREADS));
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let counter = FRESH.get_or_init(|| {
                        INITS.fetch_add(1, Ordering::SeqCst);
                        Counter {
                            count: AtomicI64::new(0),
                        }
                    });
                    counter as *const Counter as usize
                })
            })
            .collect();
        let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(INITS.load(Ordering::SeqCst), 1);
        assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn test_business_logic_counts_calls_on_shared_instance() {
        let before = Singleton::instance().some_business_logic();
        let after = Singleton::instance().some_business_logic();
        assert!(after > before);
    }
}
