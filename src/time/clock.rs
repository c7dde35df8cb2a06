use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

/// A monotonic millisecond clock.
///
/// The scheduler only ever looks at differences between two readings,
/// so the origin is arbitrary.
pub trait Clock {
    /// Milliseconds since this clock's origin
    fn now_millis(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

/// A [`Clock`] backed by [`Instant`], starting at zero when created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a new clock
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        saturating_millis(self.origin.elapsed())
    }
}

fn saturating_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[doc = r#"
A clock that only moves when told to.

Clones share the same time, so one handle can be given to a
[`Player`](crate::player::Player) while another drives it.

# Example
```rust
# use midix_player::prelude::*;
let clock = ManualClock::new();
let handle = clock.clone();

handle.advance(250);
assert_eq!(clock.now_millis(), 250);
```
"#]
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// A clock reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to an absolute reading. May move backwards.
    pub fn set(&self, millis: u64) {
        self.now.store(millis, Ordering::Relaxed);
    }

    /// Move forward by `millis`
    pub fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}
