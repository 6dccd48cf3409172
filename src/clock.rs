use std::sync::Arc;
use std::time::SystemTime;

/// Source of the current wall-clock time
///
/// Every open/closed decision goes through this, so tests can move
/// time forward instead of sleeping past an auction's end.
pub trait Clock {
    fn now(&self) -> SystemTime;
}

pub type SharedClock = Arc<dyn Clock + Send + Sync + 'static>;

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }

    pub fn new_shared() -> SharedClock {
        Arc::new(Self::new())
    }
}

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A clock that only moves when told to
#[cfg(test)]
#[derive(Debug)]
pub struct ManualClock {
    now: parking_lot::Mutex<SystemTime>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start: SystemTime) -> Self {
        Self {
            now: parking_lot::Mutex::new(start),
        }
    }

    pub fn new_shared(start: SystemTime) -> Arc<Self> {
        Arc::new(Self::new(start))
    }

    pub fn advance(&self, by: std::time::Duration) {
        *self.now.lock() += by;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        *self.now.lock()
    }
}
