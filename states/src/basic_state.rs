use std::any::Any;

use chrono::{DateTime, Utc};

use crate::State;

/// Wall clock as seen by the UI.
///
/// Stored as a state so tests can pin the time commands observe.
#[derive(Debug, Clone, Copy)]
pub struct Time {
    now: DateTime<Utc>,
}

impl Default for Time {
    fn default() -> Self {
        Self { now: Utc::now() }
    }
}

impl Time {
    pub fn fixed(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn tick(&mut self) {
        self.now = Utc::now();
    }
}

impl State for Time {
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(*self))
    }
}

impl AsMut<DateTime<Utc>> for Time {
    fn as_mut(&mut self) -> &mut DateTime<Utc> {
        &mut self.now
    }
}

impl AsRef<DateTime<Utc>> for Time {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.now
    }
}
