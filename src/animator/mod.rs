use std::fmt;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::layout::{Em, CLOUD_SLOTS};

pub const JITTER_INTERVAL: Duration = Duration::from_millis(1_000);
pub const JITTER_MAGNITUDE: Em = Em(2.0);
/// Primary and secondary cloud layers share the same six slots.
pub const CLOUD_ITEMS: usize = CLOUD_SLOTS * 2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JitterOffset {
    pub dx: Em,
    pub dy: Em,
}

impl JitterOffset {
    pub const ZERO: JitterOffset = JitterOffset {
        dx: Em::ZERO,
        dy: Em::ZERO,
    };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self {
            dx: Em(dx),
            dy: Em(dy),
        }
    }
}

/// Supplies per-axis drift offsets.
pub trait JitterSource {
    fn next_offset(&mut self) -> Em;
}

/// Picks `+JITTER_MAGNITUDE` or `-JITTER_MAGNITUDE` with equal odds.
pub struct RandomJitter<R = StdRng> {
    rng: R,
}

impl RandomJitter<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomJitter<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> JitterSource for RandomJitter<R> {
    fn next_offset(&mut self) -> Em {
        if self.rng.gen_bool(0.5) {
            JITTER_MAGNITUDE
        } else {
            -JITTER_MAGNITUDE
        }
    }
}

impl<R> fmt::Debug for RandomJitter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomJitter").finish_non_exhaustive()
    }
}

/// Replays a fixed sequence, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct SequenceJitter {
    values: Vec<Em>,
    cursor: usize,
}

impl SequenceJitter {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().map(Em).collect(),
            cursor: 0,
        }
    }
}

impl JitterSource for SequenceJitter {
    fn next_offset(&mut self) -> Em {
        let Some(value) = self.values.get(self.cursor % self.values.len().max(1)) else {
            return Em::ZERO;
        };
        self.cursor = self.cursor.wrapping_add(1);
        *value
    }
}

/// Current drift offset of each cloud item, primary layer first.
#[derive(Debug, Clone, PartialEq)]
pub struct JitterField {
    offsets: [JitterOffset; CLOUD_ITEMS],
    ticks: u64,
}

impl JitterField {
    pub fn new() -> Self {
        Self {
            offsets: [JitterOffset::ZERO; CLOUD_ITEMS],
            ticks: 0,
        }
    }

    pub fn tick(&mut self, source: &mut dyn JitterSource) {
        for offset in &mut self.offsets {
            let dx = source.next_offset();
            let dy = source.next_offset();
            *offset = JitterOffset { dx, dy };
        }
        self.ticks = self.ticks.saturating_add(1);
        tracing::trace!(ticks = self.ticks, "cloud jitter tick");
    }

    /// Offset for `item`; out-of-range indices drift nowhere.
    pub fn offset(&self, item: usize) -> JitterOffset {
        self.offsets.get(item).copied().unwrap_or(JitterOffset::ZERO)
    }

    pub fn offsets(&self) -> &[JitterOffset] {
        &self.offsets
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for JitterField {
    fn default() -> Self {
        Self::new()
    }
}
