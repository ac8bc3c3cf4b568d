#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Phase Accumulator
=================

A phase accumulator plays a stored single-cycle table at any frequency.
It keeps a fractional read position (the phase, in table samples) and
moves it forward by a fixed step every output sample:

    increment = frequency * table_len / sample_rate

Example: a 1024-sample table at 48 kHz
  - 440 Hz   -> increment ≈ 9.39 table samples per output sample
  - 46.875 Hz -> increment = 1.0, every table entry played once per cycle

Output is the entry at the truncated phase, no interpolation between
neighbours. That truncation is a small, bounded quantization error that
grows with frequency / table_len.


Wrapping
--------

When the phase runs off the end of the table it wraps back to the start.
Two policies are available:

  ExtraStep (default)   phase = phase - len - 1
  Modulo                phase = phase - len

ExtraStep is the established behavior of this unit: the wrap removes one
unit more than a table length, so the phase can land in -1.0..0.0. Reads
there truncate toward zero and play entry 0, which holds the start of the
cycle a little longer. One full cycle therefore spans len + 1 phase units:

    len = 4, increment = 1.0
    ExtraStep:  0 1 2 3 | 0 0 1 2 3 | 0 0 1 2 3 | ...
    Modulo:     0 1 2 3 | 0 1 2 3 | 0 1 2 3 | ...

Either way the read index always lies inside the table. Increments of more
than one whole cycle per sample, and negative increments, wrap in a single
step to the same range.
*/

/// How the phase folds back into the table when it passes the end.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseWrap {
    /// `phase - len - 1`: phase range is `-1.0..len`.
    #[default]
    ExtraStep,
    /// `phase - len`: phase range is `0.0..len`.
    Modulo,
}

impl PhaseWrap {
    /// Lowest phase value this policy can produce.
    #[inline]
    pub fn floor(self) -> f32 {
        match self {
            Self::ExtraStep => -1.0,
            Self::Modulo => 0.0,
        }
    }

    /// Phase units covered by one full cycle.
    #[inline]
    pub fn period(self, len: f32) -> f32 {
        len - self.floor()
    }
}

pub struct PhaseAccumulator {
    phase: f32,
    len: f32,
    max_index: usize,
    /// table_len / sample_rate, fixed at construction
    scale: f32,
    wrap: PhaseWrap,
}

impl PhaseAccumulator {
    /// `table_len` must be non-zero and `sample_rate` positive; the
    /// oscillator validates both before building one.
    pub fn new(table_len: usize, sample_rate: f32, wrap: PhaseWrap) -> Self {
        let len = table_len as f32;
        Self {
            phase: 0.0,
            len,
            max_index: table_len.saturating_sub(1),
            scale: len / sample_rate,
            wrap,
        }
    }

    /// Per-sample phase step for `frequency`. Non-finite input stalls the
    /// phase instead of poisoning it.
    #[inline]
    pub fn increment(&self, frequency: f32) -> f32 {
        let increment = frequency * self.scale;
        if increment.is_finite() {
            increment
        } else {
            0.0
        }
    }

    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn wrap_mode(&self) -> PhaseWrap {
        self.wrap
    }

    /// Table index for the current phase, truncated toward zero.
    #[inline]
    pub fn index(&self) -> usize {
        // `as` saturates: phases in -1.0..0.0 read index 0
        (self.phase as usize).min(self.max_index)
    }

    #[inline]
    pub fn advance(&mut self, increment: f32) {
        self.phase += increment;

        let len = self.len;
        if self.phase >= len {
            self.phase = match self.wrap {
                PhaseWrap::ExtraStep => self.phase - len - 1.0,
                PhaseWrap::Modulo => self.phase - len,
            };
        }

        let floor = self.wrap.floor();
        if self.phase >= len || self.phase < floor {
            // more than one cycle per sample, or running backwards
            self.phase = floor + (self.phase - floor).rem_euclid(self.wrap.period(len));
            if self.phase >= len {
                self.phase = floor;
            }
        }
    }

    /// Read the table at the current phase, then step forward.
    ///
    /// # Panics
    ///
    /// If `table` is shorter than the `table_len` this accumulator was
    /// built for.
    #[inline]
    pub fn next_sample(&mut self, table: &[f32], increment: f32) -> f32 {
        let out = table[self.index()];
        self.advance(increment);
        out
    }

    /// Fill `out` with consecutive table reads at a constant frequency.
    ///
    /// Panics under the same condition as [`next_sample`](Self::next_sample).
    pub fn render(&mut self, table: &[f32], frequency: f32, out: &mut [f32]) {
        let increment = self.increment(frequency);
        for sample in out.iter_mut() {
            *sample = self.next_sample(table, increment);
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> Vec<f32> {
        (0..len).map(|i| i as f32).collect()
    }

    #[test]
    fn increment_scales_with_table_and_rate() {
        let acc = PhaseAccumulator::new(1024, 48_000.0, PhaseWrap::ExtraStep);
        assert!((acc.increment(46.875) - 1.0).abs() < 1e-6);
        assert!((acc.increment(440.0) - 440.0 * 1024.0 / 48_000.0).abs() < 1e-5);
        assert_eq!(acc.increment(f32::NAN), 0.0);
        assert_eq!(acc.increment(f32::INFINITY), 0.0);
    }

    #[test]
    fn extra_step_wrap_holds_first_entry() {
        let table = ramp(4);
        // increment 1.0: len 4, rate 4, frequency 1
        let mut acc = PhaseAccumulator::new(4, 4.0, PhaseWrap::ExtraStep);
        let mut out = [0.0f32; 14];
        acc.render(&table, 1.0, &mut out);

        assert_eq!(
            out,
            [0.0, 1.0, 2.0, 3.0, 0.0, 0.0, 1.0, 2.0, 3.0, 0.0, 0.0, 1.0, 2.0, 3.0]
        );
    }

    #[test]
    fn extra_step_matches_documented_formula() {
        let mut acc = PhaseAccumulator::new(8, 8.0, PhaseWrap::ExtraStep);
        acc.advance(6.5);
        acc.advance(2.0);
        // 8.5 - 8 - 1
        assert_eq!(acc.phase(), -0.5);
        assert_eq!(acc.index(), 0);
    }

    #[test]
    fn modulo_wrap_is_plain_period() {
        let table = ramp(4);
        let mut acc = PhaseAccumulator::new(4, 4.0, PhaseWrap::Modulo);
        let mut out = [0.0f32; 9];
        acc.render(&table, 1.0, &mut out);
        assert_eq!(out, [0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn phase_stays_in_range_for_any_increment() {
        for wrap in [PhaseWrap::ExtraStep, PhaseWrap::Modulo] {
            for &increment in &[0.3, 1.0, 7.77, 511.9, 1024.0, 1025.0, 5000.3, -3.2, -2048.5] {
                let mut acc = PhaseAccumulator::new(1024, 48_000.0, wrap);
                for _ in 0..2_000 {
                    acc.advance(increment);
                    assert!(
                        acc.phase() >= wrap.floor() && acc.phase() < 1024.0,
                        "{wrap:?} increment {increment}: phase {}",
                        acc.phase()
                    );
                    assert!(acc.index() < 1024);
                }
            }
        }
    }

    #[test]
    fn zero_frequency_holds_still() {
        let table = ramp(16);
        let mut acc = PhaseAccumulator::new(16, 48_000.0, PhaseWrap::ExtraStep);
        let mut out = [1.0f32; 32];
        acc.render(&table, 0.0, &mut out);
        assert!(out.iter().all(|&s| s == 0.0));
        assert_eq!(acc.phase(), 0.0);
    }

    #[test]
    #[should_panic]
    fn table_shorter_than_configured_panics() {
        let table = ramp(4);
        let mut acc = PhaseAccumulator::new(16, 16.0, PhaseWrap::Modulo);
        let mut out = [0.0f32; 16];
        acc.render(&table, 1.0, &mut out);
    }

    #[test]
    fn reset_returns_to_start() {
        let mut acc = PhaseAccumulator::new(16, 16.0, PhaseWrap::ExtraStep);
        acc.advance(5.5);
        acc.reset();
        assert_eq!(acc.phase(), 0.0);
    }
}
