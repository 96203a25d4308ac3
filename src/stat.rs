//! Running mean/variance estimator.
//!
//! [`Stat`] accumulates a sample count, sum, and sum of squares, and derives
//! mean, variance, standard deviation and standard error from them. The
//! count starts at a prior (1.0 by default), so the mean is defined before
//! the first sample arrives.

use std::fmt;

/// A running estimator over a stream of samples.
#[derive(Copy, Clone, Debug)]
pub struct Stat {
    sample_count: f32,
    sample_sum: f32,
    square_sample_sum: f32,
}

impl Stat {
    pub fn new() -> Self {
        Self {
            sample_count: 1.0,
            sample_sum: 0.0,
            square_sample_sum: 0.0,
        }
    }

    /// Discard all samples and restart with the given prior count.
    pub fn reset(&mut self, prior_sample_count: f32) {
        self.sample_count = prior_sample_count;
        self.sample_sum = 0.0;
        self.square_sample_sum = 0.0;
    }

    pub fn update(&mut self, sample: f32) {
        self.sample_count += 1.0;
        self.sample_sum += sample;
        self.square_sample_sum += sample * sample;
    }

    #[inline]
    pub fn mean(&self) -> f32 {
        self.sample_sum / self.sample_count
    }

    /// VX = E(X^2) - (EX)^2
    pub fn variance(&self) -> f32 {
        let m = self.mean();
        self.square_sample_sum / self.sample_count - m * m
    }

    pub fn std_dev(&self) -> f32 {
        self.variance().sqrt()
    }

    pub fn std_err(&self) -> f32 {
        (self.variance() / self.sample_count).sqrt()
    }

    #[inline]
    pub fn sample_count(&self) -> f32 {
        self.sample_count
    }
}

impl Default for Stat {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Stat {
    /// Fixed-width rendering: `+m.m(count)`, or an 11-character blank while
    /// fewer than two samples have been seen.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sample_count < 2.0 {
            write!(f, "           ")
        } else {
            write!(f, "{:+.1}({:5.0})", self.mean(), self.sample_count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_stat_has_defined_mean() {
        let s = Stat::new();
        assert_eq!(s.sample_count(), 1.0);
        assert_eq!(s.mean(), 0.0);
    }

    #[test]
    fn fresh_stat_formats_blank() {
        let s = Stat::new();
        let out = s.to_string();
        assert_eq!(out.len(), 11);
        assert!(out.chars().all(|c| c == ' '));
    }

    #[test]
    fn single_update() {
        let mut s = Stat::new();
        s.update(1.0);
        assert_eq!(s.sample_count(), 2.0);
        assert_eq!(s.mean(), 0.5);
        assert_eq!(s.variance(), 0.25);
        assert_eq!(s.std_dev(), 0.5);
    }

    #[test]
    fn updated_stat_formats_mean_and_count() {
        let mut s = Stat::new();
        s.update(1.0);
        assert_eq!(s.to_string(), "+0.5(    2)");
        s.update(-1.0);
        assert!(s.to_string().starts_with("+0.0") || s.to_string().starts_with("-0.0"));
    }

    #[test]
    fn variance_is_non_negative() {
        let mut s = Stat::new();
        for x in [1.0, -1.0, 1.0, 1.0, -1.0, 0.0, 1.0] {
            s.update(x);
            assert!(s.variance() >= -1e-6, "variance {} below zero", s.variance());
        }
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut s = Stat::new();
        s.update(1.0);
        s.update(-1.0);
        s.reset(1.0);
        assert_eq!(s.sample_count(), 1.0);
        assert_eq!(s.mean(), 0.0);
        assert_eq!(s.to_string().len(), 11);
    }

    #[test]
    fn std_err_shrinks_with_samples() {
        let mut s = Stat::new();
        for _ in 0..10 {
            s.update(1.0);
            s.update(-1.0);
        }
        let early = s.std_err();
        for _ in 0..100 {
            s.update(1.0);
            s.update(-1.0);
        }
        assert!(s.std_err() < early);
    }
}
