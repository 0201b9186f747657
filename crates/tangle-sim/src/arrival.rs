//! Poisson arrival process with periodic milestones.

use rand::distributions::{Distribution, Open01};
use rand::Rng;

/// Attributes of the next arriving transaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrival {
    pub time: f64,
    pub is_milestone: bool,
}

/// Generates strictly increasing arrival times with exponentially
/// distributed gaps, flagging a milestone each time the clock passes the
/// running threshold.
///
/// Genesis is not produced here: it is the implicit arrival at time 0.
#[derive(Debug, Clone)]
pub struct ArrivalProcess {
    lambda: f64,
    beta: f64,
    last_time: f64,
    next_milestone: f64,
}

impl ArrivalProcess {
    /// `lambda > 0` is the arrival rate, `beta >= 0` the milestone interval
    /// (0 disables milestones).
    pub fn new(lambda: f64, beta: f64) -> Self {
        Self {
            lambda,
            beta,
            last_time: 0.0,
            next_milestone: beta,
        }
    }

    /// Start the clock at `time` instead of at genesis.
    #[must_use]
    pub fn starting_at(mut self, time: f64) -> Self {
        self.last_time = time;
        self
    }

    /// Arrival time of the most recent transaction.
    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    /// Time the next milestone is due after.
    pub fn next_milestone(&self) -> f64 {
        self.next_milestone
    }

    /// Draw the next arrival.
    pub fn next_arrival<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Arrival {
        let delay = exponential_delay(self.lambda, rng);
        self.advance(delay)
    }

    /// Advance the clock by a given gap.
    ///
    /// A gap too small to move the clock still yields the next representable
    /// time, so arrival times stay strictly increasing.
    pub fn advance(&mut self, delay: f64) -> Arrival {
        let mut time = self.last_time + delay;
        if time <= self.last_time {
            time = next_after(self.last_time);
        }
        let is_milestone = self.beta > 0.0 && time > self.next_milestone;
        if is_milestone {
            self.next_milestone += self.beta;
        }
        self.last_time = time;
        Arrival { time, is_milestone }
    }
}

/// Smallest `f64` greater than a finite, non-negative `t`.
fn next_after(t: f64) -> f64 {
    f64::from_bits(t.to_bits() + 1)
}

/// Inverse-CDF sample of an exponential distribution with rate `lambda`.
///
/// Draws from the open interval (0, 1), so the delay is strictly positive.
pub fn exponential_delay<R: Rng + ?Sized>(lambda: f64, rng: &mut R) -> f64 {
    let u: f64 = Open01.sample(rng);
    -u.ln() / lambda
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn times_strictly_increase() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut process = ArrivalProcess::new(2.0, 1.0);
        let mut last = 0.0;
        for _ in 0..1_000 {
            let arrival = process.next_arrival(&mut rng);
            assert!(arrival.time > last);
            last = arrival.time;
        }
    }

    #[test]
    fn mean_gap_is_inverse_rate() {
        let mut rng = StdRng::seed_from_u64(11);
        let lambda = 4.0;
        let samples = 20_000;
        let total: f64 = (0..samples).map(|_| exponential_delay(lambda, &mut rng)).sum();
        let mean = total / samples as f64;
        assert!((mean - 0.25).abs() < 0.02, "mean gap {}", mean);
    }

    #[test]
    fn milestone_threshold_advances_by_beta() {
        let mut process = ArrivalProcess::new(1.0, 1.0);
        assert!(!process.advance(0.5).is_milestone);
        assert!(process.advance(0.6).is_milestone); // 1.1 > 1.0
        assert_eq!(process.next_milestone(), 2.0);
        assert!(!process.advance(0.5).is_milestone); // 1.6
        assert!(process.advance(3.0).is_milestone); // 4.6 > 2.0
        // the threshold moves once per milestone, not per elapsed interval
        assert_eq!(process.next_milestone(), 3.0);
        assert!(process.advance(0.1).is_milestone);
    }

    #[test]
    fn negligible_gap_still_moves_the_clock() {
        let mut process = ArrivalProcess::new(1.0, 0.0).starting_at(1e6);
        let before = process.last_time();
        let arrival = process.advance(1e-300);
        assert!(arrival.time > before);
        assert!(process.advance(0.0).time > arrival.time);
    }

    #[test]
    fn clock_can_start_late() {
        let mut process = ArrivalProcess::new(1.0, 1.0).starting_at(2.5);
        let arrival = process.advance(0.1);
        assert!((arrival.time - 2.6).abs() < 1e-12);
        assert!(arrival.is_milestone);
    }

    #[test]
    fn zero_beta_disables_milestones() {
        let mut process = ArrivalProcess::new(1.0, 0.0);
        for _ in 0..10 {
            assert!(!process.advance(1.0).is_milestone);
        }
    }

    #[test]
    fn same_seed_same_arrivals() {
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut process = ArrivalProcess::new(1.5, 1.0);
            (0..20).map(|_| process.next_arrival(&mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(draw(3), draw(3));
        assert_ne!(draw(3), draw(4));
    }
}
