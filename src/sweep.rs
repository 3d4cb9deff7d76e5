//! Triangle-wave oscillator driving the graduation angle between the two
//! ends of the arc. One external tick per frame, no easing.

use std::f64::consts::PI;

/// Which way the sweep is currently moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Oscillates an angle between `min` and `max`, reversing at each bound.
///
/// Each call to [`Sweep::step`] applies the step with the current direction's
/// sign, then evaluates the turnaround guards, so the angle never leaves
/// `[min - step, max + step]`.
#[derive(Debug, Clone)]
pub struct Sweep {
    angle: f64,
    direction: Direction,
    step: f64,
    min: f64,
    max: f64,
}

impl Sweep {
    /// A sweep over the half-circle `[0, pi]`, starting at 0 moving forward.
    pub fn new(step: f64) -> Self {
        Self {
            angle: 0.0,
            direction: Direction::Forward,
            step,
            min: 0.0,
            max: PI,
        }
    }

    /// Starts from an arbitrary angle instead of the lower bound.
    pub fn starting_at(mut self, angle: f64) -> Self {
        self.angle = angle.clamp(self.min, self.max);
        self
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_step(&mut self, step: f64) {
        self.step = step.abs();
    }

    /// Moves the oscillator to `angle` without changing direction, so a sweep
    /// can resume from wherever an external controller left the graduation.
    pub fn seek(&mut self, angle: f64) {
        self.angle = angle.clamp(self.min, self.max);
    }

    /// Advances one tick and returns the new angle.
    pub fn step(&mut self) -> f64 {
        match self.direction {
            Direction::Forward => self.angle += self.step,
            Direction::Backward => self.angle -= self.step,
        }
        if self.angle > self.max {
            self.direction = Direction::Backward;
        } else if self.angle < self.min {
            self.direction = Direction::Forward;
        }
        self.angle
    }
}

impl Iterator for Sweep {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.step())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_moves_forward_by_the_step() {
        let mut sweep = Sweep::new(0.01);
        assert_eq!(sweep.direction(), Direction::Forward);
        let angle = sweep.step();
        assert!((angle - 0.01).abs() < 1e-12);
        assert_eq!(sweep.direction(), Direction::Forward);
    }

    #[test]
    fn reverses_after_crossing_the_upper_bound() {
        let mut sweep = Sweep::new(0.01).starting_at(PI);
        // already at the bound: one more forward step crosses it
        sweep.step();
        assert_eq!(sweep.direction(), Direction::Backward);
        let before = sweep.angle();
        let after = sweep.step();
        assert!(after < before);
    }

    #[test]
    fn reverses_after_crossing_the_lower_bound() {
        let mut sweep = Sweep::new(0.25);
        // forward until the sweep turns around at the top
        while sweep.direction() == Direction::Forward {
            sweep.step();
        }
        // backward until it crosses the lower bound
        while sweep.direction() == Direction::Backward {
            sweep.step();
        }
        assert_eq!(sweep.direction(), Direction::Forward);
        assert!(sweep.angle() < 0.0);
    }

    #[test]
    fn oscillation_stays_bounded() {
        let step = 0.01;
        let mut sweep = Sweep::new(step);
        for _ in 0..10_000 {
            let angle = sweep.step();
            assert!(angle >= -step - 1e-12 && angle <= PI + step + 1e-12);
        }
    }

    #[test]
    fn oscillation_actually_reverses() {
        let mut sweep = Sweep::new(0.1);
        let mut saw_backward = false;
        let mut saw_forward_again = false;
        for _ in 0..200 {
            sweep.step();
            match sweep.direction() {
                Direction::Backward => saw_backward = true,
                Direction::Forward if saw_backward => saw_forward_again = true,
                _ => {}
            }
        }
        assert!(saw_backward && saw_forward_again);
    }

    #[test]
    fn iterator_yields_the_same_sequence_as_step() {
        let angles: Vec<f64> = Sweep::new(0.5).take(4).collect();
        assert!((angles[0] - 0.5).abs() < 1e-12);
        assert!((angles[1] - 1.0).abs() < 1e-12);
        assert!((angles[2] - 1.5).abs() < 1e-12);
        assert!((angles[3] - 2.0).abs() < 1e-12);
    }
}
