/*
 * Hunger Module
 *
 * A slowly draining meter that eating refills. When it empties the player
 * has starved and the game ends. Plain state, ticked by the app while the
 * game is playing.
 */

pub const INITIAL_HUNGER: f32 = 100.0;
pub const DEFAULT_DECAY_RATE: f32 = 1.5;

pub struct Hunger {
    initial: f32,
    max: f32,
    current: f32,
    decay_rate: f32,
}

impl Hunger {
    pub fn new(initial: f32, decay_rate: f32) -> Self {
        Self {
            initial,
            max: initial,
            current: initial,
            decay_rate,
        }
    }

    /// Drain the meter. Returns true the moment it empties.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.current = (self.current - self.decay_rate * dt).max(0.0);
        self.current <= 0.0
    }

    /// Refill from food, clamped to the current maximum.
    pub fn feed(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    /// Grow the meter itself, e.g. as the player gets bigger.
    pub fn raise_max(&mut self, amount: f32) {
        self.max += amount;
        self.current += amount;
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Fill fraction in [0, 1] for the UI bar.
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }

    /// Back to a full meter at the original maximum, used on game restart.
    pub fn reset(&mut self) {
        self.max = self.initial;
        self.current = self.initial;
    }
}

impl Default for Hunger {
    fn default() -> Self {
        Self::new(INITIAL_HUNGER, DEFAULT_DECAY_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_meter_drains_and_eventually_starves() {
        let mut hunger = Hunger::new(10.0, 1.0);
        assert!(!hunger.tick(1.0));
        assert_eq!(hunger.current(), 9.0);

        for _ in 0..9 {
            hunger.tick(1.0);
        }
        assert!(hunger.tick(1.0));
        assert_eq!(hunger.current(), 0.0);
    }

    #[test]
    fn feeding_refills_but_never_overfills() {
        let mut hunger = Hunger::new(10.0, 1.0);
        hunger.tick(4.0);
        hunger.feed(100.0);
        assert_eq!(hunger.current(), 10.0);
    }

    #[test]
    fn raising_the_max_grows_both_sides_of_the_meter() {
        let mut hunger = Hunger::new(10.0, 1.0);
        hunger.raise_max(5.0);
        assert_eq!(hunger.max(), 15.0);
        assert_eq!(hunger.current(), 15.0);
        assert!((hunger.fraction() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn reset_restores_the_original_meter() {
        let mut hunger = Hunger::new(10.0, 1.0);
        hunger.raise_max(20.0);
        hunger.tick(8.0);
        hunger.reset();
        assert_eq!(hunger.max(), 10.0);
        assert_eq!(hunger.current(), 10.0);
    }
}
