//! Walking animation as an explicit step function.
//!
//! The host loop calls [`WalkAnimation::advance`] every frame; when it reports
//! completion the caller commits the pending move. Dropping the animation cancels it.

/// Character offset moving across the view towards a destination.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkAnimation<T> {
    position: f32,
    destination: f32,
    /// Pixels per second
    speed: f32,
    pending: T,
}

impl<T> WalkAnimation<T> {
    pub fn new(from: f32, to: f32, speed: f32, pending: T) -> Self {
        Self {
            position: from,
            destination: to,
            speed: speed.abs(),
            pending,
        }
    }

    /// Move towards the destination by `dt` seconds. Returns true once arrived.
    ///
    /// Arrival snaps to the destination when less than one step remains.
    /// A zero speed arrives at once.
    pub fn advance(&mut self, dt: f32) -> bool {
        let step = self.speed * dt.max(0.0);
        let remaining = self.destination - self.position;
        if remaining.abs() <= step || self.speed == 0.0 || self.speed.is_nan() {
            self.position = self.destination;
            return true;
        }
        self.position += step * remaining.signum();
        false
    }

    /// Current horizontal offset in view pixels.
    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn destination(&self) -> f32 {
        self.destination
    }

    /// -1.0 walking left, 1.0 walking right (or standing still).
    pub fn facing(&self) -> f32 {
        if self.destination < self.position {
            -1.0
        } else {
            1.0
        }
    }

    pub fn is_done(&self) -> bool {
        self.position == self.destination
    }

    pub fn into_pending(self) -> T {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_right_until_arrival() {
        let mut walk = WalkAnimation::new(0.0, 25.0, 100.0, "move");
        assert_eq!(walk.facing(), 1.0);
        assert!(!walk.advance(0.1));
        assert_eq!(walk.position(), 10.0);
        assert!(!walk.advance(0.1));
        assert!(walk.advance(0.1));
        assert_eq!(walk.position(), 25.0);
        assert!(walk.is_done());
        assert_eq!(walk.into_pending(), "move");
    }

    #[test]
    fn walks_left() {
        let mut walk = WalkAnimation::new(50.0, 25.0, 100.0, ());
        assert_eq!(walk.facing(), -1.0);
        assert!(!walk.advance(0.1));
        assert_eq!(walk.position(), 40.0);
        assert!(!walk.advance(0.1));
        assert!(walk.advance(0.1));
        assert_eq!(walk.position(), 25.0);
    }

    #[test]
    fn zero_distance_finishes_immediately() {
        let mut walk = WalkAnimation::new(5.0, 5.0, 100.0, ());
        assert!(walk.advance(0.0));
    }

    #[test]
    fn zero_speed_arrives_instead_of_stalling() {
        let mut walk = WalkAnimation::new(0.0, 40.0, 0.0, ());
        assert!(walk.advance(0.016));
        assert_eq!(walk.position(), 40.0);
    }

    #[test]
    fn negative_time_does_not_move() {
        let mut walk = WalkAnimation::new(0.0, 10.0, 100.0, ());
        assert!(!walk.advance(-1.0));
        assert_eq!(walk.position(), 0.0);
    }
}
