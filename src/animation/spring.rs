/// Stiffness and damping of a spring channel (unit mass)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Stiffness of the spring (k)
    pub stiffness: f32,
    /// Damping coefficient (b)
    pub damping: f32,
}

impl SpringConfig {
    /// Spring used for the vertical offset of a digit strip
    pub const OFFSET: Self = Self {
        stiffness: 120.0,
        damping: 16.0,
    };

    /// Faster, nearly critically damped spring used for opacity
    pub const OPACITY: Self = Self {
        stiffness: 200.0,
        damping: 25.0,
    };

    pub const fn new(stiffness: f32, damping: f32) -> Self {
        Self { stiffness, damping }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::OFFSET
    }
}

/// Position and velocity thresholds below which a spring counts as settled
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    pub position: f32,
    pub velocity: f32,
}

impl Tolerance {
    pub const DEFAULT: Self = Self {
        position: 0.3,
        velocity: 0.3,
    };
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// State for spring physics simulation of one scalar channel
#[derive(Clone, Debug, PartialEq)]
pub struct SpringState {
    /// Current position
    pub position: f32,
    /// Resting position the spring is pulled towards
    pub target: f32,
    /// Current velocity (units per second)
    pub velocity: f32,
    pub stiffness: f32,
    pub damping: f32,
}

impl SpringState {
    /// Create a spring at rest at `position`
    pub fn new(position: f32, config: SpringConfig) -> Self {
        Self {
            position,
            target: position,
            velocity: 0.0,
            stiffness: config.stiffness,
            damping: config.damping,
        }
    }

    /// Advance the simulation by `dt_secs` seconds.
    ///
    /// Hooke's law plus linear damping with unit mass, integrated with
    /// semi-implicit Euler: velocity is updated first and the new velocity
    /// moves the position. `dt_secs` must be positive.
    pub fn step(&mut self, dt_secs: f32) {
        // Spring force: F = -k * x
        let spring_force = -self.stiffness * (self.position - self.target);
        // Damping force: F = -b * v
        let damping_force = -self.damping * self.velocity;

        let acceleration = spring_force + damping_force;

        self.velocity += acceleration * dt_secs;
        self.position += self.velocity * dt_secs;
    }

    /// Check if the spring has settled (position near target, velocity near zero)
    pub fn is_settled(&self, tolerance: Tolerance) -> bool {
        self.velocity.abs() < tolerance.velocity
            && (self.target - self.position).abs() < tolerance.position
    }

    /// Jump exactly to the target and stop
    pub fn snap(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
    }

    /// Place the spring at rest at `position`
    pub fn reset(&mut self, position: f32) {
        self.position = position;
        self.target = position;
        self.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.004;

    fn settle(state: &mut SpringState, max_steps: usize) -> Option<usize> {
        (0..max_steps).find(|_| {
            state.step(DT);
            state.is_settled(Tolerance::DEFAULT)
        })
    }

    #[test]
    fn test_new_spring_is_at_rest() {
        let state = SpringState::new(-144.0, SpringConfig::OFFSET);
        assert_eq!(state.position, -144.0);
        assert_eq!(state.target, -144.0);
        assert_eq!(state.velocity, 0.0);
        assert!(state.is_settled(Tolerance::DEFAULT));
    }

    #[test]
    fn test_single_step_matches_semi_implicit_euler() {
        let mut state = SpringState::new(0.0, SpringConfig::new(100.0, 10.0));
        state.target = 1.0;
        state.step(0.01);

        // a = -100 * (0 - 1) - 10 * 0 = 100; v = 1.0; x = 0.01
        assert!((state.velocity - 1.0).abs() < 1e-6);
        assert!((state.position - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_spring_reaches_target() {
        let mut state = SpringState::new(0.0, SpringConfig::OFFSET);
        state.target = -504.0;

        let steps = settle(&mut state, 5_000);
        assert!(steps.is_some(), "spring never settled: {:?}", state);
        assert!((state.position + 504.0).abs() < Tolerance::DEFAULT.position);
    }

    #[test]
    fn test_offset_spring_overshoots() {
        let mut state = SpringState::new(0.0, SpringConfig::OFFSET);
        state.target = -72.0;

        let mut min_position: f32 = 0.0;
        for _ in 0..500 {
            state.step(DT);
            min_position = min_position.min(state.position);
        }

        assert!(
            min_position < -72.0,
            "underdamped spring should overshoot, min was {}",
            min_position
        );
    }

    #[test]
    fn test_settled_state_stays_settled() {
        let mut state = SpringState::new(0.0, SpringConfig::OFFSET);
        state.target = 0.2;
        state.velocity = 0.1;
        assert!(state.is_settled(Tolerance::DEFAULT));

        for _ in 0..10_000 {
            state.step(DT);
            assert!((state.position - state.target).abs() < Tolerance::DEFAULT.position);
        }
    }

    #[test]
    fn test_positive_damping_settles_in_bounded_steps() {
        let stiffnesses = [20.0, 120.0, 400.0, 2_000.0];
        let dampings = [4.0, 16.0, 25.0, 60.0];
        let starts = [(-648.0, 0.0), (0.0, -648.0), (1.0, 0.3), (-72.0, -360.0)];

        for &k in &stiffnesses {
            for &b in &dampings {
                for &(from, to) in &starts {
                    let mut state = SpringState::new(from, SpringConfig::new(k, b));
                    state.target = to;
                    state.velocity = 250.0;

                    assert!(
                        settle(&mut state, 50_000).is_some(),
                        "k={} b={} from {} to {} did not settle: {:?}",
                        k,
                        b,
                        from,
                        to,
                        state
                    );
                }
            }
        }
    }

    #[test]
    fn test_snap_and_reset() {
        let mut state = SpringState::new(0.0, SpringConfig::OPACITY);
        state.target = 1.0;
        state.step(DT);
        state.snap();
        assert_eq!(state.position, 1.0);
        assert_eq!(state.velocity, 0.0);

        state.reset(0.3);
        assert_eq!(state.position, 0.3);
        assert_eq!(state.target, 0.3);
    }
}
