// Player stats - movement tunables owned by each player

/// Per-player movement tunables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerStats {
    /// Maximum horizontal movement speed (units/second)
    pub max_speed: f32,
    /// Vertical speed at the start of a jump, before the model's jump modifier
    pub jump_take_off_speed: f32,
}

/// Stats every player spawns with unless told otherwise
pub const BASE_STATS: PlayerStats = PlayerStats {
    max_speed: 7.0,
    jump_take_off_speed: 7.0,
};

impl Default for PlayerStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl PlayerStats {
    /// Name and value of the first stat that is not a finite positive number
    pub fn first_invalid(&self) -> Option<(&'static str, f32)> {
        [
            ("max_speed", self.max_speed),
            ("jump_take_off_speed", self.jump_take_off_speed),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite() || *value <= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = PlayerStats::default();
        assert_eq!(stats.max_speed, 7.0);
        assert_eq!(stats.jump_take_off_speed, 7.0);
        assert_eq!(stats, BASE_STATS);
    }

    #[test]
    fn test_default_stats_are_valid() {
        assert_eq!(BASE_STATS.first_invalid(), None);
    }

    #[test]
    fn test_invalid_stats_are_reported() {
        let stats = PlayerStats {
            max_speed: 0.0,
            ..BASE_STATS
        };
        assert_eq!(stats.first_invalid(), Some(("max_speed", 0.0)));

        let stats = PlayerStats {
            jump_take_off_speed: -1.0,
            ..BASE_STATS
        };
        assert_eq!(stats.first_invalid(), Some(("jump_take_off_speed", -1.0)));

        let stats = PlayerStats {
            max_speed: f32::INFINITY,
            ..BASE_STATS
        };
        assert!(stats.first_invalid().is_some());
    }
}
