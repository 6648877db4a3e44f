/// Time costs and tuning for the rules engine.
///
/// All costs are in minutes and should be multiples of 5 so the clock stays
/// on its grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Cost of searching a place.
    pub investigate_minutes: u32,
    /// Cost of questioning a character.
    pub question_minutes: u32,
    /// Fixed part of a move.
    pub move_base_minutes: u32,
    /// Added per unit of distance on a move.
    pub move_unit_minutes: u32,
    /// Cost of making an accusation.
    pub accuse_minutes: u32,
    /// Seed mixed into fallback reply selection.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            investigate_minutes: 15,
            question_minutes: 10,
            move_base_minutes: 5,
            move_unit_minutes: 5,
            accuse_minutes: 5,
            seed: 42,
        }
    }
}

impl EngineConfig {
    /// Set the investigation cost.
    pub fn with_investigate_minutes(mut self, minutes: u32) -> Self {
        self.investigate_minutes = minutes;
        self
    }

    /// Set the questioning cost.
    pub fn with_question_minutes(mut self, minutes: u32) -> Self {
        self.question_minutes = minutes;
        self
    }

    /// Set the movement base cost and per-distance cost.
    pub fn with_move_minutes(mut self, base: u32, unit: u32) -> Self {
        self.move_base_minutes = base;
        self.move_unit_minutes = unit;
        self
    }

    /// Set the accusation cost.
    pub fn with_accuse_minutes(mut self, minutes: u32) -> Self {
        self.accuse_minutes = minutes;
        self
    }

    /// Set the fallback reply seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Minutes a move over `distance` costs.
    pub fn move_minutes(&self, distance: u32) -> u32 {
        self.move_base_minutes + distance * self.move_unit_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = EngineConfig::default();
        assert_eq!(config.investigate_minutes, 15);
        assert_eq!(config.question_minutes, 10);
        assert_eq!(config.accuse_minutes, 5);
        assert_eq!(config.move_minutes(1), 10);
        assert_eq!(config.move_minutes(2), 15);
    }

    #[test]
    fn config_builder_chain() {
        let config = EngineConfig::default()
            .with_investigate_minutes(20)
            .with_question_minutes(15)
            .with_move_minutes(10, 10)
            .with_accuse_minutes(30)
            .with_seed(7);
        assert_eq!(config.investigate_minutes, 20);
        assert_eq!(config.question_minutes, 15);
        assert_eq!(config.move_minutes(2), 30);
        assert_eq!(config.accuse_minutes, 30);
        assert_eq!(config.seed, 7);
    }
}
