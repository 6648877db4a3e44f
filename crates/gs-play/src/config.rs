//! Configuration for a game session.

use std::time::Duration;

use gs_engine::EngineConfig;

/// Configuration for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Action costs and fallback seed.
    pub engine: EngineConfig,
    /// How long one generator call may take.
    pub generator_timeout: Duration,
    /// Output size passed to the generator.
    pub max_output: u32,
    /// Whether questions go to the generator before falling back.
    pub consult_generator: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            generator_timeout: Duration::from_secs(30),
            max_output: 4096,
            consult_generator: true,
        }
    }
}

impl SessionConfig {
    /// Replace the engine configuration.
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Set the generator timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.generator_timeout = timeout;
        self
    }

    /// Set the generator output size.
    pub fn with_max_output(mut self, max_output: u32) -> Self {
        self.max_output = max_output;
        self
    }

    /// Resolve every action locally.
    pub fn offline(mut self) -> Self {
        self.consult_generator = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.generator_timeout, Duration::from_secs(30));
        assert!(cfg.consult_generator);
        assert_eq!(cfg.engine.question_minutes, 10);
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default()
            .with_timeout(Duration::from_millis(250))
            .with_max_output(512)
            .with_engine(EngineConfig::default().with_seed(7))
            .offline();
        assert_eq!(cfg.generator_timeout, Duration::from_millis(250));
        assert_eq!(cfg.max_output, 512);
        assert_eq!(cfg.engine.seed, 7);
        assert!(!cfg.consult_generator);
    }
}
