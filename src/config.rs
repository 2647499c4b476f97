use std::time::Duration;

use serde::Deserialize;

/// The wall-clock budget and minimum-generation goal the validator takes as
/// input, as a host might load it from TOML/JSON rather than hardcode it.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_budget_seconds")]
    pub budget_seconds: f64,
    #[serde(default)]
    pub min_generations: u64,
}

fn default_budget_seconds() -> f64 {
    1.0
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig { budget_seconds: default_budget_seconds(), min_generations: 0 }
    }
}

impl ValidationConfig {
    pub fn budget(&self) -> Duration {
        Duration::from_secs_f64(self.budget_seconds.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget_is_one_second() {
        let config = ValidationConfig::default();
        assert_eq!(config.budget(), Duration::from_secs(1));
        assert_eq!(config.min_generations, 0);
    }
}
