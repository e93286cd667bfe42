//! Configuration types for agents and games
//!
//! Tuning parameters only; evolved genomes are never written out.

use std::path::Path;

use anyhow::Context;
use antwar_core::{Heuristics, SearchConfig};
use antwar_evolve::EvolutionConfig;
use serde::{Deserialize, Serialize};

/// Learning agent configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Display name
    pub name: String,
    /// Seed for search, attack and evolution randomness
    pub seed: u64,
    pub search: SearchConfig,
    pub heuristics: Heuristics,
    pub evolution: EvolutionConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "genetic".to_string(),
            seed: 42,
            search: SearchConfig::default(),
            heuristics: Heuristics::default(),
            evolution: EvolutionConfig::default(),
        }
    }
}

impl AgentConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    pub fn with_evolution(mut self, evolution: EvolutionConfig) -> Self {
        self.evolution = evolution;
        self
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("parsing agent config")?;
        config
            .evolution
            .validate()
            .context("agent config has unusable evolution settings")?;
        config
            .search
            .validate()
            .context("agent config has unusable search settings")?;
        Ok(config)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("serializing agent config")
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading agent config {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("loading {}", path.display()))
    }
}

/// Single-game settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Turns (end-turn actions) after which the game is a draw
    pub max_turns: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self { max_turns: 200 }
    }
}

impl RunnerConfig {
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }
}
