//! Typed scenario files under `/test-fixtures/scenarios`.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use mindcast_core::models::Episode;

use crate::builders::EpisodeBuilder;
use crate::collaborators::StaticTypeRegistry;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub user_id: u64,
    pub start: DateTime<Utc>,
    pub types: Vec<ScenarioType>,
    pub pairs: Vec<ScenarioPair>,
    pub episodes: Vec<ScenarioEpisode>,
    #[serde(default)]
    pub expected: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioType {
    pub tag: String,
    pub display_name: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioPair {
    pub a: String,
    pub b: String,
    pub base_strength: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioEpisode {
    pub episode_type: String,
    /// Hours after `start`.
    pub offset_hours: f64,
    pub severity: f64,
    #[serde(default)]
    pub trigger_category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub biological: bool,
}

fn default_weight() -> f64 {
    1.0
}

impl Scenario {
    /// Load `scenarios/<name>.json`.
    pub fn load(name: &str) -> Self {
        crate::load_fixture(&format!("scenarios/{name}.json"))
    }

    pub fn registry(&self) -> StaticTypeRegistry {
        let registry = self
            .types
            .iter()
            .fold(StaticTypeRegistry::new(), |r, t| {
                r.with_type(&t.tag, &t.display_name, t.weight)
            });
        self.pairs
            .iter()
            .fold(registry, |r, p| r.with_pair(&p.a, &p.b, p.base_strength))
    }

    /// Episodes in file order, without ids.
    pub fn episodes(&self) -> Vec<Episode> {
        self.episodes
            .iter()
            .map(|e| {
                let at = self.start + Duration::minutes((e.offset_hours * 60.0).round() as i64);
                let mut b = EpisodeBuilder::new(self.user_id, &e.episode_type, at).severity(e.severity);
                if let Some(t) = &e.trigger_category {
                    b = b.trigger(t);
                }
                if let Some(l) = &e.location {
                    b = b.location(l);
                }
                if e.biological {
                    b = b.biological();
                }
                b.build()
            })
            .collect()
    }

    /// Last episode time, a convenient "now" for the scenario.
    pub fn end(&self) -> DateTime<Utc> {
        self.episodes()
            .iter()
            .map(|e| e.episode_date)
            .max()
            .unwrap_or(self.start)
    }
}
