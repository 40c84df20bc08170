use chrono::{DateTime, Utc};
use mindcast_core::models::{Episode, UserId};

/// Builder for episodes. Ids are assigned by `InMemoryEpisodeStore::record`
/// unless set explicitly.
#[derive(Debug, Clone)]
pub struct EpisodeBuilder {
    episode: Episode,
}

impl EpisodeBuilder {
    pub fn new(user_id: UserId, episode_type: &str, at: DateTime<Utc>) -> Self {
        Self {
            episode: Episode {
                episode_id: 0,
                user_id,
                episode_type: episode_type.to_string(),
                episode_date: at,
                severity_score: 5.0,
                trigger_category: None,
                location: None,
                has_biological_factors: false,
            },
        }
    }

    pub fn id(mut self, id: u64) -> Self {
        self.episode.episode_id = id;
        self
    }

    pub fn severity(mut self, severity: f64) -> Self {
        self.episode.severity_score = severity;
        self
    }

    pub fn trigger(mut self, category: &str) -> Self {
        self.episode.trigger_category = Some(category.to_string());
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.episode.location = Some(location.to_string());
        self
    }

    pub fn biological(mut self) -> Self {
        self.episode.has_biological_factors = true;
        self
    }

    pub fn build(self) -> Episode {
        self.episode
    }
}
