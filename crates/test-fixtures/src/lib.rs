//! Test fixtures for the Mindcast engines.
//!
//! In-memory implementations of every collaborator trait, a clock tests can
//! move, episode builders, and typed loading of the JSON scenarios under
//! `/test-fixtures/scenarios`.

pub mod ai;
pub mod builders;
pub mod clock;
pub mod collaborators;
pub mod scenario;
pub mod stores;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

pub use ai::{
    FailingAiCorrelator, FailingAiPredictor, FixedAiCorrelator, FixedAiPredictor,
    SlowAiPredictor,
};
pub use builders::EpisodeBuilder;
pub use clock::FixedClock;
pub use collaborators::{
    FailingContributor, FixedContributor, RecordingSink, StaticMembership, StaticPatternDetector,
    StaticProfile, StaticTypeRegistry,
};
pub use scenario::Scenario;
pub use stores::{InMemoryCorrelationStore, InMemoryEpisodeStore};

/// Root directory of the fixture data folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up until the data folder
    // (not this crate's own directory) is found.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("scenarios").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures/scenarios from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// List all JSON files in a fixture subdirectory.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut found: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    found.sort();
    found
}
