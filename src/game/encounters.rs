//! # Encounter Handoff
//!
//! Wild-candidate tables and the request queue handed to the battle/shop
//! resolver when an interaction gate fires.

use super::EntityId;
use crate::VerdantResult;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::io::BufReader;
use std::path::Path;

/// One entry of the wild-candidate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WildSpecies {
    pub name: String,
    /// Base stat used by the battle resolver
    #[serde(default = "default_base")]
    pub base: i32,
    #[serde(default = "default_level")]
    pub level: i32,
    /// Element tag ("Fire", "Water", ...)
    #[serde(rename = "property", default = "default_element")]
    pub element: String,
    #[serde(default)]
    pub sprite_path: Option<String>,
}

fn default_base() -> i32 {
    1
}

fn default_level() -> i32 {
    1
}

fn default_element() -> String {
    "Normal".to_string()
}

/// The wild-candidate tables, loaded once per session.
///
/// Ordinary trainers draw from `candidates`; trainers configured with
/// `max_tiles == 3` draw from the special table instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesTable {
    #[serde(default)]
    pub candidates: Vec<WildSpecies>,
    #[serde(default)]
    pub sp_candidates: Vec<WildSpecies>,
}

impl SpeciesTable {
    /// Loads the table from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> VerdantResult<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// The pool a trainer draws from.
    pub fn pool(&self, special: bool) -> &[WildSpecies] {
        if special {
            &self.sp_candidates
        } else {
            &self.candidates
        }
    }

    /// Draws a uniformly random candidate from the chosen pool.
    pub fn draw(&self, special: bool, rng: &mut StdRng) -> Result<&WildSpecies, TriggerError> {
        self.pool(special).choose(rng).ok_or(TriggerError::NoCandidates)
    }
}

/// Why an interaction trigger failed to produce a handoff.
///
/// Failures are reported to the diagnostic sink and never crash the frame
/// loop; the simulation continues.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TriggerError {
    #[error("no encounter candidates configured")]
    NoCandidates,
    #[error("encounter resolver unavailable")]
    ResolverUnavailable,
}

/// The handoff record the battle resolver reads when a trigger fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterRequest {
    /// Entity whose gate fired, if any (none for bush encounters)
    pub source: Option<EntityId>,
    pub name: String,
    pub base: i32,
    pub level: i32,
    pub element: String,
    pub sprite_path: Option<String>,
    pub is_wild: bool,
}

impl EncounterRequest {
    /// A wild-battle request drawn from the candidate table.
    pub fn wild(source: Option<EntityId>, species: &WildSpecies) -> Self {
        Self {
            source,
            name: species.name.clone(),
            base: species.base,
            level: species.level,
            element: species.element.clone(),
            sprite_path: species.sprite_path.clone(),
            is_wild: true,
        }
    }
}

/// FIFO queue of pending encounter requests.
///
/// The simulation pushes; the external resolver drains between ticks and
/// later stamps the suppression windows when each interaction concludes.
#[derive(Debug, Clone, Default)]
pub struct EncounterOutbox {
    queue: VecDeque<EncounterRequest>,
}

impl EncounterOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, request: EncounterRequest) {
        self.queue.push_back(request);
    }

    /// Removes and returns every pending request, oldest first.
    pub fn drain(&mut self) -> Vec<EncounterRequest> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn species(name: &str) -> WildSpecies {
        WildSpecies {
            name: name.to_string(),
            base: 10,
            level: 5,
            element: "Grass".to_string(),
            sprite_path: None,
        }
    }

    #[test]
    fn test_special_trainers_draw_from_special_pool() {
        let table = SpeciesTable {
            candidates: vec![species("common")],
            sp_candidates: vec![species("rare")],
        };
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(table.draw(false, &mut rng).unwrap().name, "common");
        assert_eq!(table.draw(true, &mut rng).unwrap().name, "rare");
    }

    #[test]
    fn test_empty_pool_is_no_candidates() {
        let table = SpeciesTable::default();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(table.draw(false, &mut rng), Err(TriggerError::NoCandidates));
    }

    #[test]
    fn test_species_defaults_fill_missing_fields() {
        let parsed: WildSpecies = serde_json::from_str(r#"{"name": "sprout"}"#).unwrap();
        assert_eq!(parsed.base, 1);
        assert_eq!(parsed.level, 1);
        assert_eq!(parsed.element, "Normal");
        assert!(parsed.sprite_path.is_none());
    }

    #[test]
    fn test_element_uses_property_key() {
        let parsed: WildSpecies =
            serde_json::from_str(r#"{"name": "ember", "property": "Fire"}"#).unwrap();
        assert_eq!(parsed.element, "Fire");
    }

    #[test]
    fn test_outbox_drains_in_fifo_order() {
        let mut outbox = EncounterOutbox::new();
        outbox.push(EncounterRequest::wild(None, &species("first")));
        outbox.push(EncounterRequest::wild(None, &species("second")));

        let drained = outbox.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].name, "first");
        assert_eq!(drained[1].name, "second");
        assert!(outbox.is_empty());
    }
}
