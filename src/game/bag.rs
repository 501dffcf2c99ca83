//! # Bag
//!
//! The player's inventory of creatures and items.

use serde::{Deserialize, Serialize};

/// Experience needed for one level.
pub const EXP_PER_LEVEL: i32 = 150;

/// Name of the currency item.
pub const COINS_ITEM: &str = "Coins";

/// A creature carried in the bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub name: String,
    #[serde(default = "default_base")]
    pub base: i32,
    #[serde(default = "default_level")]
    pub level: i32,
    #[serde(default)]
    pub exp: i32,
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

/// A stackable item carried in the bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub count: i32,
}

/// The player's inventory. Persisted as `{"monsters": [...], "items": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bag {
    #[serde(rename = "monsters", default)]
    creatures: Vec<Creature>,
    #[serde(default)]
    items: Vec<Item>,
    /// Cursor of the currently selected creature; transient.
    #[serde(skip)]
    selected: usize,
}

impl Bag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_creature(&mut self, creature: Creature) {
        self.creatures.push(creature);
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn creature(&self, index: usize) -> Option<&Creature> {
        self.creatures.get(index)
    }

    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    pub fn remove_creature(&mut self, index: usize) -> Option<Creature> {
        if index < self.creatures.len() {
            Some(self.creatures.remove(index))
        } else {
            None
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Current coin balance, read from the currency item.
    pub fn coins(&self) -> i32 {
        self.items
            .iter()
            .find(|item| item.name == COINS_ITEM)
            .map(|item| item.count)
            .unwrap_or(0)
    }

    /// Deducts coins. Returns false (and mutates nothing) when the balance
    /// is short.
    pub fn spend_coins(&mut self, amount: i32) -> bool {
        match self.items.iter_mut().find(|item| item.name == COINS_ITEM) {
            Some(coins) if coins.count >= amount => {
                coins.count -= amount;
                true
            }
            _ => false,
        }
    }

    /// Adds `delta` to the named item's stack, creating the stack if absent.
    pub fn grant_item(&mut self, name: &str, delta: i32) {
        match self.items.iter_mut().find(|item| item.name == name) {
            Some(item) => item.count += delta,
            None => self.items.push(Item {
                name: name.to_string(),
                count: delta,
            }),
        }
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index;
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Levels the selected creature up once, if it has banked enough
    /// experience. Returns whether a level was gained.
    pub fn level_up_selected(&mut self) -> bool {
        let Some(creature) = self.creatures.get_mut(self.selected) else {
            return false;
        };
        if creature.exp < EXP_PER_LEVEL {
            return false;
        }
        creature.exp -= EXP_PER_LEVEL;
        creature.level += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creature_with_exp(exp: i32) -> Creature {
        Creature {
            name: "sprout".to_string(),
            base: 10,
            level: 3,
            exp,
            element: "Grass".to_string(),
            sprite_path: None,
        }
    }

    #[test]
    fn test_coins_reads_currency_item() {
        let mut bag = Bag::new();
        assert_eq!(bag.coins(), 0);
        bag.add_item(Item {
            name: COINS_ITEM.to_string(),
            count: 12,
        });
        assert_eq!(bag.coins(), 12);
    }

    #[test]
    fn test_spend_coins_refuses_overdraft() {
        let mut bag = Bag::new();
        bag.add_item(Item {
            name: COINS_ITEM.to_string(),
            count: 2,
        });
        assert!(!bag.spend_coins(3));
        assert_eq!(bag.coins(), 2);
        assert!(bag.spend_coins(2));
        assert_eq!(bag.coins(), 0);
    }

    #[test]
    fn test_grant_item_stacks_or_creates() {
        let mut bag = Bag::new();
        bag.grant_item("Potion", 1);
        bag.grant_item("Potion", 1);
        assert_eq!(bag.items()[0].count, 2);
    }

    #[test]
    fn test_level_up_requires_threshold() {
        let mut bag = Bag::new();
        bag.add_creature(creature_with_exp(149));
        assert!(!bag.level_up_selected());
        assert_eq!(bag.creature(0).unwrap().level, 3);
    }

    #[test]
    fn test_level_up_consumes_exp_once_per_call() {
        let mut bag = Bag::new();
        bag.add_creature(creature_with_exp(320));
        assert!(bag.level_up_selected());
        let creature = bag.creature(0).unwrap();
        assert_eq!(creature.level, 4);
        assert_eq!(creature.exp, 170);
    }

    #[test]
    fn test_level_up_with_empty_bag_is_noop() {
        let mut bag = Bag::new();
        assert!(!bag.level_up_selected());
    }

    #[test]
    fn test_bag_persists_under_monsters_key() {
        let mut bag = Bag::new();
        bag.add_creature(creature_with_exp(0));
        let json = serde_json::to_string(&bag).unwrap();
        assert!(json.contains("\"monsters\""));
        let back: Bag = serde_json::from_str(&json).unwrap();
        assert_eq!(back.creature_count(), 1);
    }
}
