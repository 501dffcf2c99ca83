//! # Shop
//!
//! A seller's shop session: a fixed stock list and the balance-checked
//! purchase transaction.

use super::bag::Bag;
use crate::{VerdantError, VerdantResult};

const WELCOME_INFO: &str = "Welcome to the shop! What do you want to buy?";

/// One line of shop stock.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopItem {
    pub name: String,
    pub price: i32,
}

/// Result of a purchase attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopOutcome {
    Purchased,
    NotEnoughCoins,
}

/// A seller's shop session.
///
/// Opens when the seller's interaction gate fires and closes on cancel. The
/// info line mirrors what a shop panel would display.
#[derive(Debug, Clone)]
pub struct Shop {
    stock: Vec<ShopItem>,
    open: bool,
    info: String,
}

impl Shop {
    /// The standard stock: a potion and a capture ball.
    pub fn new() -> Self {
        Self {
            stock: vec![
                ShopItem {
                    name: "Potion".to_string(),
                    price: 1,
                },
                ShopItem {
                    name: "Pokeball".to_string(),
                    price: 3,
                },
            ],
            open: false,
            info: WELCOME_INFO.to_string(),
        }
    }

    pub fn stock(&self) -> &[ShopItem] {
        &self.stock
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the session and resets the info line.
    pub fn close(&mut self) {
        self.open = false;
        self.info = WELCOME_INFO.to_string();
    }

    /// Buys the stock line at `index`: balance check, deduct, grant.
    ///
    /// Insufficient funds mutate nothing and report through the info line
    /// and the returned outcome.
    pub fn purchase(&mut self, index: usize, bag: &mut Bag) -> VerdantResult<ShopOutcome> {
        let item = self.stock.get(index).ok_or_else(|| {
            VerdantError::InvalidAction(format!("no shop item at index {}", index))
        })?;
        if !bag.spend_coins(item.price) {
            self.info = "Not enough coins!".to_string();
            return Ok(ShopOutcome::NotEnoughCoins);
        }
        bag.grant_item(&item.name, 1);
        self.info = format!("Bought {}!", item.name);
        Ok(ShopOutcome::Purchased)
    }
}

impl Default for Shop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::bag::{Item, COINS_ITEM};

    fn bag_with_coins(count: i32) -> Bag {
        let mut bag = Bag::new();
        bag.add_item(Item {
            name: COINS_ITEM.to_string(),
            count,
        });
        bag
    }

    #[test]
    fn test_purchase_deducts_and_grants() {
        let mut shop = Shop::new();
        let mut bag = bag_with_coins(5);

        let outcome = shop.purchase(1, &mut bag).unwrap();
        assert_eq!(outcome, ShopOutcome::Purchased);
        assert_eq!(bag.coins(), 2);
        assert_eq!(
            bag.items().iter().find(|i| i.name == "Pokeball").unwrap().count,
            1
        );
        assert_eq!(shop.info(), "Bought Pokeball!");
    }

    #[test]
    fn test_purchase_refuses_short_balance() {
        let mut shop = Shop::new();
        let mut bag = bag_with_coins(2);

        let outcome = shop.purchase(1, &mut bag).unwrap();
        assert_eq!(outcome, ShopOutcome::NotEnoughCoins);
        assert_eq!(bag.coins(), 2);
        assert!(bag.items().iter().all(|i| i.name != "Pokeball"));
        assert_eq!(shop.info(), "Not enough coins!");
    }

    #[test]
    fn test_purchase_rejects_unknown_index() {
        let mut shop = Shop::new();
        let mut bag = bag_with_coins(10);
        assert!(shop.purchase(9, &mut bag).is_err());
    }

    #[test]
    fn test_close_resets_info() {
        let mut shop = Shop::new();
        let mut bag = bag_with_coins(0);
        shop.open();
        let _ = shop.purchase(0, &mut bag).unwrap();
        assert_eq!(shop.info(), "Not enough coins!");

        shop.close();
        assert!(!shop.is_open());
        assert_eq!(shop.info(), WELCOME_INFO);
    }
}
