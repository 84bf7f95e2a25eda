//! Restaurant menus: item pricing and pickup resolution.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Flat charge added to every order, in pence.
pub const DELIVERY_CHARGE: u32 = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub item: String,
    pub pence: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    /// Three-word location of the restaurant
    pub location: String,
    pub menu: Vec<MenuItem>,
}

#[derive(Debug, Clone)]
struct Listing {
    pence: u32,
    location: String,
}

/// Item lookup across every restaurant. When two restaurants sell an item
/// with the same name, the first one listed wins.
#[derive(Debug, Clone, Default)]
pub struct Menus {
    listings: HashMap<String, Listing>,
}

impl Menus {
    pub fn new(restaurants: &[Restaurant]) -> Self {
        let mut listings = HashMap::new();
        for restaurant in restaurants {
            for item in &restaurant.menu {
                listings.entry(item.item.clone()).or_insert_with(|| Listing {
                    pence: item.pence,
                    location: restaurant.location.clone(),
                });
            }
        }
        Self { listings }
    }

    pub fn price_of(&self, item: &str) -> Option<u32> {
        self.listings.get(item).map(|listing| listing.pence)
    }

    /// Total cost of an order including the delivery charge. Unknown items
    /// cost nothing.
    pub fn delivery_cost<S: AsRef<str>>(&self, items: &[S]) -> u32 {
        DELIVERY_CHARGE
            + items
                .iter()
                .filter_map(|item| self.price_of(item.as_ref()))
                .sum::<u32>()
    }

    /// Distinct restaurant locations for the items, in first-seen order.
    pub fn pickup_locations<S: AsRef<str>>(&self, items: &[S]) -> Vec<String> {
        let mut locations: Vec<String> = Vec::new();
        for item in items {
            if let Some(listing) = self.listings.get(item.as_ref()) {
                if !locations.contains(&listing.location) {
                    locations.push(listing.location.clone());
                }
            }
        }
        locations
    }
}
