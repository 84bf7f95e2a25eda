//! Turning stored orders into plannable jobs.

use crate::client::WebClient;
use crate::menus::Menus;
use serde::{Deserialize, Serialize};
use skydrop_core::{Job, Point};
use std::collections::HashMap;
use tracing::{debug, warn};

/// One order for the day, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_no: String,
    pub customer: String,
    /// Three-word delivery location
    pub deliver_to: String,
    pub items: Vec<String>,
}

/// Assemble jobs from orders using already-resolved locations. Any location
/// missing from `locations` is treated as unresolved.
pub fn jobs_from_orders(
    orders: &[OrderRecord],
    menus: &Menus,
    locations: &HashMap<String, Option<Point>>,
) -> Vec<Job> {
    let lookup = |words: &str| locations.get(words).copied().flatten();

    orders
        .iter()
        .map(|order| {
            let pickups = menus
                .pickup_locations(&order.items)
                .iter()
                .map(|words| lookup(words.as_str()))
                .collect();
            Job::new(
                order.order_no.clone(),
                menus.delivery_cost(&order.items),
                pickups,
                lookup(order.deliver_to.as_str()),
            )
        })
        .collect()
}

/// Resolve every location the orders mention, then assemble jobs.
///
/// Lookup failures never abort the run: the affected job simply carries an
/// unresolved coordinate and the selector skips it.
pub async fn build_jobs(client: &WebClient, menus: &Menus, orders: &[OrderRecord]) -> Vec<Job> {
    let mut locations: HashMap<String, Option<Point>> = HashMap::new();

    for order in orders {
        let mut words = menus.pickup_locations(&order.items);
        words.push(order.deliver_to.clone());

        for word in words {
            if locations.contains_key(&word) {
                continue;
            }
            let resolved = match client.translate_location(&word).await {
                Ok(point) => point,
                Err(err) => {
                    warn!(words = %word, error = %err, "Location lookup error");
                    None
                }
            };
            locations.insert(word, resolved);
        }
    }

    let jobs = jobs_from_orders(orders, menus, &locations);
    debug!(
        orders = orders.len(),
        locations = locations.len(),
        "Built jobs"
    );
    jobs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menus::{MenuItem, Restaurant};

    fn menus() -> Menus {
        Menus::new(&[
            Restaurant {
                name: "Nile Valley".to_string(),
                location: "pest.round.maps".to_string(),
                menu: vec![MenuItem {
                    item: "Falafel".to_string(),
                    pence: 500,
                }],
            },
            Restaurant {
                name: "Rudis".to_string(),
                location: "sketch.spill.puzzle".to_string(),
                menu: vec![MenuItem {
                    item: "Shawarma".to_string(),
                    pence: 700,
                }],
            },
        ])
    }

    fn order(no: &str, deliver_to: &str, items: &[&str]) -> OrderRecord {
        OrderRecord {
            order_no: no.to_string(),
            customer: "s1234567".to_string(),
            deliver_to: deliver_to.to_string(),
            items: items.iter().map(|i| i.to_string()).collect(),
        }
    }

    #[test]
    fn test_jobs_carry_price_pickups_and_drop() {
        let pickup_a = Point::new(-3.1900, 55.9430);
        let pickup_b = Point::new(-3.1860, 55.9450);
        let drop = Point::new(-3.1880, 55.9440);
        let locations = HashMap::from([
            ("pest.round.maps".to_string(), Some(pickup_a)),
            ("sketch.spill.puzzle".to_string(), Some(pickup_b)),
            ("blocks.found.civic".to_string(), Some(drop)),
        ]);

        let jobs = jobs_from_orders(
            &[order("1ad5f1ff", "blocks.found.civic", &["Shawarma", "Falafel"])],
            &menus(),
            &locations,
        );

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "1ad5f1ff");
        assert_eq!(jobs[0].value, 50 + 700 + 500);
        assert_eq!(jobs[0].pickups, vec![Some(pickup_b), Some(pickup_a)]);
        assert_eq!(jobs[0].drop, Some(drop));
    }

    #[test]
    fn test_unresolved_locations_stay_unresolved() {
        let locations = HashMap::from([("pest.round.maps".to_string(), None)]);
        let jobs = jobs_from_orders(
            &[order("0c4a1b2e", "nowhere.at.all", &["Falafel"])],
            &menus(),
            &locations,
        );
        assert_eq!(jobs[0].pickups, vec![None]);
        assert_eq!(jobs[0].drop, None);
        assert!(jobs[0].resolved().is_none());
    }
}
