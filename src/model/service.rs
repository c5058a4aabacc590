use crate::model::ItemNumber;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A service delivered by a [`ServiceProvider`](crate::provider::ServiceProvider).
///
/// Billed per hour; the item price is derived from the hourly rate and the number of
/// hours the service takes, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    item_number: ItemNumber,
    description: String,
    price_per_hour: f64,
    number_of_hours: u32,
}

impl Service {
    pub fn new(
        item_number: impl Into<ItemNumber>,
        description: impl Into<String>,
        price_per_hour: f64,
        number_of_hours: u32,
    ) -> Self {
        Self {
            item_number: item_number.into(),
            description: description.into(),
            price_per_hour,
            number_of_hours,
        }
    }

    pub fn item_number(&self) -> ItemNumber {
        self.item_number
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price_per_hour(&self) -> f64 {
        self.price_per_hour
    }

    pub fn number_of_hours(&self) -> u32 {
        self.number_of_hours
    }

    pub fn price(&self) -> f64 {
        self.price_per_hour * f64::from(self.number_of_hours)
    }
}

impl PartialEq for Service {
    fn eq(&self, other: &Self) -> bool {
        self.item_number == other.item_number
    }
}

impl Eq for Service {}

impl Hash for Service {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.item_number.hash(state);
    }
}

impl PartialOrd for Service {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Service {
    fn cmp(&self, other: &Self) -> Ordering {
        self.item_number.cmp(&other.item_number)
    }
}
