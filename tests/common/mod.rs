//! Shared fixture catalog for integration tests

use factsheet::{Category, Fact, MockSource, Research};
use std::sync::Arc;

pub fn categories() -> Vec<Category> {
    vec![
        Category::new("1", "Water"),
        Category::new("2", "Food"),
        Category::new("3", "Energy"),
        Category::new("4", "Education"),
    ]
}

fn category(id: &str) -> Category {
    categories()
        .into_iter()
        .find(|c| c.id == id)
        .unwrap_or_else(|| panic!("no fixture category {}", id))
}

pub fn facts() -> Vec<Fact> {
    vec![
        Fact::new("1", "Aquaponic farms use up to 90% less water than soil farming")
            .with_category(category("1"))
            .with_research(
                Research::new("r1", "Water use in recirculating aquaponics")
                    .with_url("https://example.org/research/water"),
            ),
        Fact::new("2", "Aquaponics produces both fish and vegetables")
            .with_category(category("2"))
            .with_category(category("4")),
        Fact::new("3", "Aquaponics systems can run on solar power")
            .with_category(category("3"))
            .with_research(Research::new("r2", "Solar-powered pumps"))
            .with_research(
                Research::new("r3", "Off-grid aquaculture")
                    .with_url("https://example.org/research/off-grid"),
            ),
        Fact::new("4", "School gardens teach biology through fish and plants")
            .with_category(category("4")),
        Fact::new("5", "No synthetic fertilizer is needed"),
    ]
}

pub fn source() -> Arc<MockSource> {
    Arc::new(MockSource::new(categories(), facts()))
}
