//! Rangerscope Core -- an in-memory model of a space-trading game save dump.
//!
//! This crate ingests the text dump a game writes on request, indexes its
//! ships, stars, planets, black holes and equipment, and answers the
//! questions a trade-helper UI asks: market rows with distances from the
//! player, equipment locations, the galaxy tech level, black-hole loot
//! dates, and per-star map overlay data.
//!
//! # Two-Phase Build
//!
//! Ingestion fills a [`graph::GalaxyBuilder`]; freezing it yields an
//! immutable [`graph::Galaxy`] that every query runs against:
//!
//! ```rust,ignore
//! let galaxy = Galaxy::from_dump(BufReader::new(file))?;
//! for row in galaxy.markets() {
//!     println!("{} {:.1}", row.name(), row.distance_from_player());
//! }
//! ```
//!
//! Reloading clears the builder first, so ingesting the same dump twice
//! yields the same galaxy.
//!
//! # Key Types
//!
//! - [`graph::Galaxy`] -- Frozen entity store with ID lookups, aggregates,
//!   and distance queries.
//! - [`record::SectionParser`] -- Pluggable parser for the three dump
//!   sections; [`record::BraceRecordParser`] handles the default grammar.
//! - [`market::MarketRow`], [`equipment::EquipmentRow`],
//!   [`black_hole::BlackHoleRow`] -- Borrowed row views for table UIs.
//! - [`palette::Palette`] -- Faction colors, injected into the overlay.
//! - [`loot::LootSchedule`] -- Upcoming loot refresh dates of a black hole.

pub mod black_hole;
pub mod dump;
pub mod equipment;
pub mod geometry;
pub mod goods;
pub mod graph;
pub mod id;
pub mod loot;
pub mod market;
pub mod model;
pub mod overlay;
pub mod palette;
pub mod reader;
pub mod record;
pub mod tech_level;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use dump::DumpError;
pub use graph::{Galaxy, GalaxyBuilder};
pub use palette::{Color, Palette};
