pub mod sector_query;

pub use sector_query::{reported_slots, SectorQueryRecord};
