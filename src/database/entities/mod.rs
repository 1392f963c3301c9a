pub mod competitor_events;
pub mod events;
pub mod games;
pub mod games_competitors;
pub mod medals;
pub mod people;
pub mod sessions;
pub mod sports;
