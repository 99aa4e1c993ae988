// Library root: player catalog, draft engine, and configuration for the
// fantasy football war room.

pub mod catalog;
pub mod config;
pub mod draft;
pub mod normalize;
pub mod player;
