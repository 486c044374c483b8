pub mod activity;
pub mod analysis;
pub mod condition;
pub mod game;
pub mod mood;
pub mod record;
pub mod responses;
