pub mod drop;
pub mod health;
pub mod migrate;
