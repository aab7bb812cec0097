pub mod designs;
pub mod health;
pub mod usage;
