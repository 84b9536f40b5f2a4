pub mod controller;
pub mod progress;
pub mod tick;
