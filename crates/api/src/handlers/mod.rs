pub mod admin;
pub mod estimation;
pub mod profile;
pub mod progress;
pub mod vehicles;
