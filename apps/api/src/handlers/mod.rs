pub mod fields;
pub mod forms;
pub mod health;
pub mod meta;
pub mod render;
