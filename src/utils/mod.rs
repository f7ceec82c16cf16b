pub mod store;
pub mod telegram;
