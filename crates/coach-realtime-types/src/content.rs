pub mod items;
pub mod message;
pub mod parts;
