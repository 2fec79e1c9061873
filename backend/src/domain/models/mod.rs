pub mod media;
pub mod order;
