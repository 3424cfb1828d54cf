pub mod category;
pub mod upload;
