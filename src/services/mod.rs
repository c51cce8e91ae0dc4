pub mod image;
pub mod product_store;
pub mod validation;
