// Catalog domain module
// Categories and supplier product listings, including bulk pricing

pub mod category;
pub mod product;

pub use category::Category;
pub use product::{Product, ProductDraft, ProductFilter, Quote};
