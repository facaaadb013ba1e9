pub mod customer;
pub mod filters;
pub mod order;
pub mod product;

pub use customer::*;
pub use filters::*;
pub use order::*;
pub use product::*;
