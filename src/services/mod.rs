pub mod customer_service;
pub mod filters;
pub mod order_service;
pub mod product_service;
pub mod validation;

pub use customer_service::{
    BulkCreateOutcome, BulkEntryError, CustomerCreateRequest, CustomerService,
};
pub use filters::{CustomerFilter, OrderFilter, ProductFilter};
pub use order_service::{OrderCreateRequest, OrderDetails, OrderService};
pub use product_service::{ProductCreateRequest, ProductService};
pub use validation::ValidationService;
