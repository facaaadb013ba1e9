use async_graphql::MergedObject;

pub mod customer;
pub mod order;
pub mod product;

pub use customer::CustomerMutation;
pub use order::OrderMutation;
pub use product::ProductMutation;

#[derive(MergedObject, Default)]
pub struct Mutation(CustomerMutation, ProductMutation, OrderMutation);
