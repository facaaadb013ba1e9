use async_graphql::*;

use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::ResultExt;
use crate::graphql::types::{
    Customer, CustomerFilterInput, Order, OrderFilterInput, Product, ProductFilterInput,
};

#[derive(Default)]
pub struct Query;

#[Object]
impl Query {
    async fn hello(&self) -> &'static str {
        "Hello, GraphQL!"
    }

    /// Get a customer by ID
    async fn customer(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Customer>> {
        let context = ctx.data::<GraphQLContext>()?;
        let customer = context
            .app
            .customer_service()
            .get_customer(id.as_str())
            .await
            .to_graphql_result()?;

        Ok(customer.map(Customer::from))
    }

    /// List customers ordered by name
    async fn all_customers(
        &self,
        ctx: &Context<'_>,
        filter: Option<CustomerFilterInput>,
    ) -> Result<Vec<Customer>> {
        let context = ctx.data::<GraphQLContext>()?;
        let filter = filter.unwrap_or_default().into();
        let customers = context
            .app
            .customer_service()
            .list_customers(&filter)
            .await
            .to_graphql_result()?;

        Ok(customers.into_iter().map(Customer::from).collect())
    }

    async fn product(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Product>> {
        let context = ctx.data::<GraphQLContext>()?;
        let product = context
            .app
            .product_service()
            .get_product(id.as_str())
            .await
            .to_graphql_result()?;

        Ok(product.map(Product::from))
    }

    /// List products ordered by name
    async fn all_products(
        &self,
        ctx: &Context<'_>,
        filter: Option<ProductFilterInput>,
    ) -> Result<Vec<Product>> {
        let context = ctx.data::<GraphQLContext>()?;
        let filter = filter.unwrap_or_default().into();
        let products = context
            .app
            .product_service()
            .list_products(&filter)
            .await
            .to_graphql_result()?;

        Ok(products.into_iter().map(Product::from).collect())
    }

    async fn order(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Order>> {
        let context = ctx.data::<GraphQLContext>()?;
        let order = context
            .app
            .order_service()
            .get_order(id.as_str())
            .await
            .to_graphql_result()?;

        Ok(order.map(Order::from))
    }

    /// List orders, newest first
    async fn all_orders(
        &self,
        ctx: &Context<'_>,
        filter: Option<OrderFilterInput>,
    ) -> Result<Vec<Order>> {
        let context = ctx.data::<GraphQLContext>()?;
        let filter = filter.unwrap_or_default().into();
        let orders = context
            .app
            .order_service()
            .list_orders(&filter)
            .await
            .to_graphql_result()?;

        Ok(orders.into_iter().map(Order::from).collect())
    }
}
