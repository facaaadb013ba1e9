use async_graphql::*;

use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::ResultExt;
use crate::graphql::types::{CreateProductPayload, Product, ProductInput};

#[derive(Default)]
pub struct ProductMutation;

#[Object]
impl ProductMutation {
    async fn create_product(
        &self,
        ctx: &Context<'_>,
        input: ProductInput,
    ) -> Result<CreateProductPayload> {
        let context = ctx.data::<GraphQLContext>()?;
        let product = context
            .app
            .product_service()
            .create_product(input.into())
            .await
            .to_graphql_result()?;

        Ok(CreateProductPayload {
            product: Product::from(product),
        })
    }
}
