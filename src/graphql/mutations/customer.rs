use async_graphql::*;

use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::ResultExt;
use crate::graphql::types::{
    BulkCreateCustomersPayload, CreateCustomerPayload, Customer, CustomerInput,
};
use crate::services::BulkEntryError;

#[derive(Default)]
pub struct CustomerMutation;

#[Object]
impl CustomerMutation {
    /// Create a single customer
    async fn create_customer(
        &self,
        ctx: &Context<'_>,
        input: CustomerInput,
    ) -> Result<CreateCustomerPayload> {
        let context = ctx.data::<GraphQLContext>()?;
        let customer = context
            .app
            .customer_service()
            .create_customer(input.into())
            .await
            .to_graphql_result()?;

        Ok(CreateCustomerPayload {
            customer: Customer::from(customer),
            message: "Customer created successfully.".to_string(),
        })
    }

    /// Create many customers; rejected entries are reported in `errors`
    /// instead of failing the mutation
    async fn bulk_create_customers(
        &self,
        ctx: &Context<'_>,
        input: Vec<CustomerInput>,
    ) -> Result<BulkCreateCustomersPayload> {
        let context = ctx.data::<GraphQLContext>()?;
        let outcome = context
            .app
            .customer_service()
            .bulk_create_customers(input.into_iter().map(Into::into).collect())
            .await;

        let errors = outcome
            .errors
            .iter()
            .map(BulkEntryError::to_json)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BulkCreateCustomersPayload {
            customers: outcome.created.into_iter().map(Customer::from).collect(),
            errors,
        })
    }
}
