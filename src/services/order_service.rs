use std::collections::HashSet;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info};

use crate::database::entities::{customers, order_products, orders, products};
use crate::errors::{CrmError, CrmResult};
use crate::services::filters::OrderFilter;
use crate::services::validation::ValidationService;

#[derive(Clone)]
pub struct OrderService {
    db: DatabaseConnection,
}

#[derive(Clone, Debug)]
pub struct OrderCreateRequest {
    pub customer_id: String,
    pub product_ids: Vec<String>,
}

/// An order together with the records it links to
#[derive(Clone, Debug)]
pub struct OrderDetails {
    pub order: orders::Model,
    pub customer: customers::Model,
    pub products: Vec<products::Model>,
}

/// A requested product id and its canonical form (if it parses)
struct RequestedProduct {
    raw: String,
    canonical: Option<String>,
}

impl OrderService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create an order for existing customer and product rows.
    ///
    /// Runs in a single transaction: the order row and its product links are
    /// committed together, and any failure leaves the store untouched.
    ///
    /// The total is the exact sum of the distinct products' prices and may
    /// exceed the ten-digit bound enforced on a single price.
    pub async fn create_order(&self, request: OrderCreateRequest) -> CrmResult<OrderDetails> {
        ValidationService::validate_order_input(&request)?;

        let txn = self.db.begin().await?;

        let customer = match ValidationService::canonical_id(&request.customer_id) {
            Some(id) => customers::Entity::find_by_id(id).one(&txn).await?,
            None => None,
        }
        .ok_or_else(|| CrmError::CustomerNotFound(request.customer_id.clone()))?;

        let requested = Self::unique_product_ids(&request.product_ids);
        let lookup_ids: Vec<String> = requested
            .iter()
            .filter_map(|product| product.canonical.clone())
            .collect();

        let products = products::Entity::find()
            .filter(products::Column::Id.is_in(lookup_ids))
            .order_by_asc(products::Column::Name)
            .order_by_asc(products::Column::Id)
            .all(&txn)
            .await?
            .into_iter()
            .map(products::Model::with_money_scale)
            .collect::<Vec<_>>();

        if products.len() < requested.len() {
            let found: HashSet<&str> = products.iter().map(|p| p.id.as_str()).collect();
            let missing: Vec<String> = requested
                .into_iter()
                .filter(|product| {
                    product
                        .canonical
                        .as_deref()
                        .map_or(true, |id| !found.contains(id))
                })
                .map(|product| product.raw)
                .collect();

            debug!("Order rejected, unknown products: {:?}", missing);
            return Err(CrmError::ProductsNotFound(missing));
        }

        let total_amount: Decimal = products.iter().map(|p| p.price).sum();

        let order = orders::ActiveModel {
            customer_id: Set(customer.id.clone()),
            total_amount: Set(total_amount),
            ..orders::ActiveModel::new()
        }
        .insert(&txn)
        .await?
        .with_money_scale();

        let links = products.iter().map(|product| order_products::ActiveModel {
            order_id: Set(order.id.clone()),
            product_id: Set(product.id.clone()),
        });
        order_products::Entity::insert_many(links)
            .exec_without_returning(&txn)
            .await?;

        txn.commit().await?;

        info!(
            "Created order {} for customer {} with {} products, total {}",
            order.id,
            customer.id,
            products.len(),
            order.total_amount
        );

        Ok(OrderDetails {
            order,
            customer,
            products,
        })
    }

    pub async fn get_order(&self, id: &str) -> CrmResult<Option<orders::Model>> {
        let Some(id) = ValidationService::canonical_id(id) else {
            return Ok(None);
        };

        Ok(orders::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(orders::Model::with_money_scale))
    }

    /// Orders matching the filter, newest first
    pub async fn list_orders(&self, filter: &OrderFilter) -> CrmResult<Vec<orders::Model>> {
        let orders = orders::Entity::find()
            .filter(filter.condition())
            .order_by_desc(orders::Column::OrderDate)
            .order_by_asc(orders::Column::Id)
            .all(&self.db)
            .await?;

        Ok(orders
            .into_iter()
            .map(orders::Model::with_money_scale)
            .collect())
    }

    pub async fn customer_for_order(
        &self,
        order: &orders::Model,
    ) -> CrmResult<Option<customers::Model>> {
        Ok(order
            .find_related(customers::Entity)
            .one(&self.db)
            .await?)
    }

    pub async fn products_for_order(
        &self,
        order: &orders::Model,
    ) -> CrmResult<Vec<products::Model>> {
        Ok(order
            .find_related(products::Entity)
            .order_by_asc(products::Column::Name)
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(products::Model::with_money_scale)
            .collect())
    }

    /// De-duplicate ids on their canonical form, keeping first-seen order
    fn unique_product_ids(product_ids: &[String]) -> Vec<RequestedProduct> {
        let mut seen = HashSet::new();
        product_ids
            .iter()
            .filter_map(|raw| {
                let canonical = ValidationService::canonical_id(raw);
                let key = canonical.clone().unwrap_or_else(|| raw.clone());
                seen.insert(key).then(|| RequestedProduct {
                    raw: raw.clone(),
                    canonical,
                })
            })
            .collect()
    }
}
