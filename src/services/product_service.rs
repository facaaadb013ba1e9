use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

use crate::database::entities::products;
use crate::errors::CrmResult;
use crate::services::filters::ProductFilter;
use crate::services::validation::ValidationService;

#[derive(Clone)]
pub struct ProductService {
    db: DatabaseConnection,
}

#[derive(Clone, Debug)]
pub struct ProductCreateRequest {
    pub name: String,
    pub price: Decimal,
    pub stock: Option<i32>,
}

impl ProductService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_product(&self, request: ProductCreateRequest) -> CrmResult<products::Model> {
        ValidationService::validate_product(&request)?;

        let product = products::ActiveModel {
            name: Set(request.name),
            price: Set(request.price),
            stock: Set(request.stock.unwrap_or(0)),
            ..products::ActiveModel::new()
        }
        .insert(&self.db)
        .await?
        .with_money_scale();

        info!(
            "Created product {} '{}' at {}",
            product.id, product.name, product.price
        );
        Ok(product)
    }

    pub async fn get_product(&self, id: &str) -> CrmResult<Option<products::Model>> {
        let Some(id) = ValidationService::canonical_id(id) else {
            return Ok(None);
        };

        Ok(products::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(products::Model::with_money_scale))
    }

    pub async fn list_products(&self, filter: &ProductFilter) -> CrmResult<Vec<products::Model>> {
        let products = products::Entity::find()
            .filter(filter.condition())
            .order_by_asc(products::Column::Name)
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await?;

        Ok(products
            .into_iter()
            .map(products::Model::with_money_scale)
            .collect())
    }
}
