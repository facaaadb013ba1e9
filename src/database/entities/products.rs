use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    #[sea_orm(default_value = 0)]
    pub stock: i32,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_products::Entity")]
    OrderProducts,
}

impl Related<super::order_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProducts.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        super::order_products::Relation::Orders.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::order_products::Relation::Products.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Money at column scale; SQLite hands decimals back as floats
    pub fn with_money_scale(mut self) -> Self {
        self.price.rescale(super::MONEY_SCALE);
        self
    }
}

impl ActiveModel {
    pub fn new() -> Self {
        Self {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: ActiveValue::NotSet,
            price: ActiveValue::NotSet,
            stock: Set(0),
            created_at: Set(chrono::Utc::now()),
        }
    }
}
