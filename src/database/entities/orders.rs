use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub customer_id: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_amount: Decimal,
    pub order_date: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customers,
    #[sea_orm(has_many = "super::order_products::Entity")]
    OrderProducts,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl Related<super::order_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProducts.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        super::order_products::Relation::Products.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::order_products::Relation::Orders.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Money at column scale; SQLite hands decimals back as floats
    pub fn with_money_scale(mut self) -> Self {
        self.total_amount.rescale(super::MONEY_SCALE);
        self
    }
}

impl ActiveModel {
    pub fn new() -> Self {
        Self {
            id: Set(uuid::Uuid::new_v4().to_string()),
            customer_id: ActiveValue::NotSet,
            total_amount: ActiveValue::NotSet,
            order_date: Set(chrono::Utc::now()),
        }
    }
}
