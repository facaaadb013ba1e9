//! Declarative list filters
//!
//! Each filter field maps to one predicate; every supplied predicate is
//! AND-ed into a single [`Condition`] applied to the list query. Text
//! matches are case-insensitive "contains" lookups, date bounds are whole
//! UTC days and inclusive.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func, LikeExpr, Query, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, EntityName, IdenStatic};

use crate::database::entities::{customers, order_products, orders, products};
use crate::services::validation::ValidationService;

/// Threshold below which a product counts as low on stock
pub const LOW_STOCK_THRESHOLD: i32 = 10;

#[derive(Clone, Debug, Default)]
pub struct CustomerFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub created_at_gte: Option<NaiveDate>,
    pub created_at_lte: Option<NaiveDate>,
    pub phone_pattern: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub price_gte: Option<Decimal>,
    pub price_lte: Option<Decimal>,
    pub stock_gte: Option<i32>,
    pub stock_lte: Option<i32>,
    pub low_stock: Option<bool>,
}

#[derive(Clone, Debug, Default)]
pub struct OrderFilter {
    pub total_amount_gte: Option<Decimal>,
    pub total_amount_lte: Option<Decimal>,
    pub order_date_gte: Option<NaiveDate>,
    pub order_date_lte: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub product_name: Option<String>,
    pub product_id: Option<String>,
}

impl CustomerFilter {
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(name) = non_empty(&self.name) {
            condition = condition.add(icontains(customers::Entity, customers::Column::Name, name));
        }
        if let Some(email) = non_empty(&self.email) {
            condition =
                condition.add(icontains(customers::Entity, customers::Column::Email, email));
        }
        if let Some(date) = self.created_at_gte {
            condition = condition.add(customers::Column::CreatedAt.gte(start_of_day(date)));
        }
        if let Some(date) = self.created_at_lte {
            condition = condition.add(before_end_of_day(customers::Column::CreatedAt, date));
        }
        if let Some(prefix) = non_empty(&self.phone_pattern) {
            condition = condition.add(customers::Column::Phone.starts_with(prefix));
        }

        condition
    }
}

impl ProductFilter {
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(name) = non_empty(&self.name) {
            condition = condition.add(icontains(products::Entity, products::Column::Name, name));
        }
        if let Some(price) = self.price_gte {
            condition = condition.add(products::Column::Price.gte(price));
        }
        if let Some(price) = self.price_lte {
            condition = condition.add(products::Column::Price.lte(price));
        }
        if let Some(stock) = self.stock_gte {
            condition = condition.add(products::Column::Stock.gte(stock));
        }
        if let Some(stock) = self.stock_lte {
            condition = condition.add(products::Column::Stock.lte(stock));
        }
        if self.low_stock == Some(true) {
            condition = condition.add(products::Column::Stock.lt(LOW_STOCK_THRESHOLD));
        }

        condition
    }
}

impl OrderFilter {
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(amount) = self.total_amount_gte {
            condition = condition.add(orders::Column::TotalAmount.gte(amount));
        }
        if let Some(amount) = self.total_amount_lte {
            condition = condition.add(orders::Column::TotalAmount.lte(amount));
        }
        if let Some(date) = self.order_date_gte {
            condition = condition.add(orders::Column::OrderDate.gte(start_of_day(date)));
        }
        if let Some(date) = self.order_date_lte {
            condition = condition.add(before_end_of_day(orders::Column::OrderDate, date));
        }
        if let Some(name) = non_empty(&self.customer_name) {
            condition = condition.add(
                orders::Column::CustomerId.in_subquery(
                    Query::select()
                        .column((customers::Entity, customers::Column::Id))
                        .from(customers::Entity)
                        .and_where(icontains(customers::Entity, customers::Column::Name, name))
                        .to_owned(),
                ),
            );
        }
        if let Some(name) = non_empty(&self.product_name) {
            condition = condition.add(
                orders::Column::Id.in_subquery(
                    Query::select()
                        .column((order_products::Entity, order_products::Column::OrderId))
                        .from(order_products::Entity)
                        .inner_join(
                            products::Entity,
                            Expr::col((products::Entity, products::Column::Id)).equals((
                                order_products::Entity,
                                order_products::Column::ProductId,
                            )),
                        )
                        .and_where(icontains(products::Entity, products::Column::Name, name))
                        .to_owned(),
                ),
            );
        }
        if let Some(raw) = non_empty(&self.product_id) {
            let product_id = ValidationService::canonical_id(raw).unwrap_or_else(|| raw.to_string());
            condition = condition.add(
                orders::Column::Id.in_subquery(
                    Query::select()
                        .column(order_products::Column::OrderId)
                        .from(order_products::Entity)
                        .and_where(order_products::Column::ProductId.eq(product_id))
                        .to_owned(),
                ),
            );
        }

        condition
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Case-insensitive substring match on a qualified column
fn icontains<E, C>(entity: E, column: C, needle: &str) -> SimpleExpr
where
    E: EntityName + 'static,
    C: IdenStatic + 'static,
{
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Expr::expr(Func::lower(Expr::col((entity, column))))
        .like(LikeExpr::new(pattern).escape('\\'))
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// `column < next midnight`, or no bound at all for the last representable day
fn before_end_of_day<C: ColumnTrait>(column: C, date: NaiveDate) -> Condition {
    match date.succ_opt() {
        Some(next) => Condition::all().add(column.lt(start_of_day(next))),
        None => Condition::all(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn customer_sql(filter: &CustomerFilter) -> String {
        customers::Entity::find()
            .filter(filter.condition())
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn test_empty_filter_adds_no_predicate() {
        let sql = customer_sql(&CustomerFilter::default());
        for column in ["\"name\"", "\"email\"", "\"created_at\"", "\"phone\""] {
            assert!(
                !sql.split("WHERE").nth(1).unwrap_or("").contains(column),
                "unexpected predicate on {} in {}",
                column,
                sql
            );
        }
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let sql = customer_sql(&CustomerFilter {
            name: Some("   ".to_string()),
            ..Default::default()
        });
        assert!(!sql.contains("LOWER"), "unexpected predicate in {}", sql);
        assert!(!sql.contains("LIKE"), "unexpected predicate in {}", sql);
    }

    #[test]
    fn test_name_filter_is_case_insensitive_contains() {
        let sql = customer_sql(&CustomerFilter {
            name: Some("AdA".to_string()),
            ..Default::default()
        });
        assert!(sql.contains("LOWER"), "missing LOWER in {}", sql);
        assert!(sql.contains("'%ada%'"), "missing pattern in {}", sql);
    }

    #[test]
    fn test_like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn test_low_stock_only_applies_when_true() {
        let off = products::Entity::find()
            .filter(
                ProductFilter {
                    low_stock: Some(false),
                    ..Default::default()
                }
                .condition(),
            )
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(!off.contains("\"stock\" <"), "unexpected predicate in {}", off);

        let on = products::Entity::find()
            .filter(
                ProductFilter {
                    low_stock: Some(true),
                    ..Default::default()
                }
                .condition(),
            )
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(on.contains("\"stock\" < 10"), "missing stock bound in {}", on);
    }

    #[test]
    fn test_order_relation_filters_use_subqueries() {
        let sql = orders::Entity::find()
            .filter(
                OrderFilter {
                    customer_name: Some("ada".to_string()),
                    product_name: Some("widget".to_string()),
                    ..Default::default()
                }
                .condition(),
            )
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(sql.contains("\"customer_id\" IN (SELECT"), "{}", sql);
        assert!(sql.contains("INNER JOIN \"products\""), "{}", sql);
    }

    #[test]
    fn test_end_of_day_bound() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(
            start_of_day(date.succ_opt().unwrap()).to_rfc3339(),
            "2024-04-01T00:00:00+00:00"
        );
    }
}
