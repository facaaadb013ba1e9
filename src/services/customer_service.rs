use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::database::entities::{customers, orders};
use crate::errors::{CrmError, CrmResult};
use crate::services::filters::CustomerFilter;
use crate::services::validation::ValidationService;

#[derive(Clone)]
pub struct CustomerService {
    db: DatabaseConnection,
}

#[derive(Clone, Debug)]
pub struct CustomerCreateRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// One rejected entry of a bulk request
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BulkEntryError {
    pub index: usize,
    pub email: String,
    pub error: String,
}

impl BulkEntryError {
    /// JSON form returned in-band by the bulk mutation
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Default)]
pub struct BulkCreateOutcome {
    pub created: Vec<customers::Model>,
    pub errors: Vec<BulkEntryError>,
}

impl CustomerService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_customer(
        &self,
        request: CustomerCreateRequest,
    ) -> CrmResult<customers::Model> {
        let customer = Self::insert_validated(&self.db, request).await?;
        info!("Created customer {} <{}>", customer.id, customer.email);
        Ok(customer)
    }

    /// Create every valid entry and report the rest.
    ///
    /// Entries are processed strictly in order and each one is committed
    /// before the next is validated, so a later entry repeating an earlier
    /// entry's email is reported as a duplicate.
    pub async fn bulk_create_customers(
        &self,
        requests: Vec<CustomerCreateRequest>,
    ) -> BulkCreateOutcome {
        let total = requests.len();
        let mut outcome = BulkCreateOutcome::default();

        for (index, request) in requests.into_iter().enumerate() {
            let email = request.email.clone();

            match Self::insert_validated(&self.db, request).await {
                Ok(customer) => outcome.created.push(customer),
                Err(err) => {
                    let error = match err {
                        CrmError::Database(db_err) => {
                            warn!("Bulk customer entry {} hit a store failure: {}", index, db_err);
                            format!("Internal error: {}", db_err)
                        }
                        other => {
                            debug!("Bulk customer entry {} rejected: {}", index, other);
                            other.to_string()
                        }
                    };
                    outcome.errors.push(BulkEntryError {
                        index,
                        email,
                        error,
                    });
                }
            }
        }

        info!(
            "Bulk customer creation finished: {} of {} created, {} rejected",
            outcome.created.len(),
            total,
            outcome.errors.len()
        );

        outcome
    }

    /// Look up a customer; malformed ids are a miss, not an error
    pub async fn get_customer(&self, id: &str) -> CrmResult<Option<customers::Model>> {
        let Some(id) = ValidationService::canonical_id(id) else {
            return Ok(None);
        };

        Ok(customers::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Customers matching the filter, ordered by name (then id)
    pub async fn list_customers(&self, filter: &CustomerFilter) -> CrmResult<Vec<customers::Model>> {
        let customers = customers::Entity::find()
            .filter(filter.condition())
            .order_by_asc(customers::Column::Name)
            .order_by_asc(customers::Column::Id)
            .all(&self.db)
            .await?;

        Ok(customers)
    }

    pub async fn orders_for_customer(&self, customer_id: &str) -> CrmResult<Vec<orders::Model>> {
        let orders = orders::Entity::find()
            .filter(orders::Column::CustomerId.eq(customer_id))
            .order_by_desc(orders::Column::OrderDate)
            .order_by_asc(orders::Column::Id)
            .all(&self.db)
            .await?;

        Ok(orders
            .into_iter()
            .map(orders::Model::with_money_scale)
            .collect())
    }

    async fn insert_validated<C>(
        conn: &C,
        request: CustomerCreateRequest,
    ) -> CrmResult<customers::Model>
    where
        C: ConnectionTrait,
    {
        ValidationService::validate_customer(conn, &request).await?;

        let customer = customers::ActiveModel {
            name: Set(request.name),
            email: Set(request.email),
            phone: Set(request.phone.filter(|phone| !phone.is_empty())),
            ..customers::ActiveModel::new()
        };

        Ok(customer.insert(conn).await?)
    }
}
