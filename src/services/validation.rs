use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use crate::database::entities::customers;
use crate::errors::{CrmError, CrmResult};
use crate::services::customer_service::CustomerCreateRequest;
use crate::services::order_service::OrderCreateRequest;
use crate::services::product_service::ProductCreateRequest;

pub const MAX_NAME_LENGTH: usize = 100;
const MAX_EMAIL_LENGTH: usize = 320;
const MAX_PRICE_DIGITS: u32 = 10;
const PRICE_DECIMAL_PLACES: u32 = 2;

static EMAIL_USER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[-!#$%&'*+/=?^_`{}|~0-9a-z]+(\.[-!#$%&'*+/=?^_`{}|~0-9a-z]+)*$")
        .expect("Invalid regex pattern for email local part")
});

static EMAIL_DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    // Top-level label is alphabetic or punycode
    Regex::new(
        r"(?i)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+(?:[a-z]{2,63}|xn--[a-z0-9]{1,59})$",
    )
    .expect("Invalid regex pattern for email domain")
});

// Optional leading '+', then 7-20 digits, spaces or hyphens
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[\d\s-]{7,20}$").expect("Invalid regex pattern for phone numbers")
});

/// Field and record validation applied before any write
pub struct ValidationService;

impl ValidationService {
    /// Run every customer check in order: duplicate email, email syntax,
    /// phone format, name. The first failure wins.
    pub async fn validate_customer<C>(conn: &C, input: &CustomerCreateRequest) -> CrmResult<()>
    where
        C: ConnectionTrait,
    {
        if Self::email_exists(conn, &input.email).await? {
            return Err(CrmError::DuplicateEmail(input.email.clone()));
        }

        Self::validate_email_format(&input.email)?;
        Self::validate_phone_format(input.phone.as_deref())?;
        Self::validate_name("Customer", &input.name)?;

        Ok(())
    }

    pub async fn email_exists<C>(conn: &C, email: &str) -> CrmResult<bool>
    where
        C: ConnectionTrait,
    {
        let matches = customers::Entity::find()
            .filter(customers::Column::Email.eq(email))
            .count(conn)
            .await?;

        Ok(matches > 0)
    }

    pub fn validate_email_format(email: &str) -> CrmResult<()> {
        let invalid = || CrmError::InvalidEmail(email.to_string());

        if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
            return Err(invalid());
        }

        let (user, domain) = email.rsplit_once('@').ok_or_else(invalid)?;

        if !EMAIL_USER_RE.is_match(user) {
            return Err(invalid());
        }

        if !domain.eq_ignore_ascii_case("localhost") && !EMAIL_DOMAIN_RE.is_match(domain) {
            return Err(invalid());
        }

        Ok(())
    }

    /// Blank phones count as absent
    pub fn validate_phone_format(phone: Option<&str>) -> CrmResult<()> {
        match phone {
            Some(value) if !value.is_empty() && !PHONE_RE.is_match(value) => {
                Err(CrmError::InvalidPhone(value.to_string()))
            }
            _ => Ok(()),
        }
    }

    pub fn validate_name(entity: &str, name: &str) -> CrmResult<()> {
        if name.trim().is_empty() {
            return Err(CrmError::empty_name(entity));
        }

        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(CrmError::name_too_long(entity, MAX_NAME_LENGTH));
        }

        Ok(())
    }

    pub fn validate_price(price: Decimal) -> CrmResult<()> {
        if price <= Decimal::ZERO {
            return Err(CrmError::non_positive_price());
        }

        let normalized = price.normalize();
        let integer_limit = Decimal::from(10_i64.pow(MAX_PRICE_DIGITS - PRICE_DECIMAL_PLACES));
        if normalized.scale() > PRICE_DECIMAL_PLACES || normalized.trunc() >= integer_limit {
            return Err(CrmError::price_precision());
        }

        Ok(())
    }

    pub fn validate_stock(stock: Option<i32>) -> CrmResult<()> {
        match stock {
            Some(value) if value < 0 => Err(CrmError::InvalidStock(value)),
            _ => Ok(()),
        }
    }

    pub fn validate_product(input: &ProductCreateRequest) -> CrmResult<()> {
        Self::validate_price(input.price)?;
        Self::validate_stock(input.stock)?;
        Self::validate_name("Product", &input.name)?;
        Ok(())
    }

    pub fn validate_order_input(input: &OrderCreateRequest) -> CrmResult<()> {
        if input.product_ids.is_empty() {
            return Err(CrmError::EmptyProductList);
        }
        Ok(())
    }

    /// Canonical form of a record id, or `None` when it is not a UUID
    pub fn canonical_id(raw: &str) -> Option<String> {
        Uuid::parse_str(raw.trim())
            .ok()
            .map(|id| id.hyphenated().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;
    use crate::services::customer_service::CustomerService;
    use std::str::FromStr;

    fn customer(name: &str, email: &str, phone: Option<&str>) -> CustomerCreateRequest {
        CustomerCreateRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
        }
    }

    #[test]
    fn test_email_format() {
        assert!(ValidationService::validate_email_format("ada@example.com").is_ok());
        assert!(ValidationService::validate_email_format("first.last+tag@mail.example.co").is_ok());
        assert!(ValidationService::validate_email_format("ops@localhost").is_ok());
        assert!(ValidationService::validate_email_format("ada@example.xn--p1ai").is_ok());

        for bad in [
            "",
            "plainaddress",
            "@example.com",
            "ada@",
            "ada@example",
            "ada..b@example.com",
            ".ada@example.com",
            "ada@-example.com",
            "ada lovelace@example.com",
            "ada@example.123",
            "ada@example.c0m",
            "ada@10.0.0.1",
        ] {
            assert!(
                matches!(
                    ValidationService::validate_email_format(bad),
                    Err(CrmError::InvalidEmail(_))
                ),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_phone_format() {
        assert!(ValidationService::validate_phone_format(None).is_ok());
        assert!(ValidationService::validate_phone_format(Some("")).is_ok());
        assert!(ValidationService::validate_phone_format(Some("+1234567890")).is_ok());
        assert!(ValidationService::validate_phone_format(Some("123-456-7890")).is_ok());
        assert!(ValidationService::validate_phone_format(Some("+44 20 7946 0958")).is_ok());

        assert!(ValidationService::validate_phone_format(Some("12345")).is_err());
        assert!(ValidationService::validate_phone_format(Some("(555) 123-4567")).is_err());
        assert!(ValidationService::validate_phone_format(Some("++1234567")).is_err());
        assert!(ValidationService::validate_phone_format(Some("123456789012345678901")).is_err());
    }

    #[test]
    fn test_price_rules() {
        let price = |s: &str| Decimal::from_str(s).unwrap();

        assert!(ValidationService::validate_price(price("0.01")).is_ok());
        assert!(ValidationService::validate_price(price("99999999.99")).is_ok());
        assert!(ValidationService::validate_price(price("10.500")).is_ok());

        assert_eq!(
            ValidationService::validate_price(price("0"))
                .unwrap_err()
                .to_string(),
            "Price must be a positive number."
        );
        assert!(ValidationService::validate_price(price("-5")).is_err());
        assert!(ValidationService::validate_price(price("1.001")).is_err());
        assert!(ValidationService::validate_price(price("100000000")).is_err());
    }

    #[test]
    fn test_stock_rules() {
        assert!(ValidationService::validate_stock(None).is_ok());
        assert!(ValidationService::validate_stock(Some(0)).is_ok());
        assert!(matches!(
            ValidationService::validate_stock(Some(-1)),
            Err(CrmError::InvalidStock(-1))
        ));
    }

    #[test]
    fn test_product_checks_price_before_stock() {
        let input = ProductCreateRequest {
            name: "Widget".to_string(),
            price: Decimal::ZERO,
            stock: Some(-3),
        };
        assert!(matches!(
            ValidationService::validate_product(&input),
            Err(CrmError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_order_input_requires_products() {
        let input = OrderCreateRequest {
            customer_id: "whatever".to_string(),
            product_ids: vec![],
        };
        assert!(matches!(
            ValidationService::validate_order_input(&input),
            Err(CrmError::EmptyProductList)
        ));
    }

    #[test]
    fn test_canonical_id() {
        let id = Uuid::new_v4();
        let upper = id.hyphenated().to_string().to_uppercase();
        assert_eq!(
            ValidationService::canonical_id(&upper),
            Some(id.hyphenated().to_string())
        );
        assert_eq!(ValidationService::canonical_id("not-a-uuid"), None);
    }

    #[tokio::test]
    async fn test_customer_checks_duplicate_before_syntax() {
        let db = setup_test_db().await;
        CustomerService::new(db.clone())
            .create_customer(customer("Ada", "ada@example.com", None))
            .await
            .unwrap();

        // Same email with a bad phone: the duplicate is reported first
        let err = ValidationService::validate_customer(
            &db,
            &customer("Other", "ada@example.com", Some("bad")),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CrmError::DuplicateEmail(_)));

        let err = ValidationService::validate_customer(
            &db,
            &customer("", "not-an-email", Some("bad")),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CrmError::InvalidEmail(_)));

        let err = ValidationService::validate_customer(
            &db,
            &customer("", "grace@example.com", Some("bad")),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CrmError::InvalidPhone(_)));

        let err = ValidationService::validate_customer(
            &db,
            &customer("  ", "grace@example.com", None),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CrmError::InvalidName(_)));
    }
}
