//! Order workflow: totals, link rows and all-or-nothing persistence

use anyhow::Result;
use crm::database::entities::{customers, order_products, orders, products};
use crm::database::establish_connection;
use crm::database::migrations::Migrator;
use crm::errors::CrmError;
use crm::services::{
    CustomerCreateRequest, CustomerService, OrderCreateRequest, OrderFilter, OrderService,
    ProductCreateRequest, ProductService,
};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait};
use sea_orm_migration::MigratorTrait;

struct Fixture {
    db: DatabaseConnection,
    orders: OrderService,
    customer: customers::Model,
    widget: products::Model,
    gadget: products::Model,
}

async fn setup() -> Result<Fixture> {
    let db = establish_connection("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;

    let customer = CustomerService::new(db.clone())
        .create_customer(CustomerCreateRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
        })
        .await?;

    let product_service = ProductService::new(db.clone());
    let widget = product_service
        .create_product(ProductCreateRequest {
            name: "Widget".to_string(),
            price: Decimal::new(1000, 2),
            stock: Some(3),
        })
        .await?;
    let gadget = product_service
        .create_product(ProductCreateRequest {
            name: "Gadget".to_string(),
            price: Decimal::new(500, 2),
            stock: None,
        })
        .await?;

    Ok(Fixture {
        orders: OrderService::new(db.clone()),
        db,
        customer,
        widget,
        gadget,
    })
}

#[tokio::test]
async fn test_order_total_counts_each_product_once() -> Result<()> {
    let fx = setup().await?;

    let details = fx
        .orders
        .create_order(OrderCreateRequest {
            customer_id: fx.customer.id.clone(),
            product_ids: vec![fx.widget.id.clone(), fx.widget.id.clone(), fx.gadget.id.clone()],
        })
        .await?;

    assert_eq!(details.order.total_amount, Decimal::new(1500, 2));
    assert_eq!(details.order.total_amount.to_string(), "15.00");
    assert_eq!(details.customer.id, fx.customer.id);
    assert_eq!(details.products.len(), 2);
    assert_eq!(order_products::Entity::find().count(&fx.db).await?, 2);

    let linked = fx.orders.products_for_order(&details.order).await?;
    let names: Vec<&str> = linked.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Gadget", "Widget"]);
    let prices: Vec<String> = linked.iter().map(|p| p.price.to_string()).collect();
    assert_eq!(prices, vec!["5.00", "10.00"]);

    let listed = fx.orders.list_orders(&OrderFilter::default()).await?;
    assert_eq!(listed[0].total_amount.to_string(), "15.00");

    let owner = fx.orders.customer_for_order(&details.order).await?;
    assert_eq!(owner.map(|c| c.id), Some(fx.customer.id.clone()));

    Ok(())
}

#[tokio::test]
async fn test_unknown_product_rolls_back_everything() -> Result<()> {
    let fx = setup().await?;
    let missing = uuid::Uuid::new_v4().to_string();

    let err = fx
        .orders
        .create_order(OrderCreateRequest {
            customer_id: fx.customer.id.clone(),
            product_ids: vec![fx.widget.id.clone(), missing.clone()],
        })
        .await
        .unwrap_err();

    match &err {
        CrmError::ProductsNotFound(ids) => assert_eq!(ids, &vec![missing.clone()]),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.to_string().contains(&missing));
    assert_eq!(orders::Entity::find().count(&fx.db).await?, 0);
    assert_eq!(order_products::Entity::find().count(&fx.db).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_failed_link_insert_rolls_back_order_row() -> Result<()> {
    let fx = setup().await?;

    fx.db
        .execute_unprepared("DROP TABLE order_products")
        .await?;

    let err = fx
        .orders
        .create_order(OrderCreateRequest {
            customer_id: fx.customer.id.clone(),
            product_ids: vec![fx.widget.id.clone(), fx.gadget.id.clone()],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CrmError::Database(_)), "unexpected error: {:?}", err);
    assert_eq!(orders::Entity::find().count(&fx.db).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_total_may_exceed_single_price_bound() -> Result<()> {
    let fx = setup().await?;
    let product_service = ProductService::new(fx.db.clone());

    let mut product_ids = Vec::new();
    for name in ["Crown", "Sceptre"] {
        let product = product_service
            .create_product(ProductCreateRequest {
                name: name.to_string(),
                price: Decimal::new(9_999_999_999, 2),
                stock: Some(1),
            })
            .await?;
        product_ids.push(product.id);
    }

    let details = fx
        .orders
        .create_order(OrderCreateRequest {
            customer_id: fx.customer.id.clone(),
            product_ids,
        })
        .await?;

    assert_eq!(details.order.total_amount.to_string(), "199999999.98");

    Ok(())
}

#[tokio::test]
async fn test_unknown_customer_is_rejected() -> Result<()> {
    let fx = setup().await?;

    let err = fx
        .orders
        .create_order(OrderCreateRequest {
            customer_id: "not-a-customer".to_string(),
            product_ids: vec![fx.widget.id.clone()],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CrmError::CustomerNotFound(ref id) if id == "not-a-customer"));
    assert_eq!(orders::Entity::find().count(&fx.db).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_empty_product_list_is_rejected() -> Result<()> {
    let fx = setup().await?;

    let err = fx
        .orders
        .create_order(OrderCreateRequest {
            customer_id: fx.customer.id.clone(),
            product_ids: vec![],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CrmError::EmptyProductList));
    assert_eq!(orders::Entity::find().count(&fx.db).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_order_filters() -> Result<()> {
    let fx = setup().await?;

    fx.orders
        .create_order(OrderCreateRequest {
            customer_id: fx.customer.id.clone(),
            product_ids: vec![fx.widget.id.clone()],
        })
        .await?;
    fx.orders
        .create_order(OrderCreateRequest {
            customer_id: fx.customer.id.clone(),
            product_ids: vec![fx.gadget.id.clone()],
        })
        .await?;

    let expensive = fx
        .orders
        .list_orders(&OrderFilter {
            total_amount_gte: Some(Decimal::new(800, 2)),
            ..Default::default()
        })
        .await?;
    assert_eq!(expensive.len(), 1);
    assert_eq!(expensive[0].total_amount, Decimal::new(1000, 2));

    let with_gadget = fx
        .orders
        .list_orders(&OrderFilter {
            product_name: Some("gadg".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(with_gadget.len(), 1);
    assert_eq!(with_gadget[0].total_amount, Decimal::new(500, 2));

    let by_product_id = fx
        .orders
        .list_orders(&OrderFilter {
            product_id: Some(fx.widget.id.to_uppercase()),
            ..Default::default()
        })
        .await?;
    assert_eq!(by_product_id.len(), 1);

    let by_customer = fx
        .orders
        .list_orders(&OrderFilter {
            customer_name: Some("ADA".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(by_customer.len(), 2);

    let nobody = fx
        .orders
        .list_orders(&OrderFilter {
            customer_name: Some("grace".to_string()),
            ..Default::default()
        })
        .await?;
    assert!(nobody.is_empty());

    Ok(())
}
