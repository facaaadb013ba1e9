pub mod customers;
pub mod order_products;
pub mod orders;
pub mod products;

/// Decimal places of every money column
pub const MONEY_SCALE: u32 = 2;
