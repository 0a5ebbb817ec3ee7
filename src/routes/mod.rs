pub mod order_routes;
pub mod quote_routes;
