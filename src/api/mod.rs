pub mod models;
pub mod markdown;
pub mod page;
pub mod routes;
pub mod session;
