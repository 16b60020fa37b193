mod models;
mod schema;
mod statements;
mod store;
mod trait_def;

pub use models::*;
pub use schema::{latest_schema, table_names, WAREHOUSE_VERSIONED_SCHEMAS};
pub use statements::Statements;
pub use store::{SqliteWriter, Warehouse};
pub use trait_def::WarehouseWriter;
