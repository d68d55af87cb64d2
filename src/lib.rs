pub mod auth;
pub mod budgets;
pub mod categories;
pub mod db;
pub mod errors;
pub mod events;
pub mod goals;
pub mod remote;
pub mod reports;
pub mod schema;
pub mod transactions;
pub mod users;

pub use errors::{Error, Result};
pub use events::{EventBus, StoreEvent};
pub use remote::ApiClient;
