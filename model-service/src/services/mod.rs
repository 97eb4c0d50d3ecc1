pub mod database;
pub mod metrics;
pub mod validator;

pub use database::Database;
pub use metrics::{get_metrics, init_metrics};
