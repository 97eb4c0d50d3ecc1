pub mod tracing;

pub use tracing::{REQUEST_ID_HEADER, request_log_middleware};
