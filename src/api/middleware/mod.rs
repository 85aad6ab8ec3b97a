pub mod problem_details;
pub mod request_tracing;

pub use problem_details::problem_details_middleware;
pub use request_tracing::{get_request_id, request_tracing_middleware, REQUEST_ID_HEADER};
