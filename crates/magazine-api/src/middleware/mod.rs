pub mod error_details;
pub mod request_id;
pub mod upload;

pub use error_details::error_details_middleware;
pub use request_id::{get_request_id, request_id_middleware, RequestId, REQUEST_ID_HEADER};
pub use upload::upload_middleware;
