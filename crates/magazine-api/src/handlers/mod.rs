pub mod signed_url;
pub mod upload;
