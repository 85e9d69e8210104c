pub mod error;
pub mod fetcher;
pub mod request;
pub mod response;
