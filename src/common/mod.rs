pub mod error;
pub mod lang;
pub mod response;
pub mod upload;
