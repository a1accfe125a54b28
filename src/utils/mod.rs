pub mod config;
pub mod date;
pub mod error;
pub mod pagination;
pub mod swagger_doc;
pub mod validation;
