pub mod config;
pub mod logging;

pub mod batch;
pub mod fetch;
pub mod http;
pub mod retry;
pub mod storage;
pub mod table;
pub mod url_model;
