pub mod admin_service;
pub mod config;
pub mod forward;
pub mod http;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;
