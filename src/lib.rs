pub mod app;
pub mod config;
pub mod consts;
pub mod errors;
pub mod handlers;
pub mod identity;
pub mod interceptor;
pub mod middleware;
pub mod models;
pub mod service;
pub mod translator;
pub mod upstream;

#[cfg(test)]
mod test_utils;
