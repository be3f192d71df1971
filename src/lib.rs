pub mod classify;
pub mod clubs;
pub mod config;
pub mod form;
pub mod http_cache;
pub mod http_client;
pub mod logging;
pub mod model;
pub mod payload;
pub mod provider;
pub mod schedule;
pub mod slides;
pub mod slideshow;
pub mod state;
pub mod teams;
pub mod timer;
pub mod weeks;
