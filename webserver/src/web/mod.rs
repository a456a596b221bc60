//! HTTP surface of the webserver

pub mod handlers;
