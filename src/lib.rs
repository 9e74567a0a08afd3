//! Library exports for the link shortener
//!
//! This module exposes internal components for testing and potential library usage.

pub mod codegen;
pub mod error;
pub mod handler;
pub mod model;
pub mod redirect;
pub mod route;
pub mod service;
pub mod store;
