//! Comment board domain: store port and service.

pub mod repository;
pub mod service;
