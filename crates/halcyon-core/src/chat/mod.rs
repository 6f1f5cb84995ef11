//! Chat domain: conversation store ports, context assembly, the server
//! chat service, and the client session controller.

pub mod context;
pub mod controller;
pub mod repository;
pub mod service;
