//! Business logic for the demo and generation surfaces.

pub mod chat;
pub mod classify;
pub mod codegen;
pub mod pipeline;
pub mod report;
