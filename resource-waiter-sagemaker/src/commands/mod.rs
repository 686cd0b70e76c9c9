//! Commands module - service layer for SageMaker wait operations

pub(crate) mod service;
mod wait;

pub use service::SageMakerWaiterService;
