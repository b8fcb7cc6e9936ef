//! Session orchestration over a game store

mod service;

pub use service::GameService;
