//! Service layer: orchestrates domain logic against the store.

pub mod session_flow;

pub use session_flow::SessionFlowService;
