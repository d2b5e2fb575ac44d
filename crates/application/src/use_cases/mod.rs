//! Application use cases (business logic orchestration).

mod execute_request;
mod run_scenario;

pub use execute_request::ExecuteRequest;
pub use run_scenario::RunScenario;
