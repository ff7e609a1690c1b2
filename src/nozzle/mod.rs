pub mod isentropic;
pub mod performance;
