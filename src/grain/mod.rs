pub mod motor;
pub mod tubular;
