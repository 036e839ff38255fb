pub mod assessment;
pub mod envelope;
pub mod patient;
pub mod scoring;
