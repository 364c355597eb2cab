pub mod habit;
pub mod mood;
pub mod record;
