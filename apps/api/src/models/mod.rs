pub mod assessment;
pub mod resume;
pub mod user;
