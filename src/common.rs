pub mod clock;
pub mod error;
pub mod response;
pub mod validation;
