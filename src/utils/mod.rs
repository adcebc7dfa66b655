pub mod image;
pub mod sanitize;
pub mod validation;
