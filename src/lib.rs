use std::result;

pub mod error;
pub mod file;

pub type Result<T> = result::Result<T, error::OatError>;
