//! Style model tests: validator properties and compiled declarations

mod compiler;
mod validate;
