pub mod ast;
pub mod cursor;
pub mod error;
pub mod lexer;
pub mod location;
pub mod parser;
pub mod token;

pub use crate::{
    error::Error,
    location::{Line, Location},
};
