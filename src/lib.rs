pub mod ast;
pub mod diagnostic;
pub mod driver;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod scope;
pub mod typechecker;
