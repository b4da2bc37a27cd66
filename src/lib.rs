pub mod cli;
pub mod compare;
pub mod convert;
pub mod diff;
pub mod error;
pub mod key;
pub mod lexer;
mod pair;
pub mod parser;
pub mod path;
pub mod value;
pub mod walk;

pub use compare::{compare, compare_with};
pub use convert::IntoValue;
pub use diff::{Difference, diff, differences};
pub use error::{Error, PathError, Result, SyntaxError, ValueError};
pub use key::Segment;
pub use lexer::{LexError, Lexer, Token};
pub use parser::Parser;
pub use path::Path;
pub use value::{Kind, Source, Value};
pub use walk::{Flow, Visit, Walkable, walk, walk_tree};
