//! Recoverable recursive-descent parser for Groovy statements.
//!
//! Every entry point returns a tree, even for malformed input, together
//! with the diagnostics found on the way.

use groovel_errors::Diagnostic;
use groovel_syntax::SyntaxTree;
pub use groovel_tokenizer::Dialect;

mod grammar;
mod messages;
mod parser;
#[cfg(test)]
mod tests;

/// A finished parse: the lossless tree plus its diagnostics in source order
/// of discovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parse {
    tree: SyntaxTree,
    errors: Vec<Diagnostic>,
}

impl Parse {
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }
}

/// Parses a compilation unit into a `FILE` node.
pub fn parse_file(text: &str, dialect: Dialect) -> Parse {
    parse_with(text, dialect, grammar::toplevel::file)
}

/// Parses a single statement into a `FRAGMENT` node. Whatever follows the
/// statement is reported as unexpected input.
pub fn parse_statement(text: &str, dialect: Dialect) -> Parse {
    parse_with(text, dialect, grammar::toplevel::statement_fragment)
}

/// Parses the inside of a block (no braces) into a `FRAGMENT` node.
pub fn parse_block_body(text: &str, dialect: Dialect) -> Parse {
    parse_with(text, dialect, grammar::toplevel::block_body_fragment)
}

fn parse_with(text: &str, dialect: Dialect, entry: fn(&mut parser::Parser<'_>)) -> Parse {
    let mut parser = parser::Parser::new(text, dialect);
    entry(&mut parser);
    let (tree, errors) = parser.finish();
    Parse { tree, errors }
}
