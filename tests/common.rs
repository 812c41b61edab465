use std::fmt::Write;
use std::path::Path;

use ganbaru::parse::{Cursor, Lexer, Parse, Parser, SyntaxError};
use ganbaru::source::{Source, SourceBuffer};
use ganbaru::syntax::dump::TreeDump;

/// The rendered outcome of parsing a fixture.
pub struct Dump {
    pub text: String,
    pub tree: String,
    pub errors: String,
}

pub fn render_errors(errors: &[SyntaxError]) -> String {
    let mut result = String::new();

    for error in errors {
        writeln!(&mut result, "{}: {}", error.span, error).unwrap();
    }

    result
}

fn render(parse: &Parse<'_>) -> Dump {
    Dump {
        text: parse.root.to_string(),
        tree: TreeDump(&parse.root).to_string(),
        errors: render_errors(&parse.errors),
    }
}

pub fn parse_fixture(path: &Path, code: &str) -> Dump {
    let mut source_buf = SourceBuffer::new();
    let mut source = Source::new(&mut source_buf);
    let source_id = source.load_from_string(path.to_owned(), code.to_owned());
    let source_file = source.get(source_id).unwrap();

    let cursor = Cursor::new(source_file);
    let lexer = Lexer::new(cursor);
    let parser = Parser::new(lexer);

    render(&parser.parse_compilation_unit())
}
