use std::fmt::Write;

use wasm_bindgen::prelude::*;

use crate::parse::{Cursor, Lexer, Parser};
use crate::source::{Source, SourceBuffer};
use crate::syntax::dump::TreeDump;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Parses `code` as a compilation unit and renders the tree followed by the recovered errors.
#[wasm_bindgen]
pub fn parse_to_tree_dump(code: &str) -> String {
    let mut source_buf = SourceBuffer::new();
    let mut source = Source::new(&mut source_buf);
    let source_id = source.load_from_string("main.cs".into(), code.to_owned());

    let Some(source_file) = source.get(source_id) else {
        return String::new();
    };

    let lexer = Lexer::new(Cursor::new(source_file));
    let parse = Parser::new(lexer).parse_compilation_unit();

    let mut result = TreeDump(&parse.root).to_string();

    for error in &parse.errors {
        // writing into a String never fails
        let _ = writeln!(&mut result, "{}: {}", error.span, error);
    }

    result
}
