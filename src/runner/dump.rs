use std::io::{self, Write};

use itertools::Itertools;
use ron::ser::PrettyConfig;
use serde::Serialize;

use ganbaru::parse::Parse;
use ganbaru::syntax::dump::TreeDump;
use ganbaru::syntax::{Token, Trivia};

use super::config::{LexerOutputFormat, ParserOutputFormat};

fn write_ron<T: Serialize + ?Sized>(value: &T, mut out: impl Write) -> io::Result<()> {
    let ron = ron::ser::to_string_pretty(value, PrettyConfig::default())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    writeln!(out, "{}", ron)
}

pub fn dump_tokens(
    format: LexerOutputFormat,
    name: &str,
    tokens: &[Token<'_>],
    mut out: impl Write,
) -> io::Result<()> {
    match format {
        LexerOutputFormat::Listing => dump_tokens_listing(name, tokens, out),
        LexerOutputFormat::Debug => writeln!(out, "{:#?}", tokens),
        LexerOutputFormat::Ron => write_ron(tokens, out),
    }
}

fn dump_tokens_listing(name: &str, tokens: &[Token<'_>], mut out: impl Write) -> io::Result<()> {
    fn write_trivia_kinds(
        out: &mut impl Write,
        label: &str,
        trivia: &[Trivia<'_>],
    ) -> io::Result<()> {
        if trivia.is_empty() {
            return Ok(());
        }

        write!(
            out,
            " {}: {:?}",
            label,
            trivia.iter().map(|trivia| trivia.kind).format(", ")
        )
    }

    writeln!(out, "#name {:?}", name)?;

    for token in tokens {
        write!(
            out,
            "#{} {:?} {:?}",
            token.span.start.line, token.kind, token.text
        )?;
        write_trivia_kinds(&mut out, "leading", &token.leading)?;
        write_trivia_kinds(&mut out, "trailing", &token.trailing)?;
        writeln!(out)?;
    }

    Ok(())
}

pub fn dump_tree(
    format: ParserOutputFormat,
    parse: &Parse<'_>,
    mut out: impl Write,
) -> io::Result<()> {
    match format {
        ParserOutputFormat::Tree => write!(out, "{}", TreeDump(&parse.root)),
        ParserOutputFormat::Text => write!(out, "{}", parse.root),
        ParserOutputFormat::Debug => writeln!(out, "{:#?}", parse),
        ParserOutputFormat::Ron => write_ron(parse, out),
    }
}
