use std::io;

use ganbaru::errors::DiagnosticMessage;
use ganbaru::parse::{Cursor, Lexer, Parse, Parser, SyntaxError};
use ganbaru::source::{Source, SourceId};
use ganbaru::syntax::Token;
use tracing::debug;

use super::config::{EntryPoint, OutputKind};
use super::dump::{dump_tokens, dump_tree};
use super::{PassOutput, RunnerCtx};

fn file_name(source: &Source<'_>, id: SourceId) -> String {
    match source.get(id) {
        Some(file) => file.path().display().to_string(),
        None => "<unknown>".to_owned(),
    }
}

fn report_syntax_errors(ctx: &mut RunnerCtx<'_, '_>, id: SourceId, errors: Vec<SyntaxError>) {
    let name = file_name(&ctx.source, id);

    for error in errors {
        let message = DiagnosticMessage::with_span(
            error.span.clone(),
            format!("{}:{}: {}", name, error.span.start, error),
        );

        ctx.diagnostics
            .error()
            .with_message(message)
            .with_source(Box::new(error))
            .emit();
    }
}

pub fn load_files(ctx: &mut RunnerCtx<'_, '_>) -> PassOutput<()> {
    for path in &ctx.config.paths {
        if let Err(e) = ctx.source.load(path.clone()) {
            ctx.diagnostics
                .error()
                .with_message(format!("could not load file {}: {}", path.display(), e))
                .with_source(Box::new(e))
                .emit();
        }
    }

    ctx.stop_if_errors(())
}

pub fn scan_files<'buf>(
    ctx: &mut RunnerCtx<'buf, '_>,
) -> PassOutput<Vec<(SourceId, Lexer<'buf>)>> {
    let lexers = ctx
        .source
        .iter()
        .map(|src_file| (src_file.id(), Lexer::new(Cursor::new(src_file))))
        .collect();

    PassOutput::continue_with_output(lexers)
}

pub fn dump_tokens_if_asked<'buf>(
    ctx: &mut RunnerCtx<'buf, '_>,
    lexers: Vec<(SourceId, Lexer<'buf>)>,
) -> PassOutput<Vec<(SourceId, Lexer<'buf>)>> {
    let OutputKind::Lexer(format) = ctx.config.output else {
        return PassOutput::continue_with_output(lexers);
    };

    for (id, mut lexer) in lexers {
        let tokens = lexer.by_ref().collect::<Vec<Token<'buf>>>();
        let name = file_name(&ctx.source, id);

        if let Err(e) = dump_tokens(format, &name, &tokens, io::stdout()) {
            ctx.diagnostics
                .error()
                .with_message("could not dump the tokens to stdout".to_owned())
                .with_source(Box::new(e))
                .emit();
        }

        report_syntax_errors(ctx, id, lexer.into_errors());
    }

    PassOutput::stop_with_output(vec![])
}

pub fn parse_all<'buf>(
    ctx: &mut RunnerCtx<'buf, '_>,
    lexers: Vec<(SourceId, Lexer<'buf>)>,
) -> PassOutput<Vec<(SourceId, Parse<'buf>)>> {
    let mut result = Vec::with_capacity(lexers.len());

    for (id, lexer) in lexers {
        let parser = Parser::new(lexer);
        let parse = match ctx.config.entry {
            EntryPoint::CompilationUnit => parser.parse_compilation_unit(),
            EntryPoint::ClassDeclaration => parser.parse_class_declaration(),
        };

        debug!(
            file = %file_name(&ctx.source, id),
            errors = parse.errors.len(),
            "parsed"
        );

        report_syntax_errors(ctx, id, parse.errors.clone());
        result.push((id, parse));
    }

    // a tree with recovered errors is still worth dumping
    PassOutput::continue_with_output(result)
}

pub fn dump_trees_if_asked<'buf>(
    ctx: &mut RunnerCtx<'buf, '_>,
    trees: Vec<(SourceId, Parse<'buf>)>,
) -> PassOutput<()> {
    let OutputKind::Parser(format) = ctx.config.output else {
        return PassOutput::continue_with_output(());
    };

    for (_, parse) in &trees {
        if let Err(e) = dump_tree(format, parse, io::stdout()) {
            ctx.diagnostics
                .error()
                .with_message("could not dump a tree to stdout".to_owned())
                .with_source(Box::new(e))
                .emit();
        }
    }

    PassOutput::stop_with_output(())
}
