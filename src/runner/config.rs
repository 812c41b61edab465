use std::path::PathBuf;

use clap::{arg, command, value_parser, ValueEnum};

#[derive(Debug, Clone)]
pub struct GanbaruConfig {
    pub paths: Vec<PathBuf>,
    pub entry: EntryPoint,
    pub output: OutputKind,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Stage {
    Lexer,
    #[default]
    Parser,
}

/// The production a file is parsed as.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntryPoint {
    #[default]
    CompilationUnit,
    ClassDeclaration,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Listing,
    Tree,
    Text,
    Debug,
    Ron,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LexerOutputFormat {
    #[default]
    Listing,
    Debug,
    Ron,
}

impl TryFrom<OutputFormat> for LexerOutputFormat {
    type Error = &'static str;

    fn try_from(format: OutputFormat) -> Result<LexerOutputFormat, Self::Error> {
        match format {
            OutputFormat::Listing => Ok(Self::Listing),
            OutputFormat::Debug => Ok(Self::Debug),
            OutputFormat::Ron => Ok(Self::Ron),
            _ => Err("this format cannot be used for the lexer stage"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParserOutputFormat {
    #[default]
    Tree,
    Text,
    Debug,
    Ron,
}

impl TryFrom<OutputFormat> for ParserOutputFormat {
    type Error = &'static str;

    fn try_from(format: OutputFormat) -> Result<ParserOutputFormat, Self::Error> {
        match format {
            OutputFormat::Tree => Ok(Self::Tree),
            OutputFormat::Text => Ok(Self::Text),
            OutputFormat::Debug => Ok(Self::Debug),
            OutputFormat::Ron => Ok(Self::Ron),
            _ => Err("this format cannot be used for the parser stage"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    Lexer(LexerOutputFormat),
    Parser(ParserOutputFormat),
}

pub fn parse_args_or_exit() -> GanbaruConfig {
    use clap::Command;

    fn command() -> Command {
        command!()
            .arg(
                arg!(files: <FILE> ... "input files")
                    .value_parser(value_parser!(PathBuf))
                    .required(true),
            )
            .arg(
                arg!(-s --stage <STAGE> "the stage to stop after")
                    .value_parser(value_parser!(Stage))
                    .required(false),
            )
            .arg(
                arg!(-e --entry <ENTRY> "the production to parse each file as")
                    .value_parser(value_parser!(EntryPoint))
                    .required(false),
            )
            .arg(
                arg!(-f --format <FORMAT> "the output format")
                    .value_parser(value_parser!(OutputFormat)),
            )
    }

    fn parse_args() -> Result<GanbaruConfig, clap::Error> {
        use clap::error::ErrorKind;

        let mut command = command();
        let matches = command.get_matches_mut();

        let paths = matches
            .get_many::<PathBuf>("files")
            .expect("files")
            .cloned()
            .collect();

        let entry = matches
            .get_one::<EntryPoint>("entry")
            .copied()
            .unwrap_or_default();
        let format = matches.get_one::<OutputFormat>("format").copied();

        // a lexer-only format implies the lexer stage
        let stage = match (matches.get_one::<Stage>("stage").copied(), format) {
            (Some(stage), _) => stage,
            (None, Some(OutputFormat::Listing)) => Stage::Lexer,
            (None, _) => Stage::default(),
        };

        let output = match stage {
            Stage::Lexer => {
                let format = match format {
                    Some(format) => format.try_into(),
                    None => Ok(Default::default()),
                };

                OutputKind::Lexer(
                    format.map_err(|msg| command.error(ErrorKind::ValueValidation, msg))?,
                )
            }

            Stage::Parser => {
                let format = match format {
                    Some(format) => format.try_into(),
                    None => Ok(Default::default()),
                };

                OutputKind::Parser(
                    format.map_err(|msg| command.error(ErrorKind::ValueValidation, msg))?,
                )
            }
        };

        Ok(GanbaruConfig {
            paths,
            entry,
            output,
        })
    }

    match parse_args() {
        Ok(cfg) => cfg,

        Err(e) => {
            e.format(&mut command()).exit();
        }
    }
}
