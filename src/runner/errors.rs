use owo_colors::{OwoColorize, Stream};

use ganbaru::errors::{Diagnostic, DiagnosticMessage, Level};

fn format_level(level: Level) -> String {
    match level {
        Level::Fatal => format!(
            "{}",
            "FATAL".if_supports_color(Stream::Stderr, |text| text.red())
        ),

        Level::Error => format!(
            "{}",
            "ERROR".if_supports_color(Stream::Stderr, |text| text.bright_red())
        ),

        Level::Warn => format!(
            "{}",
            "WARN ".if_supports_color(Stream::Stderr, |text| text.yellow())
        ),

        Level::Info => format!(
            "{}",
            "INFO ".if_supports_color(Stream::Stderr, |text| text.bright_cyan())
        ),
    }
}

pub fn print_diagnostic(diagnostic: &Diagnostic) {
    let Diagnostic {
        level,
        message: DiagnosticMessage { message, .. },
        source: _,
    } = diagnostic;

    eprintln!("{} {}", format_level(*level), message);
}
