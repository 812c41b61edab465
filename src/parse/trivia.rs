use crate::parse::cursor::Cursor;
use crate::parse::error::{SyntaxError, SyntaxErrorKind};
use crate::syntax::{SyntaxKind, Trivia};

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

fn is_whitespace(c: char) -> bool {
    c.is_whitespace() && !is_line_break(c)
}

/// Consumes one maximal run of trivia at the cursor.
///
/// Returns `None` without moving the cursor if the current character does not start trivia.
/// An unterminated block comment extends to the end of input and is reported to `errors`.
pub fn scan_trivia<'buf>(
    cursor: &mut Cursor<'buf>,
    errors: &mut Vec<SyntaxError>,
) -> Option<Trivia<'buf>> {
    if cursor.is_at_end() {
        return None;
    }

    cursor.mark();

    let kind = match cursor.current() {
        c if is_line_break(c) => {
            cursor.consume_while(is_line_break);

            SyntaxKind::EndOfLineTrivia
        }

        c if is_whitespace(c) => {
            cursor.consume_while(is_whitespace);

            SyntaxKind::WhitespaceTrivia
        }

        '/' if cursor.starts_with("//") => {
            cursor.consume_while(|c| !is_line_break(c));

            SyntaxKind::SingleLineCommentTrivia
        }

        '/' if cursor.starts_with("/*") => {
            cursor.consume_expecting("/*");

            loop {
                if cursor.consume_expecting("*/").is_some() {
                    break;
                }

                if cursor.is_at_end() {
                    errors.push(SyntaxError::new(
                        SyntaxErrorKind::UnterminatedComment,
                        cursor.span(),
                    ));

                    break;
                }

                cursor.advance();
            }

            SyntaxKind::MultiLineCommentTrivia
        }

        _ => return None,
    };

    Some(Trivia::new(kind, cursor.slice()))
}
