use std::fmt::{self, Display};

use itertools::Itertools;
use once_cell::sync::OnceCell;
use phf::phf_map;
use serde::Serialize;

macro_rules! syntax_kinds {
    (
        tokens { $( $token:ident ),+ $(,)? }
        keywords { $( $kw_lit:literal => $kw:ident ),+ $(,)? }
        punctuation { $( $punct_lit:literal => $punct:ident ),+ $(,)? }
        trivia { $( $trivia:ident ),+ $(,)? }
        nodes { $( $node:ident ),+ $(,)? }
    ) => {
        /// Tags every token, trivia and node in a syntax tree.
        #[derive(Serialize, Debug, Clone, Copy, Hash, Eq, PartialEq)]
        pub enum SyntaxKind {
            $( $token, )+
            $( $kw, )+
            $( $punct, )+
            $( $trivia, )+
            $( $node, )+
        }

        impl SyntaxKind {
            const KEYWORDS: phf::Map<&'static str, SyntaxKind> = phf_map! {
                $( $kw_lit => Self::$kw ),+
            };

            const PUNCTUATION: phf::Map<&'static str, SyntaxKind> = phf_map! {
                $( $punct_lit => Self::$punct ),+
            };

            fn punctuation_lengths() -> &'static [usize] {
                static LENGTHS: OnceCell<Vec<usize>> = OnceCell::new();

                LENGTHS.get_or_init(|| {
                    let mut lengths = [$( $punct_lit.len() ),+];
                    lengths.sort_unstable();
                    lengths.into_iter().rev().dedup().collect()
                })
            }

            /// Looks up an identifier-shaped lexeme in the keyword table.
            pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
                Self::KEYWORDS.get(text).copied()
            }

            /// Returns the longest punctuation the input starts with, along with its text.
            pub fn parse_punctuation_prefix(input: &str) -> Option<(&'static str, SyntaxKind)> {
                Self::punctuation_lengths()
                    .iter()
                    .filter_map(|&len| input.get(0..len))
                    .find_map(|prefix| Self::PUNCTUATION.get_entry(prefix))
                    .map(|(&text, &kind)| (text, kind))
            }

            /// The text every token of this kind has, if it is fixed.
            pub fn fixed_text(self) -> Option<&'static str> {
                match self {
                    $( Self::$kw => Some($kw_lit), )+
                    $( Self::$punct => Some($punct_lit), )+
                    _ => None,
                }
            }

            pub fn is_keyword(self) -> bool {
                matches!(self, $( Self::$kw )|+)
            }

            pub fn is_punctuation(self) -> bool {
                matches!(self, $( Self::$punct )|+)
            }

            pub fn is_trivia(self) -> bool {
                matches!(self, $( Self::$trivia )|+)
            }

            pub fn is_node(self) -> bool {
                matches!(self, $( Self::$node )|+)
            }
        }
    };
}

syntax_kinds! {
    tokens {
        BadToken,
        EofToken,
        IdentifierToken,
        NumberLiteralToken,
    }

    keywords {
        "public" => PublicKeyword,
        "private" => PrivateKeyword,
        "internal" => InternalKeyword,
        "protected" => ProtectedKeyword,
        "abstract" => AbstractKeyword,
        "static" => StaticKeyword,
        "virtual" => VirtualKeyword,
        "sealed" => SealedKeyword,
        "class" => ClassKeyword,
        "interface" => InterfaceKeyword,
        "void" => VoidKeyword,
        "int" => IntKeyword,
        "long" => LongKeyword,
        "string" => StringKeyword,
    }

    punctuation {
        "+" => PlusToken,
        "-" => MinusToken,
        "(" => OpenParenToken,
        ")" => CloseParenToken,
        "{" => OpenBraceToken,
        "}" => CloseBraceToken,
        "[" => OpenBracketToken,
        "]" => CloseBracketToken,
        ";" => SemicolonToken,
        ":" => ColonToken,
        "::" => ColonColonToken,
        "," => CommaToken,
        "." => DotToken,
    }

    trivia {
        WhitespaceTrivia,
        EndOfLineTrivia,
        SingleLineCommentTrivia,
        MultiLineCommentTrivia,
    }

    nodes {
        List,
        SkippedTokens,
        CompilationUnit,
        ClassDeclaration,
        MethodDeclaration,
    }
}

impl SyntaxKind {
    pub fn is_token(self) -> bool {
        !self.is_trivia() && !self.is_node()
    }

    pub fn is_modifier(self) -> bool {
        use SyntaxKind::*;

        matches!(
            self,
            PublicKeyword
                | PrivateKeyword
                | InternalKeyword
                | ProtectedKeyword
                | AbstractKeyword
                | StaticKeyword
                | VirtualKeyword
                | SealedKeyword
        )
    }

    pub fn is_predefined_type(self) -> bool {
        use SyntaxKind::*;

        matches!(self, VoidKeyword | IntKeyword | LongKeyword | StringKeyword)
    }
}

impl Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.fixed_text() {
            return write!(f, "`{}`", text);
        }

        match self {
            Self::BadToken => write!(f, "an unrecognized character"),
            Self::EofToken => write!(f, "end of input"),
            Self::IdentifierToken => write!(f, "an identifier"),
            Self::NumberLiteralToken => write!(f, "a number literal"),
            _ => write!(f, "{:?}", self),
        }
    }
}
