//! Single-pass tokenizer for route pattern text
//!
//! Pure function over the path part of a pattern (flags already
//! stripped). Recognizes, in priority order: `{`, `}`, a run of `/`,
//! a backslash escape, `:name` / `*name`, and literal runs for
//! everything else.

use crate::error::PatternError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// Literal text with no pattern meaning.
    Literal(String),
    /// A run of one or more consecutive `/` characters.
    Slashes(usize),
    /// A single character protected by a backslash.
    Escaped(char),
    /// `{` — start of an optional section.
    OpenGroup,
    /// `}` — end of an optional section.
    CloseGroup,
    /// `:name` (single segment) or `*name` (multi segment).
    Param { name: String, multi: bool },
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub(crate) fn tokenize(path: &str) -> Result<Vec<Token>, PatternError> {
    let mut tokens = Vec::new();
    let mut chars = path.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '{' => tokens.push(Token::OpenGroup),
            '}' => tokens.push(Token::CloseGroup),
            '/' => {
                let mut run = 1;
                while chars.next_if_eq(&'/').is_some() {
                    run += 1;
                }
                tokens.push(Token::Slashes(run));
            }
            '\\' => match chars.next() {
                Some(escaped) => tokens.push(Token::Escaped(escaped)),
                // a trailing backslash escapes nothing; keep it literal
                None => tokens.push(Token::Escaped('\\')),
            },
            ':' | '*' => {
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if !is_name_char(next) {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }
                if name.is_empty() {
                    return Err(PatternError::UnnamedParam(ch));
                }
                tokens.push(Token::Param { name, multi: ch == '*' });
            }
            _ => {
                let mut literal = String::from(ch);
                while let Some(&next) = chars.peek() {
                    if matches!(next, '{' | '}' | '/' | '\\' | ':' | '*') {
                        break;
                    }
                    literal.push(next);
                    chars.next();
                }
                tokens.push(Token::Literal(literal));
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_literal_and_params() {
        let tokens = tokenize("/users/:id").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Slashes(1),
                Token::Literal("users".to_string()),
                Token::Slashes(1),
                Token::Param { name: "id".to_string(), multi: false },
            ]
        );
    }

    #[test]
    fn test_tokenize_slash_runs_keep_their_length() {
        let tokens = tokenize("//a///b").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Slashes(2),
                Token::Literal("a".to_string()),
                Token::Slashes(3),
                Token::Literal("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_multi_param_and_groups() {
        let tokens = tokenize("/{x}*rest").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Slashes(1),
                Token::OpenGroup,
                Token::Literal("x".to_string()),
                Token::CloseGroup,
                Token::Param { name: "rest".to_string(), multi: true },
            ]
        );
    }

    #[test]
    fn test_tokenize_escape_takes_exactly_one_character() {
        let tokens = tokenize("/a\\:b").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Slashes(1),
                Token::Literal("a".to_string()),
                Token::Escaped(':'),
                Token::Literal("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_param_name_stops_at_non_name_character() {
        let tokens = tokenize("/:id.json").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Slashes(1),
                Token::Param { name: "id".to_string(), multi: false },
                Token::Literal(".json".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_bare_marker_is_an_error() {
        assert!(matches!(tokenize("/:"), Err(PatternError::UnnamedParam(':'))));
        assert!(matches!(tokenize("/*/x"), Err(PatternError::UnnamedParam('*'))));
    }
}
