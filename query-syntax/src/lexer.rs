//! Splits raw search input into [`Token`]s.
//!
//! The lexer only knows about three things: double quotes, whitespace and
//! parentheses. Everything else (operators, filters, `sort:` directives) is
//! recognized later by looking at the token text.

/// One lexical unit of a query: a word, an operator, a parenthesis or the
/// content of a quoted phrase.
///
/// Tokens borrow from the input string; quoting is recorded in `quoted`
/// instead of being kept in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub quoted: bool,
}

impl<'a> Token<'a> {
    pub fn word(text: &'a str) -> Self {
        Self {
            text,
            quoted: false,
        }
    }

    pub fn quoted(text: &'a str) -> Self {
        Self { text, quoted: true }
    }

    /// Case-insensitive keyword match, used for `AND`/`OR` between operands.
    /// Only the text is compared: a quoted `"or"` still reads as `OR` there.
    pub(crate) fn is_keyword(&self, keyword: &str) -> bool {
        self.text.eq_ignore_ascii_case(keyword)
    }
}

/// Tokenizes `input`, keeping quoted substrings together.
///
/// An unterminated quote does not fail: whatever follows the opening quote is
/// emitted as a final quoted token.
///
/// ```
/// use query_syntax::{tokenize, Token};
///
/// assert_eq!(
///     tokenize(r#"tag:"go lang" (a)"#),
///     vec![
///         Token::word("tag:"),
///         Token::quoted("go lang"),
///         Token::word("("),
///         Token::word("a"),
///         Token::word(")"),
///     ]
/// );
/// assert_eq!(tokenize(r#""open ended"#), vec![Token::quoted("open ended")]);
/// ```
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut in_quotes = false;
    // Byte offset where the pending buffer starts.
    let mut start = 0;

    for (i, ch) in input.char_indices() {
        match ch {
            '"' => {
                if in_quotes {
                    // Closing quote always emits, even for `""`.
                    tokens.push(Token::quoted(&input[start..i]));
                } else {
                    push_word(&mut tokens, &input[start..i]);
                }
                in_quotes = !in_quotes;
                start = i + 1;
            }
            '(' | ')' if !in_quotes => {
                push_word(&mut tokens, &input[start..i]);
                tokens.push(Token::word(&input[i..i + 1]));
                start = i + 1;
            }
            c if c.is_whitespace() && !in_quotes => {
                push_word(&mut tokens, &input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }

    let rest = &input[start..];
    if !rest.is_empty() {
        tokens.push(Token {
            text: rest,
            quoted: in_quotes,
        });
    }

    tokens
}

fn push_word<'a>(tokens: &mut Vec<Token<'a>>, text: &'a str) {
    if !text.is_empty() {
        tokens.push(Token::word(text));
    }
}
