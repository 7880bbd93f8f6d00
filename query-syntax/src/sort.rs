use crate::lexer::Token;
use tracing::trace;

const SORT_KEY: &str = "sort";

/// Pulls `sort:<value>` directives out of a token stream.
///
/// Returns the tokens that are not part of a directive (in their original
/// order) together with the directive values in encounter order. A bare
/// `sort:` takes its value from the following token when that token is
/// quoted, so `sort:"created_at desc"` yields `created_at desc`. Directives
/// whose value is blank are dropped.
///
/// ```
/// use query_syntax::{extract_sort, tokenize, Token};
///
/// let tokens = tokenize(r#"SORT:title course sort:"id desc""#);
/// let (rest, sort) = extract_sort(&tokens);
/// assert_eq!(rest, vec![Token::word("course")]);
/// assert_eq!(sort, ["title", "id desc"]);
/// ```
pub fn extract_sort<'a>(tokens: &[Token<'a>]) -> (Vec<Token<'a>>, Vec<String>) {
    let mut remaining = Vec::with_capacity(tokens.len());
    let mut sort = Vec::new();
    let mut iter = tokens.iter().copied().peekable();

    while let Some(token) = iter.next() {
        let Some(rest) = sort_argument(&token) else {
            remaining.push(token);
            continue;
        };

        let mut value = rest.trim();
        if value.is_empty() {
            if let Some(next) = iter.next_if(|next| next.quoted) {
                value = next.text.trim();
            }
        }

        if value.is_empty() {
            trace!("Dropping empty sort directive");
            continue;
        }
        sort.push(value.to_string());
    }

    (remaining, sort)
}

/// Text after the colon when `token` is an unquoted `sort:` directive.
fn sort_argument<'a>(token: &Token<'a>) -> Option<&'a str> {
    if token.quoted {
        return None;
    }
    let (key, rest) = token.text.split_once(':')?;
    key.eq_ignore_ascii_case(SORT_KEY).then_some(rest)
}
