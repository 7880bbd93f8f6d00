use crate::{FoundFilters, MAX_GROUP_DEPTH, ParseError, QueryExpr, lexer::Token};
use tracing::trace;

const AND: &str = "AND";
const OR: &str = "OR";
const OPEN: &str = "(";
const CLOSE: &str = ")";

/// Recursive-descent parser over the tokens left after sort extraction.
///
/// Precedence, loosest first:
/// - `OR` between conjunctions, folded left (`a OR b OR c` is
///   `((a OR b) OR c)`).
/// - `AND`, explicit or implied by adjacency.
/// - operands: a parenthesized group, a filter, a quoted phrase, or a run of
///   plain words.
///
/// Malformed input degrades instead of failing: stray operators and empty
/// values are skipped. Hard errors are a `(` without its `)` and groups
/// nested deeper than [`MAX_GROUP_DEPTH`].
pub(crate) struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    // Groups currently open; bounds the recursion.
    depth: usize,
    found: FoundFilters,
}

impl<'t, 'a> Parser<'t, 'a> {
    pub(crate) fn new(tokens: &'t [Token<'a>], found: FoundFilters) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            found,
        }
    }

    pub(crate) fn into_found(self) -> FoundFilters {
        self.found
    }

    pub(crate) fn parse_or(&mut self) -> Result<Option<QueryExpr>, ParseError> {
        let mut expr = self.parse_and()?;

        while self.at_keyword(OR) {
            self.pos += 1;
            let Some(right) = self.parse_and()? else {
                continue;
            };
            expr = Some(match expr {
                Some(left) => QueryExpr::Or(vec![left, right]),
                None => right,
            });
        }

        Ok(expr)
    }

    // Adjacent operands are joined exactly as if an AND stood between them.
    fn parse_and(&mut self) -> Result<Option<QueryExpr>, ParseError> {
        let mut children = Vec::new();

        loop {
            if let Some(operand) = self.parse_operand()? {
                children.push(operand);
            }
            if self.eof() || self.at_keyword(OR) || self.at_close() {
                break;
            }
            if self.at_keyword(AND) {
                self.pos += 1;
            }
        }

        Ok(match children.len() {
            0 => None,
            1 => children.pop(),
            _ => Some(QueryExpr::And(children)),
        })
    }

    // Consumes at least one token unless the stream is exhausted. Operators,
    // `(` and `key:` are recognized by text alone, before quoting is looked
    // at; a `)` here is an ordinary word.
    fn parse_operand(&mut self) -> Result<Option<QueryExpr>, ParseError> {
        let Some(token) = self.peek() else {
            return Ok(None);
        };

        match token.text {
            AND | OR => {
                trace!("Dropping stray operator {}", token.text);
                self.pos += 1;
                return Ok(None);
            }
            OPEN => return self.parse_group(),
            _ => {}
        }

        if let Some((key, rest)) = token.text.split_once(':') {
            self.pos += 1;
            if !self.found.is_allowed(key) {
                return Ok(Some(QueryExpr::value(token.text)));
            }
            return Ok(self.parse_filter(key, rest));
        }

        if token.quoted {
            self.pos += 1;
            return Ok(quoted_value(token.text));
        }

        Ok(self.parse_words())
    }

    fn parse_group(&mut self) -> Result<Option<QueryExpr>, ParseError> {
        if self.depth >= MAX_GROUP_DEPTH {
            return Err(ParseError::TooDeep {
                limit: MAX_GROUP_DEPTH,
            });
        }
        self.pos += 1;
        self.depth += 1;
        let inner = self.parse_or()?;
        self.depth -= 1;
        if !self.at_close() {
            return Err(ParseError::UnclosedGroup);
        }
        self.pos += 1;
        Ok(inner)
    }

    // `key:value`, or `key:` followed by a quoted value.
    fn parse_filter(&mut self, key: &str, rest: &'a str) -> Option<QueryExpr> {
        self.found.mark_found(key);

        let mut value = rest.trim();
        if value.is_empty() {
            if let Some(next) = self.peek().filter(|next| next.quoted) {
                self.pos += 1;
                value = next.text.trim();
            }
        }

        if value.is_empty() {
            trace!("Dropping filter {key} without a value");
            return None;
        }
        Some(QueryExpr::filter(key, value))
    }

    // Greedy run of plain words joined with single spaces.
    fn parse_words(&mut self) -> Option<QueryExpr> {
        let start = self.pos;
        self.pos += 1;
        while let Some(next) = self.peek() {
            if !self.continues_words(&next) {
                break;
            }
            self.pos += 1;
        }

        let words: Vec<&str> = self.tokens[start..self.pos].iter().map(|t| t.text).collect();
        let joined = words.join(" ");
        let joined = joined.trim();
        if joined.is_empty() {
            return None;
        }
        Some(QueryExpr::value(joined))
    }

    fn continues_words(&self, token: &Token<'a>) -> bool {
        if token.quoted || matches!(token.text, OPEN | CLOSE | AND | OR) {
            return false;
        }
        !self.is_filter_shaped(token.text)
    }

    fn is_filter_shaped(&self, text: &str) -> bool {
        text.split_once(':')
            .is_some_and(|(key, _)| self.found.is_allowed(key))
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    fn at_close(&self) -> bool {
        self.peek().is_some_and(|t| t.text == CLOSE)
    }
}

fn quoted_value(text: &str) -> Option<QueryExpr> {
    let text = text.trim();
    if text.is_empty() {
        trace!("Dropping empty quoted phrase");
        return None;
    }
    Some(QueryExpr::value(text))
}
