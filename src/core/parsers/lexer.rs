//! Tokenizer for the declaration subset of Java sources.
//!
//! Comments and whitespace are dropped. Every token keeps its byte span so
//! the parser can recover the verbatim text of initializer expressions.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    /// String, text block, char or numeric literal.
    Literal,
    Punct(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
    /// 1-based line of the first character.
    pub line: usize,
    /// Whether whitespace or a comment separates this token from the previous one.
    pub spaced: bool,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub line: usize,
    pub reason: String,
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    spaced: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            spaced: false,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                self.line += 1;
                self.advance(c);
                self.spaced = true;
            } else if c.is_whitespace() {
                self.advance(c);
                self.spaced = true;
            } else if self.starts_with("//") {
                self.skip_line_comment();
            } else if self.starts_with("/*") {
                self.skip_block_comment()?;
            } else if self.starts_with("\"\"\"") {
                self.lex_text_block()?;
            } else if c == '"' || c == '\'' {
                self.lex_quoted(c)?;
            } else if c.is_ascii_digit() {
                self.lex_number();
            } else if c == '_' || c == '$' || c.is_alphabetic() {
                self.lex_ident();
            } else {
                let start = self.pos;
                let line = self.line;
                self.advance(c);
                self.push(TokenKind::Punct(c), start, line);
            }
        }
        Ok(self.tokens)
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.source[self.pos..].starts_with(s)
    }

    fn advance(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn push(&mut self, kind: TokenKind, start: usize, line: usize) {
        self.tokens.push(Token {
            kind,
            span: start..self.pos,
            line,
            spaced: self.spaced,
        });
        self.spaced = false;
    }

    fn skip_line_comment(&mut self) {
        match self.source[self.pos..].find('\n') {
            Some(offset) => self.pos += offset,
            None => self.pos = self.source.len(),
        }
        self.spaced = true;
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_line = self.line;
        let rest = &self.source[self.pos + 2..];
        let Some(end) = rest.find("*/") else {
            return Err(LexError {
                line: start_line,
                reason: "unterminated block comment".to_string(),
            });
        };
        self.line += rest[..end].matches('\n').count();
        self.pos += 2 + end + 2;
        self.spaced = true;
        Ok(())
    }

    fn lex_text_block(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        let line = self.line;
        let rest = &self.source[self.pos + 3..];
        let Some(end) = find_unescaped(rest, "\"\"\"") else {
            return Err(LexError {
                line,
                reason: "unterminated text block".to_string(),
            });
        };
        self.line += rest[..end].matches('\n').count();
        self.pos += 3 + end + 3;
        self.push(TokenKind::Literal, start, line);
        Ok(())
    }

    fn lex_quoted(&mut self, quote: char) -> Result<(), LexError> {
        let start = self.pos;
        let line = self.line;
        self.pos += 1;
        loop {
            match self.bytes.get(self.pos) {
                Some(b'\\') => self.pos += 2,
                Some(b'\n') | None => {
                    return Err(LexError {
                        line,
                        reason: format!("unterminated {} literal", literal_name(quote)),
                    });
                }
                Some(&b) if b as char == quote => {
                    self.pos += 1;
                    break;
                }
                Some(_) => self.pos += 1,
            }
        }
        self.push(TokenKind::Literal, start, line);
        Ok(())
    }

    fn lex_number(&mut self) {
        let start = self.pos;
        let line = self.line;
        while let Some(c) = self.peek_char() {
            let exponent_sign = (c == '+' || c == '-')
                && matches!(self.source[..self.pos].chars().last(), Some('e' | 'E' | 'p' | 'P'))
                && !self.source[start..self.pos].starts_with("0x");
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
                self.advance(c);
            } else {
                break;
            }
        }
        self.push(TokenKind::Literal, start, line);
    }

    fn lex_ident(&mut self) {
        let start = self.pos;
        let line = self.line;
        while let Some(c) = self.peek_char() {
            if c == '_' || c == '$' || c.is_alphanumeric() {
                self.advance(c);
            } else {
                break;
            }
        }
        self.push(TokenKind::Ident, start, line);
    }
}

fn literal_name(quote: char) -> &'static str {
    if quote == '"' { "string" } else { "char" }
}

fn find_unescaped(haystack: &str, needle: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(offset) = haystack[from..].find(needle) {
        let at = from + offset;
        let backslashes = haystack[..at]
            .bytes()
            .rev()
            .take_while(|b| *b == b'\\')
            .count();
        if backslashes % 2 == 0 {
            return Some(at);
        }
        from = at + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::core::parsers::lexer::*;

    fn texts(source: &str) -> Vec<String> {
        tokenize(source)
            .unwrap()
            .iter()
            .map(|t| t.text(source).to_string())
            .collect()
    }

    #[test]
    fn test_tokenize_declaration() {
        assert_eq!(
            texts("private static final long serialVersionUID = 1L;"),
            vec!["private", "static", "final", "long", "serialVersionUID", "=", "1L", ";"]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let source = "/* header\n * more\n */\n// line\nclass A {}";
        let tokens = tokenize(source).unwrap();
        assert_eq!(tokens[0].text(source), "class");
        assert_eq!(tokens[0].line, 5);
        assert!(tokens[0].spaced);
    }

    #[test]
    fn test_string_with_escapes() {
        assert_eq!(
            texts(r#"Locale.forLanguageTag("en-\"UK\"")"#),
            vec!["Locale", ".", "forLanguageTag", "(", r#""en-\"UK\"""#, ")"]
        );
    }

    #[test]
    fn test_comment_markers_inside_strings() {
        assert_eq!(texts(r#"x = "// not a comment";"#), vec!["x", "=", r#""// not a comment""#, ";"]);
    }

    #[test]
    fn test_text_block() {
        let source = "s = \"\"\"\n  hello\n  \"\"\"; t";
        let tokens = tokenize(source).unwrap();
        assert_eq!(tokens[2].kind, TokenKind::Literal);
        assert_eq!(tokens[4].text(source), "t");
        assert_eq!(tokens[4].line, 3);
    }

    #[test]
    fn test_numeric_literals() {
        assert_eq!(texts("1L 0x1F 1.5e-3f"), vec!["1L", "0x1F", "1.5e-3f"]);
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("x = \"abc\n;").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.reason.contains("unterminated string"));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = tokenize("class A {}\n/* never closed").unwrap_err();
        assert_eq!(err.line, 2);
    }
}
