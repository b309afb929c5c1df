//! Groovy lexer: a stream of tokens with attached trivia.
//!
//! Newlines are significant in Groovy, so a run of line breaks (and the
//! indentation after it) is a single `NEWLINE` token instead of trivia.

mod cursor;

use cursor::Cursor;
pub use groovel_syntax::SyntaxKind;
use groovel_syntax::SyntaxKind::*;
use groovel_syntax::{Trivia, TriviaPiece, TriviaPieceKind};
use text_size::{TextRange, TextSize};

/// Source flavour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Plain Groovy scripts and classes.
    #[default]
    Groovy,
    /// Groovy code interleaved with template text: everything from `%>` up
    /// to the next `<%` is a single `TEMPLATE_TEXT` token.
    Template,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub leading: Trivia,
    pub kind: SyntaxKind,
    pub kind_range: TextRange,
    pub trailing: Trivia,
}

impl Token {
    const EOF: Self = Self {
        kind: EOF,
        kind_range: TextRange::empty(TextSize::new(0)),
        leading: Trivia::empty(),
        trailing: Trivia::empty(),
    };
}

pub struct Tokenizer<'db> {
    text: &'db str,
    dialect: Dialect,
    cursor: Cursor<'db>,
    current: Token,
    trivia_pieces: Vec<TriviaPiece>,
}

impl<'db> Tokenizer<'db> {
    pub fn new(text: &'db str, dialect: Dialect) -> Self {
        let mut tokenizer = Self {
            text,
            dialect,
            cursor: Cursor::new(text),
            current: Token::EOF,
            trivia_pieces: Vec::with_capacity(4),
        };
        tokenizer.next_token();
        tokenizer
    }

    pub fn peek(&self) -> &Token {
        &self.current
    }

    fn offset(&self) -> TextSize {
        TextSize::new(self.text.len() as u32) - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let len = self.cursor.pos_within_token();
        TextRange::at(self.offset() - len, len)
    }

    fn text(&self) -> &'db str {
        &self.text[self.range()]
    }

    /// Returns the current token and lexes the next one.
    pub fn next_token(&mut self) -> Token {
        self.trivia();
        let trailing_start = self.trivia_pieces.len();
        let (kind, kind_range) = self.syntax_kind();
        self.trivia();

        let (leading, trailing) = self.trivia_pieces.split_at(trailing_start);
        let leading = Trivia::new(leading);
        let trailing = Trivia::new(trailing);

        self.trivia_pieces.clear();
        std::mem::replace(&mut self.current, Token { leading, kind, kind_range, trailing })
    }

    fn trivia(&mut self) {
        loop {
            let kind = match self.cursor.peek() {
                '/' if self.cursor.second() == '/' => {
                    self.cursor.advance_while(|c| c != '\n');
                    TriviaPieceKind::SingleLineComment
                }
                '#' if self.cursor.second() == '!' && self.offset() == TextSize::new(0) => {
                    self.cursor.advance_while(|c| c != '\n');
                    TriviaPieceKind::SingleLineComment
                }
                '/' if self.cursor.second() == '*' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    while !self.cursor.is_eof() {
                        if self.cursor.advance() == '*' && self.cursor.eat('/') {
                            break;
                        }
                    }
                    TriviaPieceKind::MultiLineComment
                }
                '\\' if matches!(self.cursor.second(), '\n' | '\r') => {
                    self.cursor.advance();
                    self.cursor.eat('\r');
                    self.cursor.eat('\n');
                    TriviaPieceKind::Whitespace
                }
                first_char if is_inline_whitespace(first_char) && !self.cursor.is_eof() => {
                    self.cursor.advance_while(is_inline_whitespace);
                    TriviaPieceKind::Whitespace
                }
                _ => break,
            };

            self.trivia_pieces.push(TriviaPiece::new(kind, self.cursor.pos_within_token()));
            self.cursor.reset_pos_within_token();
        }
    }

    fn syntax_kind(&mut self) -> (SyntaxKind, TextRange) {
        let kind = if self.cursor.is_eof() { EOF } else { self.dispatch() };

        let range = self.range();
        self.cursor.reset_pos_within_token();

        (kind, range)
    }

    fn dispatch(&mut self) -> SyntaxKind {
        match self.cursor.advance() {
            '\n' => {
                self.cursor.advance_while(|c| matches!(c, '\n' | '\r' | ' ' | '\t'));
                NEWLINE
            }
            '(' => LEFT_PAREN,
            ')' => RIGHT_PAREN,
            '[' => LEFT_BRACKET,
            ']' => RIGHT_BRACKET,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            ';' => SEMICOLON,
            ',' => COMMA,
            ':' => COLON,
            '@' => AT,
            '~' => TILDE,
            '^' => CARET,
            '.' => {
                if self.cursor.eat('.') {
                    if self.cursor.eat('<') { RANGE_EXCLUSIVE } else { RANGE }
                } else {
                    DOT
                }
            }
            '?' => {
                if self.cursor.eat('.') {
                    SAFE_DOT
                } else if self.cursor.eat(':') {
                    ELVIS
                } else {
                    QUESTION
                }
            }
            '*' => {
                if self.cursor.eat('.') {
                    SPREAD_DOT
                } else if self.cursor.eat('*') {
                    POW
                } else if self.cursor.eat('=') {
                    STAR_EQ
                } else {
                    STAR
                }
            }
            '=' => {
                if self.cursor.eat('=') {
                    if self.cursor.eat('~') { REGEX_MATCH } else { EQ2 }
                } else if self.cursor.eat('~') {
                    REGEX_FIND
                } else {
                    EQ
                }
            }
            '!' => {
                if self.cursor.eat('=') { NEQ } else { BANG }
            }
            '<' => {
                if self.cursor.eat('=') {
                    if self.cursor.eat('>') { COMPARE } else { LTEQ }
                } else if self.cursor.eat('<') {
                    SHL
                } else {
                    LT
                }
            }
            '>' => {
                if self.cursor.eat('=') { GTEQ } else { GT }
            }
            '+' => {
                if self.cursor.eat('+') {
                    PLUS2
                } else if self.cursor.eat('=') {
                    PLUS_EQ
                } else {
                    PLUS
                }
            }
            '-' => {
                if self.cursor.eat('-') {
                    MINUS2
                } else if self.cursor.eat('=') {
                    MINUS_EQ
                } else if self.cursor.eat('>') {
                    ARROW
                } else {
                    MINUS
                }
            }
            '/' => {
                if self.cursor.eat('=') { SLASH_EQ } else { SLASH }
            }
            '%' => {
                if self.dialect == Dialect::Template && self.cursor.matches('>') {
                    self.template_text()
                } else if self.cursor.eat('=') {
                    PERCENT_EQ
                } else {
                    PERCENT
                }
            }
            '&' => {
                if self.cursor.eat('&') { AMP2 } else { AMP }
            }
            '|' => {
                if self.cursor.eat('|') { PIPE2 } else { PIPE }
            }
            quote @ ('\'' | '"') => self.string(quote),
            first_char @ '0'..='9' => self.number(first_char),
            first_char if is_ident_start(first_char) => {
                self.cursor.advance_while(is_ident_continue);
                SyntaxKind::from_keyword(self.text()).unwrap_or(IDENT)
            }
            _ => UNKNOWN,
        }
    }

    fn template_text(&mut self) -> SyntaxKind {
        self.cursor.advance();
        while !self.cursor.is_eof() {
            if self.cursor.peek() == '<' && self.cursor.second() == '%' {
                self.cursor.advance();
                self.cursor.advance();
                break;
            }
            self.cursor.advance();
        }
        TEMPLATE_TEXT
    }

    fn string(&mut self, quote: char) -> SyntaxKind {
        if self.cursor.peek() == quote && self.cursor.second() == quote {
            self.cursor.advance();
            self.cursor.advance();
            while !self.cursor.is_eof() {
                match self.cursor.advance() {
                    '\\' => {
                        self.cursor.advance();
                    }
                    c if c == quote && self.cursor.peek() == quote && self.cursor.second() == quote => {
                        self.cursor.advance();
                        self.cursor.advance();
                        break;
                    }
                    _ => {}
                }
            }
            return STRING;
        }

        while !self.cursor.is_eof() {
            match self.cursor.peek() {
                '\n' => break,
                '\\' => {
                    self.cursor.advance();
                    if !matches!(self.cursor.peek(), '\n') {
                        self.cursor.advance();
                    }
                }
                c => {
                    self.cursor.advance();
                    if c == quote {
                        break;
                    }
                }
            }
        }
        STRING
    }

    fn number(&mut self, c: char) -> SyntaxKind {
        if c == '0' {
            match self.cursor.peek() {
                'b' | 'B' | 'o' | 'O' => {
                    self.cursor.advance();
                    self.digits(false);
                    return self.integer_suffix();
                }
                'x' | 'X' => {
                    self.cursor.advance();
                    self.digits(true);
                    return self.integer_suffix();
                }
                '0'..='9' | '_' | '.' | 'e' | 'E' => {
                    self.digits(false);
                }
                _ => return self.integer_suffix(),
            }
        } else {
            self.digits(false);
        }

        if self.cursor.matches('.') && self.cursor.second().is_ascii_digit() {
            self.cursor.advance();
            self.digits(false);
            self.float_exponent();
            self.eat_suffix(&['d', 'D', 'f', 'F', 'g', 'G']);
            return FLOAT_NUMBER;
        }

        if self.cursor.matches('e') || self.cursor.matches('E') {
            self.float_exponent();
            self.eat_suffix(&['d', 'D', 'f', 'F', 'g', 'G']);
            return FLOAT_NUMBER;
        }

        if self.eat_suffix(&['d', 'D', 'f', 'F']) {
            return FLOAT_NUMBER;
        }

        self.integer_suffix()
    }

    fn integer_suffix(&mut self) -> SyntaxKind {
        self.eat_suffix(&['l', 'L', 'i', 'I', 'g', 'G']);
        INT_NUMBER
    }

    fn eat_suffix(&mut self, suffixes: &[char]) -> bool {
        let peeked = self.cursor.peek();
        let matched = suffixes.contains(&peeked) && !is_ident_continue(self.cursor.second());
        if matched {
            self.cursor.advance();
        }
        matched
    }

    fn digits(&mut self, allow_hex: bool) {
        loop {
            match self.cursor.peek() {
                '_' | '0'..='9' => {
                    self.cursor.advance();
                }
                'a'..='f' | 'A'..='F' if allow_hex => {
                    self.cursor.advance();
                }
                _ => return,
            }
        }
    }

    fn float_exponent(&mut self) {
        if self.cursor.matches('e') || self.cursor.matches('E') {
            self.cursor.advance();
            if self.cursor.matches('-') || self.cursor.matches('+') {
                self.cursor.advance();
            }
            self.digits(false);
        }
    }
}

/// Lexes the whole text; the last token is always `EOF`.
pub fn tokenize(text: &str, dialect: Dialect) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(text, dialect);
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.next_token();
        let kind = token.kind;
        tokens.push(token);
        if kind == EOF {
            return tokens;
        }
    }
}

fn is_inline_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\u{c}')
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_of(text: &str, dialect: Dialect) -> Vec<SyntaxKind> {
        tokenize(text, dialect).into_iter().map(|token| token.kind).collect()
    }

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        kinds_of(text, Dialect::Groovy)
    }

    fn lex_one(text: &str) -> SyntaxKind {
        let mut tokenizer = Tokenizer::new(text, Dialect::Groovy);
        let kind = tokenizer.next_token().kind;
        assert!(tokenizer.cursor.is_eof(), "Tokenizer did not consume all input for '{text}'");
        kind
    }

    fn token_text<'a>(token: &Token, text: &'a str) -> &'a str {
        &text[token.kind_range]
    }

    #[test]
    fn test_integer_literals() {
        for input in ["123", "0", "0b1010", "0o755", "0x1f", "123_456", "42L", "7G", "0xffL"] {
            assert_eq!(lex_one(input), INT_NUMBER, "Input: '{input}'");
        }
    }

    #[test]
    fn test_float_literals() {
        for input in ["123.456", "0.0", "1e10", "1.0e-5", "123_456.789_012", "1.5d", "3f", "2.5G"]
        {
            assert_eq!(lex_one(input), FLOAT_NUMBER, "Input: '{input}'");
        }
    }

    #[test]
    fn test_method_call_on_integer_is_not_a_float() {
        assert_eq!(kinds("1.abs()"), [INT_NUMBER, DOT, IDENT, LEFT_PAREN, RIGHT_PAREN, EOF]);
        assert_eq!(kinds("1..10"), [INT_NUMBER, RANGE, INT_NUMBER, EOF]);
        assert_eq!(kinds("0..<n"), [INT_NUMBER, RANGE_EXCLUSIVE, IDENT, EOF]);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("if else while for switch case default"),
            [IF_KW, ELSE_KW, WHILE_KW, FOR_KW, SWITCH_KW, CASE_KW, DEFAULT_KW, EOF]
        );
        assert_eq!(kinds("iffy $name _x élan"), [IDENT, IDENT, IDENT, IDENT, EOF]);
        assert_eq!(kinds("int def synchronized"), [INT_KW, DEF_KW, SYNCHRONIZED_KW, EOF]);
    }

    #[test]
    fn test_operators_use_maximal_munch() {
        assert_eq!(
            kinds("a?.b*.c ?: d ==~ e =~ f <=> g ** h"),
            [
                IDENT, SAFE_DOT, IDENT, SPREAD_DOT, IDENT, ELVIS, IDENT, REGEX_MATCH, IDENT,
                REGEX_FIND, IDENT, COMPARE, IDENT, POW, IDENT, EOF
            ]
        );
        assert_eq!(
            kinds("x += 1; y -= 2; z++ --w -> <<"),
            [
                IDENT, PLUS_EQ, INT_NUMBER, SEMICOLON, IDENT, MINUS_EQ, INT_NUMBER, SEMICOLON,
                IDENT, PLUS2, MINUS2, IDENT, ARROW, SHL, EOF
            ]
        );
        assert_eq!(kinds("a >= b >> c"), [IDENT, GTEQ, IDENT, GT, GT, IDENT, EOF]);
    }

    #[test]
    fn test_eq_operator() {
        let text = "x = y";
        let mut tokenizer = Tokenizer::new(text, Dialect::Groovy);

        let token = tokenizer.next_token();
        assert_eq!(token.kind, IDENT);
        assert_eq!(token_text(&token, text), "x");

        let token = tokenizer.next_token();
        assert_eq!(token.kind, EQ);
        assert_eq!(token_text(&token, text), "=");

        let token = tokenizer.next_token();
        assert_eq!(token.kind, IDENT);
        assert_eq!(token_text(&token, text), "y");

        let eof_token = tokenizer.next_token();
        assert_eq!(eof_token.kind, EOF);
        assert_eq!(eof_token.kind_range, TextRange::empty(TextSize::new(5)));
    }

    #[test]
    fn test_newlines_are_tokens() {
        let text = "a\n\n  b\r\nc";
        let tokens = tokenize(text, Dialect::Groovy);
        let kinds = tokens.iter().map(|token| token.kind).collect::<Vec<_>>();

        assert_eq!(kinds, [IDENT, NEWLINE, IDENT, NEWLINE, IDENT, EOF]);
        assert_eq!(token_text(&tokens[1], text), "\n\n  ");
        assert_eq!(token_text(&tokens[3], text), "\n");
        assert_eq!(tokens[2].trailing.len(), TextSize::new(1));
    }

    #[test]
    fn test_comments_are_trivia() {
        let text = "a /* block */ b // line\nc";
        let tokens = tokenize(text, Dialect::Groovy);
        let kinds = tokens.iter().map(|token| token.kind).collect::<Vec<_>>();

        assert_eq!(kinds, [IDENT, IDENT, NEWLINE, IDENT, EOF]);
        assert_eq!(
            tokens[0].trailing.pieces().iter().map(|piece| piece.kind).collect::<Vec<_>>(),
            [
                TriviaPieceKind::Whitespace,
                TriviaPieceKind::MultiLineComment,
                TriviaPieceKind::Whitespace
            ]
        );
        assert_eq!(
            tokens[1].trailing.pieces().last().map(|piece| piece.kind),
            Some(TriviaPieceKind::SingleLineComment)
        );
    }

    #[test]
    fn test_leading_trivia_only_at_start_of_file() {
        let text = "#!/usr/bin/env groovy\nprintln 1";
        let tokens = tokenize(text, Dialect::Groovy);

        assert_eq!(tokens[0].kind, NEWLINE);
        assert_eq!(tokens[0].leading.len(), TextSize::new(21));
        assert!(tokens[1].leading.is_empty());
    }

    #[test]
    fn test_strings() {
        assert_eq!(lex_one("'single'"), STRING);
        assert_eq!(lex_one("\"double $x\""), STRING);
        assert_eq!(lex_one("''"), STRING);
        assert_eq!(lex_one("'it\\'s'"), STRING);
        assert_eq!(lex_one("'''multi\nline'''"), STRING);
        assert_eq!(lex_one("\"\"\"a \"quoted\" word\"\"\""), STRING);
    }

    #[test]
    fn test_unterminated_string_stops_at_newline() {
        assert_eq!(kinds("'abc\nd"), [STRING, NEWLINE, IDENT, EOF]);
        assert_eq!(kinds("'''abc\nd"), [STRING, EOF]);
    }

    #[test]
    fn test_template_text_only_in_template_dialect() {
        let text = "a %> <b>html</b> <% c";
        let template = tokenize(text, Dialect::Template);
        let kinds = template.iter().map(|token| token.kind).collect::<Vec<_>>();
        assert_eq!(kinds, [IDENT, TEMPLATE_TEXT, IDENT, EOF]);
        assert_eq!(token_text(&template[1], text), "%> <b>html</b> <%");

        assert_eq!(kinds_of(text, Dialect::Groovy)[..4], [IDENT, PERCENT, GT, LT]);
    }

    #[test]
    fn test_ranges_cover_the_text() {
        let text = "def x = [1, 2] // done\n";
        let tokens = tokenize(text, Dialect::Groovy);
        let total: u32 = tokens
            .iter()
            .map(|token| {
                u32::from(token.leading.len())
                    + u32::from(token.kind_range.len())
                    + u32::from(token.trailing.len())
            })
            .sum();

        assert_eq!(total as usize, text.len());
    }

    #[test]
    fn test_unknown_characters() {
        assert_eq!(kinds("a # b"), [IDENT, UNKNOWN, IDENT, EOF]);
        assert_eq!(kinds("\0"), [UNKNOWN, EOF]);
    }
}
