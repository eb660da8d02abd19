//! Lexer and recursive-descent parser for generated blockpad script.
//!
//! The grammar is the closed set of shapes the code generators emit:
//!
//! ```text
//! program   := statement*
//! statement := expr ";"
//! expr      := primary ("+" primary)*
//! primary   := string | number | "true" | "false"
//!            | ident "(" [expr ("," expr)*] ")"
//!            | "(" expr ")"
//! ```

use crate::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Str(String),
    Num(f64),
    Bool(bool),
    /// Left-associative `+`.
    Add(Box<Expr>, Box<Expr>),
    /// A capability call.
    Call { callee: String, args: Vec<Expr> },
}

/// One statement: an expression evaluated for its effect.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub expr: Expr,
}

pub fn parse(source: &str) -> Result<Vec<Stmt>, Error> {
    let tokens = lex(source)?;
    Parser { tokens, pos: 0 }.program()
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Num(f64),
    LParen,
    RParen,
    Comma,
    Plus,
    Semi,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Ident(name) => format!("identifier `{name}`"),
            Token::Str(_) => "string literal".to_string(),
            Token::Num(_) => "number literal".to_string(),
            Token::LParen => "`(`".to_string(),
            Token::RParen => "`)`".to_string(),
            Token::Comma => "`,`".to_string(),
            Token::Plus => "`+`".to_string(),
            Token::Semi => "`;`".to_string(),
        }
    }
}

fn lex(source: &str) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            ';' => {
                chars.next();
                tokens.push(Token::Semi);
            }
            '"' => {
                chars.next();
                tokens.push(Token::Str(lex_string(&mut chars)?));
            }
            c if c.is_ascii_digit() => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = literal
                    .parse()
                    .map_err(|_| Error::Parse(format!("bad number literal `{literal}`")))?;
                tokens.push(Token::Num(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_alphanumeric() || d == '_' {
                        name.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(name));
            }
            other => {
                return Err(Error::Parse(format!("unexpected character `{other}`")));
            }
        }
    }

    Ok(tokens)
}

fn lex_string(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Result<String, Error> {
    let mut text = String::new();
    loop {
        match chars.next() {
            Some('"') => return Ok(text),
            Some('\\') => match chars.next() {
                Some('\\') => text.push('\\'),
                Some('"') => text.push('"'),
                Some('n') => text.push('\n'),
                Some('r') => text.push('\r'),
                Some('t') => text.push('\t'),
                Some(other) => {
                    return Err(Error::Parse(format!("unknown escape `\\{other}`")));
                }
                None => return Err(Error::Parse("unterminated string literal".to_string())),
            },
            Some(c) => text.push(c),
            None => return Err(Error::Parse("unterminated string literal".to_string())),
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn program(mut self) -> Result<Vec<Stmt>, Error> {
        let mut statements = Vec::new();
        while self.pos < self.tokens.len() {
            let expr = self.expr()?;
            self.expect(Token::Semi)?;
            statements.push(Stmt { expr });
        }
        Ok(statements)
    }

    fn expr(&mut self) -> Result<Expr, Error> {
        let mut left = self.primary()?;
        while self.eat(&Token::Plus) {
            let right = self.primary()?;
            left = Expr::Add(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn primary(&mut self) -> Result<Expr, Error> {
        match self.next()? {
            Token::Str(s) => Ok(Expr::Str(s)),
            Token::Num(n) => Ok(Expr::Num(n)),
            Token::Ident(name) => match name.as_str() {
                "true" => Ok(Expr::Bool(true)),
                "false" => Ok(Expr::Bool(false)),
                _ => {
                    self.expect(Token::LParen)?;
                    let mut args = Vec::new();
                    if !self.check(&Token::RParen) {
                        loop {
                            args.push(self.expr()?);
                            if !self.eat(&Token::Comma) {
                                break;
                            }
                        }
                    }
                    self.expect(Token::RParen)?;
                    Ok(Expr::Call { callee: name, args })
                }
            },
            Token::LParen => {
                let inner = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            other => Err(Error::Parse(format!(
                "expected an expression, found {}",
                other.describe()
            ))),
        }
    }

    fn next(&mut self) -> Result<Token, Error> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| Error::Parse("unexpected end of program".to_string()))?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, want: Token) -> Result<(), Error> {
        let got = self.next()?;
        if got == want {
            Ok(())
        } else {
            Err(Error::Parse(format!(
                "expected {}, found {}",
                want.describe(),
                got.describe()
            )))
        }
    }

    fn check(&self, want: &Token) -> bool {
        self.tokens.get(self.pos) == Some(want)
    }

    fn eat(&mut self, want: &Token) -> bool {
        if self.check(want) {
            self.pos += 1;
            true
        } else {
            false
        }
    }
}
