use std::fmt::Write;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::SyntaxError;

// Parses source text into a tagged tree, shaped the way the reader expects:
//
//   number : /-?[0-9]+/ ;
//   symbol : '+' | '-' | '*' | '/' ;
//   sexpr  : '(' <expr>* ')' ;
//   expr   : <number> | <symbol> | <sexpr> ;
//   lispy  : /^/ <expr>* /$/ ;

pub const ROOT: &str = ">";
pub const NUMBER: &str = "expr|number|regex";
pub const SYMBOL: &str = "expr|symbol|char";
pub const SEXPR: &str = "expr|sexpr|>";
pub const CHAR: &str = "char";
pub const ANCHOR: &str = "regex";

/// Deepest S-expression nesting `parse` accepts. Reading and dropping a tree
/// recurse once per level.
pub const MAX_NESTING: usize = 1024;

const EXPECTED_NESTING: &str = "at most 1024 nested S-expressions";
const EXPECTED_TOP: &str = "number, symbol, '(' or end of input";
const EXPECTED_LIST: &str = "number, symbol, '(' or ')'";

/// A node of a parsed syntax tree, as seen by the reader.
pub trait Ast: Sized {
    fn tag(&self) -> &str;
    fn contents(&self) -> &str;
    fn children(&self) -> &[Self];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub tag: &'static str,
    pub contents: String,
    pub line: usize,
    pub col: usize,
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(tag: &'static str, contents: &str, line: usize, col: usize) -> Node {
        Node {
            tag,
            contents: contents.to_string(),
            line,
            col,
            children: Vec::new(),
        }
    }

    pub fn branch(tag: &'static str, children: Vec<Node>) -> Node {
        Node {
            tag,
            contents: String::new(),
            line: 0,
            col: 0,
            children,
        }
    }

    /// One node per line, children indented by two spaces.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        if self.children.is_empty() && self.tag != ROOT && self.tag != SEXPR {
            let _ = writeln!(
                out,
                "{}{}:{}:{} '{}'",
                indent, self.tag, self.line, self.col, self.contents
            );
        } else {
            let _ = writeln!(out, "{}{}", indent, self.tag);
            for child in &self.children {
                child.dump_into(out, depth + 1);
            }
        }
    }
}

impl Ast for Node {
    fn tag(&self) -> &str {
        self.tag
    }

    fn contents(&self) -> &str {
        &self.contents
    }

    fn children(&self) -> &[Node] {
        &self.children
    }
}

/* Tokenizer */

#[derive(Debug, PartialEq)]
enum Token {
    ListStart,
    ListEnd,
    Number(String),
    Symbol(char),
    Invalid(char),
}

struct Spanned {
    token: Token,
    line: usize,
    col: usize,
}

struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(src: &'a str) -> Self {
        Tokenizer {
            chars: src.chars().peekable(),
            line: 1,
            col: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn read_digits(&mut self, token: &mut String) {
        while let Some(ch) = self.chars.peek().copied() {
            if !ch.is_ascii_digit() {
                break;
            }
            token.push(ch);
            self.bump();
        }
    }

    fn next_token(&mut self) -> Option<Spanned> {
        while let Some(ch) = self.chars.peek().copied() {
            let (line, col) = (self.line, self.col);
            self.bump();

            let token = match ch {
                ' ' | '\n' | '\t' | '\r' => continue,
                '(' => Token::ListStart,
                ')' => Token::ListEnd,
                '-' if self.chars.peek().is_some_and(|c| c.is_ascii_digit()) => {
                    let mut token = String::from('-');
                    self.read_digits(&mut token);
                    Token::Number(token)
                }
                '+' | '-' | '*' | '/' => Token::Symbol(ch),
                '0'..='9' => {
                    let mut token = String::from(ch);
                    self.read_digits(&mut token);
                    Token::Number(token)
                }
                _ => Token::Invalid(ch),
            };

            return Some(Spanned { token, line, col });
        }
        None
    }
}

/* Parser */

pub fn parse(name: &str, src: &str) -> Result<Node, SyntaxError> {
    let mut tokenizer = Tokenizer::new(src);
    let mut root = vec![Node::leaf(ANCHOR, "", 1, 1)];
    let mut stack: Vec<Vec<Node>> = Vec::with_capacity(16);

    let error = |line: usize, col: usize, expected: &'static str, found: String| SyntaxError {
        name: name.to_string(),
        line,
        col,
        expected,
        found,
    };

    while let Some(Spanned { token, line, col }) = tokenizer.next_token() {
        let node = match token {
            Token::Number(s) => Node::leaf(NUMBER, &s, line, col),
            Token::Symbol(c) => Node::leaf(SYMBOL, &c.to_string(), line, col),
            Token::ListStart if stack.len() == MAX_NESTING => {
                return Err(error(line, col, EXPECTED_NESTING, "'('".to_string()));
            }
            Token::ListStart => {
                stack.push(vec![Node::leaf(CHAR, "(", line, col)]);
                continue;
            }
            Token::ListEnd => match stack.pop() {
                Some(mut children) => {
                    children.push(Node::leaf(CHAR, ")", line, col));
                    Node::branch(SEXPR, children)
                }
                None => return Err(error(line, col, EXPECTED_TOP, "')'".to_string())),
            },
            Token::Invalid(c) => {
                let expected = if stack.is_empty() {
                    EXPECTED_TOP
                } else {
                    EXPECTED_LIST
                };
                return Err(error(line, col, expected, format!("'{}'", c)));
            }
        };

        match stack.last_mut() {
            Some(parent) => parent.push(node),
            None => root.push(node),
        }
    }

    if !stack.is_empty() {
        return Err(error(
            tokenizer.line,
            tokenizer.col,
            EXPECTED_LIST,
            "end of input".to_string(),
        ));
    }

    root.push(Node::leaf(ANCHOR, "", tokenizer.line, tokenizer.col));
    tracing::trace!(source = name, exprs = root.len() - 2, "parsed");
    Ok(Node::branch(ROOT, root))
}
