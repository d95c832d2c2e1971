//! Template tokenizer and block-tree parser.
//!
//! The template language has exactly three constructs:
//!
//! | Syntax                              | Meaning                                    |
//! |-------------------------------------|--------------------------------------------|
//! | `{{name}}`                          | value of `name` in the active scope        |
//! | `{{#if key}} … {{/if}}`             | body kept iff `key` is truthy              |
//! | `{{#each list}} … {{/each}}`        | body repeated per item, scoped to its fields |
//!
//! Any other tag starting with `#` or `/` is literal text, as is an unterminated
//! `{{`. Parsing never fails: malformed structure degrades to literal text so
//! authoring mistakes stay visible in the output.

/// Tag opener.
pub const OPEN: &str = "{{";
/// Tag closer.
pub const CLOSE: &str = "}}";

const IF_PREFIX: &str = "#if ";
const EACH_PREFIX: &str = "#each ";
const IF_END: &str = "/if";
const EACH_END: &str = "/each";

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// What a token means. Names borrow from the template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// Literal text, including structural-looking tags that name no directive.
    Text,
    /// `{{name}}`; the name is the exact tag content.
    Variable(&'a str),
    /// `{{#if key}}`
    IfOpen(&'a str),
    /// `{{/if}}`
    IfClose,
    /// `{{#each list}}`
    EachOpen(&'a str),
    /// `{{/each}}`
    EachClose,
}

/// A token and the exact source text it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub raw: &'a str,
}

impl<'a> Token<'a> {
    fn text(raw: &'a str) -> Self {
        Self {
            kind: TokenKind::Text,
            raw,
        }
    }
}

/// Directive argument: tag content after the prefix, up to the first
/// whitespace or brace.
fn directive_arg(arg: &str) -> &str {
    arg.split(|c: char| c.is_whitespace() || c == '}')
        .next()
        .unwrap_or_default()
}

fn classify(inner: &str) -> TokenKind<'_> {
    if let Some(arg) = inner.strip_prefix(IF_PREFIX) {
        return TokenKind::IfOpen(directive_arg(arg));
    }
    if let Some(arg) = inner.strip_prefix(EACH_PREFIX) {
        return TokenKind::EachOpen(directive_arg(arg));
    }
    match inner {
        IF_END => TokenKind::IfClose,
        EACH_END => TokenKind::EachClose,
        _ if inner.starts_with(['#', '/']) => TokenKind::Text,
        name => TokenKind::Variable(name),
    }
}

/// Split `source` into tokens.
///
/// A tag runs from the last `{{` before a `}}` to that `}}`, so in
/// `{{{name}}}` the outer braces are text and in `{{a {{b}}` only `{{b}}` is a
/// tag. Concatenating every token's `raw` reproduces `source` exactly.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = source;

    while let Some(open) = rest.find(OPEN) {
        let after_open = open + OPEN.len();
        let Some(close) = rest[after_open..].find(CLOSE).map(|i| i + after_open) else {
            break;
        };
        let start = rest[..close].rfind(OPEN).unwrap_or(open);
        let end = close + CLOSE.len();

        if start > 0 {
            tokens.push(Token::text(&rest[..start]));
        }
        let raw = &rest[start..end];
        tokens.push(Token {
            kind: classify(&rest[start + OPEN.len()..close]),
            raw,
        });
        rest = &rest[end..];
    }

    if !rest.is_empty() {
        tokens.push(Token::text(rest));
    }
    tokens
}

// ---------------------------------------------------------------------------
// Block tree
// ---------------------------------------------------------------------------

/// A node of the parsed block tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'a> {
    Text(&'a str),
    Variable { name: &'a str, raw: &'a str },
    If { key: &'a str, body: Vec<Node<'a>> },
    Each { list: &'a str, body: Vec<Node<'a>> },
}

/// Which constructs are live while parsing. Constructs that are not live are
/// kept as literal text.
///
/// The body of an `{{#each}}` always has variables and conditionals live,
/// because expanding a list renders its body at item scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syntax {
    pub variables: bool,
    pub conditionals: bool,
    pub lists: bool,
}

impl Syntax {
    pub const FULL: Self = Self {
        variables: true,
        conditionals: true,
        lists: true,
    };
    pub const VARIABLES: Self = Self {
        variables: true,
        conditionals: false,
        lists: false,
    };
    pub const CONDITIONALS: Self = Self {
        variables: false,
        conditionals: true,
        lists: false,
    };
    pub const LISTS: Self = Self {
        variables: false,
        conditionals: false,
        lists: true,
    };

    fn each_body(self) -> Self {
        Self {
            variables: true,
            conditionals: true,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    If,
    Each,
}

/// An open block awaiting its closer.
struct Frame<'a> {
    kind: BlockKind,
    arg: &'a str,
    open: &'a str,
    syntax: Syntax,
    body: Vec<Node<'a>>,
}

impl<'a> Frame<'a> {
    fn into_node(self) -> Node<'a> {
        match self.kind {
            BlockKind::If => Node::If {
                key: self.arg,
                body: self.body,
            },
            BlockKind::Each => Node::Each {
                list: self.arg,
                body: self.body,
            },
        }
    }
}

fn push<'a>(stack: &mut [Frame<'a>], root: &mut Vec<Node<'a>>, node: Node<'a>) {
    match stack.last_mut() {
        Some(frame) => frame.body.push(node),
        None => root.push(node),
    }
}

fn top_is(stack: &[Frame<'_>], kind: BlockKind) -> bool {
    stack.last().is_some_and(|frame| frame.kind == kind)
}

/// Build the block tree for `tokens`.
///
/// Blocks nest properly or not at all:
/// - a closer that does not match the innermost open block is literal text;
/// - an opener still open at end of input becomes literal text, with the nodes
///   parsed after it (including fully closed inner blocks) kept in place.
///
/// The second rule gives the same result as resolving innermost blocks first
/// and leaving an unterminated opener behind.
pub fn parse<'a>(tokens: &[Token<'a>], syntax: Syntax) -> Vec<Node<'a>> {
    let mut root = Vec::new();
    let mut stack: Vec<Frame<'a>> = Vec::new();

    for token in tokens {
        let live = stack.last().map_or(syntax, |frame| frame.syntax);
        match token.kind {
            TokenKind::Variable(name) if live.variables => {
                push(&mut stack, &mut root, Node::Variable { name, raw: token.raw });
            }
            TokenKind::IfOpen(key) if live.conditionals => stack.push(Frame {
                kind: BlockKind::If,
                arg: key,
                open: token.raw,
                syntax: live,
                body: Vec::new(),
            }),
            TokenKind::EachOpen(list) if live.lists => stack.push(Frame {
                kind: BlockKind::Each,
                arg: list,
                open: token.raw,
                syntax: live.each_body(),
                body: Vec::new(),
            }),
            TokenKind::IfClose if top_is(&stack, BlockKind::If) => {
                if let Some(frame) = stack.pop() {
                    push(&mut stack, &mut root, frame.into_node());
                }
            }
            TokenKind::EachClose if top_is(&stack, BlockKind::Each) => {
                if let Some(frame) = stack.pop() {
                    push(&mut stack, &mut root, frame.into_node());
                }
            }
            _ => push(&mut stack, &mut root, Node::Text(token.raw)),
        }
    }

    while let Some(frame) = stack.pop() {
        let target = stack.last_mut().map_or(&mut root, |parent| &mut parent.body);
        target.push(Node::Text(frame.open));
        target.extend(frame.body);
    }

    root
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
