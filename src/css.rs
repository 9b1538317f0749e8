//! Canonical forms for CSS declaration lists and stylesheets.
//!
//! Two fragments are equivalent when their canonical forms serialize to the
//! same string. Canonicalization drops whitespace between value tokens,
//! rewrites zero numbers and dimensions (`0px`, `0.0em`, `+0`) to `0`, and
//! sorts declarations by property name. Selector order and the order of rules
//! inside a stylesheet are kept.

use std::fmt::{self, Write as _};

use cssparser::{
    BasicParseErrorKind, Delimiter, ParseError, ParseErrorKind, Parser, ParserInput, ToCss, Token,
};
use thiserror::Error;

/// At-rules whose block holds rules rather than declarations.
const RULE_LIST_AT_RULES: &[&str] = &[
    "media",
    "supports",
    "document",
    "-moz-document",
    "layer",
    "container",
    "scope",
    "starting-style",
    "keyframes",
    "-webkit-keyframes",
];

type CssResult<'i, T> = Result<T, ParseError<'i, &'static str>>;

/// CSS the tokenizer could not read as a declaration list or stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} at line {line}, column {column} in {css:?}")]
pub struct CssError {
    pub css: String,
    pub line: u32,
    pub column: u32,
    pub reason: String,
}

impl CssError {
    fn new(css: &str, error: ParseError<'_, &'static str>) -> Self {
        let reason = match error.kind {
            ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
                format!("unexpected token `{}`", token.to_css_string())
            }
            ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
                "unexpected end of input".to_owned()
            }
            ParseErrorKind::Basic(other) => format!("{other:?}"),
            ParseErrorKind::Custom(reason) => reason.to_owned(),
        };
        Self {
            css: css.to_owned(),
            line: error.location.line + 1,
            column: error.location.column,
            reason,
        }
    }
}

/// A value token, or a block with its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentValue {
    Token(String),
    Comma,
    Block {
        /// `(`, `[`, `{` or a function name followed by `(`.
        opening: String,
        closing: char,
        contents: Vec<ComponentValue>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lower-cased, except for custom properties (`--name`).
    pub name: String,
    pub value: Vec<ComponentValue>,
    pub important: bool,
}

/// Declarations sorted by property name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeclarationList {
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Qualified {
        /// Selector text with whitespace trimmed and collapsed.
        prelude: String,
        declarations: DeclarationList,
    },
    At {
        name: String,
        prelude: Vec<ComponentValue>,
        block: Option<AtRuleBlock>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtRuleBlock {
    Rules(Stylesheet),
    Declarations(DeclarationList),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

/// Canonical form of a `style` attribute value.
pub fn normalize_declarations(css: &str) -> Result<DeclarationList, CssError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    parse_declaration_list(&mut parser).map_err(|error| CssError::new(css, error))
}

/// Canonical form of a full stylesheet, e.g. the content of a `<style>` element.
pub fn normalize_stylesheet(css: &str) -> Result<Stylesheet, CssError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    parse_rule_list(&mut parser, true).map_err(|error| CssError::new(css, error))
}

pub fn declarations_equivalent(expected: &str, actual: &str) -> Result<bool, CssError> {
    let expected = normalize_declarations(expected)?.to_string();
    let actual = normalize_declarations(actual)?.to_string();
    log::trace!(target: "htmlcompare.css", "declarations {expected:?} vs {actual:?}");
    Ok(expected == actual)
}

pub fn stylesheets_equivalent(expected: &str, actual: &str) -> Result<bool, CssError> {
    let expected = normalize_stylesheet(expected)?.to_string();
    let actual = normalize_stylesheet(actual)?.to_string();
    log::trace!(target: "htmlcompare.css", "stylesheets {expected:?} vs {actual:?}");
    Ok(expected == actual)
}

fn parse_declaration_list<'i>(input: &mut Parser<'i, '_>) -> CssResult<'i, DeclarationList> {
    let mut declarations = Vec::new();
    while !input.is_exhausted() {
        if input.try_parse(|input| input.expect_semicolon()).is_ok() {
            continue;
        }
        let declaration =
            input.parse_until_after(Delimiter::Semicolon, |input| parse_declaration(input))?;
        declarations.push(declaration);
    }
    // stable: repeated properties keep their relative order
    declarations.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(DeclarationList { declarations })
}

fn parse_declaration<'i>(input: &mut Parser<'i, '_>) -> CssResult<'i, Declaration> {
    let name = input.expect_ident()?.clone();
    input.expect_colon()?;
    let mut value = collect_components(input)?;
    let important = strip_important(&mut value);
    let name = if name.starts_with("--") {
        name.to_string()
    } else {
        name.to_ascii_lowercase()
    };
    Ok(Declaration {
        name,
        value,
        important,
    })
}

fn strip_important(value: &mut Vec<ComponentValue>) -> bool {
    let important = match value.as_slice() {
        [.., ComponentValue::Token(bang), ComponentValue::Token(keyword)] => {
            bang == "!" && keyword.eq_ignore_ascii_case("important")
        }
        _ => false,
    };
    if important {
        value.truncate(value.len() - 2);
    }
    important
}

fn collect_components<'i>(input: &mut Parser<'i, '_>) -> CssResult<'i, Vec<ComponentValue>> {
    let mut components = Vec::new();
    loop {
        let token = match input.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        let component = match token {
            Token::Comma => ComponentValue::Comma,
            Token::Function(_)
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::CurlyBracketBlock => {
                let closing = closing_for(&token);
                let contents = input.parse_nested_block(|nested| collect_components(nested))?;
                ComponentValue::Block {
                    opening: token.to_css_string(),
                    closing,
                    contents,
                }
            }
            Token::Number { value, .. } | Token::Dimension { value, .. } if value == 0.0 => {
                ComponentValue::Token("0".to_owned())
            }
            Token::BadUrl(_)
            | Token::BadString(_)
            | Token::CloseParenthesis
            | Token::CloseSquareBracket
            | Token::CloseCurlyBracket => return Err(input.new_unexpected_token_error(token)),
            other => ComponentValue::Token(other.to_css_string()),
        };
        components.push(component);
    }
    Ok(components)
}

fn closing_for(token: &Token<'_>) -> char {
    match token {
        Token::SquareBracketBlock => ']',
        Token::CurlyBracketBlock => '}',
        _ => ')',
    }
}

fn parse_rule_list<'i>(input: &mut Parser<'i, '_>, top_level: bool) -> CssResult<'i, Stylesheet> {
    let mut rules = Vec::new();
    loop {
        let start = input.state();
        let token = match input.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::CDO | Token::CDC if top_level => {}
            Token::Semicolon => {}
            Token::AtKeyword(name) => rules.push(parse_at_rule(name.to_ascii_lowercase(), input)?),
            _ => {
                input.reset(&start);
                rules.push(parse_qualified_rule(input)?);
            }
        }
    }
    Ok(Stylesheet { rules })
}

fn parse_at_rule<'i>(name: String, input: &mut Parser<'i, '_>) -> CssResult<'i, Rule> {
    let prelude = input.parse_until_before(
        Delimiter::Semicolon | Delimiter::CurlyBracketBlock,
        |input| collect_components(input),
    )?;
    let has_block = matches!(input.next(), Ok(Token::CurlyBracketBlock));
    let block = if !has_block {
        None
    } else if RULE_LIST_AT_RULES.contains(&name.as_str()) {
        let rules = input.parse_nested_block(|nested| parse_rule_list(nested, false))?;
        Some(AtRuleBlock::Rules(rules))
    } else {
        let declarations = input.parse_nested_block(|nested| parse_declaration_list(nested))?;
        Some(AtRuleBlock::Declarations(declarations))
    };
    Ok(Rule::At {
        name,
        prelude,
        block,
    })
}

fn parse_qualified_rule<'i>(input: &mut Parser<'i, '_>) -> CssResult<'i, Rule> {
    let mut prelude = String::new();
    input.parse_until_before(Delimiter::CurlyBracketBlock, |input| {
        write_prelude(input, &mut prelude)
    })?;
    if !matches!(input.next(), Ok(Token::CurlyBracketBlock)) {
        return Err(input.new_custom_error("rule without a declaration block"));
    }
    let declarations = input.parse_nested_block(|nested| parse_declaration_list(nested))?;
    Ok(Rule::Qualified {
        prelude: prelude.trim_end().to_owned(),
        declarations,
    })
}

/// Serializes selector tokens, collapsing whitespace runs to one space and
/// dropping it next to commas and brackets.
fn write_prelude<'i>(input: &mut Parser<'i, '_>, out: &mut String) -> CssResult<'i, ()> {
    loop {
        let token = match input.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::WhiteSpace(_) => {
                if !out.is_empty() && !out.ends_with([' ', ',', '(', '[']) {
                    out.push(' ');
                }
            }
            Token::Comma => {
                trim_trailing_space(out);
                out.push(',');
            }
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                out.push_str(&token.to_css_string());
                input.parse_nested_block(|nested| write_prelude(nested, out))?;
                trim_trailing_space(out);
                out.push(closing_for(&token));
            }
            other => out.push_str(&other.to_css_string()),
        }
    }
    Ok(())
}

fn trim_trailing_space(out: &mut String) {
    if out.ends_with(' ') {
        out.pop();
    }
}

fn write_components(f: &mut fmt::Formatter<'_>, components: &[ComponentValue]) -> fmt::Result {
    let mut previous: Option<&ComponentValue> = None;
    for component in components {
        if let Some(previous) = previous {
            let touches_comma = matches!(previous, ComponentValue::Comma)
                || matches!(component, ComponentValue::Comma);
            if !touches_comma {
                f.write_char(' ')?;
            }
        }
        match component {
            ComponentValue::Token(token) => f.write_str(token)?,
            ComponentValue::Comma => f.write_char(',')?,
            ComponentValue::Block {
                opening,
                closing,
                contents,
            } => {
                f.write_str(opening)?;
                write_components(f, contents)?;
                f.write_char(*closing)?;
            }
        }
        previous = Some(component);
    }
    Ok(())
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        write_components(f, &self.value)?;
        if self.important {
            f.write_str(" !important")?;
        }
        Ok(())
    }
}

impl fmt::Display for DeclarationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, declaration) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_char(';')?;
            }
            write!(f, "{declaration}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Qualified {
                prelude,
                declarations,
            } => write!(f, "{prelude}{{{declarations}}}"),
            Rule::At {
                name,
                prelude,
                block,
            } => {
                write!(f, "@{name}")?;
                if !prelude.is_empty() {
                    f.write_char(' ')?;
                    write_components(f, prelude)?;
                }
                match block {
                    None => f.write_char(';'),
                    Some(AtRuleBlock::Rules(rules)) => write!(f, "{{{rules}}}"),
                    Some(AtRuleBlock::Declarations(declarations)) => {
                        write!(f, "{{{declarations}}}")
                    }
                }
            }
        }
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}
