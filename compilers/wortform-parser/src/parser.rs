use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{anychar, multispace0},
    combinator::map,
    IResult,
};
use wortform_morph::verb::strip_reflexive_marker;

use crate::token::{Span, Token, TokenKind};

/// Letters (umlauts and ß included), digits, and the joiners found inside
/// German words ("Know-how", "geht's").
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '\''
}

#[derive(Debug, Clone)]
enum RawToken<'a> {
    Word(&'a str),
    Punct(char),
}

fn raw_token(input: &str) -> IResult<&str, RawToken<'_>> {
    alt((
        map(take_while1(is_word_char), RawToken::Word),
        map(anychar, RawToken::Punct),
    ))(input)
}

pub fn tokenize(original_input: &str) -> Vec<Token<'_>> {
    let mut input = original_input;
    let mut result = Vec::new();

    loop {
        // 1. Skip whitespace
        let (next_input, _) = match multispace0::<&str, nom::error::Error<&str>>(input) {
            Ok(res) => res,
            Err(_) => break,
        };
        input = next_input;

        if input.is_empty() {
            break;
        }

        // 2. Match a word or a single punctuation character
        match raw_token(input) {
            Ok((next_input, raw)) => {
                let len = input.len() - next_input.len();
                let start = original_input.len() - input.len();
                let span = Span::new(start, start + len);
                let kind = match raw {
                    RawToken::Word(_) => TokenKind::Word,
                    RawToken::Punct(c) => TokenKind::Punctuation(c),
                };
                result.push(Token {
                    span,
                    text: &original_input[span.start..span.end],
                    kind,
                });
                input = next_input;
            }
            Err(_) => break,
        }
    }

    result
}

/// Canonical spelling of an upstream form: words joined by single spaces,
/// stray punctuation dropped.
pub fn normalize_form(raw: &str) -> String {
    tokenize(raw)
        .into_iter()
        .filter(|token| token.kind == TokenKind::Word)
        .map(|token| token.text.trim_matches(|c| c == '-' || c == '\''))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A lemma split into its optional reflexive marker and the verb itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LemmaShape<'a> {
    pub reflexive: bool,
    pub head: &'a str,
}

/// Same "sich " rule the verb resolver applies when detecting prefixes.
pub fn parse_lemma(lemma: &str) -> LemmaShape<'_> {
    let trimmed = lemma.trim();
    let head = strip_reflexive_marker(trimmed);
    LemmaShape {
        reflexive: head.len() != trimmed.len(),
        head,
    }
}
