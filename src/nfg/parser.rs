use std::{fs, iter::Peekable, path::Path, str::CharIndices};

use log::debug;
use ndarray::{Array2, ShapeBuilder};

use super::NfgError;
use crate::BimatrixGame;

#[derive(Debug, Clone, PartialEq)]
enum Token<'a> {
    Open,
    Close,
    Text(&'a str),
    Word(&'a str),
}

impl Token<'_> {
    fn describe(&self) -> String {
        match self {
            Token::Open => "{".to_owned(),
            Token::Close => "}".to_owned(),
            Token::Text(s) => format!("\"{s}\""),
            Token::Word(s) => s.to_string(),
        }
    }
}

/// Splits an NFG file into braces, quoted strings and bare words.
struct Tokens<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    fn expect(&mut self, expected: &'static str) -> Result<Token<'a>, NfgError> {
        self.next().ok_or(NfgError::UnexpectedEnd(expected))?
    }

    fn expect_open(&mut self) -> Result<(), NfgError> {
        match self.expect("{")? {
            Token::Open => Ok(()),
            t => Err(NfgError::UnexpectedToken {
                expected: "{",
                found: t.describe(),
            }),
        }
    }

    fn expect_text(&mut self, expected: &'static str) -> Result<&'a str, NfgError> {
        match self.expect(expected)? {
            Token::Text(s) => Ok(s),
            t => Err(NfgError::UnexpectedToken {
                expected,
                found: t.describe(),
            }),
        }
    }

    fn expect_word(&mut self, expected: &'static str) -> Result<&'a str, NfgError> {
        match self.expect(expected)? {
            Token::Word(s) => Ok(s),
            t => Err(NfgError::UnexpectedToken {
                expected,
                found: t.describe(),
            }),
        }
    }

    /// Skips the optional comment string that precedes the payoffs.
    fn skip_comment(&mut self) -> Result<(), NfgError> {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
        if let Some((start, _)) = self.chars.next_if(|(_, c)| *c == '"') {
            self.quoted(start + 1)?;
        }
        Ok(())
    }

    fn quoted(&mut self, start: usize) -> Result<Token<'a>, NfgError> {
        let source = self.source;
        let mut escaped = false;
        for (i, c) in self.chars.by_ref() {
            match c {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => return Ok(Token::Text(&source[start..i])),
                _ => escaped = false,
            }
        }
        Err(NfgError::UnexpectedEnd("closing quote"))
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token<'a>, NfgError>;

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.source;
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
        let (start, c) = self.chars.next()?;
        let token = match c {
            '{' => Ok(Token::Open),
            '}' => Ok(Token::Close),
            '"' => self.quoted(start + 1),
            _ => {
                let mut end = start + c.len_utf8();
                while let Some((i, c)) = self
                    .chars
                    .next_if(|(_, c)| !c.is_whitespace() && !matches!(*c, '{' | '}' | '"'))
                {
                    end = i + c.len_utf8();
                }
                Ok(Token::Word(&source[start..end]))
            }
        };
        Some(token)
    }
}

/// Parses a payoff entry. Rational payoffs such as `3/4` are accepted.
fn parse_payoff(s: &str) -> Result<f64, NfgError> {
    let invalid = || NfgError::InvalidNumber(s.to_owned());
    match s.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().map_err(|_| invalid())?;
            let den: f64 = den.parse().map_err(|_| invalid())?;
            Ok(num / den)
        }
        None => s.parse().map_err(|_| invalid()),
    }
}

fn parse_dimension(s: &str) -> Result<usize, NfgError> {
    s.parse().map_err(|_| NfgError::InvalidNumber(s.to_owned()))
}

/// Reads a two player game in the explicit payoff NFG format:
///
/// ```text
/// NFG 1 R "title" { "Player 1" "Player 2" } { 2 2 }
/// "optional comment"
/// 3 3 0 5 5 0 1 1
/// ```
///
/// Payoff pairs are listed with the strategy of the first player varying fastest.
pub fn parse_str(source: &str) -> Result<BimatrixGame, NfgError> {
    let mut tokens = Tokens::new(source);

    let header: Vec<&str> = (0..3)
        .map(|_| tokens.expect_word("NFG header"))
        .collect::<Result<_, _>>()?;
    if header[0] != "NFG" || header[1] != "1" || !matches!(header[2], "D" | "R") {
        return Err(NfgError::InvalidHeader(header.join(" ")));
    }
    let title = tokens.expect_text("game title")?;

    tokens.expect_open()?;
    let mut players = 0;
    loop {
        match tokens.expect("player name")? {
            Token::Text(_) => players += 1,
            Token::Close => break,
            t => {
                return Err(NfgError::UnexpectedToken {
                    expected: "player name",
                    found: t.describe(),
                });
            }
        }
    }
    if players != 2 {
        return Err(NfgError::InvalidPlayers(players));
    }

    let (dim1, dim2) = match tokens.expect("number of strategies")? {
        Token::Open => {
            let dim1 = parse_dimension(tokens.expect_word("number of strategies")?)?;
            let dim2 = parse_dimension(tokens.expect_word("number of strategies")?)?;
            match tokens.expect("}")? {
                Token::Close => (dim1, dim2),
                t => {
                    return Err(NfgError::UnexpectedToken {
                        expected: "}",
                        found: t.describe(),
                    });
                }
            }
        }
        Token::Word(s) => {
            let dim1 = parse_dimension(s)?;
            (dim1, parse_dimension(tokens.expect_word("number of strategies")?)?)
        }
        t => {
            return Err(NfgError::UnexpectedToken {
                expected: "number of strategies",
                found: t.describe(),
            });
        }
    };
    debug!("reading {dim1}x{dim2} game {title:?}");

    tokens.skip_comment()?;
    let cells = dim1
        .checked_mul(dim2)
        .ok_or(NfgError::InvalidDimensions(dim1, dim2))?;
    let mut payoff = (Vec::new(), Vec::new());
    for _ in 0..cells {
        payoff.0.push(parse_payoff(tokens.expect_word("payoff")?)?);
        payoff.1.push(parse_payoff(tokens.expect_word("payoff")?)?);
    }
    if let Some(token) = tokens.next() {
        return Err(NfgError::UnexpectedToken {
            expected: "end of file",
            found: token?.describe(),
        });
    }

    // Payoffs are listed with the first player's strategy varying fastest.
    let p1 = Array2::from_shape_vec((dim1, dim2).f(), payoff.0)
        .map_err(|_| NfgError::InvalidDimensions(dim1, dim2))?;
    let p2 = Array2::from_shape_vec((dim1, dim2).f(), payoff.1)
        .map_err(|_| NfgError::InvalidDimensions(dim1, dim2))?;
    Ok(BimatrixGame::new(p1, p2)?)
}

pub fn from_file(path: &Path) -> Result<BimatrixGame, NfgError> {
    let contents = fs::read_to_string(path)
        .map_err(|err| NfgError::InvalidGamePath(err, path.display().to_string()))?;
    parse_str(&contents)
}
