//! Studio command language.
//!
//! One command per line: a verb followed by arguments.
//!
//! ```text
//! add
//! color 2 rgb(118, 75, 162)
//! pos 2 62.5
//! kind conic
//! svg "out dir/sunset.svg"
//! ```
//!
//! Words may contain parenthesized groups with spaces inside them, so CSS
//! functional colors arrive as a single argument.

use std::fmt;
use std::path::PathBuf;

// ── Errors ────────────────────────────────────────────────────────────────

/// Lex or parse failure with a 1-based column.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandError {
    pub message: String,
    pub col: usize,
}

impl CommandError {
    pub fn new(message: impl Into<String>, col: usize) -> Self {
        Self { message: message.into(), col }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "col {}: {}", self.col, self.message)
    }
}

impl std::error::Error for CommandError {}

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Word(String),
    Str(String),
    Eof,
}

/// A token and the column it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub col: usize,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0 }
    }

    pub fn tokenize(mut self) -> Result<Vec<Spanned>, CommandError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let eof = tok.token == Token::Eof;
            tokens.push(tok);
            if eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn col(&self) -> usize {
        self.src[..self.pos].chars().count() + 1
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.src[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn next_token(&mut self) -> Result<Spanned, CommandError> {
        self.skip_whitespace();
        let col = self.col();
        let token = match self.peek() {
            None => Token::Eof,
            // `#` starts a comment only at a word boundary; `#fff` is a color.
            Some('#') if matches!(&self.src[self.pos..], "#") || self.src[self.pos..].starts_with("# ") => {
                self.pos = self.src.len();
                Token::Eof
            }
            Some('"') | Some('\'') => self.lex_string(col)?,
            Some(_) => self.lex_word(col)?,
        };
        Ok(Spanned { token, col })
    }

    fn lex_string(&mut self, col: usize) -> Result<Token, CommandError> {
        let quote = self.advance().unwrap_or('"');
        let mut s = String::new();
        loop {
            match self.advance() {
                None => return Err(CommandError::new("unterminated string", col)),
                Some(c) if c == quote => break,
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some(c) => s.push(c),
                    None => return Err(CommandError::new("unterminated escape sequence", col)),
                },
                Some(c) => s.push(c),
            }
        }
        Ok(Token::Str(s))
    }

    fn lex_word(&mut self, col: usize) -> Result<Token, CommandError> {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            match c {
                '(' => depth += 1,
                ')' if depth == 0 => {
                    return Err(CommandError::new("unmatched ')'", self.col()));
                }
                ')' => depth -= 1,
                c if c.is_whitespace() && depth == 0 => break,
                _ => {}
            }
            self.advance();
        }
        if depth > 0 {
            return Err(CommandError::new("unclosed '('", col));
        }
        Ok(Token::Word(self.src[start..self.pos].to_string()))
    }
}

// ── Command ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Toggle,
    Light,
    Dark,
}

/// One parsed studio action. Stop indices are 0-based.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add,
    Remove(usize),
    SetColor(usize, String),
    SetPosition(usize, f64),
    Kind(String),
    Angle(i32),
    Randomize,
    Copy,
    ExportSvg(Option<PathBuf>),
    ExportRaster(Option<PathBuf>),
    Theme(ThemeChoice),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  add                     append a random color stop
  remove N                remove stop N (at least 2 stay)
  color N VALUE           set the color of stop N
  pos N VALUE             set the position of stop N (percent)
  kind linear|radial|conic
  angle DEG               direction for linear and conic
  random                  randomize stops and angle
  copy                    copy the CSS declaration
  svg [PATH]              export SVG (default gradient.svg)
  raster [PATH]           export an image (default gradient.png)
  theme [light|dark]      switch theme (toggles without argument)
  show | help | quit";

/// Parses one input line. Blank lines and comments yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let tokens = Lexer::new(line).tokenize()?;
    Parser { tokens, pos: 0 }.parse()
}

// ── Parser ────────────────────────────────────────────────────────────────

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn parse(mut self) -> Result<Option<Command>, CommandError> {
        let (verb, col) = match self.next() {
            (Token::Eof, _) => return Ok(None),
            (Token::Word(w) | Token::Str(w), col) => (w.to_ascii_lowercase(), col),
        };

        let command = match verb.as_str() {
            "add" | "new" => Command::Add,
            "remove" | "rm" | "del" => Command::Remove(self.index()?),
            "color" | "colour" => {
                let index = self.index()?;
                Command::SetColor(index, self.text("color")?)
            }
            "pos" | "position" => {
                let index = self.index()?;
                Command::SetPosition(index, self.number("position")?)
            }
            "kind" | "type" => Command::Kind(self.text("gradient kind")?),
            "angle" => Command::Angle(self.angle()?),
            "random" | "randomize" | "shuffle" => Command::Randomize,
            "copy" => Command::Copy,
            "svg" => Command::ExportSvg(self.optional()?.map(PathBuf::from)),
            "raster" | "png" => Command::ExportRaster(self.optional()?.map(PathBuf::from)),
            "theme" => Command::Theme(self.theme()?),
            "show" | "ls" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(CommandError::new(format!("unknown command `{other}`"), col)),
        };

        match self.next() {
            (Token::Eof, _) => Ok(Some(command)),
            (_, col) => Err(CommandError::new(format!("unexpected argument to `{verb}`"), col)),
        }
    }

    fn next(&mut self) -> (Token, usize) {
        let Some(tok) = self.tokens.get(self.pos) else {
            return (Token::Eof, 1);
        };
        if tok.token != Token::Eof {
            self.pos += 1;
        }
        (tok.token.clone(), tok.col)
    }

    fn text(&mut self, what: &str) -> Result<String, CommandError> {
        match self.next() {
            (Token::Word(w) | Token::Str(w), _) => Ok(w),
            (Token::Eof, col) => Err(CommandError::new(format!("expected {what}"), col)),
        }
    }

    fn optional(&mut self) -> Result<Option<String>, CommandError> {
        match self.tokens.get(self.pos).map(|t| &t.token) {
            Some(Token::Word(_) | Token::Str(_)) => self.text("argument").map(Some),
            _ => Ok(None),
        }
    }

    /// 1-based stop number → 0-based index.
    fn index(&mut self) -> Result<usize, CommandError> {
        let col = self.tokens.get(self.pos).map_or(1, |t| t.col);
        let raw = self.text("stop number")?;
        match raw.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(CommandError::new(format!("stop numbers start at 1, got `{raw}`"), col)),
        }
    }

    fn number(&mut self, what: &str) -> Result<f64, CommandError> {
        let col = self.tokens.get(self.pos).map_or(1, |t| t.col);
        let raw = self.text(what)?;
        raw.trim_end_matches('%')
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| CommandError::new(format!("expected a number for {what}, got `{raw}`"), col))
    }

    fn angle(&mut self) -> Result<i32, CommandError> {
        let col = self.tokens.get(self.pos).map_or(1, |t| t.col);
        let raw = self.text("angle")?;
        raw.trim_end_matches("deg")
            .parse::<i32>()
            .map_err(|_| CommandError::new(format!("expected whole degrees, got `{raw}`"), col))
    }

    fn theme(&mut self) -> Result<ThemeChoice, CommandError> {
        let col = self.tokens.get(self.pos).map_or(1, |t| t.col);
        match self.optional()?.map(|s| s.to_ascii_lowercase()).as_deref() {
            None | Some("toggle") => Ok(ThemeChoice::Toggle),
            Some("light") => Ok(ThemeChoice::Light),
            Some("dark") => Ok(ThemeChoice::Dark),
            Some(other) => Err(CommandError::new(format!("unknown theme `{other}`"), col)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        parse_command(line).unwrap().unwrap()
    }

    fn err(line: &str) -> CommandError {
        parse_command(line).unwrap_err()
    }

    // ── lexer ─────────────────────────────────────────────────────────────

    #[test]
    fn parens_group_a_word() {
        let toks = Lexer::new("color 1 rgb(1, 2, 3)").tokenize().unwrap();
        assert_eq!(toks[2].token, Token::Word("rgb(1, 2, 3)".into()));
        assert_eq!(toks[2].col, 9);
        assert_eq!(toks[3].token, Token::Eof);
    }

    #[test]
    fn quoted_strings_unescape() {
        let toks = Lexer::new(r#"svg "a \"b\".svg""#).tokenize().unwrap();
        assert_eq!(toks[1].token, Token::Str("a \"b\".svg".into()));
    }

    #[test]
    fn unbalanced_parens_are_errors() {
        assert_eq!(err("color 1 rgb(1, 2").message, "unclosed '('");
        assert_eq!(err("color 1 red)").col, 12);
    }

    #[test]
    fn unterminated_string() {
        assert_eq!(err("svg 'out.svg").col, 5);
    }

    // ── parser ────────────────────────────────────────────────────────────

    #[test]
    fn blank_and_comment_lines_are_empty() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(parse_command("# just a note").unwrap(), None);
    }

    #[test]
    fn hex_color_is_not_a_comment() {
        assert_eq!(parse("color 2 #fff"), Command::SetColor(1, "#fff".into()));
    }

    #[test]
    fn indices_are_one_based() {
        assert_eq!(parse("remove 1"), Command::Remove(0));
        assert_eq!(parse("rm 3"), Command::Remove(2));
        assert_eq!(err("remove 0").col, 8);
        assert!(err("remove two").message.contains("`two`"));
    }

    #[test]
    fn positions_and_angles() {
        assert_eq!(parse("pos 1 12.5"), Command::SetPosition(0, 12.5));
        assert_eq!(parse("position 2 40%"), Command::SetPosition(1, 40.0));
        assert_eq!(parse("angle -45"), Command::Angle(-45));
        assert_eq!(parse("angle 180deg"), Command::Angle(180));
        assert!(parse_command("angle 12.5").is_err());
        assert!(parse_command("pos 1 inf").is_err());
    }

    #[test]
    fn kind_keeps_raw_name() {
        assert_eq!(parse("kind Diamond"), Command::Kind("Diamond".into()));
        assert_eq!(err("kind").message, "expected gradient kind");
    }

    #[test]
    fn exports_take_optional_paths() {
        assert_eq!(parse("svg"), Command::ExportSvg(None));
        assert_eq!(parse("svg 'my file.svg'"), Command::ExportSvg(Some("my file.svg".into())));
        assert_eq!(parse("png out.jpg"), Command::ExportRaster(Some("out.jpg".into())));
    }

    #[test]
    fn theme_choices() {
        assert_eq!(parse("theme"), Command::Theme(ThemeChoice::Toggle));
        assert_eq!(parse("theme DARK"), Command::Theme(ThemeChoice::Dark));
        assert!(parse_command("theme sepia").is_err());
    }

    #[test]
    fn verbs_are_case_insensitive_with_aliases() {
        assert_eq!(parse("ADD"), Command::Add);
        assert_eq!(parse("shuffle"), Command::Randomize);
        assert_eq!(parse("q"), Command::Quit);
        assert_eq!(parse("?"), Command::Help);
    }

    #[test]
    fn trailing_arguments_are_rejected() {
        let e = err("copy now");
        assert_eq!(e.col, 6);
        assert_eq!(e.to_string(), "col 6: unexpected argument to `copy`");
    }

    #[test]
    fn unknown_verb() {
        assert_eq!(err("  paint").to_string(), "col 3: unknown command `paint`");
    }
}
