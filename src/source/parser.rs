//! Line classification, operand parsing and label resolution.

use std::collections::HashMap;

use edit_distance::edit_distance;
use itertools::Itertools;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::digit1,
    combinator::{all_consuming, map, map_res, opt, recognize},
    sequence::{delimited, pair},
};
use slog::{o, debug, trace, warn, Discard, Logger};

use crate::error::{ParseError, ParseErrorKind};
use crate::instruction::{Address, Instruction, Kind, OperandKind};

use super::program::Program;
use super::token::tokenize;

/// Largest edit distance for which an unknown command gets a suggestion.
const SUGGESTION_DISTANCE: usize = 2;

fn take_i32(input: &str) -> IResult<&str, i32> {
    map_res(
        recognize(pair(
            opt(alt((tag("+"), tag("-")))),
            digit1,
        )),
        |n: &str| n.parse::<i32>(),
    )(input)
}

fn direct_address(input: &str) -> IResult<&str, Address> {
    map(take_i32, Address::direct)(input)
}

fn indirect_address(input: &str) -> IResult<&str, Address> {
    map(delimited(tag("["), take_i32, tag("]")), Address::indirect)(input)
}

/// Parses a memory operand. `N` is a direct and `[N]` an indirect address.
pub fn address(input: &str) -> Option<Address> {
    all_consuming(alt((indirect_address, direct_address)))(input)
        .ok()
        .map(|(_, addr)| addr)
}

/// The role of a single source line.
#[derive(Debug, Clone, PartialEq)]
pub enum Line<'a> {
    /// Nothing but whitespace.
    Blank,

    /// The first word begins with `-`.
    Comment,

    /// A single word ending with `:`. Holds the name without the colon.
    Label(&'a str),

    /// The first word names an instruction.
    Command(Kind),

    /// Anything else.
    Unknown(&'a str),
}

/// Decides what a tokenized line is. The operands of commands are not examined.
pub fn classify<'a>(tokens: &[&'a str]) -> Line<'a> {
    let first = match tokens.first() {
        Some(first) => *first,
        None => return Line::Blank,
    };

    if first.starts_with('-') {
        return Line::Comment;
    }

    if let Some(kind) = Kind::from_name(first) {
        return Line::Command(kind);
    }

    if tokens.len() == 1 && first.ends_with(':') {
        return Line::Label(&first[..first.len() - 1]);
    }

    Line::Unknown(first)
}

/// Finds the instruction name closest to `name`.
fn suggest(name: &str) -> Option<&'static str> {
    let name = name.to_uppercase();

    Kind::ALL.iter()
        .map(|kind| (edit_distance(&name, kind.name()), kind.name()))
        .min()
        .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
        .map(|(_, name)| name)
}

/// A parsed command whose jump target may still be a label.
#[derive(Debug, Clone)]
enum Statement {
    Ready(Instruction),
    Jump {
        kind: Kind,
        label: String,
        line: usize,
        text: String,
    },
}

/// Validates the operands of a command line.
fn parse_command(kind: Kind, tokens: &[&str], line: usize) -> Result<Statement, ParseError> {
    let error = |ctx: &'static str| {
        ParseError::new(line, tokens.join(" "), ParseErrorKind::UnableToParse)
            .context(ctx)
    };

    match kind.operand() {
        OperandKind::None => {
            if tokens.len() != 1 {
                return Err(error("this instruction takes no operands"));
            }

            let ins = match kind {
                Kind::Inbox => Instruction::Inbox,
                _ => Instruction::Outbox,
            };

            Ok(Statement::Ready(ins))
        },
        OperandKind::Address => {
            if tokens.len() != 2 {
                return Err(error("this instruction expects a single memory operand"));
            }

            let addr = address(tokens[1])
                .ok_or_else(|| error("the operand should be an integer N or [N]"))?;

            Instruction::with_address(kind, addr)
                .map(Statement::Ready)
                .ok_or_else(|| error("this instruction does not take a memory operand"))
        },
        OperandKind::Label => {
            if tokens.len() != 2 {
                return Err(error("jump instructions expect a single label operand"));
            }

            Ok(Statement::Jump {
                kind,
                label: tokens[1].to_string(),
                line,
                text: tokens.join(" "),
            })
        },
    }
}

/// Single pass line parser that collects statements and label definitions.
///
/// Labels are resolved in [Parser::finish], so they can be referenced before they are defined.
pub struct Parser {
    logger: Logger,
    labels: HashMap<String, usize>,
    statements: Vec<Statement>,
    line: usize,
}

impl Parser {
    pub fn new() -> Parser {
        Parser::with_logger(None::<Logger>)
    }

    pub fn with_logger<L: Into<Option<Logger>>>(logger: L) -> Parser {
        Parser {
            logger: logger.into().unwrap_or_else(|| Logger::root(Discard, o!())),
            labels: HashMap::new(),
            statements: Vec::new(),
            line: 0,
        }
    }

    /// Parses the next line of the source.
    pub fn feed_line(&mut self, input: &str) -> Result<(), ParseError> {
        self.line += 1;

        let tokens = tokenize(input);
        let log = self.logger.new(o!("line" => self.line));

        match classify(&tokens) {
            Line::Blank | Line::Comment => (),
            Line::Label(label) => {
                let index = self.statements.len();

                trace!(log, "define label"; "label" => label, "index" => index);

                if let Some(previous) = self.labels.insert(label.to_string(), index) {
                    warn!(log, "label redefined"; "label" => label, "previous" => previous, "index" => index);
                }
            },
            Line::Command(kind) => {
                let statement = parse_command(kind, &tokens, self.line)?;

                trace!(log, "append statement"; "statement" => ?statement);

                self.statements.push(statement);
            },
            Line::Unknown(name) => {
                let kind = ParseErrorKind::UnknownCommand { suggestion: suggest(name) };
                return Err(ParseError::new(self.line, tokens.iter().join(" "), kind));
            },
        }

        Ok(())
    }

    /// Resolves every jump target and returns the finished program.
    pub fn finish(self) -> Result<Program, ParseError> {
        let Parser { logger, labels, statements, .. } = self;

        let instructions = statements.into_iter()
            .map(|statement| match statement {
                Statement::Ready(ins) => Ok(ins),
                Statement::Jump { kind, label, line, text } => {
                    let target = match labels.get(&label) {
                        Some(target) => *target,
                        None => return Err(ParseError::new(line, text, ParseErrorKind::LabelNotFound { label })),
                    };

                    trace!(logger, "resolve label"; "label" => &label, "target" => target);

                    Instruction::with_target(kind, target)
                        .ok_or_else(|| ParseError::new(line, text, ParseErrorKind::UnableToParse))
                },
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(logger, "parsed program"; "instructions" => instructions.len(), "labels" => labels.len());

        Ok(Program {
            instructions,
            labels,
        })
    }
}

impl Default for Parser {
    fn default() -> Parser {
        Parser::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Mode;

    #[test]
    fn test_address() {
        assert_eq!(address("3"), Some(Address::direct(3)));
        assert_eq!(address("-2"), Some(Address::direct(-2)));
        assert_eq!(address("[12]"), Some(Address { mode: Mode::Indirect, index: 12 }));
        assert_eq!(address("[-1]"), Some(Address::indirect(-1)));
        assert_eq!(address("x"), None);
        assert_eq!(address("[x]"), None);
        assert_eq!(address("[3"), None);
        assert_eq!(address("3]"), None);
        assert_eq!(address("[[3]]"), None);
        assert_eq!(address("3x"), None);
        assert_eq!(address("[]"), None);
        assert_eq!(address("99999999999"), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(&[]), Line::Blank);
        assert_eq!(classify(&["--", "note"]), Line::Comment);
        assert_eq!(classify(&["-x"]), Line::Comment);
        assert_eq!(classify(&["loop:"]), Line::Label("loop"));
        assert_eq!(classify(&["loop:", "INBOX"]), Line::Unknown("loop:"));
        assert_eq!(classify(&["BUMPDN", "1"]), Line::Command(Kind::BumpDown));
        assert_eq!(classify(&["INBOX:"]), Line::Label("INBOX"));
        assert_eq!(classify(&["inbox"]), Line::Unknown("inbox"));
    }

    #[test]
    fn test_suggest() {
        assert_eq!(suggest("COPYFORM"), Some("COPYFROM"));
        assert_eq!(suggest("outbox"), Some("OUTBOX"));
        assert_eq!(suggest("BUMPDOWN"), Some("BUMPDN"));
        assert_eq!(suggest("HELLOWORLD"), None);
    }

    #[test]
    fn test_operand_count() {
        let mut parser = Parser::new();
        assert!(parser.feed_line("INBOX 1").unwrap_err().is_unable_to_parse());
        assert!(parser.feed_line("ADD").unwrap_err().is_unable_to_parse());
        assert!(parser.feed_line("ADD 1 2").unwrap_err().is_unable_to_parse());
        assert!(parser.feed_line("JUMP").unwrap_err().is_unable_to_parse());
        assert!(parser.feed_line("JUMPZ a b").unwrap_err().is_unable_to_parse());
    }

    #[test]
    fn test_line_numbers() {
        let mut parser = Parser::new();
        parser.feed_line("INBOX").unwrap();
        parser.feed_line("").unwrap();

        let err = parser.feed_line("  FOO   1 ").unwrap_err();

        assert_eq!(err.line, 3);
        assert_eq!(err.text, "FOO 1");
        assert!(err.is_unknown_command());
    }
}
