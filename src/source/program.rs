use std::collections::HashMap;
use std::fmt;

use slog::Logger;

use crate::error::ParseError;
use crate::instruction::Instruction;

use super::parser::Parser;

/// A parsed program with every jump target resolved.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Program {
    pub instructions: Vec<Instruction>,

    /// Maps label names into the index of the instruction that follows the label.
    pub labels: HashMap<String, usize>,
}

impl Program {
    /// Parses a program from its source lines.
    pub fn parse<I, S>(lines: I) -> Result<Program, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Program::parse_with_logger(lines, None::<Logger>)
    }

    pub fn parse_with_logger<I, S, L>(lines: I, logger: L) -> Result<Program, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        L: Into<Option<Logger>>,
    {
        let mut parser = Parser::with_logger(logger);

        for line in lines {
            parser.feed_line(line.as_ref())?;
        }

        parser.finish()
    }

    /// Parses a program from a string that holds the whole source file.
    pub fn parse_str(source: &str) -> Result<Program, ParseError> {
        Program::parse(source.lines())
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Returns the names of the labels that point to the instruction at `index`.
    pub fn labels_at(&self, index: usize) -> Vec<&str> {
        let mut labels = self.labels.iter()
            .filter(|(_, target)| **target == index)
            .map(|(label, _)| label.as_str())
            .collect::<Vec<_>>();

        labels.sort();
        labels
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for index in 0..=self.instructions.len() {
            for label in self.labels_at(index) {
                writeln!(f, "{}:", label)?;
            }

            if let Some(ins) = self.instructions.get(index) {
                writeln!(f, "    {}", ins)?;
            }
        }

        Ok(())
    }
}

/// Parses source lines into an executable instruction sequence.
///
/// # Errors
/// Returns the first [ParseError] encountered. No instructions are returned in that case.
pub fn parse<I, S>(lines: I) -> Result<Vec<Instruction>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Program::parse(lines).map(Program::into_instructions)
}
