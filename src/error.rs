//! Error types returned by the parser and the [Machine](crate::machine::Machine).

use std::fmt::{Display, self};
use itertools::Itertools;

use crate::value::{ArithmeticError, Value};

/// Reason why a source line could not be parsed.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    /// The line names a known instruction but its operands are malformed.
    UnableToParse,

    /// The first token of the line is neither an instruction nor a label definition.
    UnknownCommand {
        /// A known instruction name that is close to the unknown one.
        suggestion: Option<&'static str>,
    },

    /// A jump refers to a label that is never defined.
    LabelNotFound {
        label: String,
    },
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseErrorKind::UnableToParse => write!(f, "unable to parse command"),
            ParseErrorKind::UnknownCommand { .. } => write!(f, "unknown command"),
            ParseErrorKind::LabelNotFound { label } => write!(f, "label not found: {}", label),
        }
    }
}

/// Error type that contains the reason of the error and the location of the offending line.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    /// The line number (starting from 1) of the offending line.
    pub line: usize,

    /// The offending line with its tokens separated by single spaces.
    pub text: String,

    pub kind: ParseErrorKind,

    context: Vec<&'static str>,
}

impl ParseError {
    pub(crate) fn new(line: usize, text: String, kind: ParseErrorKind) -> ParseError {
        ParseError {
            line,
            text,
            kind,
            context: Vec::new(),
        }
    }

    /// Attaches a human readable explanation to the error.
    pub(crate) fn context(mut self, ctx: &'static str) -> ParseError {
        self.context.push(ctx);
        self
    }

    pub fn is_unable_to_parse(&self) -> bool {
        self.kind == ParseErrorKind::UnableToParse
    }

    pub fn is_unknown_command(&self) -> bool {
        match self.kind {
            ParseErrorKind::UnknownCommand { .. } => true,
            _ => false,
        }
    }

    pub fn is_label_not_found(&self) -> bool {
        match self.kind {
            ParseErrorKind::LabelNotFound { .. } => true,
            _ => false,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "at line {}: {} '{}'", self.line, self.kind, self.text)?;

        if !self.context.is_empty() {
            write!(f, ": {}", self.context.iter().rev().join(": "))?;
        }

        if let ParseErrorKind::UnknownCommand { suggestion: Some(name) } = self.kind {
            write!(f, ", did you mean {}?", name)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// The operation that required a value in the register.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Operation {
    Outbox,
    Copy,
    Compare,
    Add,
    Subtract,
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Operation::Outbox => "outbox",
            Operation::Copy => "copy",
            Operation::Compare => "compare",
            Operation::Add => "add",
            Operation::Subtract => "subtract",
        })
    }
}

/// Reason why the execution of a program was aborted.
#[derive(Clone, Debug, PartialEq)]
pub enum RuntimeErrorKind {
    /// An address resolved outside of the memory.
    OutOfBound {
        index: i32,
    },

    /// A memory cell that was read holds no value.
    EmptyMemory {
        index: usize,
    },

    /// An indirect address points through a cell that holds a character.
    NotAnAddress {
        index: usize,
        value: Value,
    },

    /// The instruction needs the register but it holds nothing.
    EmptyRegister {
        operation: Operation,
    },

    /// Arithmetic that is not defined for characters.
    CharacterArithmetic,

    /// The result of an arithmetic operation did not fit into an integer.
    Overflow,

    /// The program did not halt within the allowed number of steps.
    StepLimitExceeded {
        limit: usize,
    },
}

impl From<ArithmeticError> for RuntimeErrorKind {
    fn from(err: ArithmeticError) -> RuntimeErrorKind {
        match err {
            ArithmeticError::Character => RuntimeErrorKind::CharacterArithmetic,
            ArithmeticError::Overflow => RuntimeErrorKind::Overflow,
        }
    }
}

impl Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuntimeErrorKind::OutOfBound { index } =>
                write!(f, "memory index out of bound: {}", index),
            RuntimeErrorKind::EmptyMemory { index } =>
                write!(f, "unable to access empty value memory at {}", index),
            RuntimeErrorKind::NotAnAddress { index, value } =>
                write!(f, "memory at {} holds '{}' which is not a memory index", index, value),
            RuntimeErrorKind::EmptyRegister { operation } =>
                write!(f, "unable to {} empty value", operation),
            RuntimeErrorKind::CharacterArithmetic =>
                write!(f, "unable to do arithmetic on character value"),
            RuntimeErrorKind::Overflow =>
                write!(f, "integer overflow"),
            RuntimeErrorKind::StepLimitExceeded { limit } =>
                write!(f, "step limit of {} exceeded", limit),
        }
    }
}

/// A fault raised while executing a program.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeError {
    /// Index of the instruction that caused the fault.
    pub pc: usize,
    pub kind: RuntimeErrorKind,
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "at instruction {}: {}", self.pc, self.kind)
    }
}

impl std::error::Error for RuntimeError {}

/// Error returned when a [Machine](crate::machine::Machine) cannot be constructed.
#[derive(Clone, Debug, PartialEq)]
pub enum SetupError {
    /// The memory must have room for at least one value.
    ZeroMemorySize,

    /// A starting memory cell lies outside of the memory.
    OutOfBound {
        index: usize,
        size: usize,
    },
}

impl Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SetupError::ZeroMemorySize => write!(f, "memory size must be positive"),
            SetupError::OutOfBound { index, size } =>
                write!(f, "memory index out of bound: {} (memory size {})", index, size),
        }
    }
}

impl std::error::Error for SetupError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(3, "COPYFROM x".into(), ParseErrorKind::UnableToParse)
            .context("the operand should be N or [N]");

        assert_eq!(err.to_string(), "at line 3: unable to parse command 'COPYFROM x': the operand should be N or [N]");

        let err = ParseError::new(1, "COPYFORM 1".into(), ParseErrorKind::UnknownCommand {
            suggestion: Some("COPYFROM"),
        });

        assert_eq!(err.to_string(), "at line 1: unknown command 'COPYFORM 1', did you mean COPYFROM?");
    }

    #[test]
    fn test_runtime_error_display() {
        let err = RuntimeError {
            pc: 0,
            kind: RuntimeErrorKind::EmptyRegister { operation: Operation::Outbox },
        };

        assert_eq!(err.to_string(), "at instruction 0: unable to outbox empty value");
    }
}
