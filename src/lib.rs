//! A crate for parsing and running programs written in the assembly language of the
//! Human Resource Machine puzzle.
//!
//! A program takes values from the inbox, shuffles them around in a small memory and puts
//! results into the outbox. Currently this crate provides the functionality to:
//! - Parse source programs with labels, comments and direct or indirect memory operands.
//! - Execute the parsed instructions on a [Machine](machine::Machine) with a fixed size memory.
//!
//! # Instructions
//!
//! | Instruction   | Effect |
//! |---------------|--------|
//! | `INBOX`       | Takes the next value from the inbox. Ends the program if there is none. |
//! | `OUTBOX`      | Puts the value in the register into the outbox. |
//! | `COPYFROM a`  | Copies memory cell `a` into the register. |
//! | `COPYTO a`    | Copies the register into memory cell `a`. |
//! | `ADD a`       | Adds memory cell `a` to the register. |
//! | `SUB a`       | Subtracts memory cell `a` from the register. |
//! | `BUMPUP a`    | Increments memory cell `a` and copies it into the register. |
//! | `BUMPDN a`    | Decrements memory cell `a` and copies it into the register. |
//! | `JUMP l`      | Continues from label `l`. |
//! | `JUMPZ l`     | Continues from label `l` if the register is zero. |
//! | `JUMPN l`     | Continues from label `l` if the register is negative. |
//!
//! A memory operand is either a direct index (`3`) or an indirect one (`[3]`), in which case the
//! value of cell 3 is used as the index. Lines starting with `-` are comments and a line with a
//! single word ending in `:` defines a label.
//!
//! # Example
//! ```
//! use hrm::{
//!     source::Program,
//!     machine::Machine,
//!     value::Value,
//! };
//!
//! // Outputs the sum of each pair of input values.
//! let source = r#"
//!     -- HUMAN RESOURCE MACHINE PROGRAM --
//!     a:
//!         INBOX
//!         COPYTO   0
//!         INBOX
//!         ADD      0
//!         OUTBOX
//!         JUMP     a
//! "#;
//!
//! // Parse the source into instructions.
//! let program = Program::parse_str(source).unwrap();
//!
//! // Create a machine with 4 empty memory cells.
//! let mut machine = Machine::with_input(4, vec![1, 2, 30, 40])
//!     .expect("could not initialize machine");
//!
//! // Execute the program until the inbox runs out.
//! machine.run(&program.instructions)
//!     .expect("an error occured while running the program");
//!
//! assert_eq!(machine.outbox(), &[Value::Integer(3), Value::Integer(70)]);
//! ```
//!
//! # Executables
//!
//! ## `hrmrun`
//!
//! Parses and runs a program file. Built with the `hrmrun` feature.
//!
//! ```text
//! $ hrmrun --input "3 -1 0" --memory-size 4 program.hrm
//! 3
//! -1
//! 0
//! ```
pub mod value;
pub mod instruction;
pub mod source;
pub mod machine;
pub mod error;
pub mod event;

pub use crate::source::{parse, Program};
pub use crate::machine::Machine;
pub use crate::value::Value;
