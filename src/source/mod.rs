//! Parsing source programs.

pub mod token;
pub mod parser;
pub mod program;

pub use self::program::{parse, Program};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::{Address, Instruction};

    #[test]
    fn test_parse_all_instructions() {
        let program = Program::parse(vec![
            "-- every instruction once --",
            "start:",
            "    INBOX",
            "    COPYTO 0",
            "    COPYFROM [0]",
            "    ADD 1",
            "    SUB [2]",
            "    BUMPUP 3",
            "    BUMPDN -4",
            "    JUMPZ end",
            "    JUMPN start",
            "    OUTBOX",
            "    JUMP start",
            "end:",
        ]).unwrap();

        assert_eq!(program.instructions, vec![
            Instruction::Inbox,
            Instruction::CopyTo(Address::direct(0)),
            Instruction::CopyFrom(Address::indirect(0)),
            Instruction::Add(Address::direct(1)),
            Instruction::Sub(Address::indirect(2)),
            Instruction::BumpUp(Address::direct(3)),
            Instruction::BumpDown(Address::direct(-4)),
            Instruction::JumpIfZero(11),
            Instruction::JumpIfNegative(0),
            Instruction::Outbox,
            Instruction::Jump(0),
        ]);

        assert_eq!(program.labels.get("start"), Some(&0));
        assert_eq!(program.labels.get("end"), Some(&11));
    }

    #[test]
    fn test_forward_and_backward_labels_agree() {
        let forward = parse(vec!["JUMP a", "INBOX", "a:", "OUTBOX"]).unwrap();
        let backward = parse(vec!["INBOX", "a:", "OUTBOX", "JUMP a"]).unwrap();

        assert_eq!(forward[0], Instruction::Jump(2));
        assert_eq!(backward[2], Instruction::Jump(1));
    }

    #[test]
    fn test_label_not_found() {
        let err = parse(vec!["INBOX", "JUMP nowhere"]).unwrap_err();

        assert!(err.is_label_not_found());
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_unable_to_parse() {
        let err = parse(vec!["INBOX", "COPYFROM x"]).unwrap_err();

        assert!(err.is_unable_to_parse());
        assert_eq!(err.line, 2);
        assert_eq!(err.text, "COPYFROM x");
    }

    #[test]
    fn test_unknown_command() {
        let err = parse(vec!["COPYFORM 1"]).unwrap_err();

        assert!(err.is_unknown_command());
        assert_eq!(err.to_string(), "at line 1: unknown command 'COPYFORM 1', did you mean COPYFROM?");
    }

    #[test]
    fn test_redefined_label_keeps_latest() {
        let program = Program::parse_str("a:\nINBOX\na:\nOUTBOX\nJUMP a\n").unwrap();

        assert_eq!(program.instructions[2], Instruction::Jump(1));
    }

    #[test]
    fn test_display_listing() {
        let source = "loop:\n    INBOX\n    COPYTO [2]\n    JUMP loop\n";
        let program = Program::parse_str(source).unwrap();

        assert_eq!(program.to_string(), "loop:\n    INBOX\n    COPYTO [2]\n    JUMP @0\n");
    }

    #[test]
    fn test_empty_source() {
        assert!(Program::parse_str("\n  \n-- nothing\n").unwrap().is_empty());
    }
}
