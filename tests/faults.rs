use hrm::{
    error::{Operation, RuntimeError, RuntimeErrorKind},
    machine::Machine,
    source::{self, Program},
    value::Value,
};

#[test]
fn test_outbox_without_input() {
    let instructions = source::parse(vec!["OUTBOX"]).unwrap();
    let mut machine = Machine::with_input(8, vec![1, 2]).unwrap();

    let err = machine.run(&instructions).unwrap_err();

    assert_eq!(err, RuntimeError {
        pc: 0,
        kind: RuntimeErrorKind::EmptyRegister { operation: Operation::Outbox },
    });
    assert_eq!(err.to_string(), "at instruction 0: unable to outbox empty value");
    assert!(machine.outbox().is_empty());
    assert!(machine.halted);
}

#[test]
fn test_non_integer_operand() {
    let err = source::parse(vec!["INBOX", "COPYFROM x", "OUTBOX"]).unwrap_err();

    assert!(err.is_unable_to_parse());
    assert_eq!(err.line, 2);
}

#[test]
fn test_partial_outbox_is_kept() {
    let p = Program::parse_str(r#"
        INBOX
        OUTBOX
        INBOX
        OUTBOX
        COPYFROM [0]
    "#).unwrap();

    let mut machine = Machine::new(4, vec![7, 8], vec![(0, Value::Integer(12))]).unwrap();
    let err = machine.run(&p.instructions).unwrap_err();

    assert_eq!(err.pc, 4);
    assert_eq!(err.kind, RuntimeErrorKind::OutOfBound { index: 12 });
    assert_eq!(machine.outbox(), &[Value::Integer(7), Value::Integer(8)]);

    // A faulted machine does not continue.
    machine.step(&p.instructions).unwrap();
    assert_eq!(machine.pc, 4);
}

#[test]
fn test_indirect_through_empty_cell() {
    let instructions = source::parse(vec!["INBOX", "COPYTO [1]"]).unwrap();
    let mut machine = Machine::with_input(4, vec![3]).unwrap();

    let err = machine.run(&instructions).unwrap_err();

    assert_eq!(err.kind, RuntimeErrorKind::EmptyMemory { index: 1 });
    assert_eq!(machine.memory.cells(), &[None, None, None, None]);
}

#[test]
fn test_bump_overflow() {
    let instructions = source::parse(vec!["BUMPUP 0"]).unwrap();
    let mut machine = Machine::new(1, Vec::<i32>::new(), vec![(0, Value::Integer(i32::MAX))]).unwrap();

    let err = machine.run(&instructions).unwrap_err();

    assert_eq!(err.kind, RuntimeErrorKind::Overflow);
    assert_eq!(machine.memory.get(0), Some(Value::Integer(i32::MAX)));
    assert_eq!(machine.register, None);
}
