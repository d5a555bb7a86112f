use hrm::{
    machine::Machine,
    source::Program,
    value::Value,
};

fn read_program(source_code: &str) -> Program {
    Program::parse_str(source_code)
        .expect("could not parse the program")
}

fn integers(values: &[i32]) -> Vec<Value> {
    values.iter().copied().map(Value::Integer).collect()
}

#[test]
fn test_sum_read_program() {
    let p = read_program(include_str!("sum.hrm"));

    assert_eq!(p.len(), 10);
    assert_eq!(p.labels.get("start"), Some(&0));
    assert_eq!(p.labels.get("next"), Some(&2));
    assert_eq!(p.labels.get("done"), Some(&7));
}

#[test]
fn test_sum_emulate_program() {
    let p = read_program(include_str!("sum.hrm"));

    let cases = vec![
        (vec![1, 2, 3, 4, 0], vec![1 + 2 + 3 + 4]),
        (vec![0], vec![0]),
        (vec![1, 10, 100, 1000, 10000, 0], vec![11111]),
        (vec![5, -8, 0, 3, 0, 0], vec![-3, 3, 0]),
        (vec![], vec![]),
    ];

    for (input, output) in cases {
        let mut machine = Machine::new(8, input, vec![(5, Value::Integer(0))])
            .expect("could not initialize the machine");

        machine.run(&p.instructions).unwrap();

        assert_eq!(machine.outbox(), &integers(&output)[..]);
    }
}

#[test]
fn test_count_emulate_program() {
    let p = read_program(include_str!("count.hrm"));

    let mut machine = Machine::new(8, vec![4, 4, 4, 0, 7, 0, 0], vec![(5, Value::Integer(0))]).unwrap();
    machine.run(&p.instructions).unwrap();

    assert_eq!(machine.outbox(), &integers(&[3, 1, 0])[..]);
    assert_eq!(machine.memory.get(1), Some(Value::Integer(0)));
}

#[test]
fn test_reverse_emulate_program() {
    let p = read_program(include_str!("reverse.hrm"));

    let input = vec![
        Value::Character('H'),
        Value::Character('R'),
        Value::Character('M'),
        Value::Integer(0),
        Value::Character('O'),
        Value::Character('K'),
        Value::Integer(0),
    ];

    let mut machine = Machine::new(15, input, vec![(14, Value::Integer(0))]).unwrap();
    machine.run(&p.instructions).unwrap();

    let expected = "MRHKO".chars().map(Value::Character).collect::<Vec<_>>();
    assert_eq!(machine.into_outbox(), expected);
}
