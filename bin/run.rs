use hrm::{
    error::{ParseError, RuntimeError, SetupError},
    machine::Machine,
    source::Program,
    value::{ParseValueError, Value},
};

use clap::{App, Arg, ArgMatches};
use itertools::Itertools;
use slog::{o, Discard, Drain, Logger};
use slog_term::{FullFormat, TermDecorator};

const DEFAULT_MEMORY_SIZE: &str = "16";

enum Error {
    Argument(String),
    Parse(ParseError),
    Setup(SetupError),
    Execution(RuntimeError, Vec<Value>),
    IO(std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::IO(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Error {
        Error::Parse(e)
    }
}

impl From<SetupError> for Error {
    fn from(e: SetupError) -> Error {
        Error::Setup(e)
    }
}

impl From<ParseValueError> for Error {
    fn from(e: ParseValueError) -> Error {
        Error::Argument(e.to_string())
    }
}

fn parse_arguments() -> ArgMatches<'static> {
    App::new("hrmrun")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Mitja Karhusaari <mitja@karhusaari.me>")
        .about("Utility for running Human Resource Machine programs")
        .arg(Arg::with_name("source")
             .help("File containing the program source")
             .value_name("SOURCE")
             .required(true)
             .index(1))
        .arg(Arg::with_name("memory-size")
             .help("Number of memory cells")
             .long("memory-size")
             .short("m")
             .value_name("N")
             .default_value(DEFAULT_MEMORY_SIZE))
        .arg(Arg::with_name("input")
             .help("Values in the inbox, separated by spaces or commas")
             .long("input")
             .short("i")
             .value_name("VALUES"))
        .arg(Arg::with_name("set")
             .help("Starting value of a memory cell")
             .long("set")
             .short("s")
             .value_name("INDEX=VALUE")
             .multiple(true)
             .number_of_values(1))
        .arg(Arg::with_name("max-steps")
             .help("Abort after executing this many instructions")
             .long("max-steps")
             .value_name("N"))
        .arg(Arg::with_name("verbose")
             .help("Enables verbose logging")
             .long("verbose")
             .short("v"))
        .get_matches()
}

fn main() {
    let args = parse_arguments();

    let logger = if args.is_present("verbose") {
        let decorator = TermDecorator::new().stderr().build();
        let drain = FullFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();
        Logger::root(drain, o!())
    } else {
        Logger::root(Discard, o!())
    };

    let code = match run(&args, logger) {
        Ok(outbox) => {
            for value in outbox {
                println!("{}", value);
            }

            0
        },
        Err(Error::IO(io)) => {
            eprintln!("IO error: {}", io);
            1
        },
        Err(Error::Argument(msg)) => {
            eprintln!("Invalid argument: {}", msg);
            1
        },
        Err(Error::Parse(err)) => {
            eprintln!("Parse error {}", err);
            1
        },
        Err(Error::Setup(err)) => {
            eprintln!("Invalid machine configuration: {}", err);
            1
        },
        Err(Error::Execution(err, outbox)) => {
            eprintln!("Execution error {}", err);
            eprintln!("Outbox before the error: [{}]", outbox.iter().join(", "));
            2
        },
    };

    std::process::exit(code);
}

fn parse_number(name: &str, value: &str) -> Result<usize, Error> {
    value.parse()
        .map_err(|_| Error::Argument(format!("{} should be a non-negative integer, got '{}'", name, value)))
}

fn parse_input(input: &str) -> Result<Vec<Value>, Error> {
    input.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|value| !value.is_empty())
        .map(|value| value.parse::<Value>().map_err(Error::from))
        .collect()
}

fn parse_cell(cell: &str) -> Result<(usize, Value), Error> {
    let mut parts = cell.splitn(2, '=');

    match (parts.next(), parts.next()) {
        (Some(index), Some(value)) => Ok((parse_number("memory index", index.trim())?, value.trim().parse::<Value>()?)),
        _ => Err(Error::Argument(format!("expected INDEX=VALUE, got '{}'", cell))),
    }
}

fn run(args: &ArgMatches, logger: Logger) -> Result<Vec<Value>, Error> {
    let file_path = args.value_of("source")
        .ok_or_else(|| Error::Argument("missing source file".into()))?;

    let memory_size = parse_number("memory size", args.value_of("memory-size").unwrap_or(DEFAULT_MEMORY_SIZE))?;

    let input = match args.value_of("input") {
        Some(input) => parse_input(input)?,
        None => Vec::new(),
    };

    let memory = args.values_of("set")
        .into_iter()
        .flatten()
        .map(parse_cell)
        .collect::<Result<Vec<_>, _>>()?;

    let source = std::fs::read_to_string(file_path)?;
    let program = Program::parse_with_logger(source.lines(), logger.new(o!("stage" => "parsing")))?;

    let mut machine = Machine::new(memory_size, input, memory)?
        .with_logger(logger);

    let result = match args.value_of("max-steps") {
        Some(limit) => machine.run_with_limit(&program.instructions, parse_number("step limit", limit)?),
        None => machine.run(&program.instructions),
    };

    match result {
        Ok(()) => Ok(machine.into_outbox()),
        Err(err) => Err(Error::Execution(err, machine.into_outbox())),
    }
}
