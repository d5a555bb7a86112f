//! [Machine] for executing parsed [programs](crate::source::Program).

use std::collections::VecDeque;
use std::fmt;

use slog::{o, debug, trace, Discard, Logger};

use crate::error::{Operation, RuntimeError, RuntimeErrorKind, SetupError};
use crate::event::{Event, EventDispatcher, EventListener};
use crate::instruction::{Address, Instruction, Mode};
use crate::value::Value;

/// Fixed size memory. Cells start out empty unless given a starting value.
#[derive(Debug, Clone, PartialEq)]
pub struct Memory {
    cells: Vec<Option<Value>>,
}

impl Memory {
    pub fn new(size: usize) -> Memory {
        Memory {
            cells: vec![None; size],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the value of a cell. `None` if the cell is empty or out of bounds.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.cells.get(index).copied().flatten()
    }

    pub fn cells(&self) -> &[Option<Value>] {
        &self.cells[..]
    }

    /// Checks that `index` lies within the memory.
    fn check(&self, index: i32) -> Result<usize, RuntimeErrorKind> {
        if index < 0 || index as usize >= self.cells.len() {
            return Err(RuntimeErrorKind::OutOfBound { index });
        }

        Ok(index as usize)
    }

    /// Reads a cell that must hold a value.
    fn read(&self, index: usize) -> Result<Value, RuntimeErrorKind> {
        self.get(index)
            .ok_or(RuntimeErrorKind::EmptyMemory { index })
    }

    fn write(&mut self, index: usize, value: Value) {
        self.cells[index] = Some(value);
    }

    /// Resolves an operand into a memory index.
    ///
    /// The literal index is always checked. An indirect address additionally requires the cell
    /// it points through to hold an integer that is itself a valid index.
    pub fn resolve(&self, address: Address) -> Result<usize, RuntimeErrorKind> {
        let index = self.check(address.index)?;

        match address.mode {
            Mode::Direct => Ok(index),
            Mode::Indirect => match self.read(index)? {
                Value::Integer(pointer) => self.check(pointer),
                value => Err(RuntimeErrorKind::NotAnAddress { index, value }),
            },
        }
    }
}

/// What the machine does after an instruction has been executed.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Flow {
    /// Continue from the following instruction.
    Next,

    /// Continue from the given instruction.
    Jump(usize),

    /// The inbox ran out. End the program.
    Halt,
}

/// Utility struct for implementing methods in the context of emulating a single instruction.
struct InstructionEmulationContext<'m> {
    /// The machine in whose context the instruction is being emulated.
    machine: &'m mut Machine,

    /// The instruction that we are currently emulating.
    instruction: Instruction,
}

impl<'m> InstructionEmulationContext<'m> {
    /// Returns the value of the register, which must not be empty.
    fn register(&self, operation: Operation) -> Result<Value, RuntimeErrorKind> {
        self.machine.register
            .ok_or(RuntimeErrorKind::EmptyRegister { operation })
    }

    fn set_register(&mut self, value: Option<Value>) {
        self.machine.register = value;
        self.machine.events.dispatch(Event::RegisterChange { value });
    }

    fn set_memory(&mut self, index: usize, value: Value) {
        self.machine.memory.write(index, value);
        self.machine.events.dispatch(Event::MemoryChange { index, value });
    }

    /// Resolves the operand and reads the value it points to.
    fn operand(&self, address: Address) -> Result<(usize, Value), RuntimeErrorKind> {
        let index = self.machine.memory.resolve(address)?;
        let value = self.machine.memory.read(index)?;

        Ok((index, value))
    }

    /// Execute the instruction.
    ///
    /// Every check happens before the state of the machine is modified, so a failing instruction
    /// leaves the machine as it was.
    fn emulate(&mut self) -> Result<Flow, RuntimeErrorKind> {
        match self.instruction {
            Instruction::Inbox => {
                let value = match self.machine.inbox.pop_front() {
                    Some(value) => value,
                    None => return Ok(Flow::Halt),
                };

                self.machine.events.dispatch(Event::Input { value });
                self.set_register(Some(value));
            },
            Instruction::Outbox => {
                let value = self.register(Operation::Outbox)?;

                self.machine.outbox.push(value);
                self.machine.events.dispatch(Event::Output { value });
                self.set_register(None);
            },
            Instruction::CopyFrom(addr) => {
                let (_, value) = self.operand(addr)?;
                self.set_register(Some(value));
            },
            Instruction::CopyTo(addr) => {
                let value = self.register(Operation::Copy)?;
                let index = self.machine.memory.resolve(addr)?;
                self.set_memory(index, value);
            },
            Instruction::Add(addr) => {
                let acc = self.register(Operation::Add)?;
                let (_, value) = self.operand(addr)?;
                let result = acc.checked_add(value)?;
                self.set_register(Some(result));
            },
            Instruction::Sub(addr) => {
                let acc = self.register(Operation::Subtract)?;
                let (_, value) = self.operand(addr)?;
                let result = acc.checked_sub(value)?;
                self.set_register(Some(result));
            },
            Instruction::BumpUp(addr) => {
                let (index, value) = self.operand(addr)?;
                let result = value.increment()?;
                self.set_memory(index, result);
                self.set_register(Some(result));
            },
            Instruction::BumpDown(addr) => {
                let (index, value) = self.operand(addr)?;
                let result = value.decrement()?;
                self.set_memory(index, result);
                self.set_register(Some(result));
            },
            Instruction::Jump(target) => return Ok(Flow::Jump(target)),
            Instruction::JumpIfZero(target) => {
                if self.register(Operation::Compare)?.is_zero() {
                    return Ok(Flow::Jump(target));
                }
            },
            Instruction::JumpIfNegative(target) => {
                if self.register(Operation::Compare)?.is_negative() {
                    return Ok(Flow::Jump(target));
                }
            },
        }

        Ok(Flow::Next)
    }
}

/// The machine contains the register, the memory and the queues that a program operates on.
pub struct Machine {
    /// The memory of the machine.
    pub memory: Memory,

    /// The single working register. `None` when nothing is held.
    pub register: Option<Value>,

    /// Values that have not been taken by the program yet.
    pub inbox: VecDeque<Value>,

    /// Values produced by the program, in order.
    pub outbox: Vec<Value>,

    /// Index of the next instruction to be executed.
    pub pc: usize,

    /// True if the execution has been halted.
    pub halted: bool,

    steps: usize,
    events: EventDispatcher,
    logger: Logger,
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Machine")
            .field("memory", &self.memory)
            .field("register", &self.register)
            .field("inbox", &self.inbox)
            .field("outbox", &self.outbox)
            .field("pc", &self.pc)
            .field("halted", &self.halted)
            .field("steps", &self.steps)
            .field("listeners", &self.events.len())
            .finish()
    }
}

impl Machine {
    /// Create a new machine.
    ///
    /// # Parameters
    /// - `memory_size`: Number of memory cells. Must be positive.
    /// - `input`: The values in the inbox, in the order they are taken.
    /// - `starting_memory`: Pairs of memory indices and the values they start with.
    ///
    /// # Errors
    /// Returns a [SetupError] if the memory size is zero or a starting memory index is out of
    /// bounds.
    pub fn new<I, V, S>(memory_size: usize, input: I, starting_memory: S) -> Result<Machine, SetupError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
        S: IntoIterator<Item = (usize, Value)>,
    {
        if memory_size == 0 {
            return Err(SetupError::ZeroMemorySize);
        }

        let mut memory = Memory::new(memory_size);

        for (index, value) in starting_memory {
            if index >= memory_size {
                return Err(SetupError::OutOfBound { index, size: memory_size });
            }

            memory.write(index, value);
        }

        Ok(Machine {
            memory,
            register: None,
            inbox: input.into_iter().map(Into::into).collect(),
            outbox: Vec::new(),
            pc: 0,
            halted: false,
            steps: 0,
            events: EventDispatcher::new(),
            logger: Logger::root(Discard, o!()),
        })
    }

    /// Create a new machine with empty memory.
    pub fn with_input<I, V>(memory_size: usize, input: I) -> Result<Machine, SetupError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Machine::new(memory_size, input, Vec::<(usize, Value)>::new())
    }

    pub fn with_logger(mut self, logger: Logger) -> Machine {
        self.set_logger(logger);
        self
    }

    pub fn set_logger(&mut self, logger: Logger) {
        self.logger = logger.new(o!("stage" => "execution"));
    }

    /// Registers a listener that is notified of every state change.
    pub fn add_listener<L: EventListener + 'static>(&mut self, listener: L) {
        self.events.add_listener(listener);
    }

    /// Number of instructions executed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn register(&self) -> Option<Value> {
        self.register
    }

    /// Values still waiting in the inbox.
    pub fn inbox(&self) -> &VecDeque<Value> {
        &self.inbox
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn outbox(&self) -> &[Value] {
        &self.outbox[..]
    }

    pub fn into_outbox(self) -> Vec<Value> {
        self.outbox
    }

    /// Executes a single instruction and moves the program counter.
    ///
    /// Halts the machine if the program counter is outside of `instructions`.
    ///
    /// # Errors
    /// Returns a [RuntimeError] if the instruction faults. The machine is halted afterwards.
    pub fn step(&mut self, instructions: &[Instruction]) -> Result<(), RuntimeError> {
        if self.halted {
            return Ok(());
        }

        let pc = self.pc;

        let instruction = match instructions.get(pc) {
            Some(ins) => *ins,
            None => {
                self.halt();
                return Ok(());
            },
        };

        trace!(self.logger, "execute"; "pc" => pc, "instruction" => %instruction, "register" => ?self.register);

        let result = InstructionEmulationContext {
            machine: self,
            instruction,
        }.emulate();

        self.steps += 1;

        let flow = match result {
            Ok(flow) => flow,
            Err(kind) => {
                let err = RuntimeError { pc, kind };
                debug!(self.logger, "fault"; "error" => %err, "steps" => self.steps);
                self.halted = true;
                return Err(err);
            },
        };

        match flow {
            Flow::Next => self.pc += 1,
            Flow::Jump(target) => {
                self.events.dispatch(Event::Jump { from: pc, to: target });
                self.pc = target;
            },
            Flow::Halt => {
                trace!(self.logger, "inbox is empty"; "pc" => pc);
                self.halt();
                return Ok(());
            },
        }

        if self.pc >= instructions.len() {
            self.halt();
        }

        Ok(())
    }

    fn halt(&mut self) {
        self.halted = true;
        debug!(self.logger, "halted"; "pc" => self.pc, "steps" => self.steps, "outbox" => self.outbox.len());
    }

    /// Executes the program until it halts.
    ///
    /// There is no bound on the number of executed instructions, a program that loops without
    /// taking input runs forever. See [Machine::run_with_limit].
    ///
    /// # Errors
    /// Returns the first [RuntimeError]. The values put into the outbox before the fault are
    /// kept.
    pub fn run(&mut self, instructions: &[Instruction]) -> Result<(), RuntimeError> {
        while !self.halted {
            self.step(instructions)?;
        }

        Ok(())
    }

    /// Executes the program until it halts or `limit` instructions have been executed.
    ///
    /// # Errors
    /// Returns a [RuntimeErrorKind::StepLimitExceeded] error if the program is still running
    /// after `limit` steps, or the first fault of the program.
    pub fn run_with_limit(&mut self, instructions: &[Instruction], limit: usize) -> Result<(), RuntimeError> {
        let start = self.steps;

        while !self.halted {
            if self.steps - start >= limit {
                debug!(self.logger, "step limit exceeded"; "pc" => self.pc, "limit" => limit);

                return Err(RuntimeError {
                    pc: self.pc,
                    kind: RuntimeErrorKind::StepLimitExceeded { limit },
                });
            }

            self.step(instructions)?;
        }

        Ok(())
    }
}
