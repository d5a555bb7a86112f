//! types for representing instructions and their parts

use std::fmt;

/// Describes how the operand of a memory instruction is resolved into a memory index.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// The operand is the memory index. (`COPYFROM 3`)
    Direct,

    /// The memory cell at the operand holds the memory index. (`COPYFROM [3]`)
    Indirect,
}

/// Memory operand of an instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Address {
    pub mode: Mode,

    /// The literal index written in the source. Can be negative, bounds are checked when the
    /// instruction is executed.
    pub index: i32,
}

impl Address {
    pub fn direct(index: i32) -> Address {
        Address { mode: Mode::Direct, index }
    }

    pub fn indirect(index: i32) -> Address {
        Address { mode: Mode::Indirect, index }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mode {
            Mode::Direct => write!(f, "{}", self.index),
            Mode::Indirect => write!(f, "[{}]", self.index),
        }
    }
}

/// Names of all instructions, without their operands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Inbox,
    Outbox,
    CopyFrom,
    CopyTo,
    Add,
    Sub,
    BumpUp,
    BumpDown,
    Jump,
    JumpIfZero,
    JumpIfNegative,
}

/// The shape of the operand an instruction expects.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperandKind {
    None,
    Address,
    Label,
}

impl Kind {
    pub const ALL: [Kind; 11] = [
        Kind::Inbox,
        Kind::Outbox,
        Kind::CopyFrom,
        Kind::CopyTo,
        Kind::Add,
        Kind::Sub,
        Kind::BumpUp,
        Kind::BumpDown,
        Kind::Jump,
        Kind::JumpIfZero,
        Kind::JumpIfNegative,
    ];

    /// The mnemonic used in source files.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Inbox => "INBOX",
            Kind::Outbox => "OUTBOX",
            Kind::CopyFrom => "COPYFROM",
            Kind::CopyTo => "COPYTO",
            Kind::Add => "ADD",
            Kind::Sub => "SUB",
            Kind::BumpUp => "BUMPUP",
            Kind::BumpDown => "BUMPDN",
            Kind::Jump => "JUMP",
            Kind::JumpIfZero => "JUMPZ",
            Kind::JumpIfNegative => "JUMPN",
        }
    }

    /// Looks up an instruction by its mnemonic. The match is case-sensitive.
    pub fn from_name(name: &str) -> Option<Kind> {
        Kind::ALL.iter()
            .copied()
            .find(|kind| kind.name() == name)
    }

    pub fn operand(&self) -> OperandKind {
        match self {
            Kind::Inbox | Kind::Outbox => OperandKind::None,
            Kind::Jump | Kind::JumpIfZero | Kind::JumpIfNegative => OperandKind::Label,
            _ => OperandKind::Address,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single executable instruction with all jump targets resolved into instruction indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Takes the next value from the inbox into the register.
    /// Ends the program if the inbox is empty.
    Inbox,

    /// Moves the value of the register to the outbox.
    Outbox,

    /// Copies a value from memory into the register.
    CopyFrom(Address),

    /// Copies the value of the register into memory.
    CopyTo(Address),

    /// Adds a value from memory to the register.
    Add(Address),

    /// Subtracts a value in memory from the register.
    Sub(Address),

    /// Increments a memory cell and copies the result into the register.
    BumpUp(Address),

    /// Decrements a memory cell and copies the result into the register.
    BumpDown(Address),

    /// Continues execution from the given instruction.
    Jump(usize),

    /// Jumps if the register holds zero.
    JumpIfZero(usize),

    /// Jumps if the register holds a negative number.
    JumpIfNegative(usize),
}

impl Instruction {
    pub fn kind(&self) -> Kind {
        match self {
            Instruction::Inbox => Kind::Inbox,
            Instruction::Outbox => Kind::Outbox,
            Instruction::CopyFrom(_) => Kind::CopyFrom,
            Instruction::CopyTo(_) => Kind::CopyTo,
            Instruction::Add(_) => Kind::Add,
            Instruction::Sub(_) => Kind::Sub,
            Instruction::BumpUp(_) => Kind::BumpUp,
            Instruction::BumpDown(_) => Kind::BumpDown,
            Instruction::Jump(_) => Kind::Jump,
            Instruction::JumpIfZero(_) => Kind::JumpIfZero,
            Instruction::JumpIfNegative(_) => Kind::JumpIfNegative,
        }
    }

    /// Builds a memory instruction of the given kind.
    ///
    /// # Returns
    /// `None` if `kind` does not take an [Address] operand.
    pub fn with_address(kind: Kind, address: Address) -> Option<Instruction> {
        let ins = match kind {
            Kind::CopyFrom => Instruction::CopyFrom(address),
            Kind::CopyTo => Instruction::CopyTo(address),
            Kind::Add => Instruction::Add(address),
            Kind::Sub => Instruction::Sub(address),
            Kind::BumpUp => Instruction::BumpUp(address),
            Kind::BumpDown => Instruction::BumpDown(address),
            _ => return None,
        };

        Some(ins)
    }

    /// Builds a jump instruction of the given kind.
    ///
    /// # Returns
    /// `None` if `kind` is not a jump.
    pub fn with_target(kind: Kind, target: usize) -> Option<Instruction> {
        let ins = match kind {
            Kind::Jump => Instruction::Jump(target),
            Kind::JumpIfZero => Instruction::JumpIfZero(target),
            Kind::JumpIfNegative => Instruction::JumpIfNegative(target),
            _ => return None,
        };

        Some(ins)
    }

    pub fn address(&self) -> Option<Address> {
        match self {
            Instruction::CopyFrom(addr)
                | Instruction::CopyTo(addr)
                | Instruction::Add(addr)
                | Instruction::Sub(addr)
                | Instruction::BumpUp(addr)
                | Instruction::BumpDown(addr) => Some(*addr),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<usize> {
        match self {
            Instruction::Jump(target)
                | Instruction::JumpIfZero(target)
                | Instruction::JumpIfNegative(target) => Some(*target),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.address(), self.target()) {
            (Some(addr), _) => write!(f, "{} {}", self.kind(), addr),
            (_, Some(target)) => write!(f, "{} @{}", self.kind(), target),
            (None, None) => write!(f, "{}", self.kind()),
        }
    }
}
