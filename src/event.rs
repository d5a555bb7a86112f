//! Event handling.
//!
//! This library exposes an event-based interface for reacting
//! to the state changes of the machine in real-time. [EventListeners](EventListener)
//! can be registered on the [Machine](crate::machine::Machine) with the
//! [add_listener](crate::machine::Machine::add_listener) method.
//!
//! A blanket implementation of [EventListener] for all `Fn(&Event)` is provided.

use crate::value::Value;

/// Represents an event that occurred while executing a program.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A value was taken from the inbox.
    Input {
        value: Value,
    },

    /// A value was put into the outbox.
    Output {
        value: Value,
    },

    /// The program modified a memory cell.
    MemoryChange {
        /// The index of the changed memory cell.
        index: usize,

        /// New value of the changed memory cell.
        value: Value,
    },

    /// The program modified the register.
    RegisterChange {
        /// The new value of the register. `None` if the register was emptied.
        value: Option<Value>,
    },

    /// A jump instruction changed the flow of the program.
    Jump {
        /// Index of the jump instruction.
        from: usize,

        /// Index of the instruction executed next.
        to: usize,
    },
}

/// Trait for consuming events.
pub trait EventListener {
    /// Called whenever a new event has been created.
    fn event(&mut self, event: &Event);
}

impl<F> EventListener for F where F: Fn(&Event) {
    fn event(&mut self, event: &Event) {
        self(event)
    }
}

pub(crate) struct EventDispatcher {
    listeners: Vec<Box<dyn EventListener>>,
}

impl EventDispatcher {
    pub fn new() -> EventDispatcher {
        EventDispatcher {
            listeners: Vec::new(),
        }
    }

    pub fn add_listener<L: EventListener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener) as Box<dyn EventListener>)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn dispatch(&mut self, event: Event) {
        for listener in &mut self.listeners {
            listener.event(&event);
        }
    }
}
