//! Event bus: channel-backed dispatch of simulation events to sinks.
//!
//! Producers push events into an `std::sync::mpsc` channel; the owner of
//! the bus drains it into every registered sink on [`EventBus::flush`].
//! Producers on other threads get their own [`Emitter`].

use std::sync::mpsc;

use crate::events::{EventKind, SimulationEvent};
use crate::sinks::EventSink;

/// Cloneable producer handle for an [`EventBus`].
#[derive(Clone)]
pub struct Emitter {
    sender: mpsc::Sender<SimulationEvent>,
}

impl Emitter {
    /// Queue an event. Dropped silently once the bus is gone.
    pub fn emit(&self, event: SimulationEvent) {
        let _ = self.sender.send(event);
    }
}

/// Broadcast event bus for simulation telemetry.
pub struct EventBus {
    sender: mpsc::Sender<SimulationEvent>,
    receiver: mpsc::Receiver<SimulationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    /// Disabled bus drops events at the producer side.
    enabled: bool,
    dispatched: u64,
}

impl EventBus {
    /// Creates a new event bus with no sinks.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
            dispatched: 0,
        }
    }

    /// Registers a sink to receive events.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables the bus.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Producer handle for use on another thread.
    pub fn emitter(&self) -> Emitter {
        Emitter {
            sender: self.sender.clone(),
        }
    }

    /// Emit an event. No-op while the bus is disabled.
    pub fn emit(&self, event: SimulationEvent) {
        if self.enabled {
            let _ = self.sender.send(event);
        }
    }

    /// Shorthand for `emit(SimulationEvent::new(step, kind))`.
    pub fn emit_kind(&self, step: u32, kind: EventKind) {
        self.emit(SimulationEvent::new(step, kind));
    }

    /// Dispatch all pending events to registered sinks.
    ///
    /// Call this at the end of each step or at shutdown.
    pub fn flush(&mut self) {
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            self.dispatched += 1;
        }
    }

    /// Flush, then let every sink finalize its output.
    pub fn finish(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    /// Returns the number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Events dispatched so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
