mod port;
mod switch;

pub use port::*;
pub use switch::*;

/// Collection names used against the document store
pub mod collections {
    pub const SWITCHES: &str = "switches";
    pub const SWITCH_PORTS: &str = "switch_ports";
}

/// Fallback port count when a request omits or supplies a non-positive
/// totalPorts value. A zero-port switch is never created.
pub const DEFAULT_PORT_COUNT: i32 = 24;
