//! Serial transport layer.
//!
//! Owns opening and configuring the serial device, port enumeration, and
//! exclusive-handle release. This is the lowest layer of midibridge: the
//! framing layer reads from [`SerialLink`] through plain `std::io::Read`
//! and never sees serial-specific types.

pub mod error;
pub mod link;
pub mod ports;

pub use error::{Result, SerialError};
pub use link::SerialLink;
pub use ports::{list_ports, PortInfo};
