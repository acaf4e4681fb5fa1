//! # pmoupnp - UPnP control plumbing
//!
//! Client side of the UPnP control protocol: SOAP request construction,
//! response parsing and fault decoding. The transport itself (HTTP) lives
//! in the crates that talk to devices.

pub mod soap;
