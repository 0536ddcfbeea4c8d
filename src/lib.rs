//! A Verilog instance generator for multi-port `generic_memory` primitives.
//!
//! The [`verilog`] module holds the generators proper. [`config`] describes
//! memory shapes, and [`plan`] and [`cli`] drive generation from the command
//! line.

pub use anyhow::{anyhow, Result};

pub mod cli;
pub mod config;
pub mod error;
pub mod paths;
pub mod plan;
pub mod verilog;

pub use config::{MemoryConfig, PortAttr, Preset};
pub use verilog::{
    address_width, emit_instance, emit_module, emit_signals, encode_bit_vector, indent_text,
};
