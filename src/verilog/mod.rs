//! Text generation for `generic_memory` instances.
//!
//! Every function here is a pure function of its [`MemoryConfig`]: the same
//! configuration always yields the same text, and the configuration is never
//! modified.

use std::fmt::Display;

use itertools::Itertools;
use lazy_static::lazy_static;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::{Literal, MemoryConfig, PortAttr};
use crate::error::{Error, Result};

pub mod bits;

pub use bits::{address_width, encode_bit_vector};

/// Name of the memory primitive being instantiated.
pub const PRIMITIVE_NAME: &str = "generic_memory";

pub const DEFAULT_MEMID: &str = "mem_inst";
pub const DEFAULT_INSTANCE_NAME: &str = "memory_inst";
pub const DEFAULT_MODULE_NAME: &str = "memory_wrapper";
pub const DEFAULT_INSTANCE_DESCRIPTION: &str = "Generic memory instance";
pub const DEFAULT_MODULE_DESCRIPTION: &str = "N/A";

const INDENT: usize = 4;

const RD_PORT_NAMES: [&str; 6] = ["RD_CLK", "RD_EN", "RD_ARST", "RD_SRST", "RD_ADDR", "RD_DATA"];
const WR_PORT_NAMES: [&str; 5] = ["WR_CLK", "WR_EN", "WR_BE", "WR_ADDR", "WR_DATA"];

lazy_static! {
    pub static ref TEMPLATES: std::result::Result<Tera, tera::Error> = {
        let mut tera = Tera::default();
        tera.add_raw_template(
            "memory_wrapper.v",
            include_str!("../../templates/memory_wrapper.v"),
        )?;
        Ok(tera)
    };
}

#[derive(Clone, Eq, PartialEq, Serialize)]
struct MemoryWrapperParams<'a> {
    module_name: &'a str,
    description: &'a str,
    rd_ports: usize,
    wr_ports: usize,
    size: usize,
    width: usize,
    signals: String,
    instance: String,
}

fn param(name: &str, value: impl Display) -> String {
    format!("{:width$}.{name}({value})", "", width = INDENT)
}

fn quoted_param(name: &str, value: impl Display) -> String {
    param(name, format!("\"{value}\""))
}

fn port_conn(name: &str) -> String {
    param(name, name.to_lowercase())
}

fn parameters(config: &MemoryConfig, abits: usize) -> Result<Vec<String>> {
    let mut params = vec![
        quoted_param("MEMID", config.memid.as_deref().unwrap_or(DEFAULT_MEMID)),
        param("SIZE", config.size),
        param("ABITS", abits),
        param("WIDTH", config.width),
        param("RD_PORTS", config.rd_ports),
        param("WR_PORTS", config.wr_ports),
    ];

    let verbatim = |name: &str, value: &Option<Literal>| -> Option<Result<String>> {
        value.as_ref().map(|v| Ok(param(name, v)))
    };
    let quoted = |name: &str, value: &Option<String>| -> Option<Result<String>> {
        value.as_ref().map(|v| Ok(quoted_param(name, v)))
    };
    let bit_vector = |name: &str,
                      value: &Option<PortAttr>,
                      port_count: usize|
     -> Option<Result<String>> {
        value
            .as_ref()
            .map(|v| encode_bit_vector(v, port_count).map(|bits| param(name, bits)))
    };

    // Optional parameters are emitted in this order, and only when present.
    let optional = [
        verbatim("INIT", &config.init),
        verbatim("OFFSET", &config.offset),
        bit_vector("RD_TRANSPARENCY", &config.transparency, config.rd_ports),
        bit_vector("RD_CLK_ENABLE", &config.rd_clk_enable, config.rd_ports),
        bit_vector("RD_CLK_POLARITY", &config.rd_clk_polarity, config.rd_ports),
        bit_vector("WR_CLK_ENABLE", &config.wr_clk_enable, config.wr_ports),
        bit_vector("WR_CLK_POLARITY", &config.wr_clk_polarity, config.wr_ports),
        quoted("OPTION_MODE", &config.option_mode),
        quoted("OPTION_RESET", &config.option_reset),
        quoted("OPTION_WR_MODE", &config.option_wr_mode),
    ];
    for line in optional.into_iter().flatten() {
        params.push(line?);
    }

    Ok(params)
}

/// Port connections of the instance.
///
/// The connection text does not depend on the port counts. With more than one
/// port, each signal is a bus holding one slice per port; see [`emit_signals`]
/// for the widths.
fn port_connections() -> Vec<String> {
    RD_PORT_NAMES
        .iter()
        .chain(WR_PORT_NAMES.iter())
        .map(|name| port_conn(name))
        .collect()
}

/// Generates a `generic_memory` instantiation.
pub fn emit_instance(config: &MemoryConfig) -> Result<String> {
    config.validate()?;
    let abits = address_width(config.size)?;

    let params = parameters(config, abits)?;
    let ports = port_connections();

    let description = config
        .description
        .as_deref()
        .unwrap_or(DEFAULT_INSTANCE_DESCRIPTION);
    let instance_name = config
        .instance_name
        .as_deref()
        .unwrap_or(DEFAULT_INSTANCE_NAME);

    let mut out = format!("// {description}\n");
    out.push_str(&format!("{PRIMITIVE_NAME} #(\n"));
    out.push_str(&params.join(",\n"));
    out.push_str(&format!("\n) {instance_name} (\n"));
    out.push_str(&ports.join(",\n"));
    out.push_str("\n);\n");

    Ok(out)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Direction {
    Input,
    Output,
}

impl Direction {
    fn keyword(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

/// A single port declaration. `width` of `None` declares a scalar.
struct Decl {
    dir: Direction,
    name: &'static str,
    width: Option<usize>,
}

impl Decl {
    fn render(&self) -> String {
        let range = match self.width {
            Some(width) => format!("[{}:0] ", width - 1),
            None => String::new(),
        };
        format!("{:<6} wire {range}{};", self.dir.keyword(), self.name)
    }
}

fn input(name: &'static str, width: Option<usize>) -> Decl {
    Decl {
        dir: Direction::Input,
        name,
        width,
    }
}

fn output(name: &'static str, width: Option<usize>) -> Decl {
    Decl {
        dir: Direction::Output,
        name,
        width,
    }
}

/// Width of a one-bit-per-port control signal.
#[inline]
fn per_port(ports: usize) -> Option<usize> {
    (ports > 1).then_some(ports)
}

fn read_decls(ports: usize, abits: usize, width: usize) -> [Decl; 6] {
    [
        input("rd_clk", per_port(ports)),
        input("rd_en", per_port(ports)),
        input("rd_arst", per_port(ports)),
        input("rd_srst", per_port(ports)),
        input("rd_addr", Some(ports * abits)),
        output("rd_data", Some(ports * width)),
    ]
}

fn write_decls(ports: usize, abits: usize, width: usize) -> [Decl; 5] {
    [
        input("wr_clk", per_port(ports)),
        input("wr_en", per_port(ports)),
        input("wr_be", Some(ports * width)),
        input("wr_addr", Some(ports * abits)),
        input("wr_data", Some(ports * width)),
    ]
}

/// Generates the port declarations matching [`emit_instance`]'s connections.
pub fn emit_signals(config: &MemoryConfig) -> Result<String> {
    config.check_dims()?;
    let abits = address_width(config.size)?;

    let mut lines = vec!["// Clock and reset signals".to_string()];
    lines.extend(
        read_decls(config.rd_ports, abits, config.width)
            .iter()
            .map(Decl::render),
    );
    lines.push(String::new());
    lines.extend(
        write_decls(config.wr_ports, abits, config.width)
            .iter()
            .map(Decl::render),
    );

    Ok(lines.join("\n"))
}

/// Prefixes every non-blank line of `text` with `spaces` spaces.
pub fn indent_text(text: &str, spaces: usize) -> String {
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{:spaces$}{line}", "")
            }
        })
        .join("\n")
}

/// Generates a wrapper module exposing the memory's ports and containing
/// its instance.
pub fn emit_module(config: &MemoryConfig) -> Result<String> {
    let signals = emit_signals(config)?;
    let instance = emit_instance(config)?;

    let params = MemoryWrapperParams {
        module_name: config.module_name.as_deref().unwrap_or(DEFAULT_MODULE_NAME),
        description: config
            .description
            .as_deref()
            .unwrap_or(DEFAULT_MODULE_DESCRIPTION),
        rd_ports: config.rd_ports,
        wr_ports: config.wr_ports,
        size: config.size,
        width: config.width,
        signals: indent_text(&signals, INDENT),
        instance: indent_text(&instance, 0),
    };

    let templates = TEMPLATES
        .as_ref()
        .map_err(|e| Error::Template(tera::Error::msg(format!("failed to load templates: {e}"))))?;
    let mut out = templates.render("memory_wrapper.v", &Context::from_serialize(params)?)?;
    out.push('\n');
    Ok(out)
}
