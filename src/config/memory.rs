use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// A single per-port attribute value.
///
/// Configuration files may spell bits as booleans, integers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BitValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl BitValue {
    #[inline]
    pub fn is_set(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Str(s) => !s.is_empty(),
        }
    }
}

impl Display for BitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", u8::from(*b)),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for BitValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for BitValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for BitValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for BitValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for BitValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// A parameter value emitted exactly as written, such as an `INIT` or
/// `OFFSET` expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Int(i64),
    Str(String),
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// A clocking or transparency attribute of the read or write ports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortAttr {
    /// One value per port. Element 0 belongs to port 0.
    PerPort(Vec<BitValue>),
    /// A single value shared by every port.
    Uniform(BitValue),
}

impl PortAttr {
    pub fn per_port<T: Into<BitValue>>(values: impl IntoIterator<Item = T>) -> Self {
        Self::PerPort(values.into_iter().map(Into::into).collect())
    }

    pub fn uniform(value: impl Into<BitValue>) -> Self {
        Self::Uniform(value.into())
    }

    /// Checks that a per-port attribute names exactly `port_count` values.
    pub fn check_len(&self, attr: &'static str, port_count: usize) -> Result<()> {
        match self {
            Self::PerPort(values) if values.len() != port_count => Err(Error::PortCountMismatch {
                attr,
                len: values.len(),
                port_count,
            }),
            _ => Ok(()),
        }
    }
}

impl<T: Into<BitValue>> From<Vec<T>> for PortAttr {
    fn from(values: Vec<T>) -> Self {
        Self::per_port(values)
    }
}

impl From<BitValue> for PortAttr {
    fn from(value: BitValue) -> Self {
        Self::Uniform(value)
    }
}

impl From<bool> for PortAttr {
    fn from(value: bool) -> Self {
        Self::uniform(value)
    }
}

impl From<i32> for PortAttr {
    fn from(value: i32) -> Self {
        Self::uniform(value)
    }
}

impl From<i64> for PortAttr {
    fn from(value: i64) -> Self {
        Self::uniform(value)
    }
}

impl From<&str> for PortAttr {
    fn from(value: &str) -> Self {
        Self::uniform(value)
    }
}

/// The shape and attributes of one `generic_memory` instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Builder, Serialize, Deserialize)]
#[builder(derive(Debug), build_fn(error = "crate::error::Error"))]
pub struct MemoryConfig {
    /// Number of read ports.
    pub rd_ports: usize,
    /// Number of write ports.
    pub wr_ports: usize,
    /// Memory depth in words.
    pub size: usize,
    /// Data bits per word.
    pub width: usize,

    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memid: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Initializer expression, emitted verbatim.
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<Literal>,
    /// Address offset expression, emitted verbatim.
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Literal>,

    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparency: Option<PortAttr>,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rd_clk_enable: Option<PortAttr>,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rd_clk_polarity: Option<PortAttr>,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wr_clk_enable: Option<PortAttr>,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wr_clk_polarity: Option<PortAttr>,

    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_mode: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_reset: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_wr_mode: Option<String>,
}

impl MemoryConfig {
    #[inline]
    pub fn builder() -> MemoryConfigBuilder {
        MemoryConfigBuilder::default()
    }

    /// Creates a configuration with only the required fields set.
    pub fn new(rd_ports: usize, wr_ports: usize, size: usize, width: usize) -> Self {
        Self {
            rd_ports,
            wr_ports,
            size,
            width,
            memid: None,
            instance_name: None,
            module_name: None,
            description: None,
            init: None,
            offset: None,
            transparency: None,
            rd_clk_enable: None,
            rd_clk_polarity: None,
            wr_clk_enable: None,
            wr_clk_polarity: None,
            option_mode: None,
            option_reset: None,
            option_wr_mode: None,
        }
    }

    /// Rejects zero port counts, depth or width, and shapes whose
    /// concatenated port buses do not fit in a `usize`.
    pub fn check_dims(&self) -> Result<()> {
        for (name, value) in [
            ("rd_ports", self.rd_ports),
            ("wr_ports", self.wr_ports),
            ("size", self.size),
            ("width", self.width),
        ] {
            if value == 0 {
                return Err(Error::InvalidConfig(format!(
                    "`{name}` must be a positive integer"
                )));
            }
        }

        let lane = crate::verilog::address_width(self.size)?.max(self.width);
        for (side, ports) in [("read", self.rd_ports), ("write", self.wr_ports)] {
            if ports.checked_mul(lane).is_none() {
                return Err(Error::InvalidConfig(format!(
                    "{side} port buses of {ports} x {lane} bits are too wide"
                )));
            }
        }
        Ok(())
    }

    /// Per-port attributes paired with the port count they are encoded against.
    pub fn port_attrs(&self) -> [(&'static str, Option<&PortAttr>, usize); 5] {
        [
            ("transparency", self.transparency.as_ref(), self.rd_ports),
            ("rd_clk_enable", self.rd_clk_enable.as_ref(), self.rd_ports),
            ("rd_clk_polarity", self.rd_clk_polarity.as_ref(), self.rd_ports),
            ("wr_clk_enable", self.wr_clk_enable.as_ref(), self.wr_ports),
            ("wr_clk_polarity", self.wr_clk_polarity.as_ref(), self.wr_ports),
        ]
    }

    /// Checks the dimensions and every per-port attribute.
    pub fn validate(&self) -> Result<()> {
        self.check_dims()?;
        for (attr, value, port_count) in self.port_attrs() {
            if let Some(value) = value {
                value.check_len(attr, port_count)?;
            }
        }
        Ok(())
    }
}

/// Reads a memory configuration from a TOML file, or from JSON if the
/// path ends in `.json`.
pub fn parse_memory_config(path: impl AsRef<Path>) -> Result<MemoryConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let data = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&contents)?,
        _ => toml::from_str(&contents)?,
    };
    Ok(data)
}
