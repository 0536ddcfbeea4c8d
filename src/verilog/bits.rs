use itertools::Itertools;

use crate::config::PortAttr;
use crate::error::{Error, Result};

/// Returns the number of address bits needed to index `size` words.
///
/// Always at least 1, so a single-word memory still gets an address port.
pub fn address_width(size: usize) -> Result<usize> {
    if size == 0 {
        return Err(Error::InvalidConfig(
            "`size` must be a positive integer".to_string(),
        ));
    }
    let bits = usize::BITS - (size - 1).leading_zeros();
    Ok((bits as usize).max(1))
}

/// Encodes a per-port attribute as a `<port_count>'b...` literal.
///
/// Element 0 of a per-port list becomes the rightmost bit. A uniform value is
/// repeated once per port using its textual form, so `1` with three ports
/// becomes `3'b111`.
pub fn encode_bit_vector(values: &PortAttr, port_count: usize) -> Result<String> {
    let bits = match values {
        PortAttr::PerPort(values) => {
            if values.len() != port_count {
                return Err(Error::PortCountMismatch {
                    attr: "bit vector",
                    len: values.len(),
                    port_count,
                });
            }
            values
                .iter()
                .rev()
                .map(|v| if v.is_set() { '1' } else { '0' })
                .join("")
        }
        PortAttr::Uniform(value) => value.to_string().repeat(port_count),
    };
    Ok(format!("{port_count}'b{bits}"))
}
