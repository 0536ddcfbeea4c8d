use clap::ValueEnum;

use super::memory::{MemoryConfig, PortAttr};

/// Commonly used memory shapes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum)]
pub enum Preset {
    #[value(name = "single_port")]
    SinglePort,
    #[value(name = "dual_port")]
    DualPort,
    #[value(name = "quad_read")]
    QuadRead,
    #[value(name = "register_file")]
    RegisterFile,
    #[value(name = "cache_line")]
    CacheLine,
    #[value(name = "fifo_buffer")]
    FifoBuffer,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::SinglePort,
        Preset::DualPort,
        Preset::QuadRead,
        Preset::RegisterFile,
        Preset::CacheLine,
        Preset::FifoBuffer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::SinglePort => "single_port",
            Self::DualPort => "dual_port",
            Self::QuadRead => "quad_read",
            Self::RegisterFile => "register_file",
            Self::CacheLine => "cache_line",
            Self::FifoBuffer => "fifo_buffer",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::SinglePort => "Single-port memory (1R1W)",
            Self::DualPort => "Dual-port memory (2R2W)",
            Self::QuadRead => "Quad-read memory (4R1W)",
            Self::RegisterFile => "Register file (8R4W)",
            Self::CacheLine => "Cache line storage (2R1W, 512-bit width)",
            Self::FifoBuffer => "FIFO buffer (1R1W, transparent read)",
        }
    }

    /// Returns a fresh configuration for this preset.
    pub fn config(&self) -> MemoryConfig {
        let (rd_ports, wr_ports, size, width) = match self {
            Self::SinglePort => (1, 1, 1024, 32),
            Self::DualPort => (2, 2, 1024, 32),
            Self::QuadRead => (4, 1, 2048, 64),
            Self::RegisterFile => (8, 4, 32, 32),
            Self::CacheLine => (2, 1, 64, 512),
            Self::FifoBuffer => (1, 1, 256, 64),
        };
        let mut config = MemoryConfig::new(rd_ports, wr_ports, size, width);
        config.description = Some(self.description().to_string());
        if *self == Self::FifoBuffer {
            config.transparency = Some(PortAttr::per_port([1]));
        }
        config
    }
}

/// Renders the preset listing shown by `--list`.
pub fn describe_presets() -> String {
    let mut out = String::from("Available presets:\n");
    out.push_str(&"-".repeat(50));
    out.push('\n');
    for preset in Preset::ALL {
        let config = preset.config();
        out.push_str(&format!(
            "{:15} - {}\n",
            preset.name(),
            preset.description()
        ));
        out.push_str(&format!(
            "{:15}   Read ports: {}, Write ports: {}\n",
            "", config.rd_ports, config.wr_ports
        ));
        out.push_str(&format!(
            "{:15}   Size: {} x {} bits\n\n",
            "", config.size, config.width
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_match_cli() {
        for preset in Preset::ALL {
            assert_eq!(Preset::from_str(preset.name(), false).unwrap(), preset);
            let value = preset.to_possible_value().unwrap();
            assert_eq!(value.get_name(), preset.name());
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert!(Preset::from_str("triple_port", false).is_err());
        assert!(Preset::from_str("single-port", false).is_err());
    }

    #[test]
    fn test_preset_shapes() {
        let rf = Preset::RegisterFile.config();
        assert_eq!((rf.rd_ports, rf.wr_ports, rf.size, rf.width), (8, 4, 32, 32));
        assert_eq!(rf.transparency, None);

        let fifo = Preset::FifoBuffer.config();
        assert_eq!(fifo.transparency, Some(PortAttr::per_port([1])));
        assert!(fifo.validate().is_ok());
    }

    #[test]
    fn test_describe_presets() {
        let listing = describe_presets();
        for preset in Preset::ALL {
            assert!(listing.contains(preset.name()));
            assert!(listing.contains(preset.description()));
        }
        assert!(listing.contains("Size: 64 x 512 bits"));
    }
}
