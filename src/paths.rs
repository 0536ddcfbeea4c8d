use crate::config::MemoryConfig;
use std::path::{Path, PathBuf};

/// File stem used when writing a configuration into a directory.
pub fn out_memory(config: &MemoryConfig) -> String {
    if let Some(name) = &config.module_name {
        return name.clone();
    }
    let &MemoryConfig {
        rd_ports,
        wr_ports,
        size,
        width,
        ..
    } = config;
    format!("memgen_{rd_ports}r{wr_ports}w_{size}x{width}")
}

pub fn out_verilog(work_dir: impl AsRef<Path>, name: &str) -> PathBuf {
    PathBuf::from(work_dir.as_ref()).join(format!("{name}.v"))
}
