pub mod memory;
pub mod presets;

pub use memory::{parse_memory_config, BitValue, Literal, MemoryConfig, MemoryConfigBuilder, PortAttr};
pub use presets::{describe_presets, Preset};
