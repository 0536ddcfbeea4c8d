use clap::Parser;
use log::debug;

use crate::cli::args::Args;
use crate::cli::progress::StepContext;
use crate::config::{describe_presets, parse_memory_config, MemoryConfig};
use crate::plan::{execute_plan, generate_plan, output_path, ExecutePlanParams, OutputKind, TaskKey};
use crate::Result;

pub mod args;
pub mod progress;

pub const DEFAULT_MEMID: &str = "generic_mem";
pub const DEFAULT_INSTANCE_NAME: &str = "memory_inst";

impl Args {
    pub fn output_kind(&self) -> OutputKind {
        if self.signals_only {
            OutputKind::Signals
        } else if self.full_module {
            OutputKind::Module
        } else {
            OutputKind::Instance
        }
    }

    /// Assembles the memory configuration selected by the flags.
    ///
    /// Returns `None` when only the preset listing was requested.
    pub fn memory_config(&self) -> Result<Option<MemoryConfig>> {
        let memid = || {
            self.memid
                .clone()
                .unwrap_or_else(|| DEFAULT_MEMID.to_string())
        };
        let instance_name = || {
            self.instance_name
                .clone()
                .unwrap_or_else(|| DEFAULT_INSTANCE_NAME.to_string())
        };

        let config = if let Some(preset) = self.preset {
            let mut config = preset.config();
            config.memid = Some(memid());
            config.instance_name = Some(instance_name());
            if let Some(module_name) = &self.module_name {
                config.module_name = Some(module_name.clone());
            }
            config
        } else if let Some(path) = &self.config {
            let mut config = parse_memory_config(path)?;
            if let Some(memid) = &self.memid {
                config.memid = Some(memid.clone());
            }
            if let Some(instance_name) = &self.instance_name {
                config.instance_name = Some(instance_name.clone());
            }
            if let Some(module_name) = &self.module_name {
                config.module_name = Some(module_name.clone());
            }
            config
        } else if self.custom {
            let mut builder = MemoryConfig::builder();
            builder
                .rd_ports(self.rd_ports)
                .wr_ports(self.wr_ports)
                .size(self.size)
                .width(self.width)
                .memid(memid())
                .instance_name(instance_name())
                .description(format!(
                    "Custom memory ({}R{}W)",
                    self.rd_ports, self.wr_ports
                ));
            if let Some(module_name) = &self.module_name {
                builder.module_name(module_name.clone());
            }
            builder.build()?
        } else {
            return Ok(None);
        };

        Ok(Some(config))
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();

    if args.list {
        print!("{}", describe_presets());
        return Ok(());
    }

    let Some(config) = args.memory_config()? else {
        return Ok(());
    };
    let kind = args.output_kind();
    debug!("generating {kind} from {config:?}");

    let Some(output) = &args.output else {
        let plan = generate_plan(config, kind)?;
        let verilog = execute_plan(ExecutePlanParams {
            plan: &plan,
            output: None,
            ctx: None,
        })?;
        println!("{verilog}");
        return Ok(());
    };

    let output = output_path(output, &config);

    let mut ctx = StepContext::new();
    let plan = ctx.check(generate_plan(config, kind))?;
    ctx.finish(TaskKey::GeneratePlan);

    let res = execute_plan(ExecutePlanParams {
        plan: &plan,
        output: Some(&output),
        ctx: Some(&mut ctx),
    });
    ctx.check(res)?;

    println!("Generated {kind}: {:?}", &output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PortAttr, Preset};
    use std::fs;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("memgen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_mode_is_required() {
        assert!(Args::try_parse_from(["memgen"]).is_err());
        assert!(Args::try_parse_from(["memgen", "--custom", "--list"]).is_err());
        assert!(
            Args::try_parse_from(["memgen", "--custom", "--full-module", "--signals-only"])
                .is_err()
        );
    }

    #[test]
    fn test_unknown_preset_is_rejected() {
        assert!(Args::try_parse_from(["memgen", "--preset", "triple_port"]).is_err());
    }

    #[test]
    fn test_preset_config() {
        let args = parse(&["--preset", "fifo_buffer", "--module_name", "fifo"]);
        let config = args.memory_config().unwrap().unwrap();
        assert_eq!(config.size, 256);
        assert_eq!(config.transparency, Some(PortAttr::per_port([1])));
        assert_eq!(config.memid.as_deref(), Some(DEFAULT_MEMID));
        assert_eq!(config.instance_name.as_deref(), Some(DEFAULT_INSTANCE_NAME));
        assert_eq!(config.module_name.as_deref(), Some("fifo"));
        assert_eq!(args.output_kind(), OutputKind::Instance);

        // The catalog entry itself is untouched.
        assert_eq!(Preset::FifoBuffer.config().memid, None);
    }

    #[test]
    fn test_custom_config() {
        let args = parse(&[
            "--custom",
            "--rd_ports",
            "4",
            "--wr-ports",
            "2",
            "--size",
            "2048",
            "--width",
            "64",
            "--memid",
            "wide",
            "--full-module",
        ]);
        let config = args.memory_config().unwrap().unwrap();
        assert_eq!(
            (config.rd_ports, config.wr_ports, config.size, config.width),
            (4, 2, 2048, 64)
        );
        assert_eq!(config.memid.as_deref(), Some("wide"));
        assert_eq!(config.description.as_deref(), Some("Custom memory (4R2W)"));
        assert_eq!(config.module_name, None);
        assert_eq!(args.output_kind(), OutputKind::Module);
    }

    #[test]
    fn test_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mem.toml");
        fs::write(
            &path,
            "rd_ports = 2\nwr_ports = 1\nsize = 64\nwidth = 8\nmemid = \"tags\"\n",
        )
        .unwrap();
        let path = path.to_str().unwrap();

        let config = parse(&["--config", path]).memory_config().unwrap().unwrap();
        assert_eq!(config.memid.as_deref(), Some("tags"));
        assert_eq!(config.instance_name, None);

        let args = parse(&["-c", path, "--memid", "other", "--signals-only"]);
        let config = args.memory_config().unwrap().unwrap();
        assert_eq!(config.memid.as_deref(), Some("other"));
        assert_eq!(args.output_kind(), OutputKind::Signals);
    }

    #[test]
    fn test_list_has_no_config() {
        assert!(parse(&["--list"]).memory_config().unwrap().is_none());
    }
}
