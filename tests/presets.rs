use memgen::config::Preset;
use memgen::error::Error;
use memgen::plan::{execute_plan, generate_plan, ExecutePlanParams, OutputKind};
use memgen::{address_width, emit_instance, emit_module, emit_signals, MemoryConfig, PortAttr};

fn range(width: usize) -> String {
    format!("[{}:0]", width - 1)
}

/// Checks that every vector port declared by `emit_signals` has the width
/// implied by the port counts.
fn check_preset(preset: Preset) {
    let config = preset.config();
    let abits = address_width(config.size).unwrap();
    let instance = emit_instance(&config).unwrap();
    let signals = emit_signals(&config).unwrap();
    let module = emit_module(&config).unwrap();

    assert!(instance.contains(&format!(".SIZE({})", config.size)));
    assert!(instance.contains(&format!(".ABITS({abits})")));
    assert!(instance.contains(&format!(".WIDTH({})", config.width)));
    assert!(instance.contains(&format!(".RD_PORTS({})", config.rd_ports)));
    assert!(instance.contains(&format!(".WR_PORTS({})", config.wr_ports)));
    assert!(instance.starts_with(&format!("// {}\n", preset.description())));

    let rd_addr = format!("input  wire {} rd_addr;", range(config.rd_ports * abits));
    let rd_data = format!("output wire {} rd_data;", range(config.rd_ports * config.width));
    let wr_addr = format!("input  wire {} wr_addr;", range(config.wr_ports * abits));
    let wr_data = format!("input  wire {} wr_data;", range(config.wr_ports * config.width));
    for decl in [&rd_addr, &rd_data, &wr_addr, &wr_data] {
        assert!(signals.contains(decl.as_str()), "missing {decl}");
        assert!(module.contains(&format!("    {decl}\n")), "missing {decl}");
    }

    let rd_clk = if config.rd_ports == 1 {
        "input  wire rd_clk;".to_string()
    } else {
        format!("input  wire {} rd_clk;", range(config.rd_ports))
    };
    assert!(signals.contains(&rd_clk));

    assert!(module.contains(&format!("// Config: {}\n", preset.description())));
    assert!(module.contains(&instance));
}

macro_rules! preset_tests {
    ( $( $name:ident => $preset:expr ),* $(,)? ) => {
        paste::paste! {
            $(
                #[test]
                fn [<test_preset_ $name>]() {
                    check_preset($preset);
                }
            )*
        }
    };
}

preset_tests! {
    single_port => Preset::SinglePort,
    dual_port => Preset::DualPort,
    quad_read => Preset::QuadRead,
    register_file => Preset::RegisterFile,
    cache_line => Preset::CacheLine,
    fifo_buffer => Preset::FifoBuffer,
}

#[test]
fn test_single_port_end_to_end() {
    let config = MemoryConfig::new(1, 1, 1024, 32);
    let text = emit_instance(&config).unwrap();
    for expected in [
        ".SIZE(1024)",
        ".ABITS(10)",
        ".WIDTH(32)",
        ".RD_PORTS(1)",
        ".WR_PORTS(1)",
        ".RD_ADDR(rd_addr)",
        ".RD_DATA(rd_data)",
        ".WR_ADDR(wr_addr)",
        ".WR_DATA(wr_data)",
    ] {
        assert!(text.contains(expected), "missing {expected}");
    }
    assert!(!text.contains('['));

    let signals = emit_signals(&config).unwrap();
    for scalar in ["rd_clk", "rd_en", "rd_arst", "rd_srst", "wr_clk", "wr_en"] {
        assert!(signals.contains(&format!("input  wire {scalar};")));
    }
}

#[test]
fn test_register_file_end_to_end() {
    let signals = emit_signals(&Preset::RegisterFile.config()).unwrap();
    assert!(signals.contains("input  wire [39:0] rd_addr;"));
    assert!(signals.contains("input  wire [127:0] wr_data;"));
}

#[test]
fn test_fifo_transparency() {
    let text = emit_instance(&Preset::FifoBuffer.config()).unwrap();
    assert!(text.contains(".RD_TRANSPARENCY(1'b1)"));
}

#[test]
fn test_mismatched_attr_produces_no_output() {
    let mut config = Preset::QuadRead.config();
    config.rd_clk_enable = Some(PortAttr::per_port([1, 1, 1]));

    let err = emit_instance(&config).unwrap_err();
    assert!(matches!(
        err,
        Error::PortCountMismatch {
            len: 3,
            port_count: 4,
            ..
        }
    ));
    assert!(emit_module(&config).is_err());
    assert!(generate_plan(config, OutputKind::Module).is_err());
}

#[test]
fn test_plan_round_trip_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rtl/register_file.v");
    let plan = generate_plan(Preset::RegisterFile.config(), OutputKind::Module).unwrap();
    let text = execute_plan(ExecutePlanParams {
        plan: &plan,
        output: Some(&path),
        ctx: None,
    })
    .unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    assert!(text.trim_end().ends_with("endmodule"));
}

#[test]
fn test_concurrent_generation() {
    let config = Preset::CacheLine.config();
    let expected = emit_module(&config).unwrap();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| emit_module(&config).unwrap())).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
