use crate::cli::progress::StepContext;
use crate::config::MemoryConfig;
use crate::verilog::{emit_instance, emit_module, emit_signals};
use crate::Result;
use log::{debug, info};
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

/// What to generate from a memory configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OutputKind {
    /// A `generic_memory` instantiation.
    Instance,
    /// Port declarations only.
    Signals,
    /// A wrapper module around the instance.
    Module,
}

impl Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance => write!(f, "instance"),
            Self::Signals => write!(f, "signal declarations"),
            Self::Module => write!(f, "wrapper module"),
        }
    }
}

/// A validated request to generate Verilog.
pub struct GenerationPlan {
    pub config: MemoryConfig,
    pub kind: OutputKind,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TaskKey {
    GeneratePlan,
    GenerateVerilog,
    WriteOutput,
}

pub struct ExecutePlanParams<'a> {
    pub plan: &'a GenerationPlan,
    /// File to write to. Nothing is written if `None`.
    pub output: Option<&'a Path>,
    pub ctx: Option<&'a mut StepContext>,
}

pub fn generate_plan(config: MemoryConfig, kind: OutputKind) -> Result<GenerationPlan> {
    match kind {
        // Declarations do not use the per-port attributes.
        OutputKind::Signals => config.check_dims()?,
        OutputKind::Instance | OutputKind::Module => config.validate()?,
    }
    debug!(
        "planned {kind} for {}R{}W memory of {} x {} bits",
        config.rd_ports, config.wr_ports, config.size, config.width
    );
    Ok(GenerationPlan { config, kind })
}

/// Renders the text for a plan without writing it anywhere.
pub fn render_plan(plan: &GenerationPlan) -> Result<String> {
    let text = match plan.kind {
        OutputKind::Instance => emit_instance(&plan.config)?,
        OutputKind::Signals => emit_signals(&plan.config)?,
        OutputKind::Module => emit_module(&plan.config)?,
    };
    Ok(text)
}

pub fn save_verilog(path: impl AsRef<Path>, verilog: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, verilog)?;
    info!("wrote {} bytes to {:?}", verilog.len(), path);

    Ok(())
}

macro_rules! try_finish_task {
    ( $ctx:expr, $task:expr ) => {
        if let Some(ctx) = $ctx.as_mut() {
            ctx.finish($task);
        }
    };
}

/// Renders the plan, writes it to `output` if given, and returns the text.
pub fn execute_plan(params: ExecutePlanParams) -> Result<String> {
    let ExecutePlanParams {
        plan,
        output,
        mut ctx,
    } = params;

    let verilog = render_plan(plan)?;
    try_finish_task!(ctx, TaskKey::GenerateVerilog);

    if let Some(path) = output {
        save_verilog(path, &verilog)?;
        try_finish_task!(ctx, TaskKey::WriteOutput);
    }

    Ok(verilog)
}

/// Resolves where to write: a directory gets a file named after the memory.
pub fn output_path(output: &Path, config: &MemoryConfig) -> PathBuf {
    if output.is_dir() {
        crate::paths::out_verilog(output, &crate::paths::out_memory(config))
    } else {
        output.to_path_buf()
    }
}
