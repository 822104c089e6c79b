//! Loading of the documents shared by the structure-building commands

use crate::cli::StructureInputs;
use tagreport_core::error::Result;
use tagreport_core::framework::{EntryFilter, Framework};
use tagreport_core::input::{load_document, load_optional};
use tagreport_core::options::{ExportSession, ExtraOptions};

use super::dispatch::{trace_command, CommandContext};

/// Framework, applied filters and saved options of one invocation
pub struct LoadedInputs {
    pub framework: Framework,
    pub filters: Option<Vec<EntryFilter>>,
    pub saved: Option<ExtraOptions>,
}

impl LoadedInputs {
    pub fn load(ctx: &CommandContext, inputs: &StructureInputs) -> Result<Self> {
        let framework: Framework = load_document(&inputs.framework)?;
        let filters: Option<Vec<EntryFilter>> = load_optional(inputs.filters.as_deref())?;
        let saved: Option<ExtraOptions> = load_optional(inputs.saved.as_deref())?;

        trace_command!(ctx.cli, ctx.start, "load_inputs");

        Ok(LoadedInputs {
            framework,
            filters,
            saved,
        })
    }

    /// Compose the export session these inputs describe
    pub fn compose(&self, ctx: &CommandContext, inputs: &StructureInputs) -> ExportSession {
        let session = ExportSession::compose(
            Some(&self.framework),
            self.filters.as_deref(),
            self.saved.as_ref(),
            &ctx.overrides(inputs),
        );

        trace_command!(ctx.cli, ctx.start, "compose_session");
        session
    }
}
