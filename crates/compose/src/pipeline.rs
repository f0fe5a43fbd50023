//! File-level composition runs
//!
//! Each run reads everything it needs, computes the output dashboard in
//! memory, and only then writes it, once. Any error before the write leaves
//! the destination untouched.

use crate::{
    append_panels, compose_demo, compose_mega, insert_status_panels, AppendConfig, ComposeError,
    ComposeReport, Composition, DemoPlan, MegaPlan, Result, Sources, StatusPanelConfig,
};
use std::path::{Path, PathBuf};

/// Compose a mega dashboard from a plan file
pub fn run_mega(plan_path: &Path, output: Option<&Path>) -> Result<ComposeReport> {
    let plan: MegaPlan = store::load_plan(plan_path)?;
    let output = output_path(plan_path, output, plan.output.as_deref())?;
    let sources = Sources::load(plan_path, plan.sections.iter().map(|s| s.source.as_str()))?;

    let composition = compose_mega(&plan, &sources)?;
    write(composition, &output)
}

/// Compose a demo dashboard from a plan file
pub fn run_demo(plan_path: &Path, output: Option<&Path>) -> Result<ComposeReport> {
    let plan: DemoPlan = store::load_plan(plan_path)?;
    let output = output_path(plan_path, output, plan.output.as_deref())?;
    let sources = Sources::load(plan_path, plan.sections.iter().map(|s| s.source.as_str()))?;

    let composition = compose_demo(&plan, &sources)?;
    write(composition, &output)
}

/// Insert status code panels into `target`, writing to `output` (or back
/// to `target`)
pub fn run_status_codes(
    target: &Path,
    config_path: Option<&Path>,
    output: Option<&Path>,
) -> Result<ComposeReport> {
    let config: StatusPanelConfig = match config_path {
        Some(path) => store::load_plan(path)?,
        None => StatusPanelConfig::default(),
    };
    let dashboard = store::load_dashboard(target)?;

    let composition = insert_status_panels(&dashboard, &config)?;
    write(composition, output.unwrap_or(target))
}

/// Append the panels stored in `panels_path` to `target`
pub fn run_append(
    target: &Path,
    panels_path: &Path,
    config: &AppendConfig,
    output: Option<&Path>,
) -> Result<ComposeReport> {
    let dashboard = store::load_dashboard(target)?;
    let panels = store::load_panels(panels_path)?;

    let composition = append_panels(&dashboard, &panels, config)?;
    write(composition, output.unwrap_or(target))
}

fn output_path(
    plan_path: &Path,
    explicit: Option<&Path>,
    planned: Option<&str>,
) -> Result<PathBuf> {
    match (explicit, planned) {
        (Some(path), _) => Ok(path.to_path_buf()),
        (None, Some(planned)) => Ok(store::resolve_relative(plan_path, Path::new(planned))),
        (None, None) => Err(ComposeError::InvalidPlan(format!(
            "{} names no output and none was given",
            plan_path.display()
        ))),
    }
}

fn write(composition: Composition, output: &Path) -> Result<ComposeReport> {
    store::write_dashboard(&composition.dashboard, output)?;
    tracing::info!(output = %output.display(), "Wrote dashboard");
    Ok(composition.report)
}
