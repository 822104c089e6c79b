//! `tagreport config`: the effective configuration

use serde_json::json;

use crate::output_by_format_result;
use tagreport_core::error::Result;

use super::dispatch::CommandContext;

pub fn execute(ctx: &CommandContext) -> Result<()> {
    let path = ctx
        .config_path
        .as_ref()
        .map(|path| path.display().to_string());

    output_by_format_result!(ctx.cli.format,
        json => {
            let output = json!({
                "path": path,
                "config": ctx.config,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        },
        human => {
            if !ctx.cli.quiet {
                match &path {
                    Some(path) => println!("# loaded from {}", path),
                    None => println!("# built-in defaults"),
                }
            }
            print!("{}", ctx.config.to_toml()?);
        }
    )
}
