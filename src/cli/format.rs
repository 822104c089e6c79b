//! Format output dispatch helpers

/// Dispatch on the output format when the JSON branch returns a `Result`
/// and the human branch returns `()`.
///
/// ```rust,ignore
/// output_by_format_result!(cli.format,
///     json => print_json(&value),
///     human => { render_outline(&nodes); }
/// )
/// ```
#[macro_export]
macro_rules! output_by_format_result {
    ($format:expr, json => $json:expr, human => $human:block) => {
        match $format {
            ::tagreport_core::format::OutputFormat::Json => $json,
            ::tagreport_core::format::OutputFormat::Human => {
                $human;
                Ok(())
            }
        }
    };
}
