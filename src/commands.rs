use chrono::Utc;
use clap::{Args, ValueEnum};
use indicator_forms::config::AppConfig;
use indicator_forms::error::AppError;
use indicator_forms::workflows::indicators::{
    read_responses, CompiledForm, FieldType, ReportError, ResponseStore,
};
use indicator_forms::workflows::spreadsheet::RowSet;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// One line per indicator with its tier and field types
    Summary,
    /// The compiled form as JSON
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct CompileArgs {
    /// Indicator spreadsheet exported as CSV
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Indicator spreadsheet exported as CSV
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// JSON object of responses keyed by field id
    #[arg(long)]
    pub(crate) responses: Option<PathBuf>,
    /// Write the report here instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Override the organization name shown in the report
    #[arg(long)]
    pub(crate) organization: Option<String>,
}

pub(crate) fn run_compile(args: CompileArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let rows = RowSet::from_path(&args.csv)?;
    let form = CompiledForm::from_rows(&rows)?;

    match args.format {
        OutputFormat::Summary => {
            let stdout = io::stdout();
            render_summary(&form, stdout.lock())?;
        }
        OutputFormat::Json => {
            let rendered = if config.report.pretty {
                serde_json::to_string_pretty(&form)
            } else {
                serde_json::to_string(&form)
            };
            println!("{}", rendered.map_err(ReportError::Serialize)?);
        }
    }

    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        csv,
        responses,
        output,
        organization,
    } = args;

    let config = AppConfig::load()?;
    let rows = RowSet::from_path(&csv)?;
    let form = CompiledForm::from_rows(&rows)?;

    let responses = match responses {
        Some(path) => read_responses(BufReader::new(File::open(path)?))?,
        None => ResponseStore::default(),
    };

    let organization = organization.or(config.report.organization);
    let report = form.report(&responses, organization.as_deref(), Utc::now());

    match output {
        Some(path) => {
            report.write_json(BufWriter::new(File::create(&path)?), config.report.pretty)?;
            println!(
                "Report for {} written to {} ({}% complete, {}/{} fields)",
                report.organization,
                path.display(),
                report.completion_score.percentage,
                report.completion_score.completed,
                report.completion_score.total
            );
        }
        None => report.write_json(io::stdout().lock(), config.report.pretty)?,
    }

    Ok(())
}

fn render_summary<W: Write>(form: &CompiledForm, mut out: W) -> io::Result<()> {
    match &form.organization {
        Some(organization) => writeln!(
            out,
            "Organization: {} ({})",
            organization.name, organization.code
        )?,
        None => writeln!(out, "Organization: not detected")?,
    }
    writeln!(
        out,
        "Indicators: {} ({} fields)",
        form.indicators.len(),
        form.field_count()
    )?;

    for indicator in &form.indicators {
        let types: Vec<&str> = indicator
            .fields
            .iter()
            .map(|field| field.field_type.label())
            .collect();
        writeln!(
            out,
            "- [{}] {} {}: {}",
            indicator.tier.label(),
            indicator.id,
            indicator.title,
            types.join(", ")
        )?;

        for field in &indicator.fields {
            if let Some(warning) = &field.warning {
                writeln!(out, "    warning ({}): {}", field.id, warning)?;
            }
        }
    }

    let free_text = form
        .indicators
        .iter()
        .flat_map(|indicator| &indicator.fields)
        .filter(|field| field.field_type == FieldType::TextShort)
        .count();
    if free_text > 0 {
        writeln!(out, "\n{free_text} field(s) still collect free text")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_tiers_types_and_warnings() {
        let rows = RowSet::from_records([
            [("Indicator", "VFWC staff turnover"), ("Method", "")],
            [("Indicator", "Program story"), ("Method", "Describe")],
        ]);
        let form = CompiledForm::from_rows(&rows).expect("compiles");

        let mut buffer = Vec::new();
        render_summary(&form, &mut buffer).expect("renders");
        let text = String::from_utf8(buffer).expect("utf-8");

        assert!(text.starts_with("Organization: Victoria Family Works Centre (VFWC)"));
        assert!(text.contains("Indicators: 2 (6 fields)"));
        assert!(text.contains(
            "- [Tier 1 (Foundational)] indicator_0 VFWC staff turnover: Number, Number, Number, Calculated, Calculated"
        ));
        assert!(text.contains("warning (indicator_1_value)"));
        assert!(text.contains("1 field(s) still collect free text"));
    }
}
