use std::path::PathBuf;

use anyhow::Context;
use nhanes_analysis::{dashboard::DashboardView, load};
use tracing::info;

use crate::{command::filter_arg::FilterArg, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SummaryArg {
    /// Survey CSV file path
    pub(crate) data_file: PathBuf,
    #[clap(flatten)]
    pub(crate) filter: FilterArg,
    /// Numeric columns to summarize as distributions (comma-separated)
    /// [default: BMXBMI, sugar_avg, sleep_avg, kcal_avg when present]
    #[arg(long, value_delimiter = ',')]
    pub(crate) columns: Option<Vec<String>>,
    /// Output JSON file path [default: stdout]
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let view = build_view(arg)?;
    util::Output::save_json(&view, arg.output.as_deref())?;
    if let Some(path) = &arg.output {
        info!(path = %path.display(), "summary written");
    }
    Ok(())
}

fn build_view(arg: &SummaryArg) -> anyhow::Result<DashboardView> {
    let SummaryArg {
        data_file,
        filter,
        columns,
        output: _,
    } = arg;

    let rows = load::load_and_prepare(data_file)
        .with_context(|| format!("Could not load data from '{}'", data_file.display()))?;
    eprintln!("{}", util::load_banner(rows.len(), data_file));

    let (defaults, constraints) = filter.resolve(&rows);
    let view = DashboardView::compute(
        data_file.display().to_string(),
        &rows,
        defaults,
        constraints,
        columns.as_deref(),
    );
    info!(
        total = view.total_rows,
        filtered = view.filtered_rows,
        "dashboard computed"
    );
    Ok(view)
}
