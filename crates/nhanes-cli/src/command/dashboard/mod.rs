use std::path::PathBuf;

use anyhow::Context;
use nhanes_analysis::cache::DatasetCache;
use tracing::info;

use crate::{command::filter_arg::FilterArg, util};

use self::{app::DashboardApp, screens::OverviewScreen};

mod app;
mod prompt;
mod screens;

const DEFAULT_DATA_PATH: &str = "cleaned_data.csv";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DashboardArg {
    /// Survey CSV file path
    #[arg(default_value = DEFAULT_DATA_PATH)]
    pub(crate) data_file: PathBuf,
    #[clap(flatten)]
    pub(crate) filter: FilterArg,
}

impl Default for DashboardArg {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_PATH),
            filter: FilterArg::default(),
        }
    }
}

pub fn run(arg: &DashboardArg) -> anyhow::Result<()> {
    let DashboardArg { data_file, filter } = arg;

    let mut cache = DatasetCache::new();
    let rows = cache
        .get_or_load(data_file)
        .with_context(|| format!("Could not load data from '{}'", data_file.display()))?;
    info!("{}", util::load_banner(rows.len(), data_file));

    let (defaults, constraints) = filter.resolve(&rows);
    let overview = OverviewScreen::new(data_file.clone(), rows, defaults, constraints);

    let mut terminal = ratatui::init();
    let app_result =
        DashboardApp::new(cache, filter.defaults_config(), overview).run(&mut terminal);
    ratatui::restore();
    app_result
}
