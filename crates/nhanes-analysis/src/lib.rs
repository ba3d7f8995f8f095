//! Data preparation and aggregation for the NHANES BMI dashboard
//!
//! This crate turns a flat survey CSV into the figures a dashboard shows. It has no
//! presentation code.
//!
//! # Pipeline
//!
//! 1. **Load** ([`load::load_and_prepare`]): read the CSV into a [`table::RawTable`]; the
//!    only step that can fail
//! 2. **Derive** ([`derive::derive`]): coerce numeric columns and compute `sugar_avg`,
//!    `kcal_avg`, `sleep_avg`, `sleep_group`, `gender_label` and `race_label`
//! 3. **Filter** ([`filter::build_mask`], [`filter::apply`]): select rows by gender and
//!    by sleep and sugar ranges
//! 4. **Aggregate** ([`summary`], [`dashboard::DashboardView`]): KPIs, group-by means,
//!    correlation matrix, distributions and the sugar/BMI scatter
//!
//! Prepared row-sets are kept per path by [`cache::DatasetCache`].
//!
//! # Example
//!
//! ```
//! use nhanes_analysis::{
//!     derive::derive,
//!     filter::{self, FilterConstraints, GenderFilter},
//!     summary::Kpis,
//!     table::RawTable,
//! };
//!
//! let raw = RawTable::from_records(
//!     ["SEQN", "DR1TSUGR", "SLD012", "RIAGENDR", "BMXBMI"],
//!     [["1", "100", "8", "1", "22"], ["2", "", "5", "2", "30"]],
//! );
//! let rows = derive(&raw);
//!
//! let constraints = FilterConstraints {
//!     gender: GenderFilter::from_label("Male"),
//!     ..FilterConstraints::default()
//! };
//! let male = filter::apply(&rows, &constraints);
//!
//! assert_eq!(male.len(), 1);
//! assert_eq!(Kpis::compute(&male).mean_bmi.to_string(), "22.00");
//! ```

pub mod cache;
pub mod coerce;
pub mod dashboard;
pub mod derive;
pub mod filter;
pub mod labels;
pub mod load;
pub mod schema;
pub mod summary;
pub mod table;
