#[path = "integration/common/mod.rs"]
mod common;

#[path = "integration/extract.rs"]
mod extract;

#[path = "integration/merge.rs"]
mod merge;

#[path = "integration/round_trip.rs"]
mod round_trip;

#[path = "integration/dry_run.rs"]
mod dry_run;

#[path = "integration/error_cases.rs"]
mod error_cases;
