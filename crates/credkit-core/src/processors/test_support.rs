#![allow(clippy::expect_used)]

use chrono::NaiveDate;

use crate::enums::ErrorKind;
use crate::pipeline::{CredentialProcessor, EvalContext};
use crate::region::default_region_tables;

/// Evaluation context over the bundled tables with the clock pinned to
/// 2026-10-16.
pub(crate) fn ctx() -> EvalContext<'static> {
    EvalContext::new(
        default_region_tables(),
        NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date"),
    )
}

/// The error kind reported for `text`, or `None` if it validates.
pub(crate) fn rejection(processor: &dyn CredentialProcessor, text: &str) -> Option<ErrorKind> {
    processor.validate(&ctx(), text).err().map(|err| err.kind)
}
