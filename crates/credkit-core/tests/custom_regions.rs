//! A kit over caller-supplied regions leaves the bundled tables unparsed.
//!
//! Kept alone in its own test binary so nothing else in the process loads
//! the bundled tables.
#![allow(clippy::expect_used)]

use std::sync::Arc;

use credkit_core::{
    CredentialKind, CredentialKit, DomesticRegion, RegionTables, default_region_tables_loaded,
};

#[test]
fn custom_regions_skip_bundled_load() {
    let regions = RegionTables::new().with_domestic(DomesticRegion::province("990000", "测试省"));
    let kit = CredentialKit::with_regions(Arc::new(regions));
    let kind = CredentialKind::MainlandResidentId;

    assert_eq!(kit.valid(&kind, "990000197810270020"), Ok(true));
    assert_eq!(kit.valid(&kind, "330105197810270025"), Ok(false));
    assert!(!default_region_tables_loaded());

    let bundled = CredentialKit::with_defaults();
    assert_eq!(bundled.valid(&kind, "330105197810270025"), Ok(true));
    assert!(default_region_tables_loaded());
}
