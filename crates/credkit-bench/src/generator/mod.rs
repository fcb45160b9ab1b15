//! Mixed-kind credential batch generator.
//!
//! Every valid sample is built against the region tables bundled with
//! `credkit-core`, so a default kit accepts it. Invalid samples carry a
//! wrong check character and nothing else.

pub mod credentials;

use credkit_core::CredentialKind;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use credentials::{
    corrupt_check_char, gen_credit_code, gen_hk_mo_residence_permit, gen_hk_mo_travel_permit,
    gen_legacy_resident_id, gen_passport_mrz, gen_resident_id, gen_tw_residence_permit,
};

/// Configuration for the batch generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of samples.
    pub count: usize,
    /// Fraction of samples with a corrupted check character (0.0-1.0).
    pub invalid_fraction: f64,
}

/// Predefined batch sizes for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 100 samples
    Small,
    /// 10 000 samples
    Medium,
    /// 100 000 samples
    Large,
}

impl SizeTier {
    /// Returns the default `GeneratorConfig` for this size tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        let count = match self {
            SizeTier::Small => 100,
            SizeTier::Medium => 10_000,
            SizeTier::Large => 100_000,
        };
        GeneratorConfig {
            seed,
            count,
            invalid_fraction: 0.2,
        }
    }
}

/// One generated credential and whether a default kit should accept it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub kind: CredentialKind,
    pub value: String,
    pub expect_valid: bool,
}

/// Generates `config.count` samples cycling through the built-in kinds that
/// need no foreign-region data.
///
/// Only kinds with a check character are ever corrupted; the rest are
/// always valid.
pub fn generate_samples(config: &GeneratorConfig) -> Vec<Sample> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    (0..config.count)
        .map(|i| {
            let (kind, value, checked) = match i % 8 {
                0 => (CredentialKind::MainlandResidentId, gen_resident_id(&mut rng), true),
                1 => (
                    CredentialKind::MainlandResidentId,
                    gen_legacy_resident_id(&mut rng),
                    false,
                ),
                2 => (CredentialKind::HkMoTravelPermit, gen_hk_mo_travel_permit(&mut rng), false),
                3 => (
                    CredentialKind::HkMoResidencePermit,
                    gen_hk_mo_residence_permit(&mut rng),
                    true,
                ),
                4 => (
                    CredentialKind::TwResidencePermit,
                    gen_tw_residence_permit(&mut rng),
                    true,
                ),
                5 | 6 => (
                    CredentialKind::UnifiedSocialCreditCode,
                    gen_credit_code(&mut rng),
                    true,
                ),
                _ => (CredentialKind::PassportMrz, gen_passport_mrz(&mut rng), true),
            };
            if checked && rng.gen_bool(config.invalid_fraction.clamp(0.0, 1.0)) {
                Sample {
                    value: corrupt_check_char(&mut rng, &kind, &value),
                    kind,
                    expect_valid: false,
                }
            } else {
                Sample {
                    kind,
                    value,
                    expect_valid: true,
                }
            }
        })
        .collect()
}
