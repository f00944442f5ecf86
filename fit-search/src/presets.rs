// SPDX-License-Identifier: MIT
//! # Link Budget Presets
//!
//! Named byte budgets for the constrained links this search was built for.
//! Each preset is simply a hard payload ceiling in bytes; the CLI exposes
//! them so operators can say `--preset iridium` instead of remembering the
//! modem's framing limit.

/// Byte budgets of common bandwidth-constrained uplinks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum BudgetPreset {
    /// Iridium SBD mobile-originated message payload: 340 bytes.
    #[clap(name = "iridium")]
    Iridium,
    /// FiPy-class LoRa/Sigfox dev-board uplink budget: 3800 bytes.
    #[clap(name = "fipy")]
    FiPy,
}

impl BudgetPreset {
    /// The byte budget this preset stands for.
    pub fn bytes(self) -> usize {
        match self {
            BudgetPreset::Iridium => 340,
            BudgetPreset::FiPy => 3800,
        }
    }
}
