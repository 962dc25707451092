//! The full set of statutory tables.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

use super::health_insurance::HealthInsuranceSchedule;
use super::housing_fund::HousingFundSchedule;
use super::social_insurance::SocialInsuranceSchedule;
use super::withholding_tax::WithholdingTaxSchedule;

/// Every schedule the deduction calculator consults.
///
/// `ContributionTables::default()` holds the statutory values; a configuration
/// directory can replace any of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionTables {
    /// Social-insurance step table.
    pub social_insurance: SocialInsuranceSchedule,
    /// Health-insurance premium schedule.
    pub health_insurance: HealthInsuranceSchedule,
    /// Housing-fund schedule.
    pub housing_fund: HousingFundSchedule,
    /// Withholding-tax brackets.
    pub withholding_tax: WithholdingTaxSchedule,
}

impl ContributionTables {
    /// Validates every schedule, returning the first problem found.
    pub fn validate(&self) -> EngineResult<()> {
        self.social_insurance.validate()?;
        self.health_insurance.validate()?;
        self.housing_fund.validate()?;
        self.withholding_tax.validate()
    }
}
