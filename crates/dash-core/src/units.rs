//! Units of measure attached to field names.
//!
//! The core only labels values with a unit; suffixes and precision are the
//! presentation layer's business.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::rows::fields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// 100 million KRW (억원).
    HundredMillionWon,
    Percent,
    /// Difference of two percentages.
    PercentagePoint,
    Persons,
    Years,
    /// 100 million KRW per employee.
    HundredMillionWonPerHead,
    /// Labels and other non-numeric fields.
    Label,
}

impl Unit {
    /// Unit of a well-known field name.
    #[must_use]
    pub fn for_field(name: &str) -> Self {
        match name {
            fields::REVENUE | fields::OP | fields::AMOUNT => Self::HundredMillionWon,
            fields::OPM
            | fields::EBITDA_MARGIN
            | fields::VALUE
            | fields::SHARE
            | fields::DEVELOPER_RATIO => Self::Percent,
            fields::HEADCOUNT => Self::Persons,
            fields::AVG_TENURE => Self::Years,
            fields::OP_PER_EMPLOYEE => Self::HundredMillionWonPerHead,
            _ => Self::Label,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HundredMillionWon => "hundred_million_won",
            Self::Percent => "percent",
            Self::PercentagePoint => "percentage_point",
            Self::Persons => "persons",
            Self::Years => "years",
            Self::HundredMillionWonPerHead => "hundred_million_won_per_head",
            Self::Label => "label",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_fields_map_to_units() {
        assert_eq!(Unit::for_field("Revenue"), Unit::HundredMillionWon);
        assert_eq!(Unit::for_field("EBITDA_Margin"), Unit::Percent);
        assert_eq!(Unit::for_field("Headcount"), Unit::Persons);
        assert_eq!(Unit::for_field("Avg_Tenure"), Unit::Years);
        assert_eq!(Unit::for_field("OP_per_Employee"), Unit::HundredMillionWonPerHead);
        assert_eq!(Unit::for_field("entity"), Unit::Label);
    }
}
