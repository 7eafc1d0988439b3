use serde::{Deserialize, Serialize};

/// Countries whose payslip layouts and withholding schedules are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    Brazil,
    Portugal,
    France,
}

impl Country {
    pub const ALL: [Country; 3] = [Country::Brazil, Country::Portugal, Country::France];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brazil => "BR",
            Self::Portugal => "PT",
            Self::France => "FR",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BR" => Some(Self::Brazil),
            "PT" => Some(Self::Portugal),
            "FR" => Some(Self::France),
            _ => None,
        }
    }

    /// Whether payslips in this country carry an employer-funded severance
    /// fund (FGTS in Brazil). Payroll-fund fields normalize to `None`
    /// everywhere else.
    pub fn has_payroll_fund(&self) -> bool {
        matches!(self, Self::Brazil)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_code() {
        for country in Country::ALL {
            assert_eq!(Country::parse(country.as_str()), Some(country));
        }
    }

    #[test]
    fn parse_rejects_unknown_code() {
        assert_eq!(Country::parse("US"), None);
        assert_eq!(Country::parse("br"), None);
    }

    #[test]
    fn only_brazil_has_a_payroll_fund() {
        assert!(Country::Brazil.has_payroll_fund());
        assert!(!Country::Portugal.has_payroll_fund());
        assert!(!Country::France.has_payroll_fund());
    }
}
