mod country;
mod legacy;
mod payslip;
mod salary;
mod tax_bracket;

pub use country::Country;
pub use legacy::{LegacyPayslip, from_legacy, to_legacy};
pub use payslip::{ExtractionMethod, PayslipExtracted};
pub use salary::{PayrollConfig, SalaryInput, SalaryOutput};
pub use tax_bracket::{ScheduleError, TaxBracket, TaxKind, validate_schedule};
