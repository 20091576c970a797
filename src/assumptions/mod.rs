//! Business assumptions driving the projection: rates, sales, purchases, timing and payroll

mod error;
mod validation;
pub mod loader;

pub use error::AssumptionsError;
pub use validation::{ValidationWarning, WarningKind};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Snake-case names of every assumption field, in input-form order
pub const FIELD_NAMES: [&str; 19] = [
    "vat_rate",
    "payroll_tax_rate",
    "corporate_tax_rate",
    "monthly_sales",
    "margin",
    "export_share",
    "domestic_share",
    "collection_prepayment",
    "collection_14_days",
    "collection_90_days",
    "monthly_purchase",
    "import_share",
    "domestic_purchase_share",
    "payment_prepayment",
    "payment_due_next_month",
    "initial_cash",
    "initial_stock",
    "employee_count",
    "gross_wage",
];

/// Container for all projection assumptions
///
/// Values are held constant across the whole horizon. Fractions are plain
/// decimals (0.21 for 21%). Nothing here is range-checked; see [`Assumptions::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    // Taxes & payroll
    /// VAT rate applied to domestic sales and purchases
    pub vat_rate: f64,
    /// Employer payroll levy on gross wages
    pub payroll_tax_rate: f64,
    /// Corporate income tax on positive EBT
    pub corporate_tax_rate: f64,

    // Sales
    /// Net sales per month
    pub monthly_sales: f64,
    /// Gross margin as a fraction of net sales
    pub margin: f64,
    /// Share of sales exported (zero-rated for VAT)
    pub export_share: f64,
    /// Share of sales invoiced domestically with VAT
    pub domestic_share: f64,

    // Receivables (inflow timing)
    /// Fraction of invoiced amount collected up front in the month of sale
    pub collection_prepayment: f64,
    /// Fraction collected on 14-day terms (same month)
    pub collection_14_days: f64,
    /// Fraction collected on 90-day terms (three months later)
    pub collection_90_days: f64,

    // Purchases & stock
    /// Net purchases per month
    pub monthly_purchase: f64,
    /// Share of purchases imported (no input VAT)
    pub import_share: f64,
    /// Share of purchases bought domestically with VAT
    pub domestic_purchase_share: f64,
    /// Fraction of the purchase liability paid in the month of purchase
    pub payment_prepayment: f64,
    /// Fraction of the purchase liability paid the following month
    pub payment_due_next_month: f64,

    // Initial state
    pub initial_cash: f64,
    pub initial_stock: f64,

    // Employees
    /// Headcount once payroll starts; may be fractional (FTE)
    pub employee_count: f64,
    /// Monthly gross wage per employee
    pub gross_wage: f64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            vat_rate: 0.21,
            payroll_tax_rate: 0.338,
            corporate_tax_rate: 0.21,
            monthly_sales: 8_000_000.0,
            margin: 0.10,
            export_share: 0.50,
            domestic_share: 0.50,
            collection_prepayment: 0.20,
            collection_14_days: 0.50,
            collection_90_days: 0.30,
            monthly_purchase: 10_000_000.0,
            import_share: 0.90,
            domestic_purchase_share: 0.10,
            payment_prepayment: 0.80,
            payment_due_next_month: 0.20,
            initial_cash: 500_000.0,
            initial_stock: 0.0,
            employee_count: 3.0,
            gross_wage: 50_000.0,
        }
    }
}

impl Assumptions {
    /// Load assumptions from a JSON or CSV file, chosen by extension
    pub fn from_path(path: &Path) -> Result<Self, AssumptionsError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_path(path),
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::from_csv_path(path),
            _ => Err(AssumptionsError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Load assumptions from a JSON object; missing fields keep their defaults
    pub fn from_json_path(path: &Path) -> Result<Self, AssumptionsError> {
        loader::load_json(path)
    }

    /// Load assumptions from a `field,value` CSV file; missing fields keep their defaults
    pub fn from_csv_path(path: &Path) -> Result<Self, AssumptionsError> {
        loader::load_csv(path)
    }

    /// Load the shipped defaults from data/assumptions.csv
    pub fn from_csv() -> Result<Self, AssumptionsError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Get a field by its snake_case name
    pub fn get_field(&self, name: &str) -> Option<f64> {
        let value = match name {
            "vat_rate" => self.vat_rate,
            "payroll_tax_rate" => self.payroll_tax_rate,
            "corporate_tax_rate" => self.corporate_tax_rate,
            "monthly_sales" => self.monthly_sales,
            "margin" => self.margin,
            "export_share" => self.export_share,
            "domestic_share" => self.domestic_share,
            "collection_prepayment" => self.collection_prepayment,
            "collection_14_days" => self.collection_14_days,
            "collection_90_days" => self.collection_90_days,
            "monthly_purchase" => self.monthly_purchase,
            "import_share" => self.import_share,
            "domestic_purchase_share" => self.domestic_purchase_share,
            "payment_prepayment" => self.payment_prepayment,
            "payment_due_next_month" => self.payment_due_next_month,
            "initial_cash" => self.initial_cash,
            "initial_stock" => self.initial_stock,
            "employee_count" => self.employee_count,
            "gross_wage" => self.gross_wage,
            _ => return None,
        };
        Some(value)
    }

    /// Set a field by its snake_case name
    pub fn set_field(&mut self, name: &str, value: f64) -> Result<(), AssumptionsError> {
        let slot = match name {
            "vat_rate" => &mut self.vat_rate,
            "payroll_tax_rate" => &mut self.payroll_tax_rate,
            "corporate_tax_rate" => &mut self.corporate_tax_rate,
            "monthly_sales" => &mut self.monthly_sales,
            "margin" => &mut self.margin,
            "export_share" => &mut self.export_share,
            "domestic_share" => &mut self.domestic_share,
            "collection_prepayment" => &mut self.collection_prepayment,
            "collection_14_days" => &mut self.collection_14_days,
            "collection_90_days" => &mut self.collection_90_days,
            "monthly_purchase" => &mut self.monthly_purchase,
            "import_share" => &mut self.import_share,
            "domestic_purchase_share" => &mut self.domestic_purchase_share,
            "payment_prepayment" => &mut self.payment_prepayment,
            "payment_due_next_month" => &mut self.payment_due_next_month,
            "initial_cash" => &mut self.initial_cash,
            "initial_stock" => &mut self.initial_stock,
            "employee_count" => &mut self.employee_count,
            "gross_wage" => &mut self.gross_wage,
            other => return Err(AssumptionsError::UnknownField(other.to_string())),
        };
        *slot = value;
        Ok(())
    }

    /// Apply a `field=value` override, as given on the command line
    pub fn apply_override(&mut self, assignment: &str) -> Result<(), AssumptionsError> {
        let (name, raw) = assignment
            .split_once('=')
            .ok_or_else(|| AssumptionsError::InvalidValue {
                field: assignment.to_string(),
                value: String::new(),
            })?;
        let name = name.trim();
        let value: f64 = raw.trim().parse().map_err(|_| AssumptionsError::InvalidValue {
            field: name.to_string(),
            value: raw.trim().to_string(),
        })?;
        self.set_field(name, value)
    }

    /// Check the assumptions for suspicious values without changing them
    pub fn validate(&self) -> Vec<ValidationWarning> {
        validation::validate(self)
    }
}
