//! Advisory checks on assumptions
//!
//! The projection engine accepts any numbers; these checks only flag inputs a
//! planner most likely did not intend. Nothing is corrected.

use super::Assumptions;
use serde::Serialize;
use std::fmt;

const SUM_TOLERANCE: f64 = 1e-9;

/// Category of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningKind {
    /// A rate or share outside [0, 1]
    FractionOutOfRange,
    /// A money amount or headcount below zero
    NegativeAmount,
    /// A set of shares that should add up to 1 does not
    SharesDoNotSumToOne,
}

/// One validation finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationWarning {
    pub kind: WarningKind,
    /// Field name, or `a+b+c` for a share group
    pub field: String,
    /// Offending value (the sum for share groups)
    pub value: f64,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            WarningKind::FractionOutOfRange => {
                write!(f, "{} = {} is outside [0, 1]", self.field, self.value)
            }
            WarningKind::NegativeAmount => write!(f, "{} = {} is negative", self.field, self.value),
            WarningKind::SharesDoNotSumToOne => {
                write!(f, "{} sums to {} instead of 1", self.field, self.value)
            }
        }
    }
}

pub(super) fn validate(a: &Assumptions) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let fractions = [
        ("vat_rate", a.vat_rate),
        ("payroll_tax_rate", a.payroll_tax_rate),
        ("corporate_tax_rate", a.corporate_tax_rate),
        ("margin", a.margin),
        ("export_share", a.export_share),
        ("domestic_share", a.domestic_share),
        ("collection_prepayment", a.collection_prepayment),
        ("collection_14_days", a.collection_14_days),
        ("collection_90_days", a.collection_90_days),
        ("import_share", a.import_share),
        ("domestic_purchase_share", a.domestic_purchase_share),
        ("payment_prepayment", a.payment_prepayment),
        ("payment_due_next_month", a.payment_due_next_month),
    ];
    for (field, value) in fractions {
        if !(0.0..=1.0).contains(&value) {
            warnings.push(ValidationWarning {
                kind: WarningKind::FractionOutOfRange,
                field: field.to_string(),
                value,
            });
        }
    }

    let amounts = [
        ("monthly_sales", a.monthly_sales),
        ("monthly_purchase", a.monthly_purchase),
        ("initial_cash", a.initial_cash),
        ("initial_stock", a.initial_stock),
        ("employee_count", a.employee_count),
        ("gross_wage", a.gross_wage),
    ];
    for (field, value) in amounts {
        if value < 0.0 {
            warnings.push(ValidationWarning {
                kind: WarningKind::NegativeAmount,
                field: field.to_string(),
                value,
            });
        }
    }

    let groups: [(&[&str], f64); 4] = [
        (
            &["collection_prepayment", "collection_14_days", "collection_90_days"],
            a.collection_prepayment + a.collection_14_days + a.collection_90_days,
        ),
        (
            &["payment_prepayment", "payment_due_next_month"],
            a.payment_prepayment + a.payment_due_next_month,
        ),
        (&["export_share", "domestic_share"], a.export_share + a.domestic_share),
        (
            &["import_share", "domestic_purchase_share"],
            a.import_share + a.domestic_purchase_share,
        ),
    ];
    for (fields, sum) in groups {
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            warnings.push(ValidationWarning {
                kind: WarningKind::SharesDoNotSumToOne,
                field: fields.join("+"),
                value: sum,
            });
        }
    }

    warnings
}
