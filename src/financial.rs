//! Pricing helpers fed from a form rather than from the keypad.

use serde::Deserialize;

use crate::error::ValidationError;

/// Forms the keypad can open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FinancialKind {
    Margin,
    Markup,
    /// Present value / future value / payment. Declared but not computed.
    PresentValue,
}

impl FinancialKind {
    pub fn token(self) -> &'static str {
        match self {
            Self::Margin => "margin",
            Self::Markup => "markup",
            Self::PresentValue => "pvfmpt",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Margin => "Compute: Margin",
            Self::Markup => "Compute: Markup",
            Self::PresentValue => "Compute: Pvfmpt",
        }
    }

    /// Field names the form asks for.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Margin | Self::Markup => &["costPrice", "sellingPrice"],
            Self::PresentValue => &["pv", "fv", "pmt", "rate", "n"],
        }
    }
}

/// Submitted form values. Fields the form did not carry, or that failed to
/// parse as numbers, are `None`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FinancialForm {
    pub cost_price: Option<f64>,
    pub selling_price: Option<f64>,
    pub pv: Option<f64>,
    pub fv: Option<f64>,
    pub pmt: Option<f64>,
    pub rate: Option<f64>,
    pub n: Option<f64>,
}

impl FinancialForm {
    pub fn pricing(cost_price: f64, selling_price: f64) -> Self {
        Self {
            cost_price: Some(cost_price),
            selling_price: Some(selling_price),
            ..Self::default()
        }
    }

    /// Builds a form from raw `name=value` pairs, ignoring unknown names.
    pub fn from_pairs<'n, 'v>(pairs: impl IntoIterator<Item = (&'n str, &'v str)>) -> Self {
        let mut form = Self::default();
        for (name, raw) in pairs {
            let value = raw.trim().parse::<f64>().ok();
            let slot = match name {
                "costPrice" => &mut form.cost_price,
                "sellingPrice" => &mut form.selling_price,
                "pv" => &mut form.pv,
                "fv" => &mut form.fv,
                "pmt" => &mut form.pmt,
                "rate" => &mut form.rate,
                "n" => &mut form.n,
                _ => continue,
            };
            *slot = value;
        }
        form
    }

    /// Cost and selling price, both required to be strictly positive.
    pub fn prices(&self) -> Result<(f64, f64), ValidationError> {
        let cost = require_positive("costPrice", self.cost_price)?;
        let selling = require_positive("sellingPrice", self.selling_price)?;
        Ok((cost, selling))
    }
}

fn require_positive(field: &'static str, value: Option<f64>) -> Result<f64, ValidationError> {
    match value {
        None => Err(ValidationError::Missing { field }),
        Some(value) if value > 0.0 => Ok(value),
        Some(value) => Err(ValidationError::NonPositive { field, value }),
    }
}

/// Profit as a percentage of the selling price.
pub fn margin(cost: f64, selling: f64) -> f64 {
    (selling - cost) / selling * 100.0
}

/// Profit as a percentage of the cost price.
pub fn markup(cost: f64, selling: f64) -> f64 {
    (selling - cost) / cost * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_and_markup() {
        assert_eq!(margin(50.0, 100.0), 50.0);
        assert_eq!(markup(50.0, 100.0), 100.0);
    }

    #[test]
    fn loss_is_negative() {
        assert_eq!(margin(100.0, 80.0), -25.0);
        assert_eq!(markup(100.0, 80.0), -20.0);
    }

    #[test]
    fn non_positive_inputs_are_rejected() {
        assert_eq!(FinancialForm::pricing(50.0, 100.0).prices(), Ok((50.0, 100.0)));
        assert_eq!(
            FinancialForm::pricing(0.0, 100.0).prices(),
            Err(ValidationError::NonPositive {
                field: "costPrice",
                value: 0.0
            })
        );
        assert_eq!(
            FinancialForm::pricing(50.0, -1.0).prices(),
            Err(ValidationError::NonPositive {
                field: "sellingPrice",
                value: -1.0
            })
        );
        assert!(FinancialForm::pricing(f64::NAN, 100.0).prices().is_err());
        assert_eq!(
            FinancialForm::default().prices(),
            Err(ValidationError::Missing { field: "costPrice" })
        );
    }

    #[test]
    fn from_pairs_parses_known_fields() {
        let form = FinancialForm::from_pairs([
            ("costPrice", "50"),
            ("sellingPrice", " 100.5 "),
            ("rate", "abc"),
            ("colour", "red"),
        ]);
        assert_eq!(form.cost_price, Some(50.0));
        assert_eq!(form.selling_price, Some(100.5));
        assert_eq!(form.rate, None);
    }

    #[test]
    fn deserializes_from_camel_case() {
        let form: FinancialForm = toml::from_str("costPrice = 50.0\nsellingPrice = 100.0\n").unwrap();
        assert_eq!(form, FinancialForm::pricing(50.0, 100.0));
    }

    #[test]
    fn kinds() {
        assert_eq!(FinancialKind::Margin.title(), "Compute: Margin");
        assert_eq!(FinancialKind::PresentValue.fields().len(), 5);
    }
}
