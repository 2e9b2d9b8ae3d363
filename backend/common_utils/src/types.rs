//! Amount unit types and conversions between them.

use common_enums::Currency;
use error_stack::report;
use rust_decimal::{
    prelude::{FromPrimitive, ToPrimitive},
    Decimal,
};
use serde::{Deserialize, Serialize};

use crate::errors::{CustomResult, ParsingError};

/// Converts the core minor-unit amount into whatever representation a
/// connector expects on the wire, and back.
pub trait AmountConvertor: Send {
    type Output;

    fn convert(
        &self,
        amount: MinorUnit,
        currency: Currency,
    ) -> CustomResult<Self::Output, ParsingError>;

    fn convert_back(
        &self,
        amount: Self::Output,
        currency: Currency,
    ) -> CustomResult<MinorUnit, ParsingError>;
}

/// Amount in the smallest unit of the currency (cents for USD).
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct MinorUnit(i64);

impl MinorUnit {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get_amount_as_i64(self) -> i64 {
        self.0
    }

    fn to_major_unit_as_f64(self, currency: Currency) -> CustomResult<FloatMajorUnit, ParsingError> {
        let amount_decimal = Decimal::from_i64(self.0)
            .ok_or_else(|| report!(ParsingError::I64ToDecimalConversionFailure(self.0)))?;
        let major = amount_decimal
            / Decimal::from(10_i64.pow(currency.number_of_decimal_digits()));
        let value = major
            .to_f64()
            .ok_or_else(|| report!(ParsingError::DecimalToF64ConversionFailure))?;
        Ok(FloatMajorUnit::new(value))
    }

    fn to_major_unit_as_string(
        self,
        currency: Currency,
    ) -> CustomResult<StringMajorUnit, ParsingError> {
        let amount_decimal = Decimal::from_i64(self.0)
            .ok_or_else(|| report!(ParsingError::I64ToDecimalConversionFailure(self.0)))?;
        let mut major =
            amount_decimal / Decimal::from(10_i64.pow(currency.number_of_decimal_digits()));
        major.rescale(currency.number_of_decimal_digits());
        Ok(StringMajorUnit::new(major.to_string()))
    }
}

/// Amount in the base unit of the currency, as entered on the form.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, PartialOrd, Serialize)]
pub struct FloatMajorUnit(f64);

impl FloatMajorUnit {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn get_amount_as_f64(self) -> f64 {
        self.0
    }

    pub fn to_minor_unit_as_i64(self, currency: Currency) -> CustomResult<MinorUnit, ParsingError> {
        let amount_decimal = Decimal::from_f64(self.0)
            .ok_or_else(|| report!(ParsingError::FloatToDecimalConversionFailure(self.0)))?;
        let minor =
            (amount_decimal * Decimal::from(10_i64.pow(currency.number_of_decimal_digits()))).round();
        let value = minor
            .to_i64()
            .ok_or_else(|| report!(ParsingError::DecimalToI64ConversionFailure))?;
        Ok(MinorUnit::new(value))
    }
}

/// Amount in the base unit of the currency, rendered with the currency's
/// decimal places ("1.00").
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct StringMajorUnit(String);

impl StringMajorUnit {
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    pub fn get_amount_as_string(&self) -> &str {
        &self.0
    }
}

/// Connector-facing conversion into two-decimal major-unit strings.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct StringMajorUnitForConnector;

impl AmountConvertor for StringMajorUnitForConnector {
    type Output = StringMajorUnit;

    fn convert(
        &self,
        amount: MinorUnit,
        currency: Currency,
    ) -> CustomResult<Self::Output, ParsingError> {
        amount.to_major_unit_as_string(currency)
    }

    fn convert_back(
        &self,
        amount: Self::Output,
        currency: Currency,
    ) -> CustomResult<MinorUnit, ParsingError> {
        let amount_decimal: Decimal = amount
            .0
            .parse()
            .map_err(|_| report!(ParsingError::StructParseFailure("StringMajorUnit")))?;
        let minor = (amount_decimal
            * Decimal::from(10_i64.pow(currency.number_of_decimal_digits())))
        .round();
        let value = minor
            .to_i64()
            .ok_or_else(|| report!(ParsingError::DecimalToI64ConversionFailure))?;
        Ok(MinorUnit::new(value))
    }
}

/// Connector-facing conversion keeping amounts in minor units.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct MinorUnitForConnector;

impl AmountConvertor for MinorUnitForConnector {
    type Output = MinorUnit;

    fn convert(
        &self,
        amount: MinorUnit,
        _currency: Currency,
    ) -> CustomResult<Self::Output, ParsingError> {
        Ok(amount)
    }

    fn convert_back(
        &self,
        amount: Self::Output,
        _currency: Currency,
    ) -> CustomResult<MinorUnit, ParsingError> {
        Ok(amount)
    }
}

/// Connector-facing conversion into floating-point major units.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FloatMajorUnitForConnector;

impl AmountConvertor for FloatMajorUnitForConnector {
    type Output = FloatMajorUnit;

    fn convert(
        &self,
        amount: MinorUnit,
        currency: Currency,
    ) -> CustomResult<Self::Output, ParsingError> {
        amount.to_major_unit_as_f64(currency)
    }

    fn convert_back(
        &self,
        amount: Self::Output,
        currency: Currency,
    ) -> CustomResult<MinorUnit, ParsingError> {
        amount.to_minor_unit_as_i64(currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_to_string_major_carries_two_decimals() {
        let converted = StringMajorUnitForConnector
            .convert(MinorUnit::new(100), Currency::Usd)
            .unwrap();
        assert_eq!(converted.get_amount_as_string(), "1.00");

        let converted = StringMajorUnitForConnector
            .convert(MinorUnit::new(1250), Currency::Usd)
            .unwrap();
        assert_eq!(converted.get_amount_as_string(), "12.50");
    }

    #[test]
    fn string_major_converts_back_to_minor() {
        let minor = StringMajorUnitForConnector
            .convert_back(StringMajorUnit::new("12.50".to_string()), Currency::Usd)
            .unwrap();
        assert_eq!(minor, MinorUnit::new(1250));
    }

    #[test]
    fn float_major_rounds_to_minor() {
        let minor = FloatMajorUnit::new(1.55)
            .to_minor_unit_as_i64(Currency::Usd)
            .unwrap();
        assert_eq!(minor.get_amount_as_i64(), 155);

        let minor = FloatMajorUnit::new(1.0)
            .to_minor_unit_as_i64(Currency::Usd)
            .unwrap();
        assert_eq!(minor.get_amount_as_i64(), 100);
    }
}
