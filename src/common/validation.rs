// src/common/validation.rs

use validator::{ValidationError, ValidationErrors};

use crate::models::money::Money;

/// Monta um `ValidationError` com mensagem legível para o cliente.
pub fn invalid(code: &'static str, message: impl Into<String>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into().into());
    error
}

/// Empacota um erro de regra cruzada num `ValidationErrors` preso a um campo,
/// para manter o mesmo formato de resposta das validações do derive.
pub fn field_error(field: &'static str, error: ValidationError) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    errors
}

pub fn validate_positive(value: &Money) -> Result<(), ValidationError> {
    if !value.is_positive() {
        return Err(invalid("range", "amount must be positive"));
    }
    validate_bounded(value)
}

pub fn validate_not_negative(value: &Money) -> Result<(), ValidationError> {
    if value.is_negative() {
        return Err(invalid("range", "amount must be non-negative"));
    }
    validate_bounded(value)
}

/// Teto absoluto de qualquer valor monetário recebido.
pub fn validate_bounded(value: &Money) -> Result<(), ValidationError> {
    if !value.within_entry_bounds() {
        return Err(invalid(
            "range",
            format!("amount must be within ±{}", Money::MAX_ENTRY),
        ));
    }
    Ok(())
}

pub fn validate_positive_id(value: i64) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(invalid("range", "id must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_bounds() {
        assert!(validate_positive(&Money::ZERO).is_err());
        assert!(validate_positive(&Money::from_minor(1)).is_ok());
        assert!(validate_not_negative(&Money::ZERO).is_ok());
        assert!(validate_not_negative(&Money::from_minor(-1)).is_err());
    }

    #[test]
    fn amounts_past_the_entry_ceiling_are_rejected() {
        let huge = Money::from_minor(i64::MAX / 2);
        assert!(validate_positive(&huge).is_err());
        assert!(validate_not_negative(&huge).is_err());
        assert!(validate_bounded(&Money::from_minor(-(i64::MAX / 2))).is_err());
        assert!(validate_bounded(&Money::MAX_ENTRY).is_ok());
    }

    #[test]
    fn field_error_keeps_message() {
        let errors = field_error("transfer_account_id", invalid("required", "required"));
        let fields = errors.field_errors();
        assert_eq!(fields["transfer_account_id"][0].code, "required");
    }
}
