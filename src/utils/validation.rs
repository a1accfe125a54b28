use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

use crate::utils::error::FieldError;

// Flatten validator's error map into the list sent to clients.
// Field names are reported the way the client spelled them (camelCase).
pub fn field_details(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut details: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = camel_case(&field);
            errs.iter().map(move |e| FieldError {
                field: field.clone(),
                message: match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                },
            })
        })
        .collect();

    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

pub fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

// Amount columns are DECIMAL(10,2)
const AMOUNT_SCALE: u32 = 2;

/// Largest amount an amount column can store (99,999,999.99).
pub fn max_amount() -> Decimal {
    Decimal::new(9_999_999_999, AMOUNT_SCALE)
}

pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("range").with_message("Price must be positive".into()));
    }
    if price.normalize().scale() > AMOUNT_SCALE {
        return Err(ValidationError::new("scale")
            .with_message("Price can have at most 2 decimal places".into()));
    }
    if *price > max_amount() {
        return Err(ValidationError::new("range")
            .with_message("Price must be less than 100000000".into()));
    }
    Ok(())
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Must not be blank".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn camel_case_converts_snake_fields() {
        assert_eq!(camel_case("room_number"), "roomNumber");
        assert_eq!(camel_case("price_per_night"), "pricePerNight");
        assert_eq!(camel_case("name"), "name");
        assert_eq!(camel_case("per_page"), "perPage");
    }

    #[test]
    fn negative_price_is_rejected() {
        assert!(validate_price(&dec("-0.01")).is_err());
        assert!(validate_price(&dec("0")).is_ok());
        assert!(validate_price(&dec("120.50")).is_ok());
    }

    #[test]
    fn price_must_fit_the_amount_column() {
        assert!(validate_price(&dec("12.345")).is_err());
        assert!(validate_price(&dec("12.3400")).is_ok());
        assert!(validate_price(&dec("1000000000000")).is_err());
        assert!(validate_price(&dec("100000000")).is_err());
        assert!(validate_price(&dec("99999999.99")).is_ok());
    }

    #[test]
    fn blank_strings_are_rejected() {
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("hotel-1").is_ok());
    }

    #[test]
    fn field_details_are_sorted_and_camel_cased() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "room_number",
            ValidationError::new("length").with_message("Room number is required".into()),
        );
        errors.add("hotel_id", ValidationError::new("blank"));

        let details = field_details(&errors);
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].field, "hotelId");
        assert_eq!(details[0].message, "blank");
        assert_eq!(details[1].field, "roomNumber");
        assert_eq!(details[1].message, "Room number is required");
    }
}
