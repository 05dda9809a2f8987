use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// The field messages produced when a form fails its schema.
///
/// Displays as the messages joined with `,`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", .0.join(","))]
pub struct ValidationFailure(Vec<String>);

impl ValidationFailure {
    /// A failure carrying exactly one message
    pub fn single(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }

    /// The individual messages, ordered by field name
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl From<ValidationErrors> for ValidationFailure {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors
            .errors()
            .iter()
            .filter_map(|(field, kind)| match kind {
                ValidationErrorsKind::Field(errors) => Some((field.as_ref(), errors)),
                _ => None,
            })
            .collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        let messages = fields
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("\"{}\" is invalid", field),
                })
            })
            .collect();

        Self(messages)
    }
}

/// Checks `input` against its declared schema without touching anything else.
pub fn check<T: Validate>(input: &T) -> Result<(), ValidationFailure> {
    input.validate().map_err(ValidationFailure::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_messages_are_sorted_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add("zeta", ValidationError::new("required"));
        errors.add(
            "alpha",
            ValidationError::new("required").with_message("\"alpha\" is required".into()),
        );

        let failure = ValidationFailure::from(errors);

        assert_eq!(
            failure.messages(),
            ["\"alpha\" is required", "\"zeta\" is invalid"]
        );
        assert_eq!(
            failure.to_string(),
            "\"alpha\" is required,\"zeta\" is invalid"
        );
    }

    #[test]
    fn test_single_message() {
        let failure = ValidationFailure::single("\"price\" must be a number");
        assert_eq!(failure.to_string(), "\"price\" must be a number");
    }
}
