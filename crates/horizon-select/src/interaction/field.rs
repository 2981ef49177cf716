//! Label, description, and error-message association for the trigger.

use super::id::{generate_id, join_ids};
use super::props::TextSlotProps;

/// Ids for the field's text slots, generated once per widget instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIds {
    /// Fallback id of the labelled element.
    pub field: String,
    /// Id of the visible label.
    pub label: String,
    /// Id of the description text.
    pub description: String,
    /// Id of the error message text.
    pub error_message: String,
}

impl FieldIds {
    /// Generate a fresh set of ids.
    pub fn generate() -> Self {
        Self {
            field: generate_id("horizon-select"),
            label: generate_id("horizon-select-label"),
            description: generate_id("horizon-select-description"),
            error_message: generate_id("horizon-select-error"),
        }
    }
}

/// What the field knows about its labelling.
#[derive(Debug, Clone, Default)]
pub struct FieldOptions<'a> {
    /// Caller-supplied id for the labelled element.
    pub id: Option<&'a str>,
    /// Accessible name given directly.
    pub aria_label: Option<&'a str>,
    /// Ids of elements naming the field.
    pub aria_labelledby: Option<&'a str>,
    /// Ids of elements describing the field.
    pub aria_describedby: Option<&'a str>,
    /// Id of an element with extended details.
    pub aria_details: Option<&'a str>,
    /// Whether a visible label is rendered.
    pub has_label: bool,
    /// Whether description text is rendered.
    pub has_description: bool,
    /// Whether error text is rendered while invalid.
    pub has_error_message: bool,
    /// Whether the field is invalid.
    pub is_invalid: bool,
}

/// Labelling attributes for the labelled element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldProps {
    /// Element id.
    pub id: String,
    /// `aria-label`.
    pub aria_label: Option<String>,
    /// `aria-labelledby`.
    pub aria_labelledby: Option<String>,
    /// `aria-describedby`.
    pub aria_describedby: Option<String>,
    /// `aria-details`.
    pub aria_details: Option<String>,
}

/// Props for the labelled element and its text slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAria {
    /// Props for the visible label.
    pub label_props: TextSlotProps,
    /// Props for the labelled element.
    pub field_props: FieldProps,
    /// Props for the description text.
    pub description_props: TextSlotProps,
    /// Props for the error message text.
    pub error_message_props: TextSlotProps,
}

impl FieldAria {
    /// Associate the field with its label and text slots.
    ///
    /// Text slots that are not rendered get no id and are left out of
    /// `aria-describedby`. When both an `aria-label` and `aria-labelledby`
    /// are present, the field names itself first so the label text is part
    /// of the accessible name.
    pub fn new(options: &FieldOptions<'_>, ids: &FieldIds) -> Self {
        let id = options.id.unwrap_or(&ids.field).to_string();

        let label_id = options.has_label.then(|| ids.label.clone());
        let mut aria_labelledby = join_ids([label_id.as_deref(), options.aria_labelledby]);
        if options.aria_label.is_some()
            && let Some(labelledby) = &aria_labelledby
            && !labelledby.split(' ').any(|part| part == id)
        {
            aria_labelledby = Some(format!("{id} {labelledby}"));
        }

        let description_id = options.has_description.then(|| ids.description.clone());
        let error_message_id =
            (options.has_error_message && options.is_invalid).then(|| ids.error_message.clone());
        let aria_describedby = join_ids([
            description_id.as_deref(),
            error_message_id.as_deref(),
            options.aria_describedby,
        ]);

        Self {
            label_props: TextSlotProps { id: label_id },
            field_props: FieldProps {
                id,
                aria_label: options.aria_label.map(str::to_string),
                aria_labelledby,
                aria_describedby,
                aria_details: options.aria_details.map(str::to_string),
            },
            description_props: TextSlotProps { id: description_id },
            error_message_props: TextSlotProps {
                id: error_message_id,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> FieldIds {
        FieldIds {
            field: "f".into(),
            label: "l".into(),
            description: "d".into(),
            error_message: "e".into(),
        }
    }

    #[test]
    fn test_plain_field() {
        let aria = FieldAria::new(&FieldOptions::default(), &ids());
        assert_eq!(aria.field_props.id, "f");
        assert_eq!(aria.field_props.aria_labelledby, None);
        assert_eq!(aria.field_props.aria_describedby, None);
        assert_eq!(aria.label_props.id, None);
    }

    #[test]
    fn test_caller_id_wins() {
        let options = FieldOptions {
            id: Some("mine"),
            ..FieldOptions::default()
        };
        assert_eq!(FieldAria::new(&options, &ids()).field_props.id, "mine");
    }

    #[test]
    fn test_label_and_describedby() {
        let options = FieldOptions {
            aria_labelledby: Some("outer"),
            aria_describedby: Some("hint"),
            has_label: true,
            has_description: true,
            has_error_message: true,
            is_invalid: true,
            ..FieldOptions::default()
        };
        let aria = FieldAria::new(&options, &ids());
        assert_eq!(aria.field_props.aria_labelledby.as_deref(), Some("l outer"));
        assert_eq!(aria.field_props.aria_describedby.as_deref(), Some("d e hint"));
        assert_eq!(aria.error_message_props.id.as_deref(), Some("e"));
    }

    #[test]
    fn test_error_id_only_when_invalid() {
        let options = FieldOptions {
            has_error_message: true,
            ..FieldOptions::default()
        };
        let aria = FieldAria::new(&options, &ids());
        assert_eq!(aria.error_message_props.id, None);
        assert_eq!(aria.field_props.aria_describedby, None);
    }

    #[test]
    fn test_aria_label_with_labelledby_names_self() {
        let options = FieldOptions {
            aria_label: Some("Pets"),
            aria_labelledby: Some("heading"),
            ..FieldOptions::default()
        };
        let aria = FieldAria::new(&options, &ids());
        assert_eq!(aria.field_props.aria_labelledby.as_deref(), Some("f heading"));
    }
}
