pub const DEFAULT_OPTION_LABEL: &str = "-- Select Time --";
pub const NO_SLOTS_LABEL: &str = "No available slots";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SlotOption {
    fn enabled(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            disabled: false,
        }
    }
}

/// Contents of the time selector after a completed slot fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOptions {
    pub options: Vec<SlotOption>,
    /// Value to select; empty selects the default option
    pub selected: String,
    /// Whether the selector itself should be disabled
    pub control_disabled: bool,
}

impl SlotOptions {
    /// Default option followed by one option per slot in received order.
    /// `previous` is restored when it is still offered.
    pub fn from_slots(slots: &[String], previous: &str) -> Self {
        if slots.is_empty() {
            return Self {
                options: vec![SlotOption {
                    value: String::new(),
                    label: NO_SLOTS_LABEL.to_string(),
                    disabled: true,
                }],
                selected: String::new(),
                control_disabled: true,
            };
        }

        let mut options = Vec::with_capacity(slots.len() + 1);
        options.push(SlotOption::enabled("", DEFAULT_OPTION_LABEL));
        options.extend(slots.iter().map(|slot| SlotOption::enabled(slot, slot)));

        let selected = if !previous.is_empty() && slots.iter().any(|s| s == previous) {
            previous.to_string()
        } else {
            String::new()
        };

        Self {
            options,
            selected,
            control_disabled: false,
        }
    }
}

/// Note rendered under the selector after a successful fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityMessage {
    pub css_class: &'static str,
    pub text: String,
}

impl AvailabilityMessage {
    pub fn for_count(count: usize) -> Self {
        match count {
            0 => Self {
                css_class: "text-danger mt-1 small",
                text: "No available slots for this date".to_string(),
            },
            1 => Self {
                css_class: "text-success mt-1 small",
                text: "1 time slot available".to_string(),
            },
            n => Self {
                css_class: "text-success mt-1 small",
                text: format!("{} time slots available", n),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_previous_selection_preserved() {
        let options = SlotOptions::from_slots(&slots(&["09:00", "09:30"]), "09:30");
        assert_eq!(options.selected, "09:30");
        assert!(!options.control_disabled);
        let values: Vec<_> = options.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["", "09:00", "09:30"]);
        assert_eq!(options.options[0].label, DEFAULT_OPTION_LABEL);
    }

    #[test]
    fn test_selection_reverts_to_default() {
        let options = SlotOptions::from_slots(&slots(&["10:00"]), "09:30");
        assert_eq!(options.selected, "");
        assert_eq!(options.options.len(), 2);
    }

    #[test]
    fn test_empty_slots_placeholder() {
        let options = SlotOptions::from_slots(&[], "09:30");
        assert_eq!(options.options.len(), 1);
        assert_eq!(options.options[0].label, "No available slots");
        assert!(options.options[0].disabled);
        assert!(options.control_disabled);
        assert_eq!(options.selected, "");
    }

    #[test]
    fn test_order_follows_response() {
        let options = SlotOptions::from_slots(&slots(&["11:00", "09:00", "10:00"]), "");
        let labels: Vec<_> = options.options[1..].iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["11:00", "09:00", "10:00"]);
    }

    #[test]
    fn test_availability_message() {
        assert_eq!(AvailabilityMessage::for_count(0).text, "No available slots for this date");
        assert_eq!(AvailabilityMessage::for_count(0).css_class, "text-danger mt-1 small");
        assert_eq!(AvailabilityMessage::for_count(1).text, "1 time slot available");
        assert_eq!(AvailabilityMessage::for_count(4).text, "4 time slots available");
    }
}
