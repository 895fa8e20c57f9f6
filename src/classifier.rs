use serde::Serialize;

const THRESHOLD: f32 = 0.5;
const CANCER_SUGGESTION: &str = "Seek medical attention immediately";
const NON_CANCER_SUGGESTION: &str = "No cancer indicators detected.";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Cancer,
    #[serde(rename = "Non-cancer")]
    NonCancer,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Cancer => "Cancer",
            Label::NonCancer => "Non-cancer",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Classification {
    pub result: Label,
    pub suggestion: &'static str,
}

/// Maps the model's sigmoid score to a label. Strictly greater than the
/// threshold counts as cancer; exactly 0.5 does not.
pub fn classify(score: f32) -> Classification {
    if score > THRESHOLD {
        Classification {
            result: Label::Cancer,
            suggestion: CANCER_SUGGESTION,
        }
    } else {
        Classification {
            result: Label::NonCancer,
            suggestion: NON_CANCER_SUGGESTION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_half_is_non_cancer() {
        assert_eq!(classify(0.5).result, Label::NonCancer);
    }

    #[test]
    fn just_above_half_is_cancer() {
        assert_eq!(classify(0.50001).result, Label::Cancer);
    }

    #[test]
    fn extremes() {
        assert_eq!(classify(0.0).result, Label::NonCancer);
        assert_eq!(classify(1.0).result, Label::Cancer);
    }

    #[test]
    fn suggestions_follow_labels() {
        assert_eq!(classify(0.9).suggestion, CANCER_SUGGESTION);
        assert_eq!(classify(0.1).suggestion, NON_CANCER_SUGGESTION);
    }

    #[test]
    fn labels_serialize_to_wire_names() {
        assert_eq!(serde_json::to_string(&Label::Cancer).unwrap(), "\"Cancer\"");
        assert_eq!(
            serde_json::to_string(&Label::NonCancer).unwrap(),
            "\"Non-cancer\""
        );
    }
}
