use serde::Serialize;

/// Which division a request targets. Renders as the lowercase form used
/// in source-site URLs and serialized responses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_display_and_parse_round_trip() {
        assert_eq!(Gender::Men.to_string(), "men");
        assert_eq!(Gender::Women.to_string(), "women");
        assert_eq!(Gender::from_str("women").unwrap(), Gender::Women);
        assert_eq!(Gender::from_str("MEN").unwrap(), Gender::Men);
        assert!(Gender::from_str("coed").is_err());
    }
}
