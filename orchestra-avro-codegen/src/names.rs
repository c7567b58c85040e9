//! Naming conventions for generated schemas.

/// Converts an entity name to TitleCase.
///
/// The first character and any character following an underscore or space
/// is upper-cased and the separators are dropped. Other characters keep
/// their case, so `clOrdID` becomes `ClOrdID`.
#[must_use]
pub fn to_title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == ' ' {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Converts a camel-cased name to SCREAMING_SNAKE_CASE.
///
/// An underscore is inserted only between a lower-case letter and the
/// upper-case letter that follows it, so `AdvSideCodeSet` becomes
/// `ADV_SIDE_CODE_SET` and `MDEntryType` becomes `MDENTRY_TYPE`.
#[must_use]
pub fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut previous_lower = false;

    for c in s.chars() {
        if previous_lower && c.is_ascii_uppercase() {
            result.push('_');
        }
        previous_lower = c.is_ascii_lowercase();
        result.extend(c.to_uppercase());
    }

    result
}

/// Returns the namespace segment derived from a repository version.
///
/// The extension-pack suffix after the first underscore is dropped, dots
/// are removed and the result is lower-cased. Returns `None` for an empty
/// version.
#[must_use]
pub fn version_namespace_suffix(version: &str) -> Option<String> {
    let base = version.split('_').next().unwrap_or_default();
    let suffix: String = base
        .chars()
        .filter(|c| *c != '.')
        .flat_map(char::to_lowercase)
        .collect();
    (!suffix.is_empty()).then_some(suffix)
}

/// Joins a namespace and a name into a full Avro name.
#[must_use]
pub fn full_name(namespace: &str, name: &str) -> String {
    format!("{namespace}.{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_title_case() {
        assert_eq!(to_title_case("clOrdID"), "ClOrdID");
        assert_eq!(to_title_case("NewOrderSingle"), "NewOrderSingle");
        assert_eq!(to_title_case("party_ids"), "PartyIds");
        assert_eq!(to_title_case("side code"), "SideCode");
        assert_eq!(to_title_case(""), "");
    }

    #[test]
    fn test_to_screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("SideCodeSet"), "SIDE_CODE_SET");
        assert_eq!(to_screaming_snake_case("AdvSideCodeSet"), "ADV_SIDE_CODE_SET");
        assert_eq!(to_screaming_snake_case("MDEntryType"), "MDENTRY_TYPE");
        assert_eq!(to_screaming_snake_case("side"), "SIDE");
    }

    #[test]
    fn test_version_namespace_suffix() {
        assert_eq!(
            version_namespace_suffix("FIX.5.0SP2_EP254").as_deref(),
            Some("fix50sp2")
        );
        assert_eq!(version_namespace_suffix("FIX.Latest").as_deref(), Some("fixlatest"));
        assert_eq!(version_namespace_suffix(""), None);
        assert_eq!(version_namespace_suffix("_EP1"), None);
    }

    #[test]
    fn test_full_name() {
        assert_eq!(full_name("ns.codeset", "SideCodeSet"), "ns.codeset.SideCodeSet");
    }
}
