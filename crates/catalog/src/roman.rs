use serde::Deserialize;
use valcast_core::validation::{Rule, Rules};
use valcast_core::{Frozen, TransformError, ValueObject, value_object};

const NUMERALS: [(&str, u32); 13] = [
    ("M", 1000),
    ("CM", 900),
    ("D", 500),
    ("CD", 400),
    ("C", 100),
    ("XC", 90),
    ("L", 50),
    ("XL", 40),
    ("X", 10),
    ("IX", 9),
    ("V", 5),
    ("IV", 4),
    ("I", 1),
];

/// Largest number expressible in standard numerals.
pub const MAX_ROMAN: u32 = 3999;

/// Either form a Roman number can be given in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RomanInput {
    Arabic(u32),
    Numeral(String),
}

impl From<u32> for RomanInput {
    fn from(n: u32) -> Self {
        RomanInput::Arabic(n)
    }
}

impl From<&str> for RomanInput {
    fn from(s: &str) -> Self {
        RomanInput::Numeral(s.to_string())
    }
}

impl From<String> for RomanInput {
    fn from(s: String) -> Self {
        RomanInput::Numeral(s)
    }
}

value_object! {
    /// A number between 1 and 3999, kept as its canonical upper-case numeral.
    pub struct RomanNumber(String);
}

impl RomanNumber {
    /// The number as an integer.
    pub fn arabic(&self) -> u32 {
        numeral_value(self.value()).unwrap_or_default()
    }
}

fn to_numeral(mut n: u32) -> String {
    let mut out = String::new();
    for (numeral, value) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

fn letter_value(c: char) -> Option<u32> {
    match c {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

/// Value of a canonical numeral; `None` for anything that does not render
/// back to itself (`IIII`, `VX`, stray letters).
fn numeral_value(numeral: &str) -> Option<u32> {
    let values = numeral.chars().map(letter_value).collect::<Option<Vec<u32>>>()?;
    let total: i64 = values
        .iter()
        .enumerate()
        .map(|(i, v)| match values.get(i + 1) {
            Some(next) if next > v => -i64::from(*v),
            _ => i64::from(*v),
        })
        .sum();
    let total = u32::try_from(total)
        .ok()
        .filter(|n| (1..=MAX_ROMAN).contains(n))?;

    (to_numeral(total) == numeral).then_some(total)
}

fn from_arabic(n: u32) -> Result<String, TransformError> {
    if n == 0 || n > MAX_ROMAN {
        return Err(TransformError::new(format!(
            "{n} is outside 1..={MAX_ROMAN}"
        )));
    }
    Ok(to_numeral(n))
}

impl ValueObject for RomanNumber {
    type Input = RomanInput;

    fn transform_input(input: RomanInput) -> Result<String, TransformError> {
        match input {
            RomanInput::Arabic(n) => from_arabic(n),
            RomanInput::Numeral(text) => {
                let text = text.trim();
                if let Ok(n) = text.parse::<u32>() {
                    return from_arabic(n);
                }
                let upper = text.to_uppercase();
                numeral_value(&upper)
                    .map(|_| upper)
                    .ok_or_else(|| TransformError::new(format!("`{text}` is not a Roman numeral")))
            }
        }
    }

    fn rules(key: &str) -> Rules {
        Rules::new().field(key, [Rule::Required, Rule::String])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valcast_core::ValueObjectError;

    #[test]
    fn converts_numbers_to_numerals() {
        let cases: [(u32, &str); 7] = [(1, "I"), (4, "IV"), (9, "IX"), (14, "XIV"), (40, "XL"), (1994, "MCMXCIV"), (3999, "MMMCMXCIX")];
        for (n, numeral) in cases {
            let roman = RomanNumber::create(n.into(), None).unwrap();
            assert_eq!(roman.value(), numeral);
            assert_eq!(roman.arabic(), n);
        }
    }

    #[test]
    fn normalizes_numeral_input() {
        let roman = RomanNumber::create(" xiv ".into(), None).unwrap();
        assert_eq!(roman.value(), "XIV");
        assert_eq!(roman.arabic(), 14);
        assert_eq!(roman.key(), "roman_number");
    }

    #[test]
    fn numeric_text_is_treated_as_a_number() {
        let roman = RomanNumber::create("12".into(), None).unwrap();
        assert_eq!(roman.value(), "XII");
    }

    #[test]
    fn rejects_non_canonical_numerals() {
        for bad in ["IIII", "VX", "ABC", "IC", ""] {
            match RomanNumber::create(bad.into(), None) {
                Err(ValueObjectError::Transform(_)) => {}
                other => panic!("Expected Transform error for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        assert!(matches!(
            RomanNumber::create(0u32.into(), None),
            Err(ValueObjectError::Transform(_))
        ));
        assert!(matches!(
            RomanNumber::create(4000u32.into(), None),
            Err(ValueObjectError::Transform(_))
        ));
    }

    #[test]
    fn decodes_either_form_from_json() {
        let a: RomanInput = serde_json::from_value(serde_json::json!(7)).unwrap();
        let b: RomanInput = serde_json::from_value(serde_json::json!("VII")).unwrap();
        assert_eq!(a, RomanInput::Arabic(7));
        assert_eq!(b, RomanInput::Numeral("VII".into()));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: number → numeral → number is the identity.
            #[test]
            fn numeral_round_trip(n in 1u32..=MAX_ROMAN) {
                let roman = RomanNumber::create(n.into(), None).unwrap();
                prop_assert_eq!(roman.arabic(), n);
                let again = RomanNumber::create(roman.value().as_str().into(), None).unwrap();
                prop_assert_eq!(again, roman);
            }
        }
    }
}
