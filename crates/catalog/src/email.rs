use valcast_core::validation::{Rule, Rules};
use valcast_core::{Frozen, TransformError, ValueObject, value_object};

value_object! {
    /// An e-mail address, trimmed of surrounding whitespace.
    pub struct Email(String);
}

impl Email {
    /// Everything after the last `@`.
    pub fn domain(&self) -> &str {
        self.value().rsplit_once('@').map(|(_, d)| d).unwrap_or_default()
    }

    pub fn local_part(&self) -> &str {
        self.value().rsplit_once('@').map(|(l, _)| l).unwrap_or_default()
    }
}

impl ValueObject for Email {
    type Input = String;

    fn transform_input(input: String) -> Result<String, TransformError> {
        Ok(input.trim().to_string())
    }

    fn rules(key: &str) -> Rules {
        Rules::new().field(key, [Rule::Required, Rule::String, Rule::Email])
    }
}
