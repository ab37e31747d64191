use crossterm::style::Attributes;
use serde::{Deserialize, Deserializer};

/// Subset of SGR attributes themes are allowed to use.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Reset,
    Bold,
    Dim,
    Italic,
    Underlined,
    SlowBlink,
    RapidBlink,
    Reverse,
    Hidden,
    CrossedOut,
}

impl From<Attribute> for crossterm::style::Attribute {
    fn from(value: Attribute) -> Self {
        use crossterm::style;
        use Attribute::*;

        match value {
            Reset => style::Attribute::Reset,
            Bold => style::Attribute::Bold,
            Dim => style::Attribute::Dim,
            Italic => style::Attribute::Italic,
            Underlined => style::Attribute::Underlined,
            SlowBlink => style::Attribute::SlowBlink,
            RapidBlink => style::Attribute::RapidBlink,
            Reverse => style::Attribute::Reverse,
            Hidden => style::Attribute::Hidden,
            CrossedOut => style::Attribute::CrossedOut,
        }
    }
}

pub fn deserialize_attributes<'de, D>(deserializer: D) -> Result<Attributes, D::Error>
where
    D: Deserializer<'de>,
{
    let attrs = Vec::<Attribute>::deserialize(deserializer)?;

    let mut result = Attributes::default();
    for attr in attrs {
        result.set(attr.into());
    }

    Ok(result)
}
