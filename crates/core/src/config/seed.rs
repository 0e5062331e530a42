use derive_more::Display;
use fnv::FnvHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// RNG seed for terrain generation. Either a number, used as-is, or any
/// other text, which gets FNV-hashed down to a number when generation starts.
///
/// Numeric strings parse as numbers, so `"42"` and `42` are the same seed.
/// The seed always serializes as a string, because JSON and TOML can't hold
/// every `u64`.
#[derive(Clone, Debug, Display, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SeedInput", into = "String")]
pub enum Seed {
    Int(u64),
    Text(String),
}

impl Seed {
    /// The value to seed the RNG with
    pub fn to_u64(&self) -> u64 {
        match self {
            Self::Int(seed) => *seed,
            Self::Text(text) => {
                let mut hasher = FnvHasher::default();
                text.hash(&mut hasher);
                hasher.finish()
            }
        }
    }
}

impl Default for Seed {
    /// A fresh random seed on every call
    fn default() -> Self {
        Self::Int(rand::random())
    }
}

impl From<u64> for Seed {
    fn from(seed: u64) -> Self {
        Self::Int(seed)
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        match text.parse::<u64>() {
            Ok(seed) => Self::Int(seed),
            Err(_) => Self::Text(text.into()),
        }
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        seed.to_string()
    }
}

/// Anything a config file may hold for a seed
#[derive(Deserialize)]
#[serde(untagged)]
enum SeedInput {
    Int(u64),
    Text(String),
}

impl From<SeedInput> for Seed {
    fn from(input: SeedInput) -> Self {
        match input {
            SeedInput::Int(seed) => Self::Int(seed),
            SeedInput::Text(text) => text.as_str().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{
        assert_de_tokens, assert_de_tokens_error, assert_ser_tokens, Token,
    };

    #[test]
    fn test_from_str() {
        assert_eq!(Seed::from("0"), Seed::Int(0));
        assert_eq!(Seed::from("8675309"), Seed::Int(8675309));
        assert_eq!(Seed::from("-1"), Seed::Text("-1".into()));
        assert_eq!(Seed::from("calm down"), Seed::Text("calm down".into()));
    }

    #[test]
    fn test_to_u64() {
        assert_eq!(Seed::Int(8675309).to_u64(), 8675309);

        // Text gets hashed, and hashing is stable
        let text = Seed::Text("calm down".into());
        assert_eq!(text.to_u64(), text.clone().to_u64());
        assert_ne!(text.to_u64(), Seed::Text("calm up".into()).to_u64());
    }

    #[test]
    fn test_serialize() {
        assert_ser_tokens(&Seed::Int(0), &[Token::String("0")]);
        assert_ser_tokens(
            &Seed::Int(u64::MAX),
            &[Token::String("18446744073709551615")],
        );
        assert_ser_tokens(&Seed::Text("moss".into()), &[Token::String("moss")]);
    }

    #[test]
    fn test_deserialize() {
        assert_de_tokens(&Seed::Int(7), &[Token::U64(7)]);
        assert_de_tokens(&Seed::Int(7), &[Token::I64(7)]);
        assert_de_tokens(&Seed::Int(7), &[Token::String("7")]);
        assert_de_tokens(&Seed::Text("-1".into()), &[Token::String("-1")]);

        // Negative numbers and non-scalars aren't seeds
        let not_a_seed =
            "data did not match any variant of untagged enum SeedInput";
        assert_de_tokens_error::<Seed>(&[Token::I32(-1)], not_a_seed);
        assert_de_tokens_error::<Seed>(&[Token::Bool(false)], not_a_seed);
    }
}
