use derive_more::Display;
use fnv::FnvHasher;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    convert::Infallible,
    hash::{Hash, Hasher},
    str::FromStr,
};

/// RNG seed for terrain generation. Seeds can be given as integers or as
/// arbitrary text, which makes it easy to share a memorable seed like
/// `"cascadia"`.
///
/// When deserializing:
/// - An integer that fits into `u64` is used as-is
/// - A string that parses as a `u64` is stored as that integer
/// - Any other string is kept as text, and hashed when the seed is used
/// - Anything else (negative numbers, floats, arrays, ...) is an error
///
/// Seeds always **serialize as strings**. JSON and TOML can't represent every
/// `u64`, and the string form parses back into the same seed.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum Seed {
    /// An integer seed, which can be used directly
    Int(u64),
    /// A textual seed, which will be hashed into a u64 before use
    Text(String),
}

impl Seed {
    /// Convert the seed to a `u64` that can be fed into an RNG
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

impl From<u64> for Seed {
    fn from(seed: u64) -> Self {
        Self::Int(seed)
    }
}

impl From<&str> for Seed {
    fn from(seed_str: &str) -> Self {
        match seed_str.parse::<u64>() {
            Ok(seed) => Self::Int(seed),
            Err(_) => Self::Text(seed_str.into()),
        }
    }
}

impl FromStr for Seed {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl Serialize for Seed {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// What we accept on the wire. Anything that isn't a u64 or a string fails
/// to match either variant and produces an error.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeedInput {
    Int(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        Ok(match SeedInput::deserialize(deserializer)? {
            SeedInput::Int(seed) => Self::Int(seed),
            SeedInput::Text(text) => text.as_str().into(),
        })
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
        assert_eq!(Seed::from("42"), Seed::Int(42));
        // Not a valid u64, keep the raw text
        assert_eq!(Seed::from("-1"), Seed::Text("-1".into()));
        assert_eq!(Seed::from("cascadia"), Seed::Text("cascadia".into()));
        assert_eq!("7".parse::<Seed>(), Ok(Seed::Int(7)));
    }

    #[test]
    fn test_to_u64() {
        assert_eq!(Seed::Int(42).to_u64(), 42);
        // Text gets hashed, and hashing is stable
        assert_eq!(Seed::Text("-1".into()).to_u64(), 16020590405669718844);
        assert_eq!(
            Seed::Text("cascadia".into()).to_u64(),
            Seed::Text("cascadia".into()).to_u64()
        );
        assert_ne!(
            Seed::Text("cascadia".into()).to_u64(),
            Seed::Text("olympic".into()).to_u64()
        );
    }

    #[test]
    fn test_serialize() {
        assert_ser_tokens(&Seed::Int(42), &[Token::Str("42")]);
        assert_ser_tokens(&Seed::Text("cascadia".into()), &[Token::Str("cascadia")]);
    }

    #[test]
    fn test_deserialize() {
        assert_de_tokens(&Seed::Int(42), &[Token::U64(42)]);
        assert_de_tokens(&Seed::Int(42), &[Token::U8(42)]);
        assert_de_tokens(&Seed::Int(42), &[Token::Str("42")]);
        assert_de_tokens(
            &Seed::Text("cascadia".into()),
            &[Token::Str("cascadia")],
        );
    }

    #[test]
    fn test_deserialize_error() {
        assert_de_tokens_error::<Seed>(
            &[Token::F64(1.5)],
            "data did not match any variant of untagged enum SeedInput",
        );
        assert_de_tokens_error::<Seed>(
            &[Token::Bool(true)],
            "data did not match any variant of untagged enum SeedInput",
        );
    }
}
