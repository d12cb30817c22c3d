//! Minecraft lookups through the Mojang and Hypixel APIs.

pub mod bazaar;
pub mod uuid;

use crate::{Error, error::MetroError, utils::minecraft::MinecraftError};

/// Lookup misses are the invoker's problem, transport failures are ours.
fn user_facing(why: MinecraftError) -> Error {
    match why {
        MinecraftError::UnknownPlayer | MinecraftError::UnknownItem | MinecraftError::NotReady => {
            MetroError::bad_argument(why.to_string()).into()
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_lookup_misses_are_bad_arguments() {
        let error = user_facing(MinecraftError::UnknownItem);
        assert_matches!(error.downcast_ref::<MetroError>(), Some(MetroError::BadArgument(_)));

        let error = user_facing(MinecraftError::Status(reqwest::StatusCode::BAD_GATEWAY));
        assert!(error.downcast_ref::<MetroError>().is_none());
    }
}
