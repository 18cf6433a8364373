use crate::domain::model::ImportFormat;
use crate::utils::error::{ImportError, Result};

/// Import profile of the form `<name>-<format>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportProfile {
    pub name: String,
    pub format: ImportFormat,
}

impl ImportProfile {
    /// Only the token after the last `-` selects the format; a profile
    /// without `-` is its own format token.
    pub fn parse(profile: &str) -> Result<Self> {
        let (name, token) = match profile.rsplit_once('-') {
            Some((name, token)) => (name, token),
            None => ("", profile),
        };

        let format = token
            .parse::<ImportFormat>()
            .map_err(|_| ImportError::UnsupportedProfile {
                profile: profile.to_string(),
                format: token.to_string(),
            })?;

        Ok(Self {
            name: name.to_string(),
            format,
        })
    }
}
