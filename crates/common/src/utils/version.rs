use std::{fmt::Display, ops::RangeInclusive, str::FromStr};

use crate::error::Error;

/// Major versions of the Node toolchain runtime this harness is known to work
/// with. Hardhat itself pins the same range.
pub const SUPPORTED_RUNTIME_MAJORS: RangeInclusive<u32> = 16..=20;

/// LTS majors inside the supported range; worth recommending to operators.
pub const RECOMMENDED_RUNTIME_MAJORS: [u32; 3] = [16, 18, 20];

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents a semantic version number.
///
/// This struct follows the semantic versioning format of MAJOR.MINOR.PATCH,
/// with an optional release channel (e.g., alpha, beta).
pub struct Version {
    /// The major version number. Incremented for incompatible API changes.
    pub major: u32,
    /// The minor version number. Incremented for backward-compatible new functionality.
    pub minor: u32,
    /// The patch version number. Incremented for backward-compatible bug fixes.
    pub patch: u32,
    /// The optional release channel (e.g., "alpha", "beta", "rc").
    pub channel: Option<String>,
}

impl FromStr for Version {
    type Err = Error;

    /// Parses a version string. Accepts the `v` prefix runtimes print
    /// (`v18.19.0`) and an optional `+<channel>` suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version_string = s.trim().trim_start_matches('v');

        // remove +<channel>... from the version string
        let channel =
            version_string.split('+').collect::<Vec<&str>>().get(1).map(|s| s.to_string());
        let version_string = version_string.split('+').collect::<Vec<&str>>()[0];
        let parts = version_string.split('.').collect::<Vec<&str>>();

        if parts.len() != 3 {
            return Err(Error::ParseError(format!("invalid version string: '{s}'")));
        }

        let parse_part = |part: &str| {
            part.parse::<u32>()
                .map_err(|_| Error::ParseError(format!("invalid version component: '{part}'")))
        };

        Ok(Version {
            major: parse_part(parts[0])?,
            minor: parse_part(parts[1])?,
            patch: parse_part(parts[2])?,
            channel,
        })
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let version_string = format!("{}.{}.{}{}", self.major, self.minor, self.patch, {
            if let Some(channel) = &self.channel {
                format!("+{channel}")
            } else {
                "".to_string()
            }
        });
        write!(f, "{version_string}")
    }
}

impl Version {
    /// Whether this runtime version falls in the supported major range.
    pub fn runtime_supported(&self) -> bool {
        SUPPORTED_RUNTIME_MAJORS.contains(&self.major)
    }

    /// Whether this runtime version is one of the recommended LTS majors.
    pub fn runtime_recommended(&self) -> bool {
        RECOMMENDED_RUNTIME_MAJORS.contains(&self.major)
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::version::*;

    #[test]
    fn test_parse_plain() {
        let v: Version = "18.19.0".parse().expect("failed to parse version");
        assert_eq!(v, Version { major: 18, minor: 19, patch: 0, channel: None });
    }

    #[test]
    fn test_parse_v_prefix() {
        let v: Version = "v20.9.0".parse().expect("failed to parse version");
        assert_eq!(v.major, 20);
        assert_eq!(v.minor, 9);
        assert_eq!(v.patch, 0);
    }

    #[test]
    fn test_parse_channel() {
        let v: Version = "1.2.3+nightly.due5a1b".parse().expect("failed to parse version");
        assert_eq!(v.channel, Some("nightly.due5a1b".to_string()));
        assert_eq!(v.to_string(), "1.2.3+nightly.due5a1b");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not-a-version".parse::<Version>().is_err());
        assert!("18.19".parse::<Version>().is_err());
        assert!("18.x.0".parse::<Version>().is_err());
    }

    #[test]
    fn test_runtime_gate() {
        let supported: Version = "v18.19.0".parse().expect("failed to parse version");
        let too_old: Version = "v14.21.3".parse().expect("failed to parse version");
        let too_new: Version = "v22.1.0".parse().expect("failed to parse version");
        let odd: Version = "v17.9.1".parse().expect("failed to parse version");

        assert!(supported.runtime_supported());
        assert!(supported.runtime_recommended());
        assert!(!too_old.runtime_supported());
        assert!(!too_new.runtime_supported());
        assert!(odd.runtime_supported());
        assert!(!odd.runtime_recommended());
    }
}
