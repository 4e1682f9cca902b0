use std::str::FromStr;
use serde::Deserialize;

/// What the runtime does when observers report update failures.
///
/// - `Log`: log every failure and keep polling (default behaviour).
/// - `Exit`: stop the runtime and return the failures as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    #[default]
    Log,
    Exit,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "log" => Ok(FailurePolicy::Log),
            "exit" => Ok(FailurePolicy::Exit),
            other => Err(format!(
                "invalid on_failure: {other} (expected \"log\" or \"exit\")"
            )),
        }
    }
}
