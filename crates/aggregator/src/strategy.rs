//! The three ways of composing the same fetch-and-aggregate flow.

use std::fmt;
use std::str::FromStr;

/// How the aggregator composes its futures.
///
/// Every strategy issues the same requests and returns the same result;
/// they differ only in the async idiom used to get there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Future combinators: `and_then`, `try_join`, `map_ok`
    Chained,
    /// Plain `async`/`.await` with `tokio::try_join!` for the fan-out
    #[default]
    Sequential,
    /// Index-tagged film fetches drained from a `FuturesUnordered` stream,
    /// then put back in reference order
    Stream,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Chained, Strategy::Sequential, Strategy::Stream];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Chained => "chained",
            Strategy::Sequential => "sequential",
            Strategy::Stream => "stream",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chained" => Ok(Strategy::Chained),
            "sequential" => Ok(Strategy::Sequential),
            "stream" => Ok(Strategy::Stream),
            other => Err(format!(
                "unknown strategy '{}' (expected chained, sequential or stream)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_agree() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>(), Ok(strategy));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Stream".parse::<Strategy>(), Ok(Strategy::Stream));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "observable".parse::<Strategy>().unwrap_err();
        assert!(err.contains("observable"));
    }
}
