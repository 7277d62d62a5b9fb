//! Replay scripts: a comma- or whitespace-separated list of tokens.
//!
//! | token | effect |
//! |---|---|
//! | `start` | `TourController::start` |
//! | `next`, `ok`, `prev`, `back`, `skip`, `close` | button actions |
//! | `goto:N` | jump to step index `N` |
//! | `force-close` | close regardless of `closable` |
//! | `reset` | forget the seen flag and return to not-started |
//! | `hide:SEL` / `show:SEL` | drop or restore an element's layout box |

use std::fmt;
use std::str::FromStr;

use tourguide::NavAction;

use crate::error::{DemoError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptToken {
    Start,
    Nav(NavAction),
    GoTo(usize),
    ForceClose,
    Reset,
    Hide(String),
    Show(String),
}

impl fmt::Display for ScriptToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Nav(action) => write!(f, "{}", action.as_str()),
            Self::GoTo(index) => write!(f, "goto:{index}"),
            Self::ForceClose => write!(f, "force-close"),
            Self::Reset => write!(f, "reset"),
            Self::Hide(sel) => write!(f, "hide:{sel}"),
            Self::Show(sel) => write!(f, "show:{sel}"),
        }
    }
}

impl FromStr for ScriptToken {
    type Err = DemoError;

    fn from_str(raw: &str) -> Result<Self> {
        let token = raw.trim();
        let lower = token.to_ascii_lowercase();
        let bad = |message: String| DemoError::Script {
            token: token.to_string(),
            message,
        };

        if let Some((head, value)) = token.split_once(':') {
            let value = value.trim();
            return match head.to_ascii_lowercase().as_str() {
                "goto" | "go" => value
                    .parse()
                    .map(Self::GoTo)
                    .map_err(|e| bad(format!("step index: {e}"))),
                "hide" if !value.is_empty() => Ok(Self::Hide(value.to_string())),
                "show" if !value.is_empty() => Ok(Self::Show(value.to_string())),
                "hide" | "show" => Err(bad("missing selector".into())),
                other => Err(bad(format!("unknown command {other:?}"))),
            };
        }

        match lower.as_str() {
            "start" => Ok(Self::Start),
            "force-close" | "force_close" => Ok(Self::ForceClose),
            "reset" => Ok(Self::Reset),
            _ => token.parse::<NavAction>().map(Self::Nav).map_err(bad),
        }
    }
}

/// Parse a whole script. Blank input is an empty script.
pub fn parse_script(script: &str) -> Result<Vec<ScriptToken>> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}
