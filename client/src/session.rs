use serde::Serialize;
use std::fmt;

/// The signed-in user, handed to every page explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    email: Option<String>,
    name: Option<String>,
}

impl Session {
    /// Blank values count as missing.
    pub fn new(email: Option<String>, name: Option<String>) -> Self {
        let non_blank = |s: String| {
            let s = s.trim().to_string();
            (!s.is_empty()).then_some(s)
        };
        Self {
            email: email.and_then(non_blank),
            name: name.and_then(non_blank),
        }
    }

    pub fn signed_in(email: impl Into<String>) -> Self {
        Self::new(Some(email.into()), None)
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// `Name <email>` when both are known, whichever one is set otherwise.
impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name(), self.email()) {
            (Some(name), Some(email)) => write!(f, "{} <{}>", name, email),
            (Some(name), None) => f.write_str(name),
            (None, Some(email)) => f.write_str(email),
            (None, None) => f.write_str("anonymous"),
        }
    }
}
