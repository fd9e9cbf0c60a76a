//! 界面（View Controller）标识
//! 固定的三个取值，仅用于路由寻址

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewControllerIdentifier {
    Root,
    Login,
    Main,
}

impl ViewControllerIdentifier {
    /// 全部取值（封闭集合）
    pub const ALL: [ViewControllerIdentifier; 3] = [Self::Root, Self::Login, Self::Main];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "Root",
            Self::Login => "Login",
            Self::Main => "Main",
        }
    }
}

impl fmt::Display for ViewControllerIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown view controller identifier: {0}")]
pub struct UnknownViewControllerIdentifier(pub String);

impl FromStr for ViewControllerIdentifier {
    type Err = UnknownViewControllerIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownViewControllerIdentifier(s.to_string()))
    }
}
