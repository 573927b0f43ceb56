//! Module parameters.

use alloc::string::String;
use common::Error;
use common::host::DevT;

/// Name of the device number region, the class and the node.
pub const DEVICE_NAME: &str = "newchrdev";

/// Number of minors claimed.
pub const DEVICE_COUNT: u32 = 1;

/// Load-time configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleConfig {
    pub name: String,
    /// Fixed major number; `None` lets the host pick one.
    pub major: Option<u32>,
    pub first_minor: u32,
    pub count: u32,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            name: DEVICE_NAME.into(),
            major: None,
            first_minor: 0,
            count: DEVICE_COUNT,
        }
    }
}

impl ModuleConfig {
    /// Use the fixed `major` instead of a dynamic one.
    pub fn with_major(mut self, major: u32) -> Self {
        self.major = Some(major);
        self
    }

    /// Parse module parameters of the form `major=<n> name=<s>`.
    ///
    /// `major=0` selects dynamic allocation. Unknown keys and malformed
    /// values are rejected.
    pub fn parse(params: &str) -> Result<Self, Error> {
        let mut config = Self::default();

        for param in params.split_whitespace() {
            let (key, value) = param.split_once('=').ok_or(Error::InvalidArgument)?;
            match key {
                "major" => {
                    let major: u32 = value.parse().map_err(|_| Error::InvalidArgument)?;
                    if major > DevT::MAX_MAJOR {
                        return Err(Error::InvalidArgument);
                    }
                    config.major = (major != 0).then_some(major);
                }
                "name" => {
                    if value.is_empty() {
                        return Err(Error::InvalidArgument);
                    }
                    config.name = value.into();
                }
                _ => return Err(Error::InvalidArgument),
            }
        }

        Ok(config)
    }
}
