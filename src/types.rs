/// URL scheme types handled by the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemeType {
    #[default]
    Http,
    Https,
    Ftp,
    Mailto,
}

impl SchemeType {
    /// Canonical lowercase name, without the trailing `:`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
            Self::Ftp => "ftp",
            Self::Mailto => "mailto",
        }
    }

    /// Whether URLs of this scheme carry `//user:pass@host:port`
    pub fn has_authority(self) -> bool {
        self != Self::Mailto
    }

    /// Get the default port for this scheme
    pub fn default_port(self) -> Option<u16> {
        match self {
            Self::Http => Some(80),
            Self::Https => Some(443),
            Self::Ftp => Some(21),
            Self::Mailto => None,
        }
    }

    /// Separator written between the scheme and the rest of the URL
    pub(crate) fn separator(self) -> &'static str {
        if self.has_authority() { "://" } else { ":" }
    }
}

impl core::fmt::Display for SchemeType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
