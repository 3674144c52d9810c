//! Service codes accepted by the `getNumber` action.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// SMS Activate service identifiers.
///
/// Each service is the app or website the rented number will receive a code from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Service {
    /// Full rent (code: "full").
    FullRent,
    /// Telegram (code: "tg").
    Telegram,
    /// WhatsApp (code: "wa").
    Whatsapp,
    /// Instagram/Threads (code: "ig").
    InstagramThreads,
    /// Facebook (code: "fb").
    Facebook,
    /// Google, YouTube, Gmail (code: "go").
    Google,
    /// VKontakte (code: "vk").
    Vkontakte,
    /// Twitter/X (code: "tw").
    Twitter,
    /// Discord (code: "ds").
    Discord,
    /// Microsoft (code: "mm").
    Microsoft,
    /// Any other service (code: "ot").
    AnyOther,
    /// Custom service code not listed above.
    Other { code: String },
}

impl Service {
    /// Get the service code for the API.
    pub fn code(&self) -> &str {
        match self {
            Service::FullRent => "full",
            Service::Telegram => "tg",
            Service::Whatsapp => "wa",
            Service::InstagramThreads => "ig",
            Service::Facebook => "fb",
            Service::Google => "go",
            Service::Vkontakte => "vk",
            Service::Twitter => "tw",
            Service::Discord => "ds",
            Service::Microsoft => "mm",
            Service::AnyOther => "ot",
            Service::Other { code } => code.as_str(),
        }
    }

    /// Create a Service from a code string.
    pub fn from_code<S: AsRef<str>>(code: S) -> Self {
        match code.as_ref() {
            "full" => Service::FullRent,
            "tg" => Service::Telegram,
            "wa" => Service::Whatsapp,
            "ig" => Service::InstagramThreads,
            "fb" => Service::Facebook,
            "go" => Service::Google,
            "vk" => Service::Vkontakte,
            "tw" => Service::Twitter,
            "ds" => Service::Discord,
            "mm" => Service::Microsoft,
            "ot" => Service::AnyOther,
            other => Service::Other {
                code: other.to_string(),
            },
        }
    }
}

impl Display for Service {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Service {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Service::from_code(s))
    }
}

impl Serialize for Service {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Service {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Service::from_code(s))
    }
}
