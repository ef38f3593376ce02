use crate::error::FilloutError;
use fillout_host::{CredentialType, CredentialTypeDescription, NodeProperty, PropertyType};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const FILLOUT_CREDENTIAL_NAME: &str = "filloutApi";

const API_PATH: &str = "/v1/api";

/// Region the Fillout account data is stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilloutRegion {
    #[default]
    #[serde(rename = "api.fillout.com")]
    Us,
    #[serde(rename = "eu-api.fillout.com")]
    Eu,
    #[serde(rename = "ca-api.fillout.com")]
    Ca,
}

impl FilloutRegion {
    pub const ALL: [FilloutRegion; 3] = [Self::Us, Self::Eu, Self::Ca];

    pub fn domain(&self) -> &'static str {
        match self {
            Self::Us => "api.fillout.com",
            Self::Eu => "eu-api.fillout.com",
            Self::Ca => "ca-api.fillout.com",
        }
    }

    pub fn base_url(&self) -> String {
        format!("https://{}{}", self.domain(), API_PATH)
    }
}

impl std::fmt::Display for FilloutRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.domain())
    }
}

impl std::str::FromStr for FilloutRegion {
    type Err = FilloutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "api.fillout.com" | "us" => Ok(Self::Us),
            "eu-api.fillout.com" | "eu" => Ok(Self::Eu),
            "ca-api.fillout.com" | "ca" => Ok(Self::Ca),
            other => Err(FilloutError::UnknownRegion(other.to_string())),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFilloutCredentials {
    api_key: String,
    #[serde(default)]
    domain: FilloutRegion,
    #[serde(default)]
    base_url: Option<String>,
}

/// Decrypted `filloutApi` credentials as handed over by the host
#[derive(Debug, Deserialize)]
#[serde(try_from = "RawFilloutCredentials")]
pub struct FilloutApiCredentials {
    api_key: SecretString,
    domain: FilloutRegion,
    /// Full API root, overrides the regional host when set
    base_url: Option<String>,
}

impl TryFrom<RawFilloutCredentials> for FilloutApiCredentials {
    type Error = FilloutError;

    fn try_from(raw: RawFilloutCredentials) -> Result<Self, Self::Error> {
        if raw.api_key.trim().is_empty() {
            return Err(FilloutError::MissingApiKey);
        }

        Ok(Self {
            api_key: SecretString::from(raw.api_key),
            domain: raw.domain,
            base_url: raw.base_url.filter(|url| !url.trim().is_empty()),
        })
    }
}

impl FilloutApiCredentials {
    pub fn new(api_key: impl Into<String>, domain: FilloutRegion) -> Result<Self, FilloutError> {
        Self::try_from(RawFilloutCredentials {
            api_key: api_key.into(),
            domain,
            base_url: None,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    pub fn domain(&self) -> FilloutRegion {
        self.domain
    }

    /// API root without a trailing slash
    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => self.domain.base_url(),
        }
    }

    /// JSON shape the host stores for this credential type
    pub fn to_host_value(&self) -> serde_json::Value {
        let mut value = json!({
            "apiKey": self.api_key.expose_secret(),
            "domain": self.domain,
        });
        if let Some(base_url) = &self.base_url {
            value["baseUrl"] = json!(base_url);
        }
        value
    }
}

/// The `filloutApi` credential type
#[derive(Debug, Default, Clone, Copy)]
pub struct FilloutApi;

impl CredentialType for FilloutApi {
    fn description(&self) -> CredentialTypeDescription {
        let mut credential = CredentialTypeDescription::new(FILLOUT_CREDENTIAL_NAME, "Fillout API");
        credential.set_documentation_url("https://build.fillout.com/home/settings/developer");

        credential.add_property(
            NodeProperty::new("apiKey", "API Key", PropertyType::String)
                .set_password(true)
                .set_required(true),
        );

        let mut domain = NodeProperty::new("domain", "Base URL", PropertyType::Options)
            .set_default(json!(FilloutRegion::Us.domain()))
            .set_description(
                "This may be different if your Fillout account data is stored in another region",
            );
        for region in FilloutRegion::ALL {
            domain = domain.add_option(region.domain(), region.domain());
        }
        credential.add_property(domain);

        credential
    }
}
