use anyhow::Context as _;
use anyhow::Result;

/// Remote endpoints a campaign talks to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    work_list_url: String,
    claim_url: String,
    network_test_url: String,
}

impl Endpoints {
    pub fn new(
        work_list_url: impl Into<String>,
        claim_url: impl Into<String>,
        network_test_url: impl Into<String>,
    ) -> Self {
        Self {
            work_list_url: work_list_url.into(),
            claim_url: claim_url.into(),
            network_test_url: network_test_url.into(),
        }
    }

    pub fn work_list_url(&self) -> &str {
        &self.work_list_url
    }

    pub fn claim_url(&self) -> &str {
        &self.claim_url
    }

    pub fn network_test_url(&self) -> &str {
        &self.network_test_url
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    http_port: u16,
    otlp_export_enabled: bool,
    endpoints: Endpoints,
}

impl Settings {
    const HTTP_PORT_ENV_VAR: &str = "HTTP_PORT";
    const OTLP_EXPORT_ENABLED_ENV_VAR: &str = "OTLP_EXPORT_ENABLED";
    const WORK_LIST_URL_ENV_VAR: &str = "WORK_LIST_URL";
    const CLAIM_URL_ENV_VAR: &str = "CLAIM_URL";
    const NETWORK_TEST_URL_ENV_VAR: &str = "NETWORK_TEST_URL";

    const DEFAULT_HTTP_PORT: u16 = 8080;
    const DEFAULT_OTLP_EXPORT_ENABLED: bool = true;
    const DEFAULT_WORK_LIST_URL: &str = "https://xalyon.x10.mx/data.json";
    const DEFAULT_CLAIM_URL: &str =
        "https://apis.mytel.com.mm/daily-quest-v3/api/v3/daily-quest/daily-claim";
    const DEFAULT_NETWORK_TEST_URL: &str = "https://apis.mytel.com.mm/network-test/v3/submit";

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let http_port = lookup(Self::HTTP_PORT_ENV_VAR)
            .map(|value| {
                value
                    .parse::<u16>()
                    .with_context(|| format!("Invalid {}: {value}", Self::HTTP_PORT_ENV_VAR))
            })
            .transpose()?
            .unwrap_or(Self::DEFAULT_HTTP_PORT);

        let otlp_export_enabled = lookup(Self::OTLP_EXPORT_ENABLED_ENV_VAR)
            .map(|value| {
                value.parse::<bool>().with_context(|| {
                    format!("Invalid {}: {value}", Self::OTLP_EXPORT_ENABLED_ENV_VAR)
                })
            })
            .transpose()?
            .unwrap_or(Self::DEFAULT_OTLP_EXPORT_ENABLED);

        let endpoints = Endpoints::new(
            lookup(Self::WORK_LIST_URL_ENV_VAR)
                .unwrap_or_else(|| Self::DEFAULT_WORK_LIST_URL.to_string()),
            lookup(Self::CLAIM_URL_ENV_VAR).unwrap_or_else(|| Self::DEFAULT_CLAIM_URL.to_string()),
            lookup(Self::NETWORK_TEST_URL_ENV_VAR)
                .unwrap_or_else(|| Self::DEFAULT_NETWORK_TEST_URL.to_string()),
        );

        Ok(Self::new(http_port, otlp_export_enabled, endpoints))
    }

    pub const fn new(http_port: u16, otlp_export_enabled: bool, endpoints: Endpoints) -> Self {
        Self {
            http_port,
            otlp_export_enabled,
            endpoints,
        }
    }

    pub const fn http_port(&self) -> u16 {
        self.http_port
    }

    pub const fn otlp_export_enabled(&self) -> bool {
        self.otlp_export_enabled
    }

    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect();

        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings = settings_from(&[]).unwrap();

        assert_eq!(settings.http_port(), 8080);
        assert!(settings.otlp_export_enabled());
        assert_eq!(
            settings.endpoints().work_list_url(),
            "https://xalyon.x10.mx/data.json"
        );
        assert_eq!(
            settings.endpoints().claim_url(),
            "https://apis.mytel.com.mm/daily-quest-v3/api/v3/daily-quest/daily-claim"
        );
        assert_eq!(
            settings.endpoints().network_test_url(),
            "https://apis.mytel.com.mm/network-test/v3/submit"
        );
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = settings_from(&[
            ("HTTP_PORT", "9090"),
            ("OTLP_EXPORT_ENABLED", "false"),
            ("WORK_LIST_URL", "http://localhost/list"),
            ("CLAIM_URL", "http://localhost/claim"),
            ("NETWORK_TEST_URL", "http://localhost/test"),
        ])
        .unwrap();

        assert_eq!(settings.http_port(), 9090);
        assert!(!settings.otlp_export_enabled());
        assert_eq!(
            settings.endpoints(),
            &Endpoints::new(
                "http://localhost/list",
                "http://localhost/claim",
                "http://localhost/test"
            )
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(settings_from(&[("HTTP_PORT", "eighty")]).is_err());
        assert!(settings_from(&[("HTTP_PORT", "70000")]).is_err());
        assert!(settings_from(&[("OTLP_EXPORT_ENABLED", "yes")]).is_err());
    }
}
