//! # Secret Sources
//!
//! Where OpenStack parameters come from.
//!
//! [`SecretSource`] is the seam between the options loader and the storage that
//! holds the credentials. [`KubeSecretSource`] reads Kubernetes secrets through
//! the API server; [`StaticSecretSource`] serves in-memory maps for tests and
//! offline validation. [`read_params_file`] loads a map from a local file.

use crate::validator::ParameterMap;
use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Secret, SecretReference};
use kube::{Api, Client};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::debug;

/// Reads a flat string map for a secret reference
#[async_trait]
pub trait SecretSource: Send + Sync {
    async fn read_secret(&self, reference: &SecretReference) -> Result<ParameterMap>;
}

/// Reads secrets from the Kubernetes API
#[derive(Clone)]
pub struct KubeSecretSource {
    client: Client,
    default_namespace: String,
}

impl KubeSecretSource {
    pub fn new(client: Client, default_namespace: impl Into<String>) -> Self {
        Self {
            client,
            default_namespace: default_namespace.into(),
        }
    }
}

impl std::fmt::Debug for KubeSecretSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeSecretSource")
            .field("default_namespace", &self.default_namespace)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SecretSource for KubeSecretSource {
    async fn read_secret(&self, reference: &SecretReference) -> Result<ParameterMap> {
        let (namespace, name) = resolve_reference(reference, &self.default_namespace)?;

        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let secret = secrets
            .get(name)
            .await
            .with_context(|| format!("Failed to get secret {namespace}/{name}"))?;

        secret_to_params(&secret).with_context(|| format!("Failed to read secret {namespace}/{name}"))
    }
}

/// Serves parameter maps held in memory, keyed by namespace and name
#[derive(Debug, Clone, Default)]
pub struct StaticSecretSource {
    secrets: HashMap<(String, String), ParameterMap>,
    default_namespace: String,
}

impl StaticSecretSource {
    pub fn new(default_namespace: impl Into<String>) -> Self {
        Self {
            secrets: HashMap::new(),
            default_namespace: default_namespace.into(),
        }
    }

    /// Add or replace a secret
    pub fn insert(
        &mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        params: ParameterMap,
    ) -> &mut Self {
        self.secrets.insert((namespace.into(), name.into()), params);
        self
    }
}

#[async_trait]
impl SecretSource for StaticSecretSource {
    async fn read_secret(&self, reference: &SecretReference) -> Result<ParameterMap> {
        let (namespace, name) = resolve_reference(reference, &self.default_namespace)?;
        self.secrets
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("secret {namespace}/{name} not found"))
    }
}

/// Namespace and name of a reference; the namespace falls back to `default_namespace`
fn resolve_reference<'a>(
    reference: &'a SecretReference,
    default_namespace: &'a str,
) -> Result<(&'a str, &'a str)> {
    let name = reference
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .context("Secret reference has no name")?;

    let namespace = reference
        .namespace
        .as_deref()
        .filter(|namespace| !namespace.is_empty())
        .unwrap_or(default_namespace);

    Ok((namespace, name))
}

/// Parse `NAMESPACE/NAME` or `NAME` into a secret reference
pub fn parse_secret_reference(value: &str) -> Result<SecretReference> {
    let (namespace, name) = match value.split_once('/') {
        Some((namespace, name)) => (Some(namespace), name),
        None => (None, value),
    };

    if name.is_empty() || name.contains('/') || namespace.is_some_and(str::is_empty) {
        return Err(anyhow::anyhow!(
            "Invalid secret reference '{value}': expected NAME or NAMESPACE/NAME"
        ));
    }

    Ok(SecretReference {
        name: Some(name.to_string()),
        namespace: namespace.map(str::to_string),
    })
}

/// Flatten a secret into a parameter map
///
/// `data` values must be UTF-8. `stringData` entries override `data` entries
/// with the same key, as the API server does on write.
pub fn secret_to_params(secret: &Secret) -> Result<ParameterMap> {
    let mut params = ParameterMap::new();

    if let Some(data) = &secret.data {
        for (key, value) in data {
            let value = String::from_utf8(value.0.clone())
                .map_err(|e| anyhow::anyhow!("Secret key '{key}' is not valid UTF-8: {e}"))?;
            params.insert(key.clone(), value);
        }
    }

    if let Some(string_data) = &secret.string_data {
        for (key, value) in string_data {
            params.insert(key.clone(), value.clone());
        }
    }

    debug!("Secret holds {} keys", params.len());
    Ok(params)
}

/// Load parameters from a YAML or JSON file
///
/// The file is either a flat map of scalars or a Kubernetes `Secret` manifest.
/// Flat map values must be YAML strings. Unquoted booleans and numbers are
/// rejected because their literal text is lost once YAML resolves them.
pub fn read_params_file(path: &Path) -> Result<ParameterMap> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_params(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_params(contents: &str) -> Result<ParameterMap> {
    let document: serde_yaml::Value = serde_yaml::from_str(contents)?;

    let is_secret_manifest = document
        .get("kind")
        .and_then(serde_yaml::Value::as_str)
        .is_some_and(|kind| kind == "Secret");

    if is_secret_manifest {
        let secret: Secret = serde_yaml::from_value(document)?;
        return secret_to_params(&secret);
    }

    let raw: BTreeMap<String, serde_yaml::Value> = serde_yaml::from_value(document)?;
    raw.into_iter()
        .map(|(key, value)| {
            match value {
                serde_yaml::Value::String(s) => Ok((key, s)),
                serde_yaml::Value::Bool(_) | serde_yaml::Value::Number(_) => Err(anyhow::anyhow!(
                    "Value of '{key}' is not a string; quote it to keep its exact text"
                )),
                other => Err(anyhow::anyhow!(
                    "Value of '{key}' must be a string, got {other:?}"
                )),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::ByteString;

    fn reference(namespace: Option<&str>, name: Option<&str>) -> SecretReference {
        SecretReference {
            name: name.map(str::to_string),
            namespace: namespace.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_secret_reference() {
        let r = parse_secret_reference("manila/os-creds").unwrap();
        assert_eq!(r.namespace.as_deref(), Some("manila"));
        assert_eq!(r.name.as_deref(), Some("os-creds"));

        let r = parse_secret_reference("os-creds").unwrap();
        assert_eq!(r.namespace, None);
        assert_eq!(r.name.as_deref(), Some("os-creds"));

        for invalid in ["", "manila/", "/os-creds", "a/b/c"] {
            assert!(
                parse_secret_reference(invalid).is_err(),
                "'{invalid}' should be rejected"
            );
        }
    }

    #[test]
    fn test_resolve_reference_defaults_namespace() {
        let r = reference(None, Some("creds"));
        assert_eq!(resolve_reference(&r, "default").unwrap(), ("default", "creds"));

        let r = reference(Some(""), Some("creds"));
        assert_eq!(resolve_reference(&r, "default").unwrap(), ("default", "creds"));

        let r = reference(Some("manila"), Some("creds"));
        assert_eq!(resolve_reference(&r, "default").unwrap(), ("manila", "creds"));

        assert!(resolve_reference(&reference(Some("manila"), None), "default").is_err());
    }

    #[test]
    fn test_secret_to_params_merges_string_data() {
        let secret = Secret {
            data: Some(BTreeMap::from([
                ("os-authURL".to_string(), ByteString(b"http://x".to_vec())),
                ("os-region".to_string(), ByteString(b"RegionOne".to_vec())),
            ])),
            string_data: Some(BTreeMap::from([(
                "os-region".to_string(),
                "RegionTwo".to_string(),
            )])),
            ..Secret::default()
        };

        let params = secret_to_params(&secret).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params["os-authURL"], "http://x");
        assert_eq!(params["os-region"], "RegionTwo");
    }

    #[test]
    fn test_secret_to_params_rejects_binary_values() {
        let secret = Secret {
            data: Some(BTreeMap::from([(
                "os-password".to_string(),
                ByteString(vec![0xff, 0xfe]),
            )])),
            ..Secret::default()
        };
        let err = secret_to_params(&secret).unwrap_err();
        assert!(err.to_string().contains("os-password"));
    }

    #[test]
    fn test_parse_flat_map_keeps_literal_text() {
        let params = parse_params(
            "os-authURL: http://x\nos-TLSInsecure: \"True\"\nos-projectID: '0x1F'\nos-userID: \" u \"\n",
        )
        .unwrap();
        assert_eq!(params["os-authURL"], "http://x");
        assert_eq!(params["os-TLSInsecure"], "True");
        assert_eq!(params["os-projectID"], "0x1F");
        assert_eq!(params["os-userID"], " u ");
    }

    #[test]
    fn test_parse_rejects_unquoted_booleans_and_numbers() {
        for document in [
            "os-TLSInsecure: True\n",
            "os-TLSInsecure: true\n",
            "os-projectID: 0x1F\n",
            "os-domainID: 1e3\n",
            "os-userID: 42\n",
        ] {
            let err = parse_params(document).unwrap_err();
            assert!(
                err.to_string().contains("quote it"),
                "'{document}' should be rejected, got {err}"
            );
        }
    }

    #[test]
    fn test_parse_flat_json_map() {
        let params = parse_params(r#"{"os-authURL": "http://x", "os-password": "p"}"#).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params["os-password"], "p");
    }

    #[test]
    fn test_parse_rejects_nested_values() {
        assert!(parse_params("os-authURL:\n  nested: true\n").is_err());
    }

    #[test]
    fn test_parse_secret_manifest() {
        let manifest = r"
apiVersion: v1
kind: Secret
metadata:
  name: os-creds
  namespace: manila
data:
  os-authURL: aHR0cDovL3g=
stringData:
  os-password: p
";
        let params = parse_params(manifest).unwrap();
        assert_eq!(params["os-authURL"], "http://x");
        assert_eq!(params["os-password"], "p");
    }

    #[test]
    fn test_read_params_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.yaml");
        std::fs::write(&path, "os-authURL: http://x\n").unwrap();

        let params = read_params_file(&path).unwrap();
        assert_eq!(params["os-authURL"], "http://x");

        assert!(read_params_file(&dir.path().join("missing.yaml")).is_err());
    }

    #[tokio::test]
    async fn test_static_source() {
        let mut source = StaticSecretSource::new("default");
        source.insert(
            "default",
            "creds",
            ParameterMap::from([("os-authURL".to_string(), "http://x".to_string())]),
        );

        let params = source.read_secret(&reference(None, Some("creds"))).await.unwrap();
        assert_eq!(params["os-authURL"], "http://x");

        let err = source
            .read_secret(&reference(Some("other"), Some("creds")))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "secret other/creds not found");
    }
}
