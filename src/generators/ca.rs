//! Root of trust for certificate generation.
//!
//! The root certificate/key pair is itself a stored configuration: on
//! first use it is generated self-signed and persisted under a reserved
//! name, and every later certificate request reloads it from the store so
//! all leaves issued by one deployment chain to the same root. The root's
//! private key never leaves the server.

use rcgen::{
    BasicConstraints, CertificateParams, DnType, IsCa, KeyPair, KeyUsagePurpose,
    PKCS_ECDSA_P256_SHA256,
};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::config::CaConfig;
use crate::errors::{Error, Result};
use crate::storage::SharedStore;

const ROOT_VALIDITY_DAYS: i64 = 365;

/// PEM-encoded root certificate and private key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaPair {
    pub certificate: String,
    pub private_key: String,
}

/// Lazily-created, store-backed root certificate provider.
///
/// Injected into the generator factory as an explicit collaborator rather
/// than living as process-global state, so tests can hand it any store.
pub struct CaProvider {
    store: SharedStore,
    config: CaConfig,
}

impl CaProvider {
    pub fn new(store: SharedStore, config: CaConfig) -> Self {
        Self { store, config }
    }

    /// Return the deployment's root pair, generating and persisting it on
    /// first use.
    pub async fn root(&self) -> Result<CaPair> {
        if let Some(existing) = self.store.get_by_name(&self.config.storage_name).await? {
            return parse_stored_root(&existing.value);
        }

        let pair = generate_root(&self.config.common_name)?;

        let envelope = serde_json::json!({ "value": &pair });
        self.store.put(&self.config.storage_name, &envelope.to_string()).await?;

        tracing::info!(
            ca_name = %self.config.storage_name,
            common_name = %self.config.common_name,
            "Generated and persisted new root certificate"
        );

        // Re-read so concurrent first-use requests converge on whichever
        // root the store retained.
        match self.store.get_by_name(&self.config.storage_name).await? {
            Some(stored) => parse_stored_root(&stored.value),
            None => Ok(pair),
        }
    }
}

fn parse_stored_root(raw: &str) -> Result<CaPair> {
    #[derive(Deserialize)]
    struct Envelope {
        value: CaPair,
    }

    let envelope: Envelope = serde_json::from_str(raw)
        .map_err(|e| Error::serialization(e, "Stored root certificate is malformed"))?;
    Ok(envelope.value)
}

/// Generate a self-signed ECDSA P-256 root certificate
fn generate_root(common_name: &str) -> Result<CaPair> {
    let key = KeyPair::generate_for(&PKCS_ECDSA_P256_SHA256)
        .map_err(|e| Error::internal(format!("Failed to generate root key: {}", e)))?;

    let mut params = CertificateParams::default();
    params.distinguished_name.push(DnType::CommonName, common_name);
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.key_usages =
        vec![KeyUsagePurpose::KeyCertSign, KeyUsagePurpose::CrlSign, KeyUsagePurpose::DigitalSignature];

    let now = OffsetDateTime::now_utc();
    params.not_before = now - Duration::days(1);
    params.not_after = now + Duration::days(ROOT_VALIDITY_DAYS);

    let certificate = params
        .self_signed(&key)
        .map_err(|e| Error::internal(format!("Failed to self-sign root certificate: {}", e)))?;

    Ok(CaPair { certificate: certificate.pem(), private_key: key.serialize_pem() })
}
