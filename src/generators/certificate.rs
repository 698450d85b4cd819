//! Leaf certificate generation.
//!
//! Issues an ECDSA P-256 leaf certificate signed by the deployment's root
//! of trust ([`super::CaProvider`]). The response carries the leaf
//! certificate, its private key, and the root's public certificate so the
//! caller can assemble a trust chain.

use std::sync::Arc;

use async_trait::async_trait;
use rcgen::{
    Certificate, CertificateParams, DnType, ExtendedKeyUsagePurpose, IsCa, KeyPair,
    KeyUsagePurpose, PKCS_ECDSA_P256_SHA256,
};
use serde::Deserialize;
use serde_json::Value;
use time::{Duration, OffsetDateTime};

use crate::errors::{Error, Result};

use super::{CaPair, CaProvider, ValueGenerator};

const LEAF_VALIDITY_DAYS: i64 = 365;

/// Generator-specific parameters carried in the POST body
#[derive(Debug, Default, Deserialize)]
pub struct CertificateParameters {
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub alternative_names: Vec<String>,
}

impl CertificateParameters {
    fn from_value(parameters: &Value) -> Result<Self> {
        if parameters.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(parameters.clone())
            .map_err(|e| Error::validation(format!("Invalid certificate parameters: {}", e)))
    }
}

/// Generates leaf certificates signed by the shared root of trust
pub struct CertificateGenerator {
    ca_provider: Arc<CaProvider>,
}

impl CertificateGenerator {
    pub fn new(ca_provider: Arc<CaProvider>) -> Self {
        Self { ca_provider }
    }
}

#[async_trait]
impl ValueGenerator for CertificateGenerator {
    async fn generate(&self, parameters: &Value) -> Result<Value> {
        let params = CertificateParameters::from_value(parameters)?;
        let root = self.ca_provider.root().await?;

        let (issuer_cert, issuer_key) = rebuild_issuer(&root)?;

        let leaf_key = KeyPair::generate_for(&PKCS_ECDSA_P256_SHA256)
            .map_err(|e| Error::internal(format!("Failed to generate leaf key: {}", e)))?;

        let mut leaf_params = CertificateParams::new(params.alternative_names.clone())
            .map_err(|e| Error::validation(format!("Invalid alternative names: {}", e)))?;

        if let Some(common_name) = &params.common_name {
            leaf_params.distinguished_name.push(DnType::CommonName, common_name);
        }
        leaf_params.is_ca = IsCa::NoCa;
        leaf_params.key_usages =
            vec![KeyUsagePurpose::DigitalSignature, KeyUsagePurpose::KeyEncipherment];
        leaf_params.extended_key_usages =
            vec![ExtendedKeyUsagePurpose::ServerAuth, ExtendedKeyUsagePurpose::ClientAuth];

        let now = OffsetDateTime::now_utc();
        leaf_params.not_before = now - Duration::days(1);
        leaf_params.not_after = now + Duration::days(LEAF_VALIDITY_DAYS);

        let leaf = leaf_params
            .signed_by(&leaf_key, &issuer_cert, &issuer_key)
            .map_err(|e| Error::internal(format!("Failed to sign leaf certificate: {}", e)))?;

        Ok(serde_json::json!({
            "certificate": leaf.pem(),
            "private_key": leaf_key.serialize_pem(),
            "ca": root.certificate,
        }))
    }
}

/// Reconstruct an rcgen issuer from the persisted root PEMs.
///
/// The regenerated `Certificate` carries the same subject and key as the
/// stored root, so leaves signed with it verify against the persisted
/// `ca` PEM handed to callers.
fn rebuild_issuer(root: &CaPair) -> Result<(Certificate, KeyPair)> {
    let issuer_key = KeyPair::from_pem(&root.private_key)
        .map_err(|e| Error::internal(format!("Stored root key is invalid: {}", e)))?;

    let issuer_params = CertificateParams::from_ca_cert_pem(&root.certificate)
        .map_err(|e| Error::internal(format!("Stored root certificate is invalid: {}", e)))?;

    let issuer_cert = issuer_params
        .self_signed(&issuer_key)
        .map_err(|e| Error::internal(format!("Failed to rebuild root issuer: {}", e)))?;

    Ok((issuer_cert, issuer_key))
}
