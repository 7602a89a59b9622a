use chrono::{DateTime, Utc};

model! {
    /// Configuration of an OpenID Connect provider used by the cluster's
    /// service accounts to assume cloud roles.
    pub class OidcConfig("OidcConfig") {
        creation_timestamp: DateTime<Utc> => "creation_timestamp",
        /// ARN of the installer role used to create the configuration.
        installer_role_arn: String => "installer_role_arn",
        /// URL of the issuer of the tokens.
        issuer_url: String => "issuer_url",
        last_updated_timestamp: DateTime<Utc> => "last_updated_timestamp",
        last_used_timestamp: DateTime<Utc> => "last_used_timestamp",
        /// Whether the configuration is managed by the service.
        managed: bool => "managed",
        organization_id: String => "organization_id",
        /// Whether the configuration can be shared by several clusters.
        reusable: bool => "reusable",
        /// ARN of the secret holding the private key, for unmanaged configurations.
        secret_arn: String => "secret_arn",
    }
}
