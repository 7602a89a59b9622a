use super::OidcConfig;
use std::collections::BTreeMap;

model! {
    /// Role that an operator of the cluster assumes through STS.
    pub struct OperatorIamRole {
        id: String => "id",
        /// Name of the operator's credentials request.
        name: String => "name",
        namespace: String => "namespace",
        role_arn: String => "role_arn",
        /// Service account of the operator inside the cluster.
        service_account: String => "service_account",
    }
}

model! {
    /// Security Token Service settings of a cluster.
    pub struct Sts {
        auto_mode: bool => "auto_mode",
        external_id: String => "external_id",
        /// Whether the account roles use AWS managed policies.
        managed_policies: bool => "managed_policies",
        oidc_config: OidcConfig => "oidc_config",
        /// Roles of the cluster operators, one per credentials request.
        operator_iam_roles: Vec<OperatorIamRole> => "operator_iam_roles",
        operator_role_prefix: String => "operator_role_prefix",
        /// ARN of the installer role.
        role_arn: String => "role_arn",
        support_role_arn: String => "support_role_arn",
    }
}

model! {
    /// Amazon Web Services settings of a cluster.
    pub struct Aws {
        account_id: String => "account_id",
        private_link: bool => "private_link",
        sts: Sts => "sts",
        /// Subnets the cluster is installed into.
        subnet_ids: Vec<String> => "subnet_ids",
        /// Extra tags applied to the cloud resources of the cluster.
        tags: BTreeMap<String, String> => "tags",
    }
}
