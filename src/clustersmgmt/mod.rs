//! Types of the clusters management service.

mod aws;
mod cluster;
mod console;
mod ingress;
mod oidc;

pub use aws::{Aws, AwsAttribute, AwsBuilder, OperatorIamRole, OperatorIamRoleAttribute, OperatorIamRoleBuilder, Sts, StsAttribute, StsBuilder};
pub use cluster::{
    Cluster, ClusterAttribute, ClusterBuilder, ClusterHealthState, ClusterList, ClusterListBuilder, ClusterState,
    ClusterStatus, ClusterStatusAttribute, ClusterStatusBuilder,
};
pub use console::{ClusterApi, ClusterApiAttribute, ClusterApiBuilder, ClusterConsole, ClusterConsoleAttribute, ClusterConsoleBuilder, ListeningMethod};
pub use ingress::{Ingress, IngressAttribute, IngressBuilder, IngressList, IngressListBuilder};
pub use oidc::{OidcConfig, OidcConfigAttribute, OidcConfigBuilder};
