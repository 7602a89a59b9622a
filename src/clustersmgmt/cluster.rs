use super::{Aws, ClusterApi, ClusterConsole, IngressList};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

string_enum! {
    /// Overall state of a cluster.
    pub enum ClusterState {
        Error => "error",
        Hibernating => "hibernating",
        Installing => "installing",
        Pending => "pending",
        PoweringDown => "powering_down",
        Ready => "ready",
        Resuming => "resuming",
        Uninstalling => "uninstalling",
        Unknown => "unknown",
        Validating => "validating",
        Waiting => "waiting",
    }
}

string_enum! {
    /// Overall health of a cluster.
    pub enum ClusterHealthState {
        Healthy => "healthy",
        Unhealthy => "unhealthy",
        Unknown => "unknown",
    }
}

model! {
    /// Detailed status of a cluster.
    pub struct ClusterStatus {
        configuration_mode: String => "configuration_mode",
        description: String => "description",
        dns_ready: bool => "dns_ready",
        limited_support_reason_count: i64 => "limited_support_reason_count",
        /// Error code set when the provisioning failed.
        provision_error_code: String => "provision_error_code",
        provision_error_message: String => "provision_error_message",
        state: ClusterState => "state",
    }
}

model! {
    /// Definition of an OpenShift cluster.
    ///
    /// When a cluster is retrieved, references to other objects may be links
    /// that only carry their `kind`, `id` and `href`.
    pub class Cluster("Cluster") {
        api: ClusterApi => "api",
        aws: Aws => "aws",
        console: ClusterConsole => "console",
        creation_timestamp: DateTime<Utc> => "creation_timestamp",
        /// Date and time when the cluster will be deleted automatically.
        expiration_timestamp: DateTime<Utc> => "expiration_timestamp",
        external_id: String => "external_id",
        /// Whether the cluster uses FIPS validated cryptography.
        fips: bool => "fips",
        health_state: ClusterHealthState => "health_state",
        /// Ingresses of the cluster, usually a link to the collection.
        ingresses: IngressList => "ingresses",
        load_balancer_quota: i64 => "load_balancer_quota",
        multi_az: bool => "multi_az",
        /// Name of the cluster, unique within the organization.
        name: String => "name",
        openshift_version: String => "openshift_version",
        /// Free form properties of the cluster.
        properties: BTreeMap<String, String> => "properties",
        state: ClusterState => "state",
        status: ClusterStatus => "status",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustersmgmt::{ListeningMethod, OidcConfig, Sts};
    use crate::{marshal_list, to_string, unmarshal, unmarshal_list, unmarshal_partial, FieldErrorReason};
    use chrono::TimeZone;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn sample() -> Cluster {
        let mut properties = BTreeMap::new();
        properties.insert("provisioner".to_string(), "rosa-cli".to_string());

        Cluster::builder()
            .id("1234567890abcdef")
            .href("/api/clusters_mgmt/v1/clusters/1234567890abcdef")
            .name("prod-east")
            .api(ClusterApi::builder().url("https://api.prod-east.example.com:6443").listening(ListeningMethod::External))
            .console(ClusterConsole::builder().url("https://console.prod-east.example.com"))
            .aws(Aws::builder().account_id("123456789012").sts(
                Sts::builder().oidc_config(OidcConfig::builder().link(true).id("23ab").href("/api/clusters_mgmt/v1/oidc_configs/23ab")),
            ))
            .creation_timestamp(Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap())
            .health_state(ClusterHealthState::Healthy)
            .load_balancer_quota(0)
            .multi_az(false)
            .properties(properties)
            .state(ClusterState::Ready)
            .build()
    }

    #[test]
    fn round_trip_keeps_set_attributes_only() {
        let cluster = sample();
        let json = to_string(&cluster).unwrap();
        let decoded: Cluster = unmarshal(json.as_str()).unwrap();
        assert_eq!(decoded, cluster);
        assert!(!decoded.is_set(ClusterAttribute::Fips));
        assert!(!decoded.is_set(ClusterAttribute::ExpirationTimestamp));
        assert!(decoded.is_set(ClusterAttribute::MultiAz));
        assert!(decoded.is_set(ClusterAttribute::LoadBalancerQuota));
        assert_eq!(decoded.aws().sts().oidc_config().kind(), "OidcConfigLink");
    }

    #[test]
    fn writes_in_declared_order() {
        let cluster = Cluster::builder()
            .state(ClusterState::Installing)
            .name("dev")
            .multi_az(true)
            .id("42")
            .build();
        assert_eq!(
            to_string(&cluster).unwrap(),
            r#"{"kind":"Cluster","id":"42","multi_az":true,"name":"dev","state":"installing"}"#
        );
    }

    #[test]
    fn zero_values_are_present_when_decoded() {
        let cluster: Cluster = unmarshal(r#"{"fips": false, "load_balancer_quota": 0, "name": ""}"#).unwrap();
        assert_eq!(cluster.get_fips(), Some(false));
        assert_eq!(cluster.get_load_balancer_quota(), Some(0));
        assert_eq!(cluster.get_name(), Some(""));
        assert_eq!(cluster.get_multi_az(), None);
    }

    #[test]
    fn unset_attributes_read_as_defaults() {
        let cluster = Cluster::builder().build();
        assert!(cluster.empty());
        assert_eq!(cluster.name(), "");
        assert!(!cluster.fips());
        assert_eq!(cluster.load_balancer_quota(), 0);
        assert_eq!(cluster.state(), &ClusterState::default());
        assert!(cluster.console().empty());
        assert_eq!(cluster.creation_timestamp(), DateTime::<Utc>::default());
        assert_eq!(cluster.get_console(), None);
        assert_eq!(cluster.kind(), "Cluster");
    }

    #[test]
    fn unknown_attributes_are_ignored() {
        let json = indoc! {r#"
            {
              "kind": "Cluster",
              "id": "42",
              "mystery_field": 42,
              "future_object": {"nested": [1, {"deep": null}]},
              "name": "dev"
            }
        "#};
        let cluster: Cluster = unmarshal(json).unwrap();
        assert_eq!(cluster.id(), "42");
        assert_eq!(cluster.name(), "dev");
        assert_eq!(to_string(&cluster).unwrap(), r#"{"kind":"Cluster","id":"42","name":"dev"}"#);
    }

    #[test]
    fn null_sets_attribute_to_zero_value() {
        let cluster: Cluster =
            unmarshal(r#"{"name": null, "console": null, "load_balancer_quota": null, "ingresses": null}"#).unwrap();
        assert!(cluster.is_set(ClusterAttribute::Name));
        assert_eq!(cluster.get_name(), Some(""));
        assert!(cluster.get_console().map_or(false, ClusterConsole::empty));
        assert_eq!(cluster.get_load_balancer_quota(), Some(0));
        assert!(cluster.is_set(ClusterAttribute::Ingresses));
        assert_eq!(cluster.get_multi_az(), None);
        assert!(!cluster.empty());
        assert_eq!(
            to_string(&cluster).unwrap(),
            r#"{"kind":"Cluster","console":{},"ingresses":{"kind":"IngressList"},"load_balancer_quota":0,"name":""}"#
        );
    }

    #[test]
    fn default_value_set_after_clear_is_written() {
        let mut builder = Cluster::builder();
        builder.name("prod-east").multi_az(true);
        builder.clear(ClusterAttribute::Name).clear(ClusterAttribute::MultiAz);
        assert!(builder.empty());

        builder.name("").multi_az(false);
        let cluster = builder.build();
        assert_eq!(cluster.get_name(), Some(""));
        assert_eq!(cluster.get_multi_az(), Some(false));
        assert_eq!(
            to_string(&cluster).unwrap(),
            r#"{"kind":"Cluster","multi_az":false,"name":""}"#
        );
    }

    #[test]
    fn enum_from_number_is_reported() {
        let partial = unmarshal_partial::<Cluster>(r#"{"state": 3, "name": "dev"}"#).unwrap();
        assert_eq!(partial.value.get_state(), None);
        assert_eq!(partial.value.name(), "dev");
        assert_eq!(partial.errors.len(), 1);
        assert_eq!(partial.errors[0].path, "state");
        assert_eq!(
            partial.errors[0].reason,
            FieldErrorReason::UnexpectedType {
                expected: "string",
                found: "number"
            }
        );
    }

    #[test]
    fn nested_object_of_wrong_shape_is_reported() {
        let json = r#"{"name": "dev", "console": "https://console.example.com", "aws": [1], "multi_az": true}"#;
        let partial = unmarshal_partial::<Cluster>(json).unwrap();
        assert_eq!(partial.value.name(), "dev");
        assert_eq!(partial.value.get_multi_az(), Some(true));
        assert_eq!(partial.value.get_console(), None);
        assert_eq!(partial.value.get_aws(), None);
        let paths = partial.errors.iter().map(|err| err.path.as_str()).collect::<Vec<_>>();
        assert_eq!(paths, vec!["console", "aws"]);
    }

    #[test]
    fn ingresses_link_round_trips() {
        let cluster = Cluster::builder()
            .id("1a2b")
            .ingresses(IngressList::builder().link(true).href("/api/clusters_mgmt/v1/clusters/1a2b/ingresses"))
            .build();
        let json = to_string(&cluster).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"kind":"Cluster","id":"1a2b","ingresses":{"kind":"IngressListLink","#,
                r#""href":"/api/clusters_mgmt/v1/clusters/1a2b/ingresses"}}"#
            )
        );
        let decoded: Cluster = unmarshal(json.as_str()).unwrap();
        assert!(decoded.ingresses().link());
        assert_eq!(decoded, cluster);
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let cluster: Cluster = unmarshal(r#"{"name": "first", "name": "second"}"#).unwrap();
        assert_eq!(cluster.name(), "second");
    }

    #[test]
    fn copy_is_independent() {
        let original = sample();
        let mut builder = ClusterBuilder::new();
        builder.copy(&original);
        let copy = builder.build();
        assert_eq!(copy, original);

        builder.name("renamed").fips(true);
        assert_eq!(original.name(), "prod-east");
        assert_eq!(original.get_fips(), None);
        assert_eq!(copy.name(), "prod-east");
        assert_eq!(builder.build().name(), "renamed");
    }

    #[test]
    fn copy_replaces_prior_state() {
        let mut builder = Cluster::builder();
        builder.name("old").fips(true);
        builder.copy(&Cluster::builder().id("7").build());
        let cluster = builder.build();
        assert_eq!(cluster.get_name(), None);
        assert_eq!(cluster.get_fips(), None);
        assert_eq!(cluster.id(), "7");
    }

    #[test]
    fn copy_of_none_is_a_no_op() {
        let mut builder = Cluster::builder();
        builder.name("kept");
        builder.copy(None::<&Cluster>);
        assert_eq!(builder.build().name(), "kept");
    }

    #[test]
    fn to_builder_edits_a_copy() {
        let original = sample();
        let edited = original.to_builder().state(ClusterState::Hibernating).build();
        assert_eq!(original.state(), &ClusterState::Ready);
        assert_eq!(edited.state(), &ClusterState::Hibernating);
        assert_eq!(edited.name(), original.name());
    }

    #[test]
    fn bad_timestamp_reports_after_whole_object() {
        let json = r#"{
            "creation_timestamp": "not-a-date",
            "name": "dev",
            "status": {"state": "error", "dns_ready": "maybe", "description": "boom"}
        }"#;
        let partial = unmarshal_partial::<Cluster>(json).unwrap();
        assert_eq!(partial.value.name(), "dev");
        assert_eq!(partial.value.get_creation_timestamp(), None);
        assert_eq!(partial.value.status().state(), &ClusterState::Error);
        assert_eq!(partial.value.status().description(), "boom");
        assert_eq!(partial.value.status().get_dns_ready(), None);

        let paths = partial.errors.iter().map(|err| err.path.clone()).collect::<Vec<_>>();
        assert_eq!(paths, vec!["creation_timestamp".to_string(), "status.dns_ready".to_string()]);
    }

    #[test]
    fn lists_of_clusters() {
        let clusters = vec![
            Cluster::builder().id("a").build(),
            Cluster::builder().link(true).id("b").build(),
        ];
        let mut buf = Vec::new();
        marshal_list(&clusters, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf.clone()).unwrap(),
            r#"[{"kind":"Cluster","id":"a"},{"kind":"ClusterLink","id":"b"}]"#
        );
        assert_eq!(unmarshal_list::<Cluster>(&buf).unwrap(), clusters);
    }

    #[test]
    fn state_lists_keep_unknown_values() {
        let states = unmarshal_list::<ClusterState>(r#"["ready", "hibernating", "Unknown_Future_State"]"#).unwrap();
        assert_eq!(
            states,
            vec![
                ClusterState::Ready,
                ClusterState::Hibernating,
                ClusterState::Other("Unknown_Future_State".to_string()),
            ]
        );
        assert_eq!(to_string(&states).unwrap(), r#"["ready","hibernating","Unknown_Future_State"]"#);
    }
}
