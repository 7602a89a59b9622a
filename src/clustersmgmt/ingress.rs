use super::ListeningMethod;
use std::collections::BTreeMap;

model! {
    /// Representation of an ingress of a cluster.
    pub class Ingress("Ingress") {
        /// Whether this is the default ingress of the cluster.
        is_default: bool => "default",
        dns_name: String => "dns_name",
        listening: ListeningMethod => "listening",
        /// Labels selecting the routes served by the ingress.
        route_selectors: BTreeMap<String, String> => "route_selectors",
    }
}
