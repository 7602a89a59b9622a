string_enum! {
    /// How the API server of a cluster can be reached.
    pub enum ListeningMethod {
        External => "external",
        Internal => "internal",
    }
}

model! {
    /// Information about the console of a cluster.
    pub struct ClusterConsole {
        /// The URL of the console of the cluster.
        url: String => "url",
    }
}

model! {
    /// Information about the API of a cluster.
    pub struct ClusterApi {
        /// The URL of the API server of the cluster.
        url: String => "url",
        /// Whether the API is reachable from outside the cluster network.
        listening: ListeningMethod => "listening",
    }
}
