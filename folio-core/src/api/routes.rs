macro_rules! v1_path {
    ($path:literal) => {
        concat!("/api/v1", $path)
    };
}

pub const HEALTH: &str = "/health";

/// Versioned API route definitions shared by the server and its tests
pub mod v1 {
    pub const ROOT: &str = "/api/v1";

    pub mod media {
        /// Reconcile a project's media against an explicit folder URL.
        pub const DRIVE_SYNC: &str = v1_path!("/media/drive-sync");
    }

    pub mod projects {
        pub const MEDIA: &str = v1_path!("/projects/{id}/media");
        pub const MEDIA_RESYNC: &str = v1_path!("/projects/{id}/media/resync");
    }

    pub mod students {
        pub const SERVICES: &str = v1_path!("/students/{id}/services");
    }
}

/// Strip the `/api/v1` prefix so a path can be mounted under a nested router.
pub fn v1_relative(path: &'static str) -> &'static str {
    path.strip_prefix(v1::ROOT).unwrap_or(path)
}

/// Substitute the `{id}` placeholder of a route template.
pub fn with_id(template: &str, id: impl std::fmt::Display) -> String {
    template.replace("{id}", &id.to_string())
}
