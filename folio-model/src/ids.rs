use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize)
        )]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $name {
            pub fn new() -> Self {
                $name(Uuid::now_v7())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                $name(value)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map($name)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Strongly typed ID for portfolio projects
    ProjectID
);
uuid_id!(
    /// Strongly typed ID for rows of a project's media gallery
    MediaRecordID
);
uuid_id!(
    /// Strongly typed ID for studio students
    StudentID
);
uuid_id!(
    /// Strongly typed ID for studio services (courses, workshops)
    ServiceID
);
uuid_id!(
    /// Strongly typed ID for authenticated accounts
    UserID
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hyphenated_uuid_with_whitespace() {
        let raw = " 0190c3c4-5b7e-7cc1-9e57-1b8f3a1e2d10 ";
        let id: ProjectID = raw.parse().expect("valid uuid");
        assert_eq!(id.to_string(), raw.trim());
    }

    #[test]
    fn rejects_garbage() {
        assert!("not-a-project".parse::<ProjectID>().is_err());
    }
}
